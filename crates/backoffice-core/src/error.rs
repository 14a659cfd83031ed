use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};

/// Render the JSON error body every service error uses:
/// `{ "kind": .., "message": .. }` plus an optional `errors` object.
pub fn error_response(
    status: StatusCode,
    kind: &str,
    message: String,
    errors: Option<serde_json::Value>,
) -> Response {
    let mut body = serde_json::json!({
        "kind": kind,
        "message": message,
    });
    if let Some(errors) = errors {
        body["errors"] = errors;
    }
    (status, axum::Json(body)).into_response()
}

/// Errors raised by shared plumbing rather than by a service operation.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("not found")]
    NotFound,
    #[error("service unavailable")]
    Unavailable(#[source] anyhow::Error),
}

impl AppError {
    pub fn kind(&self) -> &'static str {
        match self {
            Self::NotFound => "NOT_FOUND",
            Self::Unavailable(_) => "UNAVAILABLE",
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = match &self {
            AppError::NotFound => StatusCode::NOT_FOUND,
            AppError::Unavailable(_) => StatusCode::SERVICE_UNAVAILABLE,
        };
        if let Self::Unavailable(ref e) = self {
            tracing::error!(error = %e, kind = self.kind(), "dependency unavailable");
        }
        error_response(status, self.kind(), self.to_string(), None)
    }
}

/// Fallback handler for unmatched routes.
pub async fn not_found() -> AppError {
    AppError::NotFound
}

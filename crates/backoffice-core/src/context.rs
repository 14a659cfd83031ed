//! Per-request context handed explicitly to every operation.

use std::convert::Infallible;

use axum::extract::FromRequestParts;
use axum::http::request::Parts;
use uuid::Uuid;

use crate::middleware::REQUEST_ID_HEADER;

/// What an operation knows about the request that triggered it.
///
/// Extracted from the `x-request-id` header set by
/// [`request_id_layer`](crate::middleware::request_id_layer); a fresh id is
/// generated when the header is missing, so extraction never fails.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RequestContext {
    pub request_id: String,
}

impl RequestContext {
    pub fn new(request_id: impl Into<String>) -> Self {
        Self {
            request_id: request_id.into(),
        }
    }

    /// Context for work not started by an HTTP request (CLI, tests).
    pub fn detached() -> Self {
        Self::new(Uuid::new_v4().to_string())
    }
}

impl<S> FromRequestParts<S> for RequestContext
where
    S: Send + Sync,
{
    type Rejection = Infallible;

    // Read the header synchronously and return a 'static future so the
    // borrow of `parts` does not leak into it.
    fn from_request_parts(
        parts: &mut Parts,
        _state: &S,
    ) -> impl std::future::Future<Output = Result<Self, Self::Rejection>> + Send {
        let request_id = parts
            .headers
            .get(REQUEST_ID_HEADER)
            .and_then(|v| v.to_str().ok())
            .filter(|s| !s.is_empty())
            .map(str::to_owned);

        async move {
            Ok(match request_id {
                Some(id) => Self::new(id),
                None => Self::detached(),
            })
        }
    }
}

use axum::extract::FromRequest;

pub mod health;
pub mod orders;
pub mod products;

/// `Json` whose rejection renders as a validation error in the service's
/// JSON error shape.
#[derive(FromRequest)]
#[from_request(via(axum::Json), rejection(crate::error::AdminServiceError))]
pub struct JsonBody<T>(pub T);

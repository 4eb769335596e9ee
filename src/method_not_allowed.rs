//! The fallback route handler for known paths requested with an unsupported method.
use axum::response::{IntoResponse, Response};

use crate::Error;

pub async fn get_405_method_not_allowed() -> Response {
    Error::MethodNotAllowed.into_response()
}

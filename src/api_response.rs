//! The JSON envelopes shared by the REST API and its client.

use serde::{Deserialize, Serialize};

/// The body of every successful API response.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ApiResponse<T> {
    /// Always `true`.
    pub success: bool,
    /// The payload of the response.
    pub data: T,
}

impl<T> ApiResponse<T> {
    /// Wrap `data` in a successful response.
    pub fn new(data: T) -> Self {
        Self {
            success: true,
            data,
        }
    }
}

/// The body of every failed API response.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ErrorResponse {
    /// Always `false`.
    pub success: bool,
    /// A message that is safe to show to the user.
    pub error: String,
}

impl ErrorResponse {
    /// Create a failed response with the message `error`.
    pub fn new(error: impl Into<String>) -> Self {
        Self {
            success: false,
            error: error.into(),
        }
    }
}

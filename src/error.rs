//! Defines the app level error type and its conversion to JSON error responses.
use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};

use crate::api_response::ErrorResponse;

/// The message sent to the client for errors that are not meant to be shown.
pub const SERVER_ERROR_MESSAGE: &str = "Server Error";

/// The errors that may occur in the application.
#[derive(Debug, thiserror::Error, PartialEq)]
pub enum Error {
    /// The transaction text was missing or only contained whitespace.
    #[error("Please add some text")]
    MissingText,

    /// The transaction amount was missing, not a number, or not finite.
    #[error("Please add a positive or negative number")]
    MissingAmount,

    /// The request body could not be parsed as a JSON object.
    #[error("Invalid request body: {0}")]
    InvalidBody(String),

    /// The requested resource was not found.
    ///
    /// For HTTP request handlers, the client should check that the parameters
    /// (e.g., ID) are correct and that the resource has been created.
    ///
    /// Internally, this error may occur when a query returns no rows.
    #[error("the requested resource could not be found")]
    NotFound,

    /// Tried to delete a transaction that does not exist
    #[error("No transaction found")]
    DeleteMissingTransaction,

    /// An unhandled/unexpected SQL error.
    #[error("an unexpected SQL error occurred: {0}")]
    SqlError(rusqlite::Error),

    /// Could not acquire the database lock
    #[error("could not acquire the database lock")]
    DatabaseLockError,

    /// The database connection could not be closed because other handles to it
    /// are still alive.
    #[error("the database is still in use by {0} other handles")]
    DatabaseInUse(usize),

    /// The request body is larger than the server accepts.
    #[error("Request body is too large")]
    PayloadTooLarge,

    /// The route exists but does not support the request method.
    #[error("Method not allowed")]
    MethodNotAllowed,
}

impl From<rusqlite::Error> for Error {
    fn from(value: rusqlite::Error) -> Self {
        match value {
            rusqlite::Error::QueryReturnedNoRows => Error::NotFound,
            error => {
                tracing::error!("an unhandled SQL error occurred: {}", error);
                Error::SqlError(error)
            }
        }
    }
}

impl Error {
    /// The HTTP status code the client should see for this error.
    pub fn status_code(&self) -> StatusCode {
        match self {
            Error::MissingText | Error::MissingAmount | Error::InvalidBody(_) => {
                StatusCode::BAD_REQUEST
            }
            Error::NotFound | Error::DeleteMissingTransaction => StatusCode::NOT_FOUND,
            Error::PayloadTooLarge => StatusCode::PAYLOAD_TOO_LARGE,
            Error::MethodNotAllowed => StatusCode::METHOD_NOT_ALLOWED,
            Error::SqlError(_) | Error::DatabaseLockError | Error::DatabaseInUse(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }
}

impl IntoResponse for Error {
    fn into_response(self) -> Response {
        let status_code = self.status_code();

        let message = if status_code.is_server_error() {
            // Server errors are logged here and not intended to be shown to the client.
            tracing::error!("An unexpected error occurred: {}", self);
            SERVER_ERROR_MESSAGE.to_owned()
        } else {
            self.to_string()
        };

        (status_code, Json(ErrorResponse::new(message))).into_response()
    }
}

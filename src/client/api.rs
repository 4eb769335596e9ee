//! The requests the client makes to the transaction REST API.

use std::future::Future;

use reqwest::{Response, StatusCode};
use serde::{Deserialize, Serialize, de::DeserializeOwned};

use crate::{
    ApiResponse, TransactionId,
    endpoints::{self, format_endpoint},
    transaction::Transaction,
};

/// The message shown to the user when the server did not explain what went wrong.
pub const GENERIC_ERROR_MESSAGE: &str = "Something went wrong";

/// The fields the user entered for a new transaction.
///
/// The amount is optional so that an incomplete form is still sent, and the
/// server decides whether it is valid.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TransactionDraft {
    /// Text detailing the transaction.
    pub text: String,
    /// The signed value of the transaction, omitted from the request when `None`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub amount: Option<f64>,
}

impl TransactionDraft {
    /// Create a draft with both fields filled in.
    pub fn new(text: impl Into<String>, amount: f64) -> Self {
        Self {
            text: text.into(),
            amount: Some(amount),
        }
    }
}

/// The ways a request to the API can fail.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ApiError {
    /// No response was received, e.g. the server is down.
    #[error("could not reach the server: {0}")]
    Transport(String),

    /// The server responded with an error status code.
    ///
    /// `message` is the `error` field of the response body, if there was one.
    #[error("the server responded with {status}: {}", .message.as_deref().unwrap_or("no message"))]
    Status {
        /// The HTTP status code of the response.
        status: u16,
        /// The message from the server that is safe to show to the user.
        message: Option<String>,
    },

    /// The response was successful but its body could not be parsed.
    #[error("could not read the server response: {0}")]
    Decode(String),
}

impl ApiError {
    /// The message supplied by the server, if any.
    pub fn message(&self) -> Option<&str> {
        match self {
            ApiError::Status { message, .. } => message.as_deref(),
            ApiError::Transport(_) | ApiError::Decode(_) => None,
        }
    }

    /// The message to show the user: the server's message, or [GENERIC_ERROR_MESSAGE].
    pub fn user_message(&self) -> String {
        self.message().unwrap_or(GENERIC_ERROR_MESSAGE).to_owned()
    }
}

/// The operations the transaction REST API offers.
pub trait TransactionApi {
    /// Get every transaction stored on the server.
    fn list(&self) -> impl Future<Output = Result<Vec<Transaction>, ApiError>> + Send;

    /// Ask the server to store a new transaction, returning it with its assigned ID.
    fn create(
        &self,
        draft: &TransactionDraft,
    ) -> impl Future<Output = Result<Transaction, ApiError>> + Send;

    /// Ask the server to delete the transaction with `id`, returning the deleted ID.
    fn delete(
        &self,
        id: TransactionId,
    ) -> impl Future<Output = Result<TransactionId, ApiError>> + Send;
}

/// A [TransactionApi] that talks to the server over HTTP.
#[derive(Debug, Clone)]
pub struct HttpTransactionApi {
    client: reqwest::Client,
    base_url: String,
}

impl HttpTransactionApi {
    /// Create an API client for the server at `base_url`, e.g. `http://localhost:5001`.
    pub fn new(base_url: impl Into<String>) -> Self {
        Self::with_client(reqwest::Client::new(), base_url)
    }

    /// Create an API client that sends requests with `client`.
    pub fn with_client(client: reqwest::Client, base_url: impl Into<String>) -> Self {
        let base_url = base_url.into().trim_end_matches('/').to_owned();

        Self { client, base_url }
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }
}

impl TransactionApi for HttpTransactionApi {
    /// The list is requested with a `POST` without a body, the same call that
    /// the server has always accepted for listing.
    async fn list(&self) -> Result<Vec<Transaction>, ApiError> {
        let response = self
            .client
            .post(self.url(endpoints::TRANSACTIONS_API))
            .send()
            .await
            .map_err(transport_error)?;

        parse_response(response).await
    }

    async fn create(&self, draft: &TransactionDraft) -> Result<Transaction, ApiError> {
        tracing::debug!("Sending transaction: {draft:?}");

        let response = self
            .client
            .post(self.url(endpoints::TRANSACTIONS_API))
            .json(draft)
            .send()
            .await
            .map_err(transport_error)?;

        parse_response(response).await
    }

    async fn delete(&self, id: TransactionId) -> Result<TransactionId, ApiError> {
        let response = self
            .client
            .delete(self.url(&format_endpoint(endpoints::TRANSACTION, id)))
            .send()
            .await
            .map_err(transport_error)?;

        parse_response(response).await
    }
}

fn transport_error(error: reqwest::Error) -> ApiError {
    tracing::warn!("Request failed: {error}");
    ApiError::Transport(error.to_string())
}

/// The body of a failed response, where every field may be missing.
#[derive(Debug, Deserialize)]
struct ErrorBody {
    #[serde(default)]
    error: Option<String>,
}

async fn parse_response<T: DeserializeOwned>(response: Response) -> Result<T, ApiError> {
    let status = response.status();

    if status.is_success() {
        return response
            .json::<ApiResponse<T>>()
            .await
            .map(|body| body.data)
            .map_err(|error| ApiError::Decode(error.to_string()));
    }

    let body = response.bytes().await.unwrap_or_default();

    Err(status_error(status, &body))
}

fn status_error(status: StatusCode, body: &[u8]) -> ApiError {
    let message = serde_json::from_slice::<ErrorBody>(body)
        .ok()
        .and_then(|body| body.error);

    ApiError::Status {
        status: status.as_u16(),
        message,
    }
}

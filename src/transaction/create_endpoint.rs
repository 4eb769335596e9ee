//! Defines the POST endpoint for the transaction collection.
//!
//! A POST without a body lists the transactions, a POST with a JSON body
//! creates a new transaction.
use std::sync::{Arc, Mutex};

use axum::{
    Json,
    body::Bytes,
    extract::{FromRef, State, rejection::BytesRejection},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use rusqlite::Connection;
use serde::Deserialize;

use crate::{
    AppState, Error,
    api_response::ApiResponse,
    transaction::{
        NewTransaction,
        core::create_transaction,
        list_endpoint::list_transactions,
    },
};

/// The state needed to list or create transactions.
#[derive(Debug, Clone)]
pub struct CreateTransactionState {
    /// The database connection for managing transactions.
    pub db_connection: Arc<Mutex<Connection>>,
}

impl FromRef<AppState> for CreateTransactionState {
    fn from_ref(state: &AppState) -> Self {
        Self {
            db_connection: state.db_connection.clone(),
        }
    }
}

/// The JSON body for creating a transaction.
///
/// Both fields are optional here so that missing fields are reported with
/// the validation messages from [NewTransaction::new].
#[derive(Debug, Deserialize)]
pub struct TransactionForm {
    /// Text detailing the transaction.
    #[serde(default)]
    pub text: Option<String>,
    /// The signed value of the transaction.
    #[serde(default)]
    pub amount: Option<f64>,
}

/// A route handler for POST requests to the transaction collection.
///
/// An empty (or whitespace only) body lists all transactions, otherwise the
/// body is parsed as a [TransactionForm] and a new transaction is created and
/// returned with the status code 201.
pub async fn post_transactions_endpoint(
    State(state): State<CreateTransactionState>,
    body: Result<Bytes, BytesRejection>,
) -> Result<Response, Error> {
    let body = body.map_err(|rejection| {
        tracing::debug!("could not read transaction body: {rejection}");
        match rejection.status() {
            StatusCode::PAYLOAD_TOO_LARGE => Error::PayloadTooLarge,
            _ => Error::InvalidBody(rejection.body_text()),
        }
    })?;

    if body.iter().all(u8::is_ascii_whitespace) {
        let transactions = list_transactions(&state.db_connection)?;

        return Ok(Json(ApiResponse::new(transactions)).into_response());
    }

    let form: TransactionForm = serde_json::from_slice(&body).map_err(|error| {
        tracing::debug!("could not parse transaction body: {error}");
        Error::InvalidBody(error.to_string())
    })?;

    let new_transaction = NewTransaction::new(form.text.as_deref(), form.amount)?;

    let connection = state.db_connection.lock().map_err(|error| {
        tracing::error!("could not acquire database lock: {error}");
        Error::DatabaseLockError
    })?;

    let transaction = create_transaction(new_transaction, &connection).inspect_err(|error| {
        tracing::error!("could not create transaction: {error}");
    })?;

    tracing::debug!("created transaction {}", transaction.id);

    Ok((StatusCode::CREATED, Json(ApiResponse::new(transaction))).into_response())
}

use std::sync::{Arc, Mutex};

use axum::{
    Json,
    extract::{FromRef, Path, State, rejection::PathRejection},
};
use rusqlite::Connection;

use crate::{
    AppState, Error, api_response::ApiResponse, database_id::TransactionId,
    transaction::core::delete_transaction,
};

/// The state needed to delete a transaction.
#[derive(Debug, Clone)]
pub struct DeleteTransactionState {
    /// The database connection for managing transactions.
    pub db_connection: Arc<Mutex<Connection>>,
}

impl FromRef<AppState> for DeleteTransactionState {
    fn from_ref(state: &AppState) -> Self {
        Self {
            db_connection: state.db_connection.clone(),
        }
    }
}

/// A route handler for deleting a transaction, responds with the deleted ID.
///
/// An ID that is not an integer cannot refer to a transaction, so it gets
/// the same 404 response as an ID that is not in the database.
pub async fn delete_transaction_endpoint(
    State(state): State<DeleteTransactionState>,
    transaction_id: Result<Path<TransactionId>, PathRejection>,
) -> Result<Json<ApiResponse<TransactionId>>, Error> {
    let Path(transaction_id) = transaction_id.map_err(|rejection| {
        tracing::debug!("invalid transaction ID: {rejection}");
        Error::DeleteMissingTransaction
    })?;

    let connection = state.db_connection.lock().map_err(|error| {
        tracing::error!("could not acquire database lock: {error}");
        Error::DatabaseLockError
    })?;

    let deleted_id = delete_transaction(transaction_id, &connection).inspect_err(|error| {
        tracing::debug!("could not delete transaction {transaction_id}: {error}");
    })?;

    Ok(Json(ApiResponse::new(deleted_id)))
}

#[cfg(test)]
mod tests {
    use std::sync::{Arc, Mutex};

    use axum::{Router, routing::delete};
    use axum_test::TestServer;
    use rusqlite::Connection;

    use crate::{
        api_response::{ApiResponse, ErrorResponse},
        db::initialize,
        transaction::{
            NewTransaction, count_transactions, create_transaction,
            delete_endpoint::{DeleteTransactionState, delete_transaction_endpoint},
        },
    };

    fn get_test_state() -> DeleteTransactionState {
        let connection = Connection::open_in_memory().unwrap();
        initialize(&connection).unwrap();

        DeleteTransactionState {
            db_connection: Arc::new(Mutex::new(connection)),
        }
    }

    fn get_test_server(state: DeleteTransactionState) -> TestServer {
        let app = Router::new()
            .route("/{transaction_id}", delete(delete_transaction_endpoint))
            .with_state(state);

        TestServer::try_new(app).expect("Could not create test server.")
    }

    #[tokio::test]
    async fn deletes_transaction() {
        let state = get_test_state();
        let transaction = {
            let connection = state.db_connection.lock().unwrap();
            create_transaction(
                NewTransaction::new(Some("Test"), Some(1.23)).unwrap(),
                &connection,
            )
            .unwrap()
        };
        let server = get_test_server(state.clone());

        let response = server.delete(&format!("/{}", transaction.id)).await;

        response.assert_status_ok();
        response.assert_json(&ApiResponse::new(transaction.id));
        let connection = state.db_connection.lock().unwrap();
        assert_eq!(count_transactions(&connection), Ok(0));
    }

    #[tokio::test]
    async fn delete_missing_transaction_is_not_found() {
        let state = get_test_state();
        {
            let connection = state.db_connection.lock().unwrap();
            create_transaction(
                NewTransaction::new(Some("Test"), Some(1.23)).unwrap(),
                &connection,
            )
            .unwrap();
        }
        let server = get_test_server(state.clone());

        let response = server.delete("/42").await;

        response.assert_status_not_found();
        response.assert_json(&ErrorResponse::new("No transaction found"));
        let connection = state.db_connection.lock().unwrap();
        assert_eq!(count_transactions(&connection), Ok(1));
    }

    #[tokio::test]
    async fn non_integer_id_is_not_found() {
        let server = get_test_server(get_test_state());

        let response = server.delete("/not-a-number").await;

        response.assert_status_not_found();
        response.assert_json(&ErrorResponse::new("No transaction found"));
    }
}

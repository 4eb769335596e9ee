/*! Initializing and closing the application's database. */

use std::sync::{Arc, Mutex};

use rusqlite::{Connection, Transaction as SqlTransaction};

use crate::{Error, transaction::create_transaction_table};

/// Create all of the database tables for the application.
///
/// Safe to call on a database that has already been initialized.
///
/// # Errors
/// This function may return a [rusqlite::Error] if something went wrong creating the tables.
pub fn initialize(connection: &Connection) -> Result<(), rusqlite::Error> {
    let transaction =
        SqlTransaction::new_unchecked(connection, rusqlite::TransactionBehavior::Exclusive)?;

    create_transaction_table(&transaction)?;

    transaction.commit()?;

    Ok(())
}

/// Close the shared database connection.
///
/// The connection can only be closed through the last handle to it.
///
/// # Errors
/// This function will return a:
/// - [Error::DatabaseInUse] if other handles to the connection are still alive,
///   in which case the connection stays open until they are dropped,
/// - or [Error::SqlError] if SQLite fails to close the connection.
pub fn close(connection: Arc<Mutex<Connection>>) -> Result<(), Error> {
    let connection = match Arc::try_unwrap(connection) {
        Ok(connection) => connection,
        Err(connection) => {
            let other_handles = Arc::strong_count(&connection) - 1;
            tracing::error!(
                "Could not close the database, {other_handles} other handles are still open"
            );
            return Err(Error::DatabaseInUse(other_handles));
        }
    };

    let connection = connection
        .into_inner()
        .unwrap_or_else(|poisoned| poisoned.into_inner());

    connection
        .close()
        .map_err(|(_connection, error)| Error::from(error))?;

    tracing::info!("Database connection closed");

    Ok(())
}

#[cfg(test)]
mod tests {
    use std::sync::{Arc, Mutex};

    use rusqlite::Connection;

    use crate::{
        Error,
        db::{close, initialize},
    };

    #[test]
    fn initialize_twice_succeeds() {
        let connection = Connection::open_in_memory().unwrap();

        initialize(&connection).expect("first initialize failed");
        initialize(&connection).expect("second initialize failed");
    }

    #[test]
    fn close_last_handle_succeeds() {
        let connection = Arc::new(Mutex::new(Connection::open_in_memory().unwrap()));

        assert_eq!(close(connection), Ok(()));
    }

    #[test]
    fn close_with_other_handles_is_an_error_and_keeps_connection_open() {
        let connection = Arc::new(Mutex::new(Connection::open_in_memory().unwrap()));
        let other_handle = connection.clone();

        assert_eq!(close(connection), Err(Error::DatabaseInUse(1)));

        let conn = other_handle.lock().unwrap();
        conn.execute("CREATE TABLE foo (id INTEGER)", ())
            .expect("connection should still be usable");
    }
}

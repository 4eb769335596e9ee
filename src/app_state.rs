//! Implements a struct that holds the state of the REST server.

use std::{
    path::Path,
    sync::{Arc, Mutex},
};

use rusqlite::Connection;

use crate::{Error, db::initialize};

/// The state of the REST server.
#[derive(Debug, Clone)]
pub struct AppState {
    /// The database connection
    pub db_connection: Arc<Mutex<Connection>>,
}

impl AppState {
    /// Create a new [AppState] with a SQLite database connection.
    ///
    /// This function will initialize the database by adding the tables for the domain models.
    ///
    /// # Errors
    /// Returns an error if the database cannot be initialized.
    pub fn new(db_connection: Connection) -> Result<Self, Error> {
        initialize(&db_connection)?;

        Ok(Self {
            db_connection: Arc::new(Mutex::new(db_connection)),
        })
    }

    /// Open the SQLite database at `db_path`, creating it if needed, and
    /// create an [AppState] with it.
    ///
    /// # Errors
    /// Returns an [Error::SqlError] if the database cannot be opened or initialized.
    pub fn open(db_path: &Path) -> Result<Self, Error> {
        let connection = Connection::open(db_path).inspect_err(|error| {
            tracing::error!(
                "Could not open the database at {}: {error}",
                db_path.display()
            );
        })?;

        Self::new(connection)
    }
}

#[cfg(test)]
mod tests {
    use std::{fs, path::PathBuf};

    use crate::{AppState, Error, transaction::count_transactions};

    fn temp_dir(name: &str) -> PathBuf {
        let dir = std::env::temp_dir().join(format!(
            "expense_tracker_{name}_{}",
            std::process::id()
        ));
        fs::create_dir_all(&dir).unwrap();
        dir
    }

    #[test]
    fn open_creates_and_initializes_database() {
        let dir = temp_dir("open");
        let db_path = dir.join("expenses.db");

        let state = AppState::open(&db_path).expect("Could not open database");

        assert!(db_path.exists());
        let connection = state.db_connection.lock().unwrap();
        assert_eq!(count_transactions(&connection), Ok(0));
        drop(connection);
        drop(state);
        fs::remove_dir_all(dir).unwrap();
    }

    #[test]
    fn open_fails_when_directory_is_missing() {
        let dir = temp_dir("missing");
        let db_path = dir.join("does_not_exist").join("expenses.db");

        let result = AppState::open(&db_path);

        assert!(
            matches!(result, Err(Error::SqlError(_))),
            "expected an SQL error, got {result:?}"
        );
        fs::remove_dir_all(dir).unwrap();
    }
}

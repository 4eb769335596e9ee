//! Transaction management for the expense tracker.
//!
//! This module contains everything related to transactions on the server:
//! - The `Transaction` model and `NewTransaction` for validating new transactions
//! - Database functions for storing, listing, and deleting transactions
//! - Route handlers for the transaction REST API

mod core;
mod create_endpoint;
mod delete_endpoint;
mod list_endpoint;

pub use core::{NewTransaction, Transaction, create_transaction_table};
pub use create_endpoint::post_transactions_endpoint;
pub use delete_endpoint::delete_transaction_endpoint;
pub use list_endpoint::list_transactions_endpoint;

#[cfg(test)]
pub use core::{count_transactions, create_transaction, get_transaction};

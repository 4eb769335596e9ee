//! An expense tracker for recording income and expenses and keeping an eye on
//! the running balance.
//!
//! This library provides:
//! - a REST API over a single collection of transactions stored in SQLite,
//! - and a client state controller that keeps a local copy of that collection
//!   in sync with the API.

#![warn(missing_docs)]

use std::{net::SocketAddr, time::Duration};

use axum_server::Handle;
use tokio::signal;

mod api_response;
mod app_state;
pub mod client;
mod config;
mod database_id;
pub mod db;
pub mod endpoints;
mod error;
mod format;
mod logging;
mod method_not_allowed;
mod not_found;
mod routing;
mod transaction;

pub use api_response::{ApiResponse, ErrorResponse};
pub use app_state::AppState;
pub use config::{Mode, RouterConfig};
pub use database_id::{DatabaseId, TransactionId};
pub use error::Error;
pub use format::currency;
pub use logging::{LOG_BODY_LENGTH_LIMIT, logging_middleware};
pub use routing::build_router;
pub use transaction::Transaction;

/// An async task that waits for either the ctrl+c or terminate signal, whichever comes first, and
/// then signals the server to shut down gracefully.
///
/// `handle` is a handle to an Axum `Server`.
pub async fn graceful_shutdown(handle: Handle<SocketAddr>) {
    let ctrl_c = async {
        if let Err(error) = signal::ctrl_c().await {
            tracing::error!("failed to listen for the Ctrl+C signal: {error}");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut terminate) => {
                terminate.recv().await;
            }
            Err(error) => {
                tracing::error!("failed to install the terminate signal handler: {error}");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            tracing::debug!("Received ctrl+c signal.");
            handle.graceful_shutdown(Some(Duration::from_secs(1)));
        },
        _ = terminate => {
            tracing::debug!("Received terminate signal.");
            handle.graceful_shutdown(Some(Duration::from_secs(1)));
        },
    }
}

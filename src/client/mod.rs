//! The client side of the expense tracker.
//!
//! A [StateController] keeps a local copy of the transactions stored by the
//! server. Every operation makes one request through a [TransactionApi] and
//! only changes the local state once the server has answered, either by
//! applying the confirmed change or by recording an error message.
//!
//! State changes go through [reduce], a pure function from the current
//! [ClientState] and an [Event] to the next state.

mod api;
mod controller;
mod state;

pub use api::{ApiError, GENERIC_ERROR_MESSAGE, HttpTransactionApi, TransactionApi, TransactionDraft};
pub use controller::StateController;
pub use state::{ClientState, Event, reduce};

//! Keeps the client's copy of the transactions in sync with the server.

use tokio::sync::watch;

use crate::{
    TransactionId,
    client::{
        api::{TransactionApi, TransactionDraft},
        state::{ClientState, Event, reduce},
    },
};

/// Mediates every change to the client's [ClientState].
///
/// Each operation makes exactly one request through `api` and applies the
/// result once the response arrives. Operations take `&self`, so several may
/// be in flight at once; their results are applied in the order the responses
/// arrive, and the last one applied wins.
///
/// Pass the controller to whatever needs it, and use [StateController::subscribe]
/// to be notified when the state changes.
#[derive(Debug)]
pub struct StateController<A> {
    api: A,
    state: watch::Sender<ClientState>,
}

impl<A: TransactionApi> StateController<A> {
    /// Create a controller in the initial loading state that talks to the server through `api`.
    pub fn new(api: A) -> Self {
        let (state, _) = watch::channel(ClientState::default());

        Self { api, state }
    }

    /// A snapshot of the current state.
    pub fn state(&self) -> ClientState {
        self.state.borrow().clone()
    }

    /// Get a receiver that is notified after every state change.
    pub fn subscribe(&self) -> watch::Receiver<ClientState> {
        self.state.subscribe()
    }

    /// Replace the local transactions with the full list from the server.
    pub async fn fetch_all(&self) {
        let event = match self.api.list().await {
            Ok(transactions) => Event::Loaded(transactions),
            Err(error) => {
                tracing::error!("Could not fetch transactions: {error}");
                Event::LoadFailed(error.user_message())
            }
        };

        self.dispatch(event);
    }

    /// Ask the server to create a transaction from `draft` and append the
    /// created transaction to the local state.
    pub async fn create(&self, draft: TransactionDraft) {
        let event = match self.api.create(&draft).await {
            Ok(transaction) => Event::Added(transaction),
            Err(error) => {
                tracing::error!("Could not add transaction {draft:?}: {error}");
                Event::Failed(error.user_message())
            }
        };

        self.dispatch(event);
    }

    /// Ask the server to delete the transaction with `id` and remove it from
    /// the local state.
    pub async fn remove(&self, id: TransactionId) {
        let event = match self.api.delete(id).await {
            Ok(deleted_id) => Event::Deleted(deleted_id),
            Err(error) => {
                tracing::error!("Could not delete transaction {id}: {error}");
                Event::Failed(error.user_message())
            }
        };

        self.dispatch(event);
    }

    /// Clear the current error message.
    pub fn dismiss_error(&self) {
        self.dispatch(Event::ErrorDismissed);
    }

    fn dispatch(&self, event: Event) {
        tracing::debug!("Applying {event:?}");

        self.state
            .send_modify(|state| *state = reduce(std::mem::take(state), event));
    }
}

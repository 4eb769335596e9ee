//! The client's view of the transaction collection and how it changes.

use crate::{TransactionId, transaction::Transaction};

/// The local copy of the server's transactions plus the status of the last request.
#[derive(Debug, Clone, PartialEq)]
pub struct ClientState {
    /// The transactions confirmed by the server, in the order they were received.
    pub transactions: Vec<Transaction>,
    /// The message of the most recent failed request, if any.
    pub error: Option<String>,
    /// Whether the first list of transactions is still being fetched.
    pub loading: bool,
}

impl Default for ClientState {
    fn default() -> Self {
        Self {
            transactions: Vec::new(),
            error: None,
            loading: true,
        }
    }
}

impl ClientState {
    /// The sum of all transaction amounts.
    pub fn balance(&self) -> f64 {
        self.transactions.iter().map(|transaction| transaction.amount).sum()
    }

    /// The sum of all positive transaction amounts.
    pub fn income(&self) -> f64 {
        self.transactions
            .iter()
            .map(|transaction| transaction.amount)
            .filter(|&amount| amount > 0.0)
            .sum()
    }

    /// The sum of all negative transaction amounts, as a positive number.
    pub fn expense(&self) -> f64 {
        -self
            .transactions
            .iter()
            .map(|transaction| transaction.amount)
            .filter(|&amount| amount < 0.0)
            .sum::<f64>()
    }
}

/// Something that happened to the transaction collection, as confirmed by the server.
#[derive(Debug, Clone, PartialEq)]
pub enum Event {
    /// The server returned the full list of transactions.
    Loaded(Vec<Transaction>),
    /// Fetching the list of transactions failed with a message for the user.
    LoadFailed(String),
    /// The server created a transaction.
    Added(Transaction),
    /// The server deleted the transaction with this ID.
    Deleted(TransactionId),
    /// A create or delete request failed with a message for the user.
    Failed(String),
    /// The user dismissed the current error message.
    ErrorDismissed,
}

/// Compute the state that follows `state` after `event`.
///
/// Errors replace any previous error, they are never accumulated.
/// Successful events leave the current error in place until it is dismissed.
pub fn reduce(state: ClientState, event: Event) -> ClientState {
    match event {
        Event::Loaded(transactions) => ClientState {
            transactions,
            loading: false,
            ..state
        },
        Event::LoadFailed(message) => ClientState {
            error: Some(message),
            loading: false,
            ..state
        },
        Event::Added(transaction) => {
            let mut transactions = state.transactions;
            transactions.push(transaction);

            ClientState {
                transactions,
                ..state
            }
        }
        Event::Deleted(id) => {
            let mut transactions = state.transactions;
            transactions.retain(|transaction| transaction.id != id);

            ClientState {
                transactions,
                ..state
            }
        }
        Event::Failed(message) => ClientState {
            error: Some(message),
            ..state
        },
        Event::ErrorDismissed => ClientState {
            error: None,
            ..state
        },
    }
}

#[cfg(test)]
mod tests {
    use crate::transaction::Transaction;

    use super::{ClientState, Event, reduce};

    fn transaction(id: i64, text: &str, amount: f64) -> Transaction {
        Transaction {
            id,
            text: text.to_owned(),
            amount,
        }
    }

    fn loaded(transactions: Vec<Transaction>) -> ClientState {
        reduce(ClientState::default(), Event::Loaded(transactions))
    }

    #[test]
    fn initial_state_is_loading() {
        let state = ClientState::default();

        assert!(state.loading);
        assert!(state.transactions.is_empty());
        assert_eq!(state.error, None);
    }

    #[test]
    fn loaded_replaces_transactions_and_stops_loading() {
        let state = loaded(vec![transaction(1, "Old", 1.0)]);

        let state = reduce(state, Event::Loaded(vec![transaction(2, "New", 2.0)]));

        assert!(!state.loading);
        assert_eq!(state.transactions, vec![transaction(2, "New", 2.0)]);
    }

    #[test]
    fn load_failed_keeps_transactions() {
        let state = loaded(vec![transaction(1, "Coffee", -5.0)]);

        let state = reduce(state, Event::LoadFailed("Server Error".to_owned()));

        assert!(!state.loading);
        assert_eq!(state.error.as_deref(), Some("Server Error"));
        assert_eq!(state.transactions, vec![transaction(1, "Coffee", -5.0)]);
    }

    #[test]
    fn added_appends_transaction() {
        let state = loaded(vec![transaction(1, "Pay", 100.0)]);

        let state = reduce(state, Event::Added(transaction(2, "Coffee", -5.0)));

        assert_eq!(
            state.transactions,
            vec![transaction(1, "Pay", 100.0), transaction(2, "Coffee", -5.0)]
        );
    }

    #[test]
    fn deleted_removes_only_matching_id() {
        let state = loaded(vec![
            transaction(1, "Pay", 100.0),
            transaction(2, "Coffee", -5.0),
        ]);

        let state = reduce(state, Event::Deleted(1));

        assert_eq!(state.transactions, vec![transaction(2, "Coffee", -5.0)]);
    }

    #[test]
    fn deleting_unknown_id_changes_nothing() {
        let state = loaded(vec![transaction(1, "Pay", 100.0)]);

        let next = reduce(state.clone(), Event::Deleted(42));

        assert_eq!(next, state);
    }

    #[test]
    fn errors_are_overwritten_not_appended() {
        let state = loaded(vec![]);

        let state = reduce(state, Event::Failed("first".to_owned()));
        let state = reduce(state, Event::Failed("second".to_owned()));

        assert_eq!(state.error.as_deref(), Some("second"));
    }

    #[test]
    fn failed_does_not_touch_loading() {
        let state = reduce(ClientState::default(), Event::Failed("oops".to_owned()));

        assert!(state.loading);
    }

    #[test]
    fn dismissing_clears_error() {
        let state = reduce(loaded(vec![]), Event::Failed("oops".to_owned()));

        let state = reduce(state, Event::ErrorDismissed);

        assert_eq!(state.error, None);
    }

    #[test]
    fn totals_are_derived_from_transactions() {
        let state = loaded(vec![
            transaction(1, "Pay", 100.0),
            transaction(2, "Coffee", -5.0),
            transaction(3, "Rent", -40.0),
        ]);

        assert_eq!(state.balance(), 55.0);
        assert_eq!(state.income(), 100.0);
        assert_eq!(state.expense(), 45.0);
    }

    #[test]
    fn totals_of_empty_state_are_zero() {
        let state = ClientState::default();

        assert_eq!(state.balance(), 0.0);
        assert_eq!(state.income(), 0.0);
        assert_eq!(state.expense(), 0.0);
    }
}

use std::process::exit;

use clap::{Parser, Subcommand};
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

use expense_tracker::{
    TransactionId,
    client::{ClientState, HttpTransactionApi, StateController, TransactionApi, TransactionDraft},
    currency,
};

/// A terminal client for the expense tracker.
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Args {
    /// The URL of the expense tracker server.
    #[arg(long, env = "EXPENSES_SERVER", default_value = "http://localhost:5001")]
    server: String,

    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Show the balance and every transaction (the default).
    List,
    /// Add a transaction. Use a negative amount for an expense.
    Add {
        /// What the transaction was for.
        text: String,
        /// The amount of money earned (positive) or spent (negative).
        #[arg(allow_negative_numbers = true)]
        amount: Option<f64>,
    },
    /// Delete the transaction with the given ID.
    Delete {
        /// The ID shown next to the transaction in the list.
        id: TransactionId,
    },
}

#[tokio::main]
async fn main() {
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let args = Args::parse();

    let controller = StateController::new(HttpTransactionApi::new(&args.server));

    run(&controller, args.command.unwrap_or(Command::List)).await;

    let state = controller.state();
    print!("{}", render(&state));

    if state.error.is_some() {
        exit(1);
    }
}

async fn run<A: TransactionApi>(controller: &StateController<A>, command: Command) {
    controller.fetch_all().await;

    match command {
        Command::List => {}
        Command::Add { text, amount } => controller.create(TransactionDraft { text, amount }).await,
        Command::Delete { id } => controller.remove(id).await,
    }
}

fn render(state: &ClientState) -> String {
    let mut output = String::new();

    output.push_str(&format!("Your Balance: {}\n", currency(state.balance())));
    output.push_str(&format!(
        "Income: {}  Expense: {}\n",
        currency(state.income()),
        currency(state.expense())
    ));

    output.push_str("\nHistory\n");
    if state.transactions.is_empty() {
        output.push_str("  No transactions yet.\n");
    }
    for transaction in &state.transactions {
        output.push_str(&format!(
            "  #{:<4} {:<30} {:>12}\n",
            transaction.id,
            transaction.text,
            currency(transaction.amount)
        ));
    }

    if let Some(error) = &state.error {
        output.push_str(&format!("\nError: {error}\n"));
    }

    output
}

#[cfg(test)]
mod tests {
    use expense_tracker::{Transaction, client::ClientState};

    use super::render;

    #[test]
    fn renders_totals_history_and_error() {
        let state = ClientState {
            transactions: vec![
                Transaction {
                    id: 1,
                    text: "Salary".to_owned(),
                    amount: 100.0,
                },
                Transaction {
                    id: 2,
                    text: "Coffee".to_owned(),
                    amount: -5.5,
                },
            ],
            error: Some("No transaction found".to_owned()),
            loading: false,
        };

        let output = render(&state);

        assert!(output.contains("Your Balance: $94.50"), "{output}");
        assert!(output.contains("Income: $100.00  Expense: $5.50"), "{output}");
        assert!(output.contains("Coffee"), "{output}");
        assert!(output.contains("-$5.50"), "{output}");
        assert!(output.ends_with("Error: No transaction found\n"), "{output}");
    }

    #[test]
    fn renders_empty_history() {
        let state = ClientState {
            loading: false,
            ..Default::default()
        };

        let output = render(&state);

        assert!(output.contains("Your Balance: $0.00"), "{output}");
        assert!(output.contains("No transactions yet."), "{output}");
        assert!(!output.contains("Error"), "{output}");
    }
}

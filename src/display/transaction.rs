//! Transaction history formatting
//!
//! Renders a replayed ledger as a table under a titled banner.

use tabled::{settings::Style, Table, Tabled};

use crate::config::Settings;
use crate::models::{Transaction, TransactionKind};

#[derive(Tabled)]
struct HistoryRow {
    #[tabled(rename = "Date")]
    date: String,
    #[tabled(rename = "Type")]
    kind: String,
    #[tabled(rename = "Amount")]
    amount: String,
    #[tabled(rename = "Note")]
    note: String,
}

/// Banner title for a history listing
pub fn history_title(kind_filter: Option<TransactionKind>) -> String {
    match kind_filter {
        Some(kind) => format!("{} History", kind),
        None => "Full History".to_string(),
    }
}

/// Format a ledger listing in append order
pub fn format_history(
    transactions: &[Transaction],
    kind_filter: Option<TransactionKind>,
    settings: &Settings,
) -> String {
    if transactions.is_empty() {
        return "No transaction history found.\n".to_string();
    }

    let rows: Vec<HistoryRow> = transactions
        .iter()
        .map(|txn| HistoryRow {
            date: txn.date.format(&settings.date_format).to_string(),
            kind: txn.kind.to_string(),
            amount: settings.format_amount(txn.amount),
            note: txn.note.clone().unwrap_or_default(),
        })
        .collect();

    let mut table = Table::new(rows);
    table.with(Style::psql());

    let mut output = String::new();
    output.push_str(&format!("\n===== {} =====\n", history_title(kind_filter)));
    output.push_str(&table.to_string());
    output.push_str("\n=====================\n");
    output
}

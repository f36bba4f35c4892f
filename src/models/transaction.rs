//! Transaction model
//!
//! A savings ledger entry: a deposit or withdrawal of a whole-unit amount on a
//! calendar date, with an optional note.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Direction of a ledger entry
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TransactionKind {
    Deposit,
    Withdraw,
}

impl TransactionKind {
    /// The lowercase keyword used in ledger files
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Deposit => "deposit",
            Self::Withdraw => "withdraw",
        }
    }

    /// Parse a ledger keyword (case-insensitive)
    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "deposit" => Some(Self::Deposit),
            "withdraw" => Some(Self::Withdraw),
            _ => None,
        }
    }

    /// Signed contribution of an amount of this kind to the balance
    pub fn signed(&self, amount: i64) -> i64 {
        match self {
            Self::Deposit => amount,
            Self::Withdraw => -amount,
        }
    }
}

impl fmt::Display for TransactionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Deposit => write!(f, "Deposit"),
            Self::Withdraw => write!(f, "Withdraw"),
        }
    }
}

/// A single ledger entry
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Transaction {
    pub kind: TransactionKind,

    /// Amount in whole currency units, always positive
    pub amount: i64,

    pub date: NaiveDate,

    /// Free-text note; never an empty string
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub note: Option<String>,
}

impl Transaction {
    /// Create a transaction without a note
    pub fn new(kind: TransactionKind, amount: i64, date: NaiveDate) -> Self {
        Self {
            kind,
            amount,
            date,
            note: None,
        }
    }

    /// Attach a note; blank notes are dropped
    pub fn with_note(mut self, note: Option<impl Into<String>>) -> Self {
        let note: Option<String> = note.map(Into::into);
        self.note = note
            .map(|n| n.trim().to_string())
            .filter(|n| !n.is_empty());
        self
    }

    /// Contribution of this entry to the running balance
    pub fn signed_amount(&self) -> i64 {
        self.kind.signed(self.amount)
    }

    /// Validate the transaction
    pub fn validate(&self) -> Result<(), TransactionValidationError> {
        if self.amount <= 0 {
            return Err(TransactionValidationError::NonPositiveAmount(self.amount));
        }
        Ok(())
    }
}

/// Validation errors for transactions
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TransactionValidationError {
    NonPositiveAmount(i64),
}

impl fmt::Display for TransactionValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NonPositiveAmount(amount) => {
                write!(f, "Amount must be a positive whole number, got {}", amount)
            }
        }
    }
}

impl std::error::Error for TransactionValidationError {}

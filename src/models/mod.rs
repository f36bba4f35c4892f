//! Core data models for Sonnic Tracker
//!
//! User accounts and the ledger entries recorded against them.

pub mod account;
pub mod transaction;

pub use account::{Account, AccountValidationError};
pub use transaction::{Transaction, TransactionKind, TransactionValidationError};

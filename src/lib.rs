//! Sonnic Tracker - Terminal-based personal savings tracker
//!
//! Users register with a name and password, record deposits and withdrawals
//! in a per-user ledger, and check their progress toward a savings target.
//!
//! # Architecture
//!
//! - `config`: Base directory resolution and settings
//! - `error`: Custom error types
//! - `models`: Accounts and ledger transactions
//! - `storage`: Backend traits with file and in-memory implementations
//! - `crypto`: Password hashing and zero-on-drop secrets
//! - `services`: Account store, ledger and session logic
//! - `reports`: Dashboard figures derived from ledger replays
//! - `display`: Terminal formatting
//! - `cli`: Interactive menus
//!
//! # Example
//!
//! ```rust,ignore
//! use sonnic_tracker::config::Settings;
//! use sonnic_tracker::models::TransactionKind;
//! use sonnic_tracker::services::{AccountService, LedgerService};
//! use sonnic_tracker::storage::Storage;
//!
//! let storage = Storage::in_memory();
//! let settings = Settings::default();
//! let alice = AccountService::new(&storage, &settings).register("Alice", "pw1", 100, 1000)?;
//! let ledger = LedgerService::new(&storage);
//! ledger.append(&alice, TransactionKind::Deposit, 500, None)?;
//! assert_eq!(ledger.balance(&alice)?, 500);
//! ```

pub mod cli;
pub mod config;
pub mod crypto;
pub mod display;
pub mod error;
pub mod models;
pub mod reports;
pub mod services;
pub mod storage;

pub use error::{SonnicError, SonnicResult};

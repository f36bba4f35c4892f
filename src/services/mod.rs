//! Service layer for Sonnic Tracker
//!
//! The service layer provides business logic on top of the storage layer,
//! handling validation, replays and session transitions.

pub mod account;
pub mod clock;
pub mod ledger;
pub mod session;

pub use account::AccountService;
pub use clock::{Clock, FixedClock, SystemClock};
pub use ledger::{LedgerService, LedgerSummary};
pub use session::{SessionController, SessionState};

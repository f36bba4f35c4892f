//! Display formatting for terminal output

pub mod dashboard;
pub mod transaction;

pub use dashboard::format_dashboard;
pub use transaction::{format_history, history_title};

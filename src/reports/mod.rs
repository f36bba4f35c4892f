//! Reports derived from ledger replays

pub mod dashboard;

pub use dashboard::DashboardReport;

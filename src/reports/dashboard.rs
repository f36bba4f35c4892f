//! Dashboard report
//!
//! A fixed-shape view of one user's progress toward their target, derived
//! from the account settings and a ledger summary.

use crate::error::{SonnicError, SonnicResult};
use crate::models::Account;
use crate::services::ledger::{LedgerService, LedgerSummary};

/// Progress figures shown on the dashboard
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DashboardReport {
    pub user: String,
    pub total_saved: i64,
    pub days_saved: usize,
    /// `target - total_saved`; negative once the target is overshot
    pub remaining: i64,
    pub deposit_count: usize,
    pub withdraw_count: usize,
    pub daily_goal: i64,
    pub target: i64,
    /// False when the ledger holds no transactions yet
    pub has_history: bool,
}

impl DashboardReport {
    /// Build the report from an account and its replayed ledger summary
    pub fn build(account: &Account, summary: &LedgerSummary) -> SonnicResult<Self> {
        let remaining = account
            .target
            .checked_sub(summary.total_saved)
            .ok_or_else(|| {
                SonnicError::Storage(format!(
                    "Remaining target for '{}' is out of range",
                    account.name
                ))
            })?;

        Ok(Self {
            user: account.name.clone(),
            total_saved: summary.total_saved,
            days_saved: summary.days_saved,
            remaining,
            deposit_count: summary.deposit_count,
            withdraw_count: summary.withdraw_count,
            daily_goal: account.daily_goal,
            target: account.target,
            has_history: !summary.is_empty(),
        })
    }

    /// Replay the account's ledger and build the report
    pub fn generate(ledger: &LedgerService, account: &Account) -> SonnicResult<Self> {
        let summary = ledger.summary(account)?;
        Self::build(account, &summary)
    }
}

//! Ledger service
//!
//! Appends deposits and withdrawals and derives balances and counters by
//! replaying the stored sequence. Nothing is cached: every query replays.

use crate::error::{SonnicError, SonnicResult};
use crate::models::{Account, Transaction, TransactionKind};
use crate::storage::Storage;

use super::clock::{Clock, SystemClock};

/// Counters derived from a full ledger replay
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct LedgerSummary {
    /// Deposits minus withdrawals
    pub total_saved: i64,
    pub deposit_count: usize,
    pub withdraw_count: usize,
    /// One per deposit event, not per distinct calendar day
    pub days_saved: usize,
}

impl LedgerSummary {
    /// Fold one transaction into the counters
    ///
    /// Fails with a `Storage` error if the running total leaves the `i64`
    /// range, which only a hand-edited ledger can cause.
    pub fn record(&mut self, txn: &Transaction) -> SonnicResult<()> {
        self.total_saved = self
            .total_saved
            .checked_add(txn.signed_amount())
            .ok_or_else(total_out_of_range)?;
        match txn.kind {
            TransactionKind::Deposit => {
                self.deposit_count += 1;
                self.days_saved += 1;
            }
            TransactionKind::Withdraw => self.withdraw_count += 1,
        }
        Ok(())
    }

    /// Whether any transaction was replayed
    pub fn is_empty(&self) -> bool {
        self.deposit_count == 0 && self.withdraw_count == 0
    }
}

fn total_out_of_range() -> SonnicError {
    SonnicError::Storage("Ledger total is out of range".into())
}

/// Service for a user's savings ledger
pub struct LedgerService<'a> {
    storage: &'a Storage,
    clock: &'a dyn Clock,
}

impl<'a> LedgerService<'a> {
    /// Create a ledger service stamping entries with the local date
    pub fn new(storage: &'a Storage) -> Self {
        Self {
            storage,
            clock: &SystemClock,
        }
    }

    /// Create a ledger service with a custom date source
    pub fn with_clock(storage: &'a Storage, clock: &'a dyn Clock) -> Self {
        Self { storage, clock }
    }

    /// Check whether an entry could be appended, without writing anything
    ///
    /// Replays the ledger and returns the balance the entry would leave.
    /// A non-positive amount, or a deposit that would push the balance out
    /// of range, is a `Validation` error. A withdrawal above the current
    /// balance is `InsufficientFunds`.
    pub fn check_append(
        &self,
        account: &Account,
        kind: TransactionKind,
        amount: i64,
    ) -> SonnicResult<i64> {
        Transaction::new(kind, amount, self.clock.today())
            .validate()
            .map_err(|e| SonnicError::Validation(e.to_string()))?;

        let available = self.balance(account)?;
        match kind {
            TransactionKind::Deposit => available.checked_add(amount).ok_or_else(|| {
                SonnicError::Validation(format!(
                    "Deposit of {} would take the balance past {}",
                    amount,
                    i64::MAX
                ))
            }),
            TransactionKind::Withdraw if amount > available => {
                Err(SonnicError::InsufficientFunds {
                    needed: amount,
                    available,
                })
            }
            TransactionKind::Withdraw => Ok(available - amount),
        }
    }

    /// Append a deposit or withdrawal dated today
    ///
    /// Runs [`check_append`](Self::check_append) against a fresh replay
    /// first; if it fails nothing is written.
    pub fn append(
        &self,
        account: &Account,
        kind: TransactionKind,
        amount: i64,
        note: Option<&str>,
    ) -> SonnicResult<Transaction> {
        self.check_append(account, kind, amount)?;

        let txn = Transaction::new(kind, amount, self.clock.today()).with_note(note);
        self.storage.ledger.append(&account.name, &txn)?;

        log::info!(
            "Recorded {} of {} for '{}' on {}",
            txn.kind.as_str(),
            txn.amount,
            account.name,
            txn.date
        );
        Ok(txn)
    }

    /// Current balance: deposits minus withdrawals over the whole ledger
    pub fn balance(&self, account: &Account) -> SonnicResult<i64> {
        self.storage
            .ledger
            .replay(&account.name)?
            .try_fold(0i64, |total, txn| -> SonnicResult<i64> {
                total
                    .checked_add(txn?.signed_amount())
                    .ok_or_else(total_out_of_range)
            })
    }

    /// Transactions in append order, optionally restricted to one kind
    ///
    /// Each call starts a new replay, so the sequence can be re-run.
    pub fn history(
        &self,
        account: &Account,
        kind_filter: Option<TransactionKind>,
    ) -> SonnicResult<impl Iterator<Item = SonnicResult<Transaction>>> {
        let replay = self.storage.ledger.replay(&account.name)?;

        Ok(replay.filter(move |txn| match (txn, kind_filter) {
            (Ok(txn), Some(kind)) => txn.kind == kind,
            _ => true,
        }))
    }

    /// Totals and counters from a full replay
    pub fn summary(&self, account: &Account) -> SonnicResult<LedgerSummary> {
        let mut summary = LedgerSummary::default();
        for txn in self.storage.ledger.replay(&account.name)? {
            summary.record(&txn?)?;
        }
        Ok(summary)
    }
}

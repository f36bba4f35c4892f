//! Ledger persistence
//!
//! Each user owns one append-only text file, one transaction per line:
//!
//! ```text
//! deposit,500,2025-01-15
//! withdraw,200,2025-01-20,school fees
//! ```
//!
//! The note column is omitted entirely when there is no note. Lines are read
//! and written with the `csv` crate, so notes containing commas are quoted.
//! Each line is parsed on its own: older files wrote notes verbatim, and a
//! stray quote must not swallow the lines after it.

use std::collections::HashMap;
use std::fs::{self, File, OpenOptions};
use std::io::{BufRead, BufReader};
use std::path::PathBuf;
use std::sync::RwLock;

use chrono::NaiveDate;
use csv::{ReaderBuilder, StringRecord, WriterBuilder};

use crate::error::{SonnicError, SonnicResult};
use crate::models::{Transaction, TransactionKind};

/// Date format used inside ledger files, independent of display settings
pub const LEDGER_DATE_FORMAT: &str = "%Y-%m-%d";

/// A lazy replay of a ledger in append order
pub type Replay = Box<dyn Iterator<Item = SonnicResult<Transaction>>>;

/// Append and replay access to per-user ledgers
pub trait LedgerBackend {
    /// Start a fresh replay of a user's ledger; a missing ledger is empty
    fn replay(&self, user: &str) -> SonnicResult<Replay>;

    /// Append one transaction to the end of a user's ledger
    fn append(&self, user: &str, txn: &Transaction) -> SonnicResult<()>;
}

/// Encode a transaction as ledger fields
pub fn to_fields(txn: &Transaction) -> Vec<String> {
    let mut fields = vec![
        txn.kind.as_str().to_string(),
        txn.amount.to_string(),
        txn.date.format(LEDGER_DATE_FORMAT).to_string(),
    ];
    if let Some(note) = &txn.note {
        fields.push(note.clone());
    }
    fields
}

/// Split one ledger line into fields
///
/// A line with an unbalanced quote was written by hand or by an older
/// version that did not quote notes, so it is split on the first three
/// commas and the rest is kept verbatim as the note.
pub fn split_line(line: &str) -> SonnicResult<StringRecord> {
    if line.matches('"').count() % 2 == 1 {
        return Ok(line.splitn(4, ',').collect());
    }

    let mut reader = ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .from_reader(line.as_bytes());
    let mut record = StringRecord::new();
    reader.read_record(&mut record)?;
    Ok(record)
}

/// Decode one ledger line
///
/// Returns `Ok(None)` for lines that are skipped with a warning: short
/// lines, unknown kinds and non-positive amounts. Fields past the fourth are
/// joined back into the note, since older files did not quote commas inside
/// notes.
pub fn parse_record(line: usize, record: &StringRecord) -> SonnicResult<Option<Transaction>> {
    if record.len() < 3 {
        log::warn!("Skipping short ledger line {} ({} fields)", line, record.len());
        return Ok(None);
    }

    let Some(kind) = TransactionKind::parse(&record[0]) else {
        log::warn!(
            "Skipping ledger line {}: unknown transaction kind '{}'",
            line,
            &record[0]
        );
        return Ok(None);
    };

    let amount: i64 = record[1].trim().parse().map_err(|e| {
        SonnicError::Storage(format!(
            "Ledger line {}: invalid amount '{}': {}",
            line, &record[1], e
        ))
    })?;
    if amount <= 0 {
        log::warn!("Skipping ledger line {}: non-positive amount {}", line, amount);
        return Ok(None);
    }

    let date = NaiveDate::parse_from_str(record[2].trim(), LEDGER_DATE_FORMAT).map_err(|e| {
        SonnicError::Storage(format!(
            "Ledger line {}: invalid date '{}': {}",
            line, &record[2], e
        ))
    })?;

    let note = (record.len() > 3).then(|| record.iter().skip(3).collect::<Vec<_>>().join(","));

    Ok(Some(Transaction::new(kind, amount, date).with_note(note)))
}

/// Text file backed ledgers under the data directory (`data/<user>.txt`)
pub struct FileLedgerStore {
    data_dir: PathBuf,
}

impl FileLedgerStore {
    pub fn new(data_dir: PathBuf) -> Self {
        Self { data_dir }
    }

    fn path_for(&self, user: &str) -> PathBuf {
        self.data_dir.join(format!("{}.txt", user))
    }
}

impl LedgerBackend for FileLedgerStore {
    fn replay(&self, user: &str) -> SonnicResult<Replay> {
        let path = self.path_for(user);

        if !path.exists() {
            return Ok(Box::new(std::iter::empty()));
        }

        let file = File::open(&path).map_err(|e| {
            SonnicError::Storage(format!("Failed to open {}: {}", path.display(), e))
        })?;

        let replay = BufReader::new(file)
            .lines()
            .enumerate()
            .filter_map(|(index, line)| {
                let line = match line {
                    Ok(line) => line,
                    Err(e) => return Some(Err(SonnicError::from(e))),
                };
                if line.trim().is_empty() {
                    return None;
                }
                split_line(&line)
                    .and_then(|record| parse_record(index + 1, &record))
                    .transpose()
            });

        Ok(Box::new(replay))
    }

    fn append(&self, user: &str, txn: &Transaction) -> SonnicResult<()> {
        fs::create_dir_all(&self.data_dir).map_err(|e| {
            SonnicError::Storage(format!(
                "Failed to create directory {}: {}",
                self.data_dir.display(),
                e
            ))
        })?;

        let path = self.path_for(user);
        let file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&path)
            .map_err(|e| {
                SonnicError::Storage(format!("Failed to open {}: {}", path.display(), e))
            })?;

        let mut writer = WriterBuilder::new()
            .has_headers(false)
            .flexible(true)
            .from_writer(file);

        writer.write_record(to_fields(txn))?;
        writer
            .flush()
            .map_err(|e| SonnicError::Storage(format!("Failed to flush ledger: {}", e)))?;

        Ok(())
    }
}

/// In-memory ledgers for tests and ephemeral runs
#[derive(Default)]
pub struct MemoryLedgerStore {
    data: RwLock<HashMap<String, Vec<Transaction>>>,
}

impl MemoryLedgerStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl LedgerBackend for MemoryLedgerStore {
    fn replay(&self, user: &str) -> SonnicResult<Replay> {
        let data = self.data.read().map_err(|e| {
            SonnicError::Storage(format!("Failed to acquire read lock: {}", e))
        })?;

        let snapshot = data.get(user).cloned().unwrap_or_default();
        Ok(Box::new(snapshot.into_iter().map(Ok::<_, SonnicError>)))
    }

    fn append(&self, user: &str, txn: &Transaction) -> SonnicResult<()> {
        let mut data = self.data.write().map_err(|e| {
            SonnicError::Storage(format!("Failed to acquire write lock: {}", e))
        })?;

        data.entry(user.to_string()).or_default().push(txn.clone());
        Ok(())
    }
}

//! Account persistence
//!
//! The whole account map is loaded before each operation and rewritten after
//! each mutation. On disk it is a JSON object keyed by user name.

use std::collections::BTreeMap;
use std::path::PathBuf;
use std::sync::RwLock;

use serde::{Deserialize, Deserializer, Serialize};

use crate::error::{SonnicError, SonnicResult};
use crate::models::Account;

use super::file_io::{read_json, write_json_atomic};

/// Accounts keyed by user name
pub type AccountMap = BTreeMap<String, Account>;

/// Wholesale load/save of the account map
pub trait AccountBackend {
    fn load(&self) -> SonnicResult<AccountMap>;
    fn save(&self, accounts: &AccountMap) -> SonnicResult<()>;
}

/// On-disk shape of one account; the name lives in the map key
#[derive(Debug, Clone, Serialize, Deserialize)]
struct AccountRecord {
    password: String,
    #[serde(alias = "per_day", deserialize_with = "int_or_string")]
    daily_goal: i64,
    #[serde(deserialize_with = "int_or_string")]
    target: i64,
}

#[derive(Deserialize)]
#[serde(untagged)]
enum IntOrString {
    Int(i64),
    Str(String),
}

// Older stores kept goals as the raw text the user typed
fn int_or_string<'de, D>(deserializer: D) -> Result<i64, D::Error>
where
    D: Deserializer<'de>,
{
    match IntOrString::deserialize(deserializer)? {
        IntOrString::Int(n) => Ok(n),
        IntOrString::Str(s) => s.trim().parse().map_err(serde::de::Error::custom),
    }
}

/// JSON file backed account store (`users.json`)
pub struct FileAccountStore {
    path: PathBuf,
}

impl FileAccountStore {
    pub fn new(path: PathBuf) -> Self {
        Self { path }
    }
}

impl AccountBackend for FileAccountStore {
    fn load(&self) -> SonnicResult<AccountMap> {
        let records: BTreeMap<String, AccountRecord> = read_json(&self.path)?;

        Ok(records
            .into_iter()
            .map(|(name, record)| {
                let account = Account::new(
                    name.clone(),
                    record.password,
                    record.daily_goal,
                    record.target,
                );
                (name, account)
            })
            .collect())
    }

    fn save(&self, accounts: &AccountMap) -> SonnicResult<()> {
        let records: BTreeMap<&str, AccountRecord> = accounts
            .values()
            .map(|account| {
                (
                    account.name.as_str(),
                    AccountRecord {
                        password: account.password.clone(),
                        daily_goal: account.daily_goal,
                        target: account.target,
                    },
                )
            })
            .collect();

        write_json_atomic(&self.path, &records)
    }
}

/// In-memory account store for tests and ephemeral runs
#[derive(Default)]
pub struct MemoryAccountStore {
    data: RwLock<AccountMap>,
}

impl MemoryAccountStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl AccountBackend for MemoryAccountStore {
    fn load(&self) -> SonnicResult<AccountMap> {
        let data = self.data.read().map_err(|e| {
            SonnicError::Storage(format!("Failed to acquire read lock: {}", e))
        })?;

        Ok(data.clone())
    }

    fn save(&self, accounts: &AccountMap) -> SonnicResult<()> {
        let mut data = self.data.write().map_err(|e| {
            SonnicError::Storage(format!("Failed to acquire write lock: {}", e))
        })?;

        *data = accounts.clone();
        Ok(())
    }
}

//! Storage layer for Sonnic Tracker
//!
//! Every persisted resource sits behind a small backend trait with a file
//! implementation and an in-memory one. Services only ever see the traits.

pub mod accounts;
pub mod file_io;
pub mod ledger;
pub mod session;

pub use accounts::{AccountBackend, AccountMap, FileAccountStore, MemoryAccountStore};
pub use file_io::{read_json, write_json_atomic};
pub use ledger::{FileLedgerStore, LedgerBackend, MemoryLedgerStore, Replay};
pub use session::{FileSessionStore, MemorySessionStore, SessionBackend};

use crate::config::paths::SonnicPaths;
use crate::error::SonnicError;

/// Main storage coordinator that provides access to all backends
pub struct Storage {
    pub accounts: Box<dyn AccountBackend>,
    pub ledger: Box<dyn LedgerBackend>,
    pub session: Box<dyn SessionBackend>,
}

impl Storage {
    /// Create file-backed storage rooted at the given paths
    pub fn new(paths: &SonnicPaths) -> Result<Self, SonnicError> {
        paths.ensure_directories()?;

        Ok(Self {
            accounts: Box::new(FileAccountStore::new(paths.users_file())),
            ledger: Box::new(FileLedgerStore::new(paths.data_dir())),
            session: Box::new(FileSessionStore::new(paths.session_file())),
        })
    }

    /// Create storage that never touches the filesystem
    pub fn in_memory() -> Self {
        Self {
            accounts: Box::new(MemoryAccountStore::new()),
            ledger: Box::new(MemoryLedgerStore::new()),
            session: Box::new(MemorySessionStore::new()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_storage_creation() {
        let temp_dir = TempDir::new().unwrap();
        let paths = SonnicPaths::with_base_dir(temp_dir.path().to_path_buf());
        let storage = Storage::new(&paths).unwrap();

        assert!(temp_dir.path().join("data").exists());
        assert!(storage.accounts.load().unwrap().is_empty());
        assert_eq!(storage.session.load().unwrap(), None);
    }
}

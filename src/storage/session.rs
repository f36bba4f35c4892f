//! Session marker persistence
//!
//! A single scalar file holding the logged-in user name. The file is absent
//! when nobody is logged in.

use std::fs;
use std::io::ErrorKind;
use std::path::PathBuf;
use std::sync::RwLock;

use crate::error::{SonnicError, SonnicResult};

/// Load/save access to the persisted session marker
pub trait SessionBackend {
    /// The stored user name, if any
    fn load(&self) -> SonnicResult<Option<String>>;
    fn save(&self, user: &str) -> SonnicResult<()>;
    /// Remove the marker; clearing an absent marker is not an error
    fn clear(&self) -> SonnicResult<()>;
}

/// Plain text marker file (`session.txt`)
pub struct FileSessionStore {
    path: PathBuf,
}

impl FileSessionStore {
    pub fn new(path: PathBuf) -> Self {
        Self { path }
    }
}

impl SessionBackend for FileSessionStore {
    fn load(&self) -> SonnicResult<Option<String>> {
        match fs::read_to_string(&self.path) {
            Ok(contents) => {
                let user = contents.trim();
                Ok((!user.is_empty()).then(|| user.to_string()))
            }
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
            Err(e) => Err(SonnicError::Io(format!(
                "Failed to read session file {}: {}",
                self.path.display(),
                e
            ))),
        }
    }

    fn save(&self, user: &str) -> SonnicResult<()> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)?;
        }

        fs::write(&self.path, user)
            .map_err(|e| SonnicError::Io(format!("Failed to write session file: {}", e)))
    }

    fn clear(&self) -> SonnicResult<()> {
        match fs::remove_file(&self.path) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(()),
            Err(e) => Err(SonnicError::Io(format!(
                "Failed to remove session file: {}",
                e
            ))),
        }
    }
}

/// In-memory session marker
#[derive(Default)]
pub struct MemorySessionStore {
    user: RwLock<Option<String>>,
}

impl MemorySessionStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl SessionBackend for MemorySessionStore {
    fn load(&self) -> SonnicResult<Option<String>> {
        let user = self.user.read().map_err(|e| {
            SonnicError::Storage(format!("Failed to acquire read lock: {}", e))
        })?;

        Ok(user.clone())
    }

    fn save(&self, user: &str) -> SonnicResult<()> {
        let mut slot = self.user.write().map_err(|e| {
            SonnicError::Storage(format!("Failed to acquire write lock: {}", e))
        })?;

        *slot = Some(user.to_string());
        Ok(())
    }

    fn clear(&self) -> SonnicResult<()> {
        let mut slot = self.user.write().map_err(|e| {
            SonnicError::Storage(format!("Failed to acquire write lock: {}", e))
        })?;

        *slot = None;
        Ok(())
    }
}

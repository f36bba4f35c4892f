//! Path management for Sonnic Tracker
//!
//! ## Path Resolution Order
//!
//! 1. `--data-dir` on the command line
//! 2. `SONNIC_DATA_DIR` environment variable (if set)
//! 3. The platform config directory joined with `sonnic-tracker`
//!    (`~/.config/sonnic-tracker` on Linux)

use std::path::{Path, PathBuf};

use directories::BaseDirs;

use crate::error::SonnicError;

/// Environment variable that overrides the base directory
pub const DATA_DIR_ENV: &str = "SONNIC_DATA_DIR";

/// Manages all paths used by Sonnic Tracker
#[derive(Debug, Clone)]
pub struct SonnicPaths {
    /// Base directory for all Sonnic Tracker data
    base_dir: PathBuf,
}

impl SonnicPaths {
    /// Resolve the base directory from the environment or the platform default
    ///
    /// # Errors
    ///
    /// Returns an error if no home directory can be determined.
    pub fn new() -> Result<Self, SonnicError> {
        let base_dir = if let Ok(custom) = std::env::var(DATA_DIR_ENV) {
            PathBuf::from(custom)
        } else {
            resolve_default_path()?
        };

        Ok(Self { base_dir })
    }

    /// Create SonnicPaths with a custom base directory
    pub fn with_base_dir(base_dir: PathBuf) -> Self {
        Self { base_dir }
    }

    pub fn base_dir(&self) -> &Path {
        &self.base_dir
    }

    /// Directory holding one ledger file per user
    pub fn data_dir(&self) -> PathBuf {
        self.base_dir.join("data")
    }

    pub fn settings_file(&self) -> PathBuf {
        self.base_dir.join("config.json")
    }

    /// Account map, keyed by user name
    pub fn users_file(&self) -> PathBuf {
        self.base_dir.join("users.json")
    }

    /// Session marker holding the logged-in user name
    pub fn session_file(&self) -> PathBuf {
        self.base_dir.join("session.txt")
    }

    /// Ensure the base and data directories exist
    pub fn ensure_directories(&self) -> Result<(), SonnicError> {
        std::fs::create_dir_all(&self.base_dir)
            .map_err(|e| SonnicError::Io(format!("Failed to create base directory: {}", e)))?;

        std::fs::create_dir_all(self.data_dir())
            .map_err(|e| SonnicError::Io(format!("Failed to create data directory: {}", e)))?;

        Ok(())
    }

    /// Check whether a settings file has been written yet
    pub fn is_initialized(&self) -> bool {
        self.settings_file().exists()
    }
}

fn resolve_default_path() -> Result<PathBuf, SonnicError> {
    let dirs = BaseDirs::new()
        .ok_or_else(|| SonnicError::Config("Could not determine home directory".into()))?;
    Ok(dirs.config_dir().join("sonnic-tracker"))
}

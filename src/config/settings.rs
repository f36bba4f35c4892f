//! User settings for Sonnic Tracker
//!
//! Display preferences and the password storage policy, persisted as
//! `config.json` in the base directory.

use serde::{Deserialize, Serialize};

use super::paths::SonnicPaths;
use crate::error::SonnicError;

/// Application settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Settings {
    /// Schema version for migration support
    #[serde(default = "default_schema_version")]
    pub schema_version: u32,

    /// Currency symbol printed before amounts
    #[serde(default = "default_currency")]
    pub currency_symbol: String,

    /// Date format for history and confirmations (strftime format)
    #[serde(default = "default_date_format")]
    pub date_format: String,

    /// Store new passwords as Argon2id hashes instead of plaintext
    #[serde(default = "default_hash_passwords")]
    pub hash_passwords: bool,
}

fn default_schema_version() -> u32 {
    1
}

fn default_currency() -> String {
    "৳".to_string()
}

fn default_date_format() -> String {
    "%Y-%m-%d".to_string()
}

fn default_hash_passwords() -> bool {
    true
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            schema_version: default_schema_version(),
            currency_symbol: default_currency(),
            date_format: default_date_format(),
            hash_passwords: default_hash_passwords(),
        }
    }
}

impl Settings {
    /// Load settings from disk, or return defaults if the file doesn't exist
    pub fn load_or_create(paths: &SonnicPaths) -> Result<Self, SonnicError> {
        let settings_path = paths.settings_file();

        if settings_path.exists() {
            let contents = std::fs::read_to_string(&settings_path).map_err(|e| {
                SonnicError::Io(format!("Failed to read settings file: {}", e))
            })?;

            let settings: Settings = serde_json::from_str(&contents).map_err(|e| {
                SonnicError::Config(format!("Failed to parse settings file: {}", e))
            })?;

            Ok(settings)
        } else {
            // Don't save yet - let caller decide when to persist
            Ok(Settings::default())
        }
    }

    /// Save settings to disk
    pub fn save(&self, paths: &SonnicPaths) -> Result<(), SonnicError> {
        paths.ensure_directories()?;

        let contents = serde_json::to_string_pretty(self).map_err(|e| {
            SonnicError::Config(format!("Failed to serialize settings: {}", e))
        })?;

        std::fs::write(paths.settings_file(), contents).map_err(|e| {
            SonnicError::Io(format!("Failed to write settings file: {}", e))
        })?;

        Ok(())
    }

    /// Format an integer amount with the configured currency symbol
    pub fn format_amount(&self, amount: i64) -> String {
        if amount < 0 {
            format!("-{}{}", self.currency_symbol, amount.unsigned_abs())
        } else {
            format!("{}{}", self.currency_symbol, amount)
        }
    }
}

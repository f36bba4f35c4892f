//! User account model
//!
//! An account is keyed by its unique name and carries the stored credential
//! plus the savings configuration chosen at registration.

use std::fmt;

use serde::{Deserialize, Serialize};

/// A registered user and their savings goals
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Account {
    /// Unique user name
    pub name: String,

    /// Stored credential: an Argon2 PHC string, or a legacy plaintext password
    pub password: String,

    /// Daily saving goal in whole currency units
    pub daily_goal: i64,

    /// Total savings target in whole currency units
    pub target: i64,
}

impl Account {
    /// Create a new account with an already-prepared credential
    pub fn new(
        name: impl Into<String>,
        password: impl Into<String>,
        daily_goal: i64,
        target: i64,
    ) -> Self {
        Self {
            name: name.into(),
            password: password.into(),
            daily_goal,
            target,
        }
    }

    /// Validate the account data
    pub fn validate(&self) -> Result<(), AccountValidationError> {
        validate_name(&self.name)?;

        if self.daily_goal < 0 {
            return Err(AccountValidationError::NegativeGoal(self.daily_goal));
        }

        if self.target < 0 {
            return Err(AccountValidationError::NegativeTarget(self.target));
        }

        Ok(())
    }
}

/// Check that a user name is usable as a store key and a ledger file name
pub fn validate_name(name: &str) -> Result<(), AccountValidationError> {
    if name.trim().is_empty() {
        return Err(AccountValidationError::EmptyName);
    }

    if name.len() > 100 {
        return Err(AccountValidationError::NameTooLong(name.len()));
    }

    if name == "." || name == ".." || name.contains(['/', '\\', '\0']) {
        return Err(AccountValidationError::InvalidCharacters(name.to_string()));
    }

    Ok(())
}

/// Validation errors for accounts
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AccountValidationError {
    EmptyName,
    NameTooLong(usize),
    InvalidCharacters(String),
    NegativeGoal(i64),
    NegativeTarget(i64),
}

impl fmt::Display for AccountValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EmptyName => write!(f, "Name cannot be empty"),
            Self::NameTooLong(len) => write!(f, "Name too long ({} chars, max 100)", len),
            Self::InvalidCharacters(name) => {
                write!(f, "Name '{}' cannot contain path separators", name)
            }
            Self::NegativeGoal(goal) => write!(f, "Daily goal cannot be negative: {}", goal),
            Self::NegativeTarget(target) => write!(f, "Target cannot be negative: {}", target),
        }
    }
}

impl std::error::Error for AccountValidationError {}

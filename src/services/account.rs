//! Account service
//!
//! Registration, lookup, credential checks and password changes. The account
//! map is loaded fresh for every operation and written back after mutations.

use crate::config::Settings;
use crate::crypto::{hash_password, is_hashed, verify_password};
use crate::error::{SonnicError, SonnicResult};
use crate::models::account::{validate_name, Account};
use crate::storage::Storage;

/// Service for user account management
pub struct AccountService<'a> {
    storage: &'a Storage,
    settings: &'a Settings,
}

impl<'a> AccountService<'a> {
    /// Create a new account service
    pub fn new(storage: &'a Storage, settings: &'a Settings) -> Self {
        Self { storage, settings }
    }

    /// Register a new user
    ///
    /// The name is trimmed before use. Fails with `AlreadyExists` if the name
    /// is taken, leaving the existing account untouched.
    pub fn register(
        &self,
        name: &str,
        password: &str,
        daily_goal: i64,
        target: i64,
    ) -> SonnicResult<Account> {
        let name = name.trim();
        validate_name(name).map_err(|e| SonnicError::Validation(e.to_string()))?;

        let mut accounts = self.storage.accounts.load()?;
        if accounts.contains_key(name) {
            return Err(SonnicError::AlreadyExists(name.to_string()));
        }

        if password.is_empty() {
            return Err(SonnicError::Validation("Password cannot be empty".into()));
        }

        let account = Account::new(name, self.prepare_credential(password)?, daily_goal, target);
        account
            .validate()
            .map_err(|e| SonnicError::Validation(e.to_string()))?;

        accounts.insert(account.name.clone(), account.clone());
        self.storage.accounts.save(&accounts)?;

        log::info!("Registered user '{}'", account.name);
        Ok(account)
    }

    /// Get an account by exact name
    pub fn lookup(&self, name: &str) -> SonnicResult<Account> {
        self.storage
            .accounts
            .load()?
            .remove(name)
            .ok_or_else(|| SonnicError::account_not_found(name))
    }

    /// Check whether a user name is registered
    pub fn exists(&self, name: &str) -> SonnicResult<bool> {
        Ok(self.storage.accounts.load()?.contains_key(name))
    }

    /// Check a name/password pair
    ///
    /// Unknown names and wrong passwords both yield `false`. A correct
    /// password stored as plaintext is rehashed when hashing is enabled.
    pub fn verify_credentials(&self, name: &str, password: &str) -> SonnicResult<bool> {
        let mut accounts = self.storage.accounts.load()?;

        let Some(account) = accounts.get_mut(name) else {
            return Ok(false);
        };

        if !verify_password(password, &account.password) {
            return Ok(false);
        }

        if self.settings.hash_passwords && !is_hashed(&account.password) {
            account.password = hash_password(password)?;
            self.storage.accounts.save(&accounts)?;
            log::info!("Upgraded stored password for '{}' to Argon2id", name);
        }

        Ok(true)
    }

    /// Replace a user's password after checking the current one
    pub fn update_password(&self, name: &str, old: &str, new: &str) -> SonnicResult<()> {
        let mut accounts = self.storage.accounts.load()?;

        let account = accounts
            .get_mut(name)
            .ok_or_else(|| SonnicError::account_not_found(name))?;

        if !verify_password(old, &account.password) {
            return Err(SonnicError::Unauthorized);
        }

        if new.is_empty() {
            return Err(SonnicError::Validation("Password cannot be empty".into()));
        }

        account.password = self.prepare_credential(new)?;
        self.storage.accounts.save(&accounts)?;

        log::info!("Password changed for '{}'", name);
        Ok(())
    }

    fn prepare_credential(&self, password: &str) -> SonnicResult<String> {
        if self.settings.hash_passwords {
            hash_password(password)
        } else {
            Ok(password.to_string())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::AccountMap;

    fn plaintext_settings() -> Settings {
        Settings {
            hash_passwords: false,
            ..Settings::default()
        }
    }

    #[test]
    fn test_register_and_lookup() {
        let storage = Storage::in_memory();
        let settings = Settings::default();
        let service = AccountService::new(&storage, &settings);

        let account = service.register(" Alice ", "pw1", 100, 1000).unwrap();
        assert_eq!(account.name, "Alice");
        assert!(is_hashed(&account.password));

        let found = service.lookup("Alice").unwrap();
        assert_eq!(found.daily_goal, 100);
        assert_eq!(found.target, 1000);
        assert!(service.exists("Alice").unwrap());
    }

    #[test]
    fn test_duplicate_registration_keeps_original() {
        let storage = Storage::in_memory();
        let settings = plaintext_settings();
        let service = AccountService::new(&storage, &settings);

        service.register("Alice", "pw1", 100, 1000).unwrap();
        let result = service.register("Alice", "other", 5, 50);
        assert!(matches!(result, Err(SonnicError::AlreadyExists(ref n)) if n == "Alice"));

        let alice = service.lookup("Alice").unwrap();
        assert_eq!(alice, Account::new("Alice", "pw1", 100, 1000));
    }

    #[test]
    fn test_register_validation() {
        let storage = Storage::in_memory();
        let settings = plaintext_settings();
        let service = AccountService::new(&storage, &settings);

        assert!(service.register("", "pw", 1, 1).unwrap_err().is_validation());
        assert!(service.register("a/b", "pw", 1, 1).unwrap_err().is_validation());
        assert!(service.register("Bob", "", 1, 1).unwrap_err().is_validation());
        assert!(service.register("Bob", "pw", -1, 1).unwrap_err().is_validation());
        assert!(!service.exists("Bob").unwrap());
    }

    #[test]
    fn test_lookup_missing() {
        let storage = Storage::in_memory();
        let settings = Settings::default();
        let service = AccountService::new(&storage, &settings);

        assert!(service.lookup("ghost").unwrap_err().is_not_found());
    }

    #[test]
    fn test_verify_credentials() {
        let storage = Storage::in_memory();
        let settings = Settings::default();
        let service = AccountService::new(&storage, &settings);
        service.register("Alice", "pw1", 100, 1000).unwrap();

        assert!(service.verify_credentials("Alice", "pw1").unwrap());
        assert!(!service.verify_credentials("Alice", "wrong").unwrap());
        assert!(!service.verify_credentials("ghost", "pw1").unwrap());
    }

    #[test]
    fn test_plaintext_upgraded_on_login() {
        let storage = Storage::in_memory();
        let mut legacy = AccountMap::new();
        legacy.insert("Rahim".into(), Account::new("Rahim", "pw", 10, 100));
        storage.accounts.save(&legacy).unwrap();

        let settings = Settings::default();
        let service = AccountService::new(&storage, &settings);

        assert!(!service.verify_credentials("Rahim", "nope").unwrap());
        assert_eq!(service.lookup("Rahim").unwrap().password, "pw");

        assert!(service.verify_credentials("Rahim", "pw").unwrap());
        let upgraded = service.lookup("Rahim").unwrap();
        assert!(is_hashed(&upgraded.password));
        assert!(service.verify_credentials("Rahim", "pw").unwrap());
    }

    #[test]
    fn test_plaintext_kept_when_hashing_disabled() {
        let storage = Storage::in_memory();
        let settings = plaintext_settings();
        let service = AccountService::new(&storage, &settings);

        service.register("Alice", "pw1", 100, 1000).unwrap();
        assert!(service.verify_credentials("Alice", "pw1").unwrap());
        assert_eq!(service.lookup("Alice").unwrap().password, "pw1");
    }

    #[test]
    fn test_update_password() {
        let storage = Storage::in_memory();
        let settings = Settings::default();
        let service = AccountService::new(&storage, &settings);
        service.register("Alice", "pw1", 100, 1000).unwrap();

        let result = service.update_password("Alice", "wrong", "pw2");
        assert!(matches!(result, Err(SonnicError::Unauthorized)));
        assert!(service.verify_credentials("Alice", "pw1").unwrap());

        service.update_password("Alice", "pw1", "pw2").unwrap();
        assert!(!service.verify_credentials("Alice", "pw1").unwrap());
        assert!(service.verify_credentials("Alice", "pw2").unwrap());

        // Goals are untouched by a password change
        let alice = service.lookup("Alice").unwrap();
        assert_eq!((alice.daily_goal, alice.target), (100, 1000));
    }
}

//! Session controller
//!
//! Tracks which user is authenticated in this process and mirrors it to the
//! persisted session marker so the next run can resume.

use crate::config::Settings;
use crate::error::{SonnicError, SonnicResult};
use crate::storage::Storage;

use super::account::AccountService;

/// Authentication state of the running process
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum SessionState {
    #[default]
    Anonymous,
    Authenticated(String),
}

impl SessionState {
    pub fn user(&self) -> Option<&str> {
        match self {
            Self::Anonymous => None,
            Self::Authenticated(user) => Some(user),
        }
    }

    pub fn is_authenticated(&self) -> bool {
        matches!(self, Self::Authenticated(_))
    }
}

/// Login/logout/resume transitions over the persisted marker
pub struct SessionController<'a> {
    storage: &'a Storage,
    accounts: AccountService<'a>,
    state: SessionState,
}

impl<'a> SessionController<'a> {
    /// Create a controller in the Anonymous state
    pub fn new(storage: &'a Storage, settings: &'a Settings) -> Self {
        Self {
            storage,
            accounts: AccountService::new(storage, settings),
            state: SessionState::Anonymous,
        }
    }

    pub fn current(&self) -> &SessionState {
        &self.state
    }

    /// Pick up a session left by a previous run
    ///
    /// A marker naming a user that no longer exists is treated as absent.
    pub fn resume(&mut self) -> SonnicResult<&SessionState> {
        if let Some(user) = self.storage.session.load()? {
            if self.accounts.exists(&user)? {
                log::info!("Resumed session for '{}'", user);
                self.state = SessionState::Authenticated(user);
            } else {
                log::warn!("Ignoring session marker for unknown user '{}'", user);
                self.state = SessionState::Anonymous;
            }
        }
        Ok(&self.state)
    }

    /// Authenticate and persist the session marker
    ///
    /// On failure the state is left unchanged.
    pub fn login(&mut self, name: &str, password: &str) -> SonnicResult<&SessionState> {
        if !self.accounts.verify_credentials(name, password)? {
            log::warn!("Failed login attempt for '{}'", name);
            return Err(SonnicError::AuthenticationFailed);
        }

        self.storage.session.save(name)?;
        self.state = SessionState::Authenticated(name.to_string());

        log::info!("User '{}' logged in", name);
        Ok(&self.state)
    }

    /// Return to Anonymous and clear the persisted marker
    pub fn logout(&mut self) -> SonnicResult<()> {
        if let SessionState::Authenticated(user) = &self.state {
            log::info!("User '{}' logged out", user);
        }

        self.storage.session.clear()?;
        self.state = SessionState::Anonymous;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::SonnicPaths;
    use tempfile::TempDir;

    fn settings() -> Settings {
        Settings {
            hash_passwords: false,
            ..Settings::default()
        }
    }

    fn register_alice(storage: &Storage, settings: &Settings) {
        AccountService::new(storage, settings)
            .register("Alice", "pw1", 100, 1000)
            .unwrap();
    }

    #[test]
    fn test_login_success() {
        let storage = Storage::in_memory();
        let settings = settings();
        register_alice(&storage, &settings);

        let mut session = SessionController::new(&storage, &settings);
        assert_eq!(session.current(), &SessionState::Anonymous);

        let state = session.login("Alice", "pw1").unwrap();
        assert_eq!(state, &SessionState::Authenticated("Alice".into()));
        assert_eq!(storage.session.load().unwrap().as_deref(), Some("Alice"));
    }

    #[test]
    fn test_login_failure_stays_anonymous() {
        let storage = Storage::in_memory();
        let settings = settings();
        register_alice(&storage, &settings);

        let mut session = SessionController::new(&storage, &settings);
        assert!(matches!(
            session.login("Alice", "bad"),
            Err(SonnicError::AuthenticationFailed)
        ));
        assert!(matches!(
            session.login("Nobody", "pw1"),
            Err(SonnicError::AuthenticationFailed)
        ));
        assert!(!session.current().is_authenticated());
        assert_eq!(storage.session.load().unwrap(), None);
    }

    #[test]
    fn test_logout_clears_marker() {
        let storage = Storage::in_memory();
        let settings = settings();
        register_alice(&storage, &settings);

        let mut session = SessionController::new(&storage, &settings);
        session.login("Alice", "pw1").unwrap();
        session.logout().unwrap();

        assert_eq!(session.current(), &SessionState::Anonymous);
        assert_eq!(storage.session.load().unwrap(), None);

        // Logging out while anonymous is a no-op
        session.logout().unwrap();
    }

    #[test]
    fn test_resume_after_restart() {
        let temp_dir = TempDir::new().unwrap();
        let paths = SonnicPaths::with_base_dir(temp_dir.path().to_path_buf());
        let settings = settings();

        {
            let storage = Storage::new(&paths).unwrap();
            register_alice(&storage, &settings);
            SessionController::new(&storage, &settings)
                .login("Alice", "pw1")
                .unwrap();
        }

        // New process: no login, marker still present
        let storage = Storage::new(&paths).unwrap();
        let mut session = SessionController::new(&storage, &settings);
        assert_eq!(
            session.resume().unwrap(),
            &SessionState::Authenticated("Alice".into())
        );
    }

    #[test]
    fn test_no_resume_after_logout_and_restart() {
        let temp_dir = TempDir::new().unwrap();
        let paths = SonnicPaths::with_base_dir(temp_dir.path().to_path_buf());
        let settings = settings();

        {
            let storage = Storage::new(&paths).unwrap();
            register_alice(&storage, &settings);
            let mut session = SessionController::new(&storage, &settings);
            session.login("Alice", "pw1").unwrap();
            session.logout().unwrap();
        }

        let storage = Storage::new(&paths).unwrap();
        let mut session = SessionController::new(&storage, &settings);
        assert_eq!(session.resume().unwrap(), &SessionState::Anonymous);
    }

    #[test]
    fn test_stale_marker_is_ignored() {
        let storage = Storage::in_memory();
        let settings = settings();
        storage.session.save("Ghost").unwrap();

        let mut session = SessionController::new(&storage, &settings);
        assert_eq!(session.resume().unwrap(), &SessionState::Anonymous);
    }
}

//! Password hashing using Argon2id
//!
//! New credentials are stored as PHC strings (`$argon2id$v=19$...`) with a
//! random salt. Records written before hashing was enabled hold the password
//! verbatim; those are still accepted by [`verify_password`].

use argon2::{
    password_hash::{rand_core::OsRng, PasswordHash, PasswordHasher, PasswordVerifier, SaltString},
    Argon2,
};

use crate::error::{SonnicError, SonnicResult};

const PHC_PREFIX: &str = "$argon2";

/// Hash a password into a PHC string
pub fn hash_password(password: &str) -> SonnicResult<String> {
    let salt = SaltString::generate(&mut OsRng);

    let hash = Argon2::default()
        .hash_password(password.as_bytes(), &salt)
        .map_err(|e| SonnicError::Credential(format!("Failed to hash password: {}", e)))?;

    Ok(hash.to_string())
}

/// Whether a stored credential is an Argon2 PHC string
pub fn is_hashed(stored: &str) -> bool {
    stored.starts_with(PHC_PREFIX)
}

/// Check a candidate password against a stored credential
///
/// A stored value that looks like a PHC string but fails to parse never
/// matches.
pub fn verify_password(candidate: &str, stored: &str) -> bool {
    if !is_hashed(stored) {
        return candidate == stored;
    }

    match PasswordHash::new(stored) {
        Ok(parsed) => Argon2::default()
            .verify_password(candidate.as_bytes(), &parsed)
            .is_ok(),
        Err(e) => {
            log::warn!("Unparseable password hash in account store: {}", e);
            false
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hash_and_verify() {
        let hash = hash_password("pw1").unwrap();
        assert!(is_hashed(&hash));
        assert!(verify_password("pw1", &hash));
        assert!(!verify_password("pw2", &hash));
    }

    #[test]
    fn test_same_password_different_salt() {
        let first = hash_password("secret").unwrap();
        let second = hash_password("secret").unwrap();
        assert_ne!(first, second);
    }

    #[test]
    fn test_plaintext_credentials_still_verify() {
        assert!(!is_hashed("pw1"));
        assert!(verify_password("pw1", "pw1"));
        assert!(!verify_password("pw1", "PW1"));
    }

    #[test]
    fn test_corrupt_hash_never_matches() {
        assert!(!verify_password("anything", "$argon2id$garbage"));
    }
}

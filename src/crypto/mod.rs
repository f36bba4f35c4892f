//! Credential handling for Sonnic Tracker
//!
//! Argon2id password hashing and zero-on-drop storage for passwords
//! typed at the console.

pub mod password;
pub mod secure_memory;

pub use password::{hash_password, is_hashed, verify_password};
pub use secure_memory::SecureString;

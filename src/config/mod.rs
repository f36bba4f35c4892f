//! Configuration module for Sonnic Tracker
//!
//! - Base directory resolution and derived file paths
//! - User settings persistence

pub mod paths;
pub mod settings;

pub use paths::SonnicPaths;
pub use settings::Settings;

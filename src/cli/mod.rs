//! Interactive command-line front end
//!
//! Bridges console input with the service layer.

pub mod menu;
pub mod prompt;

pub use menu::{App, MainChoice, SessionChoice};
pub use prompt::Console;

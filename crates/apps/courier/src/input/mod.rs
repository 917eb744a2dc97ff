//! Input handling for terminal commands
//!
//! Parses stdin lines into console commands and provides the help listing.

pub mod commands;
pub mod help;

pub use commands::{Command, parse};

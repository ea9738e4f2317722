//! CLI module
//!
//! Command-line interface for running the tap.
//!
//! # Commands
//!
//! - `about` - Tap metadata and settings
//! - `discover` - Print the stream catalog
//! - `check` - Test connection to the API
//! - `read` - Sync streams as Singer messages

mod commands;
mod runner;

pub use commands::{Cli, Commands, OutputFormat};
pub use runner::{about_message, catalog, check_connection, Runner, TAP_NAME};

//! Curio CLI library.
//!
//! Configuration, command execution and output formatting for the `curio`
//! command-line tool: extract clauses from local or remote RFP documents,
//! import them into a local database, and browse what was stored.

pub mod cli;
pub mod commands;
pub mod config;
pub mod error;
pub mod output;

pub use cli::{Cli, Command};
pub use config::Config;
pub use error::{CliError, Result};
pub use output::Formatter;

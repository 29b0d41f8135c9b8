//! CLI module for junkboard
//!
//! Provides command-line interface for:
//! - serve: Load configuration and run the HTTP API

mod args;
mod commands;
mod errors;

pub use args::{Cli, Command};
pub use commands::{resolve_config, resolve_config_with, run, run_command, serve};
pub use errors::{CliError, CliErrorCode, CliResult};

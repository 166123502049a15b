//! CLI module for storefront
//!
//! Provides command-line interface for:
//! - serve: Boot the service and serve HTTP
//! - query: One-shot autocomplete query against a seed catalog

mod args;
mod commands;
mod errors;

pub use args::{Cli, Command};
pub use commands::{query, run, run_command, serve};
pub use errors::{CliError, CliErrorCode, CliResult};

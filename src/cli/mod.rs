//! CLI module
//!
//! Provides the command-line interface:
//! - start: load the inventory and serve the HTTP API
//! - check-config: validate the inventory file and exit

mod args;
mod commands;
mod errors;

pub use args::{Cli, Command};
pub use commands::{check_config, run, start};
pub use errors::{CliError, CliResult};

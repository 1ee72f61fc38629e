//! CLI module for cuantizar
//!
//! Contains the command runner and output utilities.

mod logging;
mod quantize;

pub use logging::{log, LogLevel};
pub use quantize::run_quantize;

// Re-export Cli from config for convenience
pub use crate::config::Cli;

use crate::Result;

/// Execute the tool based on the parsed arguments.
pub fn run_command(cli: Cli) -> Result<()> {
    let log_level = cli.log_level();
    quantize::run_quantize(&cli, log_level)
}

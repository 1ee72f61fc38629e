//! Cuantizar CLI
//!
//! Single-purpose entry point: quantize a SafeTensors model to int8.
//!
//! # Usage
//!
//! ```bash
//! cuantizar --input model.safetensors --output out/model_int8.safetensors
//! cuantizar --input model.safetensors --output out/model_int8.safetensors --per-channel
//! ```

use clap::Parser;
use cuantizar::cli::{run_command, Cli};
use std::process::ExitCode;

fn main() -> ExitCode {
    let cli = Cli::parse();

    match run_command(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {e}");
            ExitCode::FAILURE
        }
    }
}

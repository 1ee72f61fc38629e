//! CLI argument parsing
//!
//! # Usage
//!
//! ```bash
//! cuantizar --input model.safetensors --output out/model_int8.safetensors
//! cuantizar --input model.safetensors --output out/model_int8.safetensors --per-channel
//! ```

use crate::cli::LogLevel;
use crate::quant::QuantGranularity;
use clap::Parser;
use std::path::PathBuf;

/// Cuantizar: dynamic int8 quantization for SafeTensors models
#[derive(Parser, Debug, Clone, PartialEq)]
#[command(name = "cuantizar")]
#[command(version)]
#[command(
    about = "Quantize a floating-point SafeTensors model to int8 to shrink its footprint on constrained devices"
)]
pub struct Cli {
    /// Path to the fp32 model file
    #[arg(long, value_name = "MODEL")]
    pub input: PathBuf,

    /// Output path for the quantized model (parent directories are created)
    #[arg(long, value_name = "MODEL")]
    pub output: PathBuf,

    /// Enable per-channel weight quantization (slower to build, better accuracy)
    #[arg(long)]
    pub per_channel: bool,

    /// Enable verbose output
    #[arg(short, long)]
    pub verbose: bool,

    /// Suppress all output except errors
    #[arg(short, long)]
    pub quiet: bool,
}

impl Cli {
    /// Resolve the output log level from the verbose/quiet flags.
    pub fn log_level(&self) -> LogLevel {
        if self.quiet {
            LogLevel::Quiet
        } else if self.verbose {
            LogLevel::Verbose
        } else {
            LogLevel::Normal
        }
    }

    /// Resolve the quantization granularity from the per-channel flag.
    pub fn granularity(&self) -> QuantGranularity {
        if self.per_channel {
            QuantGranularity::PerChannel
        } else {
            QuantGranularity::PerTensor
        }
    }
}

/// Parse CLI arguments from an iterator.
pub fn parse_args<I, T>(args: I) -> Result<Cli, clap::Error>
where
    I: IntoIterator<Item = T>,
    T: Into<std::ffi::OsString> + Clone,
{
    Cli::try_parse_from(args)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_required_args() {
        let cli = parse_args([
            "cuantizar",
            "--input",
            "model.safetensors",
            "--output",
            "out/model_int8.safetensors",
        ])
        .unwrap();

        assert_eq!(cli.input, PathBuf::from("model.safetensors"));
        assert_eq!(cli.output, PathBuf::from("out/model_int8.safetensors"));
        assert!(!cli.per_channel);
    }

    #[test]
    fn test_parse_per_channel() {
        let cli = parse_args([
            "cuantizar",
            "--input",
            "m.safetensors",
            "--output",
            "q.safetensors",
            "--per-channel",
        ])
        .unwrap();

        assert!(cli.per_channel);
        assert_eq!(cli.granularity(), QuantGranularity::PerChannel);
    }

    #[test]
    fn test_default_granularity_is_per_tensor() {
        let cli = parse_args([
            "cuantizar",
            "--input",
            "m.safetensors",
            "--output",
            "q.safetensors",
        ])
        .unwrap();

        assert_eq!(cli.granularity(), QuantGranularity::PerTensor);
    }

    #[test]
    fn test_missing_input_is_an_error() {
        let result = parse_args(["cuantizar", "--output", "q.safetensors"]);
        assert!(result.is_err());
    }

    #[test]
    fn test_missing_output_is_an_error() {
        let result = parse_args(["cuantizar", "--input", "m.safetensors"]);
        assert!(result.is_err());
    }

    #[test]
    fn test_log_level_resolution() {
        let cli = parse_args(["cuantizar", "--input", "m", "--output", "q"]).unwrap();
        assert_eq!(cli.log_level(), LogLevel::Normal);

        let cli =
            parse_args(["cuantizar", "--input", "m", "--output", "q", "--verbose"]).unwrap();
        assert_eq!(cli.log_level(), LogLevel::Verbose);

        let cli = parse_args(["cuantizar", "--input", "m", "--output", "q", "--quiet"]).unwrap();
        assert_eq!(cli.log_level(), LogLevel::Quiet);
    }

    #[test]
    fn test_quiet_wins_over_verbose() {
        let cli = parse_args([
            "cuantizar",
            "--input",
            "m",
            "--output",
            "q",
            "--verbose",
            "--quiet",
        ])
        .unwrap();
        assert_eq!(cli.log_level(), LogLevel::Quiet);
    }
}

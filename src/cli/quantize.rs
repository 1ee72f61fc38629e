//! Quantize command implementation

use crate::cli::logging::log;
use crate::cli::LogLevel;
use crate::config::Cli;
use crate::convert::ModelQuantizer;
use crate::Result;

pub fn run_quantize(args: &Cli, level: LogLevel) -> Result<()> {
    let granularity = args.granularity();

    log(
        level,
        LogLevel::Normal,
        &format!(
            "Quantizing {} to int8 ({})",
            args.input.display(),
            granularity.label()
        ),
    );

    let outcome = ModelQuantizer::new()
        .with_granularity(granularity)
        .quantize(&args.input, &args.output)?;

    for tensor in &outcome.tensors {
        if tensor.quantized {
            log(
                level,
                LogLevel::Verbose,
                &format!(
                    "  Quantized {}: {:?} -> {} bytes",
                    tensor.name, tensor.shape, tensor.bytes_after
                ),
            );
        } else {
            log(
                level,
                LogLevel::Verbose,
                &format!("  Skipping {} (not an F32 weight)", tensor.name),
            );
        }
    }

    log(
        level,
        LogLevel::Normal,
        &format!(
            "Quantization complete: {} tensors quantized, {} passed through, {:.1}x compression",
            outcome.quantized_count(),
            outcome.passthrough_count(),
            outcome.compression_ratio()
        ),
    );
    log(
        level,
        LogLevel::Normal,
        &format!("Quantized model written to {}", outcome.output_path.display()),
    );

    Ok(())
}

//! Dynamic int8 quantization for SafeTensors models.
//!
//! Converts a floating-point SafeTensors model into a signed 8-bit version to
//! reduce its memory and storage footprint on constrained devices. Weight
//! scales are computed from the weights themselves at conversion time; no
//! calibration dataset is required.
//!
//! # Usage
//!
//! ```bash
//! # Per-tensor quantization (default)
//! cuantizar --input model.safetensors --output out/model_int8.safetensors
//!
//! # Per-channel scales (slower to build, better accuracy)
//! cuantizar --input model.safetensors --output out/model_int8.safetensors --per-channel
//! ```
//!
//! # Library entry point
//!
//! ```no_run
//! use cuantizar::{quantize_model, QuantGranularity};
//!
//! let outcome = quantize_model(
//!     "model.safetensors",
//!     "out/model_int8.safetensors",
//!     QuantGranularity::PerChannel,
//! )?;
//! println!("{:.1}x compression", outcome.compression_ratio());
//! # Ok::<(), cuantizar::CuantizarError>(())
//! ```

pub mod cli;
pub mod config;
pub mod convert;
pub mod error;
pub mod io;
pub mod quant;

pub use convert::{quantize_model, ModelQuantizer, QuantizeOutcome, TensorReport};
pub use error::{CuantizarError, Result};
pub use quant::QuantGranularity;

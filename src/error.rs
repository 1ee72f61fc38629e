//! Error types with actionable diagnostics.
//!
//! Every variant carries enough context for the user to fix the problem
//! without consulting external documentation.

use std::path::PathBuf;
use thiserror::Error;

/// Result type alias for cuantizar operations.
pub type Result<T> = std::result::Result<T, CuantizarError>;

/// Errors that can occur while quantizing a model.
#[derive(Error, Debug)]
pub enum CuantizarError {
    /// Input model file not found.
    #[error("Model file not found: {path}\n  → Check the --input path")]
    ModelNotFound { path: PathBuf },

    /// Input file is not a valid SafeTensors model.
    #[error("Failed to parse {path} as SafeTensors:\n  {message}\n  → The input must be a valid SafeTensors model")]
    ModelParse { path: PathBuf, message: String },

    /// A tensor inside the model could not be read.
    #[error("Failed to read tensor '{name}': {message}")]
    TensorRead { name: String, message: String },

    /// IO error with context.
    #[error("IO error: {context}\n  Cause: {source}")]
    Io {
        context: String,
        #[source]
        source: std::io::Error,
    },

    /// Output serialization error.
    #[error("Failed to serialize quantized model: {message}")]
    Serialization { message: String },
}

impl CuantizarError {
    /// Create an IO error with context.
    pub fn io(context: impl Into<String>, source: std::io::Error) -> Self {
        Self::Io { context: context.into(), source }
    }
}

//! Model loading functionality

use crate::{CuantizarError, Result};
use std::path::Path;

/// Read a model file into memory.
///
/// The returned buffer is deserialized by the caller with
/// [`safetensors::SafeTensors::deserialize`], which borrows the bytes.
pub fn read_model(path: &Path) -> Result<Vec<u8>> {
    if !path.exists() {
        return Err(CuantizarError::ModelNotFound { path: path.to_path_buf() });
    }

    std::fs::read(path)
        .map_err(|e| CuantizarError::io(format!("reading model {}", path.display()), e))
}

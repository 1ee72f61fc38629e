//! Model saving functionality

use crate::{CuantizarError, Result};
use safetensors::tensor::{Dtype, View};
use std::borrow::Cow;
use std::collections::HashMap;
use std::path::Path;

/// Owned tensor buffer used to assemble the output model.
///
/// [`safetensors::tensor::TensorView`] borrows its data, which does not work
/// when the bytes are produced during conversion; this owns them instead and
/// plugs into the serializer through the [`View`] trait.
#[derive(Debug, Clone)]
pub struct RawTensor {
    dtype: Dtype,
    shape: Vec<usize>,
    data: Vec<u8>,
}

impl RawTensor {
    /// Create a tensor from an owned byte buffer.
    pub fn new(dtype: Dtype, shape: Vec<usize>, data: Vec<u8>) -> Self {
        Self { dtype, shape, data }
    }

    /// Wrap quantized i8 data.
    pub fn from_i8(shape: Vec<usize>, values: &[i8]) -> Self {
        Self {
            dtype: Dtype::I8,
            shape,
            data: values.iter().map(|&v| v as u8).collect(),
        }
    }

    /// Wrap f32 data, stored little-endian as SafeTensors requires.
    pub fn from_f32(shape: Vec<usize>, values: &[f32]) -> Self {
        Self {
            dtype: Dtype::F32,
            shape,
            data: values.iter().flat_map(|v| v.to_le_bytes()).collect(),
        }
    }
}

impl View for RawTensor {
    fn dtype(&self) -> Dtype {
        self.dtype
    }

    fn shape(&self) -> &[usize] {
        &self.shape
    }

    fn data(&self) -> Cow<'_, [u8]> {
        Cow::from(&self.data)
    }

    fn data_len(&self) -> usize {
        self.data.len()
    }
}

/// Write an assembled model to `path`, creating missing parent directories.
pub fn write_model(
    path: &Path,
    tensors: Vec<(String, RawTensor)>,
    metadata: HashMap<String, String>,
) -> Result<()> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent).map_err(|e| {
                CuantizarError::io(format!("creating output directory {}", parent.display()), e)
            })?;
        }
    }

    safetensors::tensor::serialize_to_file(tensors, &Some(metadata), path)
        .map_err(|e| CuantizarError::Serialization { message: e.to_string() })
}

//! Quantization parameters and quantized tensor structures

use serde::{Deserialize, Serialize};

use super::QuantGranularity;

/// Symmetric int8 quantization parameters for a tensor.
///
/// Zero-point is always 0: signed 8-bit weights use a range centered on
/// zero, so only scales are stored.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct QuantParams {
    /// Scale factor(s): one entry per-tensor, or one per channel
    pub scales: Vec<f32>,
    /// Quantization granularity
    pub granularity: QuantGranularity,
}

impl QuantParams {
    /// Number of scale groups (1 for per-tensor, channel count for per-channel)
    pub fn num_groups(&self) -> usize {
        self.scales.len()
    }
}

/// Quantized tensor with its parameters and original shape
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct QuantizedTensor {
    /// Quantized signed 8-bit data
    pub data: Vec<i8>,
    /// Quantization parameters
    pub params: QuantParams,
    /// Original shape
    pub shape: Vec<usize>,
}

impl QuantizedTensor {
    /// Memory usage in bytes: int8 data plus f32 scales
    pub fn memory_bytes(&self) -> usize {
        self.data.len() + self.params.scales.len() * 4
    }
}

//! Quantization granularity type definitions

use serde::{Deserialize, Serialize};

/// Quantization granularity options
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum QuantGranularity {
    /// Single scale for the entire tensor
    #[default]
    PerTensor,
    /// Separate scale per channel (axis 0 for weights)
    PerChannel,
}

impl QuantGranularity {
    /// Stable lowercase label used in logs and file metadata
    pub fn label(self) -> &'static str {
        match self {
            QuantGranularity::PerTensor => "per_tensor",
            QuantGranularity::PerChannel => "per_channel",
        }
    }
}

//! Dynamic int8 weight quantization.
//!
//! Provides symmetric signed 8-bit quantization at two granularities:
//! - **Per-tensor**: a single scale for the entire tensor (fastest)
//! - **Per-channel**: a separate scale per output channel, axis 0
//!   (slower to compute, better accuracy)
//!
//! Scales are derived from the weight values themselves at conversion time;
//! no calibration dataset is involved.

mod calibrate;
mod metrics;
mod params;
mod quantize;
mod types;

pub use calibrate::{calibrate_per_channel, calibrate_per_tensor};
pub use metrics::{compare_granularities, quantization_mse};
pub use params::{QuantParams, QuantizedTensor};
pub use quantize::{
    dequantize_tensor, dequantize_with_params, quantize_tensor, quantize_with_params,
};
pub use types::QuantGranularity;

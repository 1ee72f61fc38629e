//! Scale calibration for per-tensor and per-channel quantization

use super::{QuantGranularity, QuantParams};

/// Largest representable magnitude for signed 8-bit values.
pub(crate) const QMAX: f32 = 127.0;

/// Floor applied to observed ranges so scales are never zero or NaN.
const RANGE_FLOOR: f32 = 1e-8;

fn max_abs(values: &[f32]) -> f32 {
    values
        .iter()
        .map(|v| v.abs())
        .max_by(|a, b| a.partial_cmp(b).unwrap_or(std::cmp::Ordering::Equal))
        .unwrap_or(RANGE_FLOOR)
        .max(RANGE_FLOOR)
}

/// Calibrate a single symmetric scale for the whole tensor.
pub fn calibrate_per_tensor(values: &[f32]) -> QuantParams {
    QuantParams {
        scales: vec![max_abs(values) / QMAX],
        granularity: QuantGranularity::PerTensor,
    }
}

/// Calibrate one symmetric scale per channel.
///
/// Values are laid out row-major with the channel as the leading axis:
/// `[channels, features]`.
pub fn calibrate_per_channel(values: &[f32], num_channels: usize) -> QuantParams {
    if num_channels == 0 || values.is_empty() {
        return QuantParams {
            scales: vec![1.0],
            granularity: QuantGranularity::PerChannel,
        };
    }

    let features_per_channel = values.len() / num_channels;
    let mut scales = Vec::with_capacity(num_channels);

    for ch in 0..num_channels {
        let start = ch * features_per_channel;
        let end = start + features_per_channel;
        scales.push(max_abs(&values[start..end]) / QMAX);
    }

    QuantParams {
        scales,
        granularity: QuantGranularity::PerChannel,
    }
}

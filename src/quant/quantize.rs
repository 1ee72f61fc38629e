//! Quantization and dequantization functions

use super::calibrate::QMAX;
use super::{
    calibrate_per_channel, calibrate_per_tensor, QuantGranularity, QuantParams, QuantizedTensor,
};

/// Quantize values using given parameters
///
/// # Arguments
/// * `values` - Input f32 values
/// * `params` - Quantization parameters
pub fn quantize_with_params(values: &[f32], params: &QuantParams) -> Vec<i8> {
    let qmin = -QMAX - 1.0;

    let group_size = match params.granularity {
        QuantGranularity::PerTensor => values.len(),
        QuantGranularity::PerChannel => values.len() / params.scales.len().max(1),
    };

    let mut result = Vec::with_capacity(values.len());

    for (i, &val) in values.iter().enumerate() {
        let group_idx = i / group_size.max(1);
        let scale = params.scales.get(group_idx).copied().unwrap_or(1.0);
        result.push((val / scale).round().clamp(qmin, QMAX) as i8);
    }

    result
}

/// Dequantize values using given parameters
///
/// # Arguments
/// * `quantized` - Quantized i8 values
/// * `params` - Quantization parameters
pub fn dequantize_with_params(quantized: &[i8], params: &QuantParams) -> Vec<f32> {
    let group_size = match params.granularity {
        QuantGranularity::PerTensor => quantized.len(),
        QuantGranularity::PerChannel => quantized.len() / params.scales.len().max(1),
    };

    quantized
        .iter()
        .enumerate()
        .map(|(i, &q)| {
            let group_idx = i / group_size.max(1);
            let scale = params.scales.get(group_idx).copied().unwrap_or(1.0);
            f32::from(q) * scale
        })
        .collect()
}

/// Quantize a tensor with the specified granularity.
///
/// Per-channel treats axis 0 of `shape` as the channel axis.
pub fn quantize_tensor(
    values: &[f32],
    shape: &[usize],
    granularity: QuantGranularity,
) -> QuantizedTensor {
    let params = match granularity {
        QuantGranularity::PerTensor => calibrate_per_tensor(values),
        QuantGranularity::PerChannel => {
            let num_channels = shape.first().copied().unwrap_or(1);
            calibrate_per_channel(values, num_channels)
        }
    };

    let data = quantize_with_params(values, &params);

    QuantizedTensor {
        data,
        params,
        shape: shape.to_vec(),
    }
}

/// Dequantize tensor
pub fn dequantize_tensor(quantized: &QuantizedTensor) -> Vec<f32> {
    dequantize_with_params(&quantized.data, &quantized.params)
}

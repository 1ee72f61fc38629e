//! Quantization error metrics

use super::{
    calibrate_per_channel, calibrate_per_tensor, dequantize_with_params, quantize_with_params,
};

/// Mean squared error between original and dequantized values.
///
/// Returns `f32::MAX` for empty or length-mismatched inputs.
pub fn quantization_mse(original: &[f32], dequantized: &[f32]) -> f32 {
    if original.is_empty() || original.len() != dequantized.len() {
        return f32::MAX;
    }

    let sum: f32 = original
        .iter()
        .zip(dequantized.iter())
        .map(|(o, d)| (o - d) * (o - d))
        .sum();

    sum / original.len() as f32
}

/// Compare per-tensor and per-channel quantization error on the same values.
///
/// Returns `(per_tensor_mse, per_channel_mse)`.
pub fn compare_granularities(values: &[f32], num_channels: usize) -> (f32, f32) {
    let pt_params = calibrate_per_tensor(values);
    let pt_deq = dequantize_with_params(&quantize_with_params(values, &pt_params), &pt_params);

    let pc_params = calibrate_per_channel(values, num_channels);
    let pc_deq = dequantize_with_params(&quantize_with_params(values, &pc_params), &pc_params);

    (
        quantization_mse(values, &pt_deq),
        quantization_mse(values, &pc_deq),
    )
}

//! Model quantization pipeline: load, quantize weights, write.

use crate::io::{read_model, write_model, RawTensor};
use crate::quant::{quantize_tensor, QuantGranularity};
use crate::{CuantizarError, Result};
use safetensors::tensor::Dtype;
use safetensors::SafeTensors;
use serde::Serialize;
use std::collections::HashMap;
use std::path::{Path, PathBuf};

/// Suffix appended to a quantized tensor's name for its scale tensor.
pub const SCALE_SUFFIX: &str = ".scale";

/// Metadata key under which the quantization manifest is stored.
pub const MANIFEST_KEY: &str = "quantization";

/// Weight tensors are F32 with at least this many dimensions. Rank-0/rank-1
/// F32 tensors (biases, norm parameters) stay in full precision.
const WEIGHT_MIN_RANK: usize = 2;

/// Per-tensor record of what the conversion did.
#[derive(Debug, Clone)]
pub struct TensorReport {
    /// Tensor name
    pub name: String,
    /// Tensor shape
    pub shape: Vec<usize>,
    /// Size of the original data in bytes
    pub bytes_before: usize,
    /// Size after conversion (int8 data plus scales, or unchanged)
    pub bytes_after: usize,
    /// Whether the tensor was quantized or passed through
    pub quantized: bool,
}

/// Result of a quantization run.
#[derive(Debug, Clone)]
pub struct QuantizeOutcome {
    /// Input path
    pub input_path: PathBuf,
    /// Output path
    pub output_path: PathBuf,
    /// Input file size in bytes
    pub input_size: u64,
    /// Output file size in bytes
    pub output_size: u64,
    /// Granularity the run used
    pub granularity: QuantGranularity,
    /// One entry per input tensor, in name order
    pub tensors: Vec<TensorReport>,
}

impl QuantizeOutcome {
    /// Number of tensors that were quantized.
    pub fn quantized_count(&self) -> usize {
        self.tensors.iter().filter(|t| t.quantized).count()
    }

    /// Number of tensors passed through unchanged.
    pub fn passthrough_count(&self) -> usize {
        self.tensors.len() - self.quantized_count()
    }

    /// Compression ratio (input/output file size; > 1 means smaller output).
    pub fn compression_ratio(&self) -> f64 {
        if self.output_size > 0 {
            self.input_size as f64 / self.output_size as f64
        } else {
            1.0
        }
    }
}

/// Manifest embedded in the output file's metadata map.
#[derive(Serialize)]
struct QuantizationManifest<'a> {
    scheme: &'a str,
    granularity: &'a str,
    quantized: usize,
    passthrough: usize,
    producer: String,
}

/// Dynamic int8 model quantizer.
pub struct ModelQuantizer {
    granularity: QuantGranularity,
}

impl Default for ModelQuantizer {
    fn default() -> Self {
        Self::new()
    }
}

impl ModelQuantizer {
    /// Create a quantizer with per-tensor granularity.
    pub fn new() -> Self {
        Self { granularity: QuantGranularity::PerTensor }
    }

    /// Set the quantization granularity.
    pub fn with_granularity(mut self, granularity: QuantGranularity) -> Self {
        self.granularity = granularity;
        self
    }

    /// Quantize the model at `input` and write the result to `output`.
    ///
    /// F32 tensors of rank >= 2 are replaced by an I8 tensor under the
    /// original name plus an F32 `<name>.scale` tensor; everything else is
    /// copied through unchanged.
    pub fn quantize(&self, input: &Path, output: &Path) -> Result<QuantizeOutcome> {
        let data = read_model(input)?;
        let model = SafeTensors::deserialize(&data).map_err(|e| CuantizarError::ModelParse {
            path: input.to_path_buf(),
            message: e.to_string(),
        })?;

        let mut names: Vec<&str> = model.names().into_iter().map(String::as_str).collect();
        names.sort_unstable();

        let mut out_tensors: Vec<(String, RawTensor)> = Vec::with_capacity(names.len());
        let mut reports: Vec<TensorReport> = Vec::with_capacity(names.len());

        for name in names {
            let tensor = model.tensor(name).map_err(|e| CuantizarError::TensorRead {
                name: name.to_string(),
                message: e.to_string(),
            })?;

            let bytes_before = tensor.data().len();

            if tensor.dtype() == Dtype::F32 && tensor.shape().len() >= WEIGHT_MIN_RANK {
                let values = decode_f32(tensor.data());
                let quantized = quantize_tensor(&values, tensor.shape(), self.granularity);
                let bytes_after = quantized.memory_bytes();

                out_tensors.push((
                    name.to_string(),
                    RawTensor::from_i8(quantized.shape.clone(), &quantized.data),
                ));
                out_tensors.push((
                    format!("{name}{SCALE_SUFFIX}"),
                    RawTensor::from_f32(
                        vec![quantized.params.scales.len()],
                        &quantized.params.scales,
                    ),
                ));

                reports.push(TensorReport {
                    name: name.to_string(),
                    shape: tensor.shape().to_vec(),
                    bytes_before,
                    bytes_after,
                    quantized: true,
                });
            } else {
                out_tensors.push((
                    name.to_string(),
                    RawTensor::new(tensor.dtype(), tensor.shape().to_vec(), tensor.data().to_vec()),
                ));

                reports.push(TensorReport {
                    name: name.to_string(),
                    shape: tensor.shape().to_vec(),
                    bytes_before,
                    bytes_after: bytes_before,
                    quantized: false,
                });
            }
        }

        let quantized = reports.iter().filter(|r| r.quantized).count();
        let manifest = QuantizationManifest {
            scheme: "int8-symmetric-dynamic",
            granularity: self.granularity.label(),
            quantized,
            passthrough: reports.len() - quantized,
            producer: format!("cuantizar {}", env!("CARGO_PKG_VERSION")),
        };
        let manifest_json = serde_json::to_string(&manifest)
            .map_err(|e| CuantizarError::Serialization { message: e.to_string() })?;

        let mut metadata = HashMap::new();
        metadata.insert(MANIFEST_KEY.to_string(), manifest_json);

        write_model(output, out_tensors, metadata)?;

        let output_size = std::fs::metadata(output).map(|m| m.len()).unwrap_or(0);

        Ok(QuantizeOutcome {
            input_path: input.to_path_buf(),
            output_path: output.to_path_buf(),
            input_size: data.len() as u64,
            output_size,
            granularity: self.granularity,
            tensors: reports,
        })
    }
}

/// Quantize a model file. Convenience wrapper over [`ModelQuantizer`].
pub fn quantize_model(
    input: impl AsRef<Path>,
    output: impl AsRef<Path>,
    granularity: QuantGranularity,
) -> Result<QuantizeOutcome> {
    ModelQuantizer::new()
        .with_granularity(granularity)
        .quantize(input.as_ref(), output.as_ref())
}

fn decode_f32(bytes: &[u8]) -> Vec<f32> {
    bytes
        .chunks_exact(4)
        .map(|chunk| f32::from_le_bytes([chunk[0], chunk[1], chunk[2], chunk[3]]))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn write_test_model(dir: &TempDir) -> PathBuf {
        let path = dir.path().join("model.safetensors");
        let tensors = vec![
            (
                "fc1.weight".to_string(),
                RawTensor::from_f32(vec![2, 4], &[0.1, 0.2, -0.1, -0.2, 10.0, 20.0, -10.0, -20.0]),
            ),
            (
                "fc1.bias".to_string(),
                RawTensor::from_f32(vec![2], &[0.5, -0.5]),
            ),
        ];
        write_model(&path, tensors, HashMap::new()).unwrap();
        path
    }

    #[test]
    fn test_quantize_missing_input() {
        let result = quantize_model(
            "/tmp/definitely_not_a_real_model_abc123",
            "/tmp/out.safetensors",
            QuantGranularity::PerTensor,
        );
        assert!(matches!(result, Err(CuantizarError::ModelNotFound { .. })));
    }

    #[test]
    fn test_quantize_invalid_input() {
        let dir = TempDir::new().unwrap();
        let bad = dir.path().join("bad.safetensors");
        std::fs::write(&bad, b"not a safetensors file").unwrap();

        let result = quantize_model(
            &bad,
            dir.path().join("out.safetensors"),
            QuantGranularity::PerTensor,
        );
        assert!(matches!(result, Err(CuantizarError::ModelParse { .. })));
    }

    #[test]
    fn test_quantize_counts_and_sizes() {
        let dir = TempDir::new().unwrap();
        let input = write_test_model(&dir);
        let output = dir.path().join("out.safetensors");

        let outcome = quantize_model(&input, &output, QuantGranularity::PerTensor).unwrap();

        assert_eq!(outcome.quantized_count(), 1);
        assert_eq!(outcome.passthrough_count(), 1);
        assert!(output.exists());
        assert!(outcome.output_size > 0);

        let weight = outcome.tensors.iter().find(|t| t.name == "fc1.weight").unwrap();
        assert!(weight.quantized);
        assert_eq!(weight.bytes_before, 32);
        // 8 int8 values + one f32 scale
        assert_eq!(weight.bytes_after, 12);

        let bias = outcome.tensors.iter().find(|t| t.name == "fc1.bias").unwrap();
        assert!(!bias.quantized);
        assert_eq!(bias.bytes_before, bias.bytes_after);
    }

    #[test]
    fn test_quantize_per_channel_scale_shape() {
        let dir = TempDir::new().unwrap();
        let input = write_test_model(&dir);
        let output = dir.path().join("out.safetensors");

        quantize_model(&input, &output, QuantGranularity::PerChannel).unwrap();

        let bytes = std::fs::read(&output).unwrap();
        let loaded = SafeTensors::deserialize(&bytes).unwrap();

        let scale = loaded.tensor("fc1.weight.scale").unwrap();
        assert_eq!(scale.shape(), &[2]); // one scale per output channel
        assert_eq!(scale.dtype(), Dtype::F32);
    }

    #[test]
    fn test_quantize_output_loadable() {
        let dir = TempDir::new().unwrap();
        let input = write_test_model(&dir);
        let output = dir.path().join("out.safetensors");

        quantize_model(&input, &output, QuantGranularity::PerTensor).unwrap();

        let bytes = std::fs::read(&output).unwrap();
        let loaded = SafeTensors::deserialize(&bytes).unwrap();

        let weight = loaded.tensor("fc1.weight").unwrap();
        assert_eq!(weight.dtype(), Dtype::I8);
        assert_eq!(weight.shape(), &[2, 4]);

        let bias = loaded.tensor("fc1.bias").unwrap();
        assert_eq!(bias.dtype(), Dtype::F32);
    }

    #[test]
    fn test_model_quantizer_default_granularity() {
        let quantizer = ModelQuantizer::default();
        assert_eq!(quantizer.granularity, QuantGranularity::PerTensor);
    }

    #[test]
    fn test_compression_ratio_zero_output() {
        let outcome = QuantizeOutcome {
            input_path: PathBuf::from("in"),
            output_path: PathBuf::from("out"),
            input_size: 1000,
            output_size: 0,
            granularity: QuantGranularity::PerTensor,
            tensors: vec![],
        };
        assert_eq!(outcome.compression_ratio(), 1.0);
    }
}

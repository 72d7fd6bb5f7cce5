//! The classifier input tensor.

/// Side length of the square model input.
pub const MODEL_INPUT_SIZE: usize = 28;

/// Tensor shape as (batch, height, width, channels).
pub const MODEL_INPUT_SHAPE: [usize; 4] = [1, MODEL_INPUT_SIZE, MODEL_INPUT_SIZE, 1];

/// A single-batch, single-channel 28x28 image with values in `[0, 1]`.
///
/// Values are stored row-major. Construction clamps every value into
/// range, so the invariant holds for any producer.
#[derive(Debug, Clone, PartialEq)]
pub struct NormalizedTensor {
    data: Vec<f32>,
    blurred: bool,
    source_std_dev: f64,
}

impl NormalizedTensor {
    /// Number of values in the tensor.
    pub const LEN: usize = MODEL_INPUT_SIZE * MODEL_INPUT_SIZE;

    /// Build a tensor from a fixed-size row-major array.
    pub fn from_array(data: [f32; Self::LEN], blurred: bool, source_std_dev: f64) -> Self {
        Self {
            data: data
                .iter()
                .map(|&v| if v.is_nan() { 0.0 } else { v.clamp(0.0, 1.0) })
                .collect(),
            blurred,
            source_std_dev,
        }
    }

    /// A tensor filled with one value.
    pub fn filled(value: f32) -> Self {
        Self {
            data: vec![value.clamp(0.0, 1.0); Self::LEN],
            blurred: false,
            source_std_dev: 0.0,
        }
    }

    /// (batch, height, width, channels).
    pub fn shape(&self) -> [usize; 4] {
        MODEL_INPUT_SHAPE
    }

    /// Flat row-major values.
    pub fn as_slice(&self) -> &[f32] {
        &self.data
    }

    /// Value at (row, col).
    pub fn get(&self, row: usize, col: usize) -> Option<f32> {
        if row >= MODEL_INPUT_SIZE || col >= MODEL_INPUT_SIZE {
            return None;
        }
        Some(self.data[row * MODEL_INPUT_SIZE + col])
    }

    /// Whether the smoothing pass ran while producing this tensor.
    pub fn blurred(&self) -> bool {
        self.blurred
    }

    /// Grayscale standard deviation (0-255 scale) of the source raster.
    pub fn source_std_dev(&self) -> f64 {
        self.source_std_dev
    }

    /// Summary statistics over all values.
    pub fn stats(&self) -> TensorStats {
        let n = self.data.len() as f64;
        let mut min = f32::INFINITY;
        let mut max = f32::NEG_INFINITY;
        let mut sum = 0.0_f64;
        for &v in &self.data {
            min = min.min(v);
            max = max.max(v);
            sum += v as f64;
        }
        let mean = sum / n;
        let variance = self
            .data
            .iter()
            .map(|&v| (v as f64 - mean).powi(2))
            .sum::<f64>()
            / n;
        TensorStats {
            min,
            max,
            mean,
            std_dev: variance.sqrt(),
        }
    }

    /// Text rendering of the top-left `side` x `side` corner.
    ///
    /// Dark (drawn) pixels render as `█`, then `▓`, `░`, and blank for
    /// background. Each row ends with its value range.
    pub fn ascii_preview(&self, side: usize) -> String {
        let side = side.min(MODEL_INPUT_SIZE);
        let mut out = String::new();
        for row in 0..side {
            let values = &self.data[row * MODEL_INPUT_SIZE..row * MODEL_INPUT_SIZE + side];
            for &v in values {
                out.push(match v {
                    v if v < 0.2 => '█',
                    v if v < 0.5 => '▓',
                    v if v < 0.8 => '░',
                    _ => ' ',
                });
            }
            let lo = values.iter().copied().fold(f32::INFINITY, f32::min);
            let hi = values.iter().copied().fold(f32::NEG_INFINITY, f32::max);
            out.push_str(&format!("  [{lo:.2}-{hi:.2}]\n"));
        }
        out
    }
}

/// Value statistics for diagnostics.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TensorStats {
    pub min: f32,
    pub max: f32,
    pub mean: f64,
    pub std_dev: f64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn clamps_out_of_range_values() {
        let mut data = [0.5; NormalizedTensor::LEN];
        data[0] = -3.0;
        data[1] = 7.0;
        data[2] = f32::NAN;
        let tensor = NormalizedTensor::from_array(data, true, 42.0);
        assert_eq!(tensor.get(0, 0), Some(0.0));
        assert_eq!(tensor.get(0, 1), Some(1.0));
        assert_eq!(tensor.get(0, 2), Some(0.0));
        assert!(tensor.blurred());
        assert_eq!(tensor.shape(), [1, 28, 28, 1]);
    }

    #[test]
    fn stats_of_uniform_tensor() {
        let stats = NormalizedTensor::filled(1.0).stats();
        assert_eq!(stats.min, 1.0);
        assert_eq!(stats.max, 1.0);
        assert!((stats.mean - 1.0).abs() < 1e-9);
        assert!(stats.std_dev < 1e-9);
    }

    #[test]
    fn ascii_preview_marks_ink() {
        let mut data = [1.0; NormalizedTensor::LEN];
        data[0] = 0.0;
        data[1] = 0.3;
        data[2] = 0.6;
        let tensor = NormalizedTensor::from_array(data, false, 0.0);
        let preview = tensor.ascii_preview(4);
        let first = preview.lines().next().unwrap();
        assert!(first.starts_with("█▓░ "));
        assert!(first.ends_with("[0.00-1.00]"));
        assert_eq!(preview.lines().count(), 4);
    }
}

//! Raster-to-tensor normalization.
//!
//! The classifier was trained on this exact pipeline, so the order and the
//! constants matter:
//! 1. luma grayscale
//! 2. variance gate: an effectively blank canvas skips smoothing
//! 3. 3x3 Gaussian blur
//! 4. area downscale to 28x28
//! 5. scale to `[0, 1]`
//!
//! The blank-canvas gate measures spread on the full-resolution grayscale
//! image, before downscaling. The Python prototype measured it on the
//! 28x28 result, so faint sketches may be blurred here where it skipped.

use image::RgbImage;
use quickdraw_common::config::{BlurMode, NormalizerConfig};
use quickdraw_sketch_model::tensor::{NormalizedTensor, MODEL_INPUT_SIZE};

use crate::blur::gaussian_blur_3x3;
use crate::grayscale::{std_dev, to_luma};
use crate::resize::resize_area;

/// Converts canvas rasters into classifier input tensors.
#[derive(Debug, Clone)]
pub struct Normalizer {
    config: NormalizerConfig,
    diagnostics: bool,
}

impl Normalizer {
    pub fn new(config: NormalizerConfig) -> Self {
        Self {
            config,
            diagnostics: false,
        }
    }

    pub fn with_defaults() -> Self {
        Self::new(NormalizerConfig::default())
    }

    pub fn config(&self) -> &NormalizerConfig {
        &self.config
    }

    /// Enable or disable per-call diagnostic logging.
    pub fn set_diagnostics(&mut self, enabled: bool) {
        self.diagnostics = enabled;
    }

    /// Normalize using the configured blur mode.
    pub fn normalize(&self, raster: &RgbImage) -> NormalizedTensor {
        self.normalize_with(raster, self.config.blur_mode)
    }

    /// Normalize with an explicit blur mode.
    pub fn normalize_with(&self, raster: &RgbImage, mode: BlurMode) -> NormalizedTensor {
        if raster.width() == 0 || raster.height() == 0 {
            tracing::warn!("Normalizing an empty raster; returning a blank tensor");
            return NormalizedTensor::filled(1.0);
        }

        let gray = to_luma(raster);
        let spread = std_dev(&gray);
        let blur = match mode {
            BlurMode::Auto => spread >= self.config.blank_std_threshold,
            BlurMode::Always => true,
            BlurMode::Never => false,
        };

        let smoothed = if blur {
            gaussian_blur_3x3(&gray, self.config.blur_sigma)
        } else {
            gray
        };

        let side = MODEL_INPUT_SIZE as u32;
        let small = resize_area(&smoothed, side, side);

        let mut data = [0.0_f32; NormalizedTensor::LEN];
        for (value, pixel) in data.iter_mut().zip(small.pixels()) {
            *value = pixel[0] as f32 / 255.0;
        }

        let tensor = NormalizedTensor::from_array(data, blur, spread);
        if self.diagnostics {
            log_tensor(&tensor);
        }
        tensor
    }
}

impl Default for Normalizer {
    fn default() -> Self {
        Self::with_defaults()
    }
}

fn log_tensor(tensor: &NormalizedTensor) {
    let stats = tensor.stats();
    tracing::info!(
        shape = ?tensor.shape(),
        min = stats.min,
        max = stats.max,
        mean = stats.mean,
        std_dev = stats.std_dev,
        source_std_dev = tensor.source_std_dev(),
        blurred = tensor.blurred(),
        "Preprocessing stats"
    );
    tracing::info!(
        "Processed image preview (first 10x10 pixels):\n{}",
        tensor.ascii_preview(10)
    );
}

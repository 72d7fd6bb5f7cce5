//! Luma conversion and intensity statistics.

use image::{GrayImage, Luma, RgbImage};

/// Convert RGB to 8-bit luma with `0.299R + 0.587G + 0.114B`.
///
/// The weighted sum is truncated, not rounded.
pub fn to_luma(raster: &RgbImage) -> GrayImage {
    let mut gray = GrayImage::new(raster.width(), raster.height());
    for (src, dst) in raster.pixels().zip(gray.pixels_mut()) {
        let [r, g, b] = src.0;
        let y = 0.299 * r as f64 + 0.587 * g as f64 + 0.114 * b as f64;
        *dst = Luma([y as u8]);
    }
    gray
}

/// Population standard deviation of the pixel intensities (0-255 scale).
pub fn std_dev(gray: &GrayImage) -> f64 {
    let n = (gray.width() as u64 * gray.height() as u64) as f64;
    if n == 0.0 {
        return 0.0;
    }
    let mean = gray.pixels().map(|p| p[0] as f64).sum::<f64>() / n;
    let variance = gray
        .pixels()
        .map(|p| (p[0] as f64 - mean).powi(2))
        .sum::<f64>()
        / n;
    variance.sqrt()
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::Rgb;

    #[test]
    fn luma_weights() {
        let mut raster = RgbImage::new(4, 1);
        raster.put_pixel(0, 0, Rgb([255, 255, 255]));
        raster.put_pixel(1, 0, Rgb([0, 0, 0]));
        raster.put_pixel(2, 0, Rgb([255, 0, 0]));
        raster.put_pixel(3, 0, Rgb([128, 128, 128]));
        let gray = to_luma(&raster);
        assert_eq!(gray.get_pixel(0, 0)[0], 255);
        assert_eq!(gray.get_pixel(1, 0)[0], 0);
        assert_eq!(gray.get_pixel(2, 0)[0], 76);
        // 127.99999... truncates.
        assert_eq!(gray.get_pixel(3, 0)[0], 127);
    }

    #[test]
    fn std_dev_of_two_levels() {
        let mut gray = GrayImage::from_pixel(2, 1, Luma([0]));
        gray.put_pixel(1, 0, Luma([200]));
        assert!((std_dev(&gray) - 100.0).abs() < 1e-9);
    }

    #[test]
    fn std_dev_of_uniform_image_is_zero() {
        let gray = GrayImage::from_pixel(10, 10, Luma([255]));
        assert_eq!(std_dev(&gray), 0.0);
    }
}

//! 3x3 Gaussian smoothing.

use image::{GrayImage, Luma};

/// Normalized 1-D Gaussian taps for offsets -1, 0, 1.
pub fn gaussian_taps(sigma: f64) -> [f64; 3] {
    let side = (-1.0 / (2.0 * sigma * sigma)).exp();
    let sum = 1.0 + 2.0 * side;
    [side / sum, 1.0 / sum, side / sum]
}

/// Reflect-101 border: index -1 maps to 1, index n maps to n-2.
fn reflect_101(i: isize, n: usize) -> usize {
    if n == 1 {
        return 0;
    }
    let n = n as isize;
    let reflected = if i < 0 {
        -i
    } else if i >= n {
        2 * n - 2 - i
    } else {
        i
    };
    reflected.clamp(0, n - 1) as usize
}

/// Separable 3x3 Gaussian blur with reflect-101 borders.
///
/// Both passes run in floating point; the result is rounded once.
pub fn gaussian_blur_3x3(src: &GrayImage, sigma: f64) -> GrayImage {
    let (w, h) = (src.width() as usize, src.height() as usize);
    if w == 0 || h == 0 {
        return src.clone();
    }
    let taps = gaussian_taps(sigma);

    let mut horizontal = vec![0.0_f64; w * h];
    for y in 0..h {
        for x in 0..w {
            horizontal[y * w + x] = (-1..=1)
                .zip(taps)
                .map(|(dx, k)| {
                    let sx = reflect_101(x as isize + dx, w);
                    k * src.get_pixel(sx as u32, y as u32)[0] as f64
                })
                .sum();
        }
    }

    let mut out = GrayImage::new(w as u32, h as u32);
    for y in 0..h {
        for x in 0..w {
            let v: f64 = (-1..=1)
                .zip(taps)
                .map(|(dy, k)| k * horizontal[reflect_101(y as isize + dy, h) * w + x])
                .sum();
            out.put_pixel(x as u32, y as u32, Luma([v.round().clamp(0.0, 255.0) as u8]));
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn taps_for_half_sigma() {
        let taps = gaussian_taps(0.5);
        assert!((taps[0] - 0.106_507).abs() < 1e-6);
        assert!((taps[1] - 0.786_986).abs() < 1e-6);
        assert!((taps.iter().sum::<f64>() - 1.0).abs() < 1e-12);
    }

    #[test]
    fn reflect_101_borders() {
        assert_eq!(reflect_101(-1, 5), 1);
        assert_eq!(reflect_101(5, 5), 3);
        assert_eq!(reflect_101(2, 5), 2);
        assert_eq!(reflect_101(-1, 1), 0);
    }

    #[test]
    fn uniform_image_is_unchanged() {
        let img = GrayImage::from_pixel(6, 4, Luma([200]));
        assert_eq!(gaussian_blur_3x3(&img, 0.5), img);
    }

    #[test]
    fn single_dark_pixel_spreads_to_neighbors() {
        let mut img = GrayImage::from_pixel(5, 5, Luma([255]));
        img.put_pixel(2, 2, Luma([0]));
        let out = gaussian_blur_3x3(&img, 0.5);

        // Center keeps 0.787^2 of its darkness: 255 * (1 - 0.619) = 97.
        assert_eq!(out.get_pixel(2, 2)[0], 97);
        let edge = out.get_pixel(1, 2)[0];
        let corner = out.get_pixel(1, 1)[0];
        assert!(edge < 255 && edge > out.get_pixel(2, 2)[0]);
        assert!(corner > edge && corner < 255);
        assert_eq!(out.get_pixel(0, 0)[0], 255);
    }
}

//! Area-interpolation downscaling.
//!
//! Each destination pixel is the average of the source pixels its
//! footprint covers, weighted by fractional overlap. Shrinking a 400px
//! canvas to 28px therefore averages ~14.3x14.3 source pixels per output
//! pixel instead of sampling a few, which keeps thin strokes from aliasing
//! away.

use image::{GrayImage, Luma};

/// Overlap weights along one axis: for each destination index, the source
/// indices it covers and how much of each.
fn axis_weights(src_len: u32, dst_len: u32) -> Vec<Vec<(usize, f64)>> {
    let scale = src_len as f64 / dst_len as f64;
    (0..dst_len)
        .map(|d| {
            let start = d as f64 * scale;
            let end = (start + scale).min(src_len as f64);
            let first = start.floor() as usize;
            let last = (end.ceil() as usize).min(src_len as usize);
            (first..last)
                .filter_map(|s| {
                    let overlap = end.min(s as f64 + 1.0) - start.max(s as f64);
                    (overlap > 1e-12).then_some((s, overlap))
                })
                .collect()
        })
        .collect()
}

/// Resize `src` to `dst_w` x `dst_h` by area averaging.
pub fn resize_area(src: &GrayImage, dst_w: u32, dst_h: u32) -> GrayImage {
    let mut out = GrayImage::new(dst_w, dst_h);
    if src.width() == 0 || src.height() == 0 || dst_w == 0 || dst_h == 0 {
        return out;
    }

    let cols = axis_weights(src.width(), dst_w);
    let rows = axis_weights(src.height(), dst_h);

    for (dy, row_weights) in rows.iter().enumerate() {
        for (dx, col_weights) in cols.iter().enumerate() {
            let mut acc = 0.0;
            let mut area = 0.0;
            for &(sy, wy) in row_weights {
                for &(sx, wx) in col_weights {
                    let w = wx * wy;
                    acc += w * src.get_pixel(sx as u32, sy as u32)[0] as f64;
                    area += w;
                }
            }
            let value = if area > 0.0 { acc / area } else { 0.0 };
            out.put_pixel(
                dx as u32,
                dy as u32,
                Luma([value.round().clamp(0.0, 255.0) as u8]),
            );
        }
    }
    out
}

//! The stroke canvas.

use image::{Rgb, RgbImage};
use imageproc::drawing::{draw_filled_circle_mut, draw_line_segment_mut, draw_polygon_mut};
use imageproc::point::Point;

/// The pixel grid holding the current drawing.
pub type Raster = RgbImage;

/// Canvas background (paper).
pub const BACKGROUND: Rgb<u8> = Rgb([255, 255, 255]);

/// Stroke color (ink).
pub const FOREGROUND: Rgb<u8> = Rgb([0, 0, 0]);

/// A pixel position in canvas-local coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct CanvasPoint {
    pub x: u32,
    pub y: u32,
}

impl CanvasPoint {
    pub fn new(x: u32, y: u32) -> Self {
        Self { x, y }
    }
}

/// A fixed-size raster that accumulates pointer strokes.
#[derive(Debug, Clone)]
pub struct StrokeCanvas {
    raster: Raster,
}

impl StrokeCanvas {
    /// Create a square canvas filled with the background color.
    pub fn new(size: u32) -> Self {
        Self {
            raster: RgbImage::from_pixel(size, size, BACKGROUND),
        }
    }

    /// Side length in pixels.
    pub fn size(&self) -> u32 {
        self.raster.width()
    }

    /// Reset every pixel to the background color.
    pub fn clear(&mut self) {
        for pixel in self.raster.pixels_mut() {
            *pixel = BACKGROUND;
        }
        tracing::debug!(size = self.size(), "Canvas cleared");
    }

    /// Rasterize one stroke segment.
    ///
    /// Draws a `brush_size`-wide line from `from` to `to`, then a filled
    /// circle of radius `brush_size / 2` at `to`. The end cap closes the
    /// gaps between discrete pointer samples, so consecutive segments read
    /// as one continuous stroke.
    pub fn draw_segment(&mut self, from: CanvasPoint, to: CanvasPoint, brush_size: u32) {
        if from != to {
            self.draw_thick_line(from, to, brush_size);
        }
        let radius = (brush_size / 2) as i32;
        draw_filled_circle_mut(&mut self.raster, (to.x as i32, to.y as i32), radius, FOREGROUND);
    }

    /// Read-only copy of the current raster.
    pub fn snapshot(&self) -> Raster {
        self.raster.clone()
    }

    /// Borrow the raster without copying.
    pub fn raster(&self) -> &Raster {
        &self.raster
    }

    /// Number of pixels that are not background.
    pub fn inked_pixels(&self) -> usize {
        self.raster.pixels().filter(|p| **p != BACKGROUND).count()
    }

    fn draw_thick_line(&mut self, from: CanvasPoint, to: CanvasPoint, width: u32) {
        let (fx, fy) = (from.x as f32, from.y as f32);
        let (tx, ty) = (to.x as f32, to.y as f32);

        if width <= 1 {
            draw_line_segment_mut(&mut self.raster, (fx, fy), (tx, ty), FOREGROUND);
            return;
        }

        // Offset both endpoints by half the width along the segment normal.
        let (dx, dy) = (tx - fx, ty - fy);
        let len = dx.hypot(dy);
        let half = width as f32 / 2.0;
        let (nx, ny) = (-dy / len * half, dx / len * half);

        let corner = |x: f32, y: f32| Point::new(x.round() as i32, y.round() as i32);
        let quad = [
            corner(fx + nx, fy + ny),
            corner(tx + nx, ty + ny),
            corner(tx - nx, ty - ny),
            corner(fx - nx, fy - ny),
        ];
        draw_polygon_mut(&mut self.raster, &quad, FOREGROUND);
    }
}

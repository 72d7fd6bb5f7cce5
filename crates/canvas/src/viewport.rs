//! Window-to-canvas coordinate mapping.

use quickdraw_common::config::CanvasConfig;

use crate::canvas::CanvasPoint;

/// Placement of the square canvas inside the window.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CanvasViewport {
    /// Left edge in window pixels.
    pub origin_x: f64,
    /// Top edge in window pixels.
    pub origin_y: f64,
    /// Canvas side length in pixels.
    pub size: u32,
}

impl CanvasViewport {
    pub fn new(origin_x: f64, origin_y: f64, size: u32) -> Self {
        Self {
            origin_x,
            origin_y,
            size,
        }
    }

    pub fn from_config(config: &CanvasConfig) -> Self {
        Self::new(config.origin_x, config.origin_y, config.size)
    }

    /// Check if a window position falls on the canvas.
    ///
    /// Both edges are inclusive, so the pixel row/column just past the last
    /// canvas pixel still counts and is clamped by [`Self::to_canvas`].
    pub fn contains(&self, x: f64, y: f64) -> bool {
        let extent = self.size as f64;
        x >= self.origin_x
            && x <= self.origin_x + extent
            && y >= self.origin_y
            && y <= self.origin_y + extent
    }

    /// Translate a window position into canvas pixels, or `None` when the
    /// position lies outside the canvas.
    pub fn to_canvas(&self, x: f64, y: f64) -> Option<CanvasPoint> {
        if self.size == 0 || !self.contains(x, y) {
            return None;
        }
        let max = self.size - 1;
        let cx = ((x - self.origin_x).floor() as u32).min(max);
        let cy = ((y - self.origin_y).floor() as u32).min(max);
        Some(CanvasPoint::new(cx, cy))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn viewport() -> CanvasViewport {
        CanvasViewport::new(50.0, 100.0, 400)
    }

    #[test]
    fn maps_interior_points() {
        assert_eq!(
            viewport().to_canvas(60.0, 110.0),
            Some(CanvasPoint::new(10, 10))
        );
        assert_eq!(
            viewport().to_canvas(250.7, 300.2),
            Some(CanvasPoint::new(200, 200))
        );
    }

    #[test]
    fn far_edge_is_inclusive_and_clamped() {
        assert_eq!(
            viewport().to_canvas(450.0, 500.0),
            Some(CanvasPoint::new(399, 399))
        );
        assert_eq!(
            viewport().to_canvas(50.0, 100.0),
            Some(CanvasPoint::new(0, 0))
        );
    }

    #[test]
    fn rejects_outside_points() {
        assert_eq!(viewport().to_canvas(49.9, 200.0), None);
        assert_eq!(viewport().to_canvas(200.0, 500.5), None);
        assert_eq!(viewport().to_canvas(f64::NAN, 200.0), None);
    }

    #[test]
    fn built_from_config() {
        let vp = CanvasViewport::from_config(&CanvasConfig::default());
        assert_eq!(vp, viewport());
    }
}

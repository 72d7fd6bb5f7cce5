//! Quickdraw Canvas
//!
//! The raster the player draws on, and the mapping from window pointer
//! coordinates into it. The canvas trusts its callers: points are expected
//! to come through [`CanvasViewport::to_canvas`], which rejects anything
//! outside the drawing area.

pub mod canvas;
pub mod viewport;

pub use canvas::{CanvasPoint, Raster, StrokeCanvas, BACKGROUND, FOREGROUND};
pub use viewport::CanvasViewport;

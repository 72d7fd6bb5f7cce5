//! Quickdraw Processing Core: the image normalizer
//!
//! Converts the drawing raster into the tensor the classifier expects:
//! - **Grayscale:** luma-weighted RGB conversion
//! - **Smoothing:** 3x3 Gaussian blur, skipped for near-blank canvases
//! - **Downscale:** area interpolation to 28x28
//!
//! Pure computation with no I/O: rasters in, tensors out.

pub mod blur;
pub mod grayscale;
pub mod normalize;
pub mod resize;

pub use normalize::Normalizer;

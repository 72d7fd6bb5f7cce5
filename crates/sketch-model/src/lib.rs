//! Quickdraw Sketch Model
//!
//! Defines the data contracts shared by the pipeline stages:
//! - **Events:** Timestamped pointer transitions and shell commands
//! - **Tensor:** The fixed-shape grayscale input the classifier consumes
//! - **Prediction:** Classifier output and the category list it indexes
//!
//! Pointer coordinates are window pixels; the canvas viewport translates
//! them into canvas-local pixels before they reach the raster.

pub mod event;
pub mod prediction;
pub mod tensor;

pub use event::*;
pub use prediction::*;
pub use tensor::*;

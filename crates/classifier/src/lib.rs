//! Quickdraw Classifier
//!
//! Wraps a pre-trained sketch classifier behind a small adapter:
//! - **Model:** the [`Classifier`] trait plus a dense-network backend loaded
//!   from a JSON artifact
//! - **Labels:** the category list aligned with the model output
//! - **Adapter:** arg-max decoding, label fallback, and the disabled state
//!   entered when loading fails
//!
//! The adapter never returns an error: every failure resolves to the
//! neutral prediction plus a log line.

pub mod adapter;
pub mod labels;
pub mod model;

use quickdraw_common::error::QuickdrawResult;
use quickdraw_sketch_model::tensor::NormalizedTensor;

pub use adapter::ClassifierAdapter;
pub use labels::load_labels;
pub use model::{Activation, DenseLayer, DenseModel};

/// An inference backend.
pub trait Classifier: Send {
    /// Per-category probabilities for one input.
    fn infer(&self, input: &NormalizedTensor) -> QuickdrawResult<Vec<f32>>;

    /// Length of the output vector.
    fn output_len(&self) -> usize;

    /// Backend name for logging.
    fn name(&self) -> &str;
}

//! The classifier adapter.

use std::fmt;
use std::path::Path;

use quickdraw_common::error::QuickdrawResult;
use quickdraw_sketch_model::prediction::{CategoryList, Prediction};
use quickdraw_sketch_model::tensor::NormalizedTensor;

use crate::labels::load_labels;
use crate::model::DenseModel;
use crate::Classifier;

/// Number of guesses logged when diagnostics are on.
const DIAGNOSTIC_TOP_K: usize = 3;

/// Turns tensors into labeled predictions.
///
/// A disabled adapter (load failure) answers every request with the
/// neutral prediction. The shell checks [`Self::load_error`] to show a
/// notice instead of starting rounds.
pub struct ClassifierAdapter {
    model: Option<Box<dyn Classifier>>,
    labels: CategoryList,
    load_error: Option<String>,
    diagnostics: bool,
}

impl ClassifierAdapter {
    /// Wrap a ready model and its labels.
    pub fn new(model: Box<dyn Classifier>, labels: CategoryList) -> Self {
        if model.output_len() != labels.len() {
            tracing::warn!(
                model = model.name(),
                outputs = model.output_len(),
                labels = labels.len(),
                "Label count does not match model outputs; unmatched classes will use fallback labels"
            );
        }
        Self {
            model: Some(model),
            labels,
            load_error: None,
            diagnostics: false,
        }
    }

    /// An adapter that never predicts.
    pub fn disabled(reason: impl Into<String>) -> Self {
        Self {
            model: None,
            labels: CategoryList::default(),
            load_error: Some(reason.into()),
            diagnostics: false,
        }
    }

    /// Load a model artifact and label file, failing on any error.
    pub fn try_load(model_path: &Path, labels_path: &Path) -> QuickdrawResult<Self> {
        let model = DenseModel::load(model_path)?;
        let labels = load_labels(labels_path)?;
        Ok(Self::new(Box::new(model), labels))
    }

    /// Load a model artifact and label file. Failures leave the adapter
    /// disabled instead of propagating.
    pub fn load(model_path: &Path, labels_path: &Path) -> Self {
        match Self::try_load(model_path, labels_path) {
            Ok(adapter) => adapter,
            Err(e) => {
                tracing::error!(
                    error = %e,
                    model = %model_path.display(),
                    labels = %labels_path.display(),
                    "Error loading model or labels; classifier disabled"
                );
                Self::disabled(e.to_string())
            }
        }
    }

    pub fn is_ready(&self) -> bool {
        self.model.is_some()
    }

    /// Why loading failed, if it did.
    pub fn load_error(&self) -> Option<&str> {
        self.load_error.as_deref()
    }

    pub fn labels(&self) -> &CategoryList {
        &self.labels
    }

    /// Enable or disable logging of the top guesses on every prediction.
    pub fn set_diagnostics(&mut self, enabled: bool) {
        self.diagnostics = enabled;
    }

    /// Classify one tensor.
    pub fn predict(&self, tensor: &NormalizedTensor) -> Prediction {
        let Some(model) = self.model.as_ref() else {
            return Prediction::none();
        };

        let probabilities = match model.infer(tensor) {
            Ok(p) => p,
            Err(e) => {
                tracing::warn!(error = %e, model = model.name(), "Prediction error");
                return Prediction::none();
            }
        };

        let Some(top) = top_index(&probabilities) else {
            tracing::warn!(model = model.name(), "Model produced no usable outputs");
            return Prediction::none();
        };

        if self.diagnostics {
            self.log_top_k(&probabilities);
        }

        Prediction::new(self.labels.label_for(top), probabilities[top])
    }

    fn log_top_k(&self, probabilities: &[f32]) {
        for (index, p) in top_k(probabilities, DIAGNOSTIC_TOP_K) {
            if let Some(label) = self.labels.get(index) {
                tracing::info!(label, probability = %format!("{:.2}%", p * 100.0), "Top prediction");
            }
        }
    }
}

impl fmt::Debug for ClassifierAdapter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ClassifierAdapter")
            .field("model", &self.model.as_ref().map(|m| m.name()))
            .field("labels", &self.labels.len())
            .field("load_error", &self.load_error)
            .field("diagnostics", &self.diagnostics)
            .finish()
    }
}

/// Index of the largest value; the first one wins ties. NaN is skipped.
fn top_index(values: &[f32]) -> Option<usize> {
    values
        .iter()
        .enumerate()
        .filter(|(_, v)| !v.is_nan())
        .fold(None, |best: Option<(usize, f32)>, (i, &v)| match best {
            Some((_, b)) if b >= v => best,
            _ => Some((i, v)),
        })
        .map(|(i, _)| i)
}

/// The `k` largest values, descending.
fn top_k(values: &[f32], k: usize) -> Vec<(usize, f32)> {
    let mut ranked: Vec<(usize, f32)> = values
        .iter()
        .copied()
        .enumerate()
        .filter(|(_, v)| !v.is_nan())
        .collect();
    ranked.sort_by(|a, b| b.1.total_cmp(&a.1));
    ranked.truncate(k);
    ranked
}

#[cfg(test)]
mod tests {
    use super::*;
    use quickdraw_common::error::QuickdrawError;

    struct FixedOutput(Vec<f32>);

    impl Classifier for FixedOutput {
        fn infer(&self, _input: &NormalizedTensor) -> QuickdrawResult<Vec<f32>> {
            Ok(self.0.clone())
        }

        fn output_len(&self) -> usize {
            self.0.len()
        }

        fn name(&self) -> &str {
            "fixed"
        }
    }

    struct Failing;

    impl Classifier for Failing {
        fn infer(&self, _input: &NormalizedTensor) -> QuickdrawResult<Vec<f32>> {
            Err(QuickdrawError::inference("device lost"))
        }

        fn output_len(&self) -> usize {
            3
        }

        fn name(&self) -> &str {
            "failing"
        }
    }

    fn labels(n: usize) -> CategoryList {
        CategoryList::new((0..n).map(|i| format!("label{i}")).collect())
    }

    #[test]
    fn picks_highest_probability() {
        let adapter =
            ClassifierAdapter::new(Box::new(FixedOutput(vec![0.1, 0.7, 0.2])), labels(3));
        let p = adapter.predict(&NormalizedTensor::filled(1.0));
        assert_eq!(p.label.as_deref(), Some("label1"));
        assert!((p.confidence - 0.7).abs() < 1e-6);
    }

    #[test]
    fn out_of_range_index_uses_class_fallback() {
        let mut output = vec![0.0; 1000];
        output[999] = 0.9;
        let adapter = ClassifierAdapter::new(Box::new(FixedOutput(output)), labels(10));
        let p = adapter.predict(&NormalizedTensor::filled(1.0));
        assert_eq!(p.label.as_deref(), Some("Class 999"));
        assert!((p.confidence - 0.9).abs() < 1e-6);
    }

    #[test]
    fn disabled_adapter_is_neutral() {
        let adapter = ClassifierAdapter::disabled("missing model");
        assert!(!adapter.is_ready());
        assert_eq!(adapter.load_error(), Some("missing model"));
        for fill in [0.0, 0.5, 1.0] {
            let p = adapter.predict(&NormalizedTensor::filled(fill));
            assert_eq!(p.confidence, 0.0);
            assert!(p.is_none());
        }
    }

    #[test]
    fn inference_failure_is_neutral() {
        let adapter = ClassifierAdapter::new(Box::new(Failing), labels(3));
        let p = adapter.predict(&NormalizedTensor::filled(1.0));
        assert!(p.is_none());
        assert_eq!(p.confidence, 0.0);
    }

    #[test]
    fn empty_output_is_neutral() {
        let adapter = ClassifierAdapter::new(Box::new(FixedOutput(vec![])), labels(0));
        assert!(adapter.predict(&NormalizedTensor::filled(1.0)).is_none());
    }

    #[test]
    fn diagnostics_do_not_change_the_result() {
        let mut adapter =
            ClassifierAdapter::new(Box::new(FixedOutput(vec![0.3, 0.3, 0.4])), labels(2));
        adapter.set_diagnostics(true);
        let p = adapter.predict(&NormalizedTensor::filled(1.0));
        assert_eq!(p.label.as_deref(), Some("Class 2"));
    }

    #[test]
    fn top_index_prefers_first_of_ties_and_skips_nan() {
        assert_eq!(top_index(&[0.5, 0.5, 0.1]), Some(0));
        assert_eq!(top_index(&[f32::NAN, 0.2, 0.1]), Some(1));
        assert_eq!(top_index(&[f32::NAN]), None);
        assert_eq!(top_index(&[]), None);
    }

    #[test]
    fn top_k_is_descending() {
        let ranked = top_k(&[0.1, 0.6, 0.3, 0.0], 3);
        assert_eq!(
            ranked.iter().map(|(i, _)| *i).collect::<Vec<_>>(),
            vec![1, 2, 0]
        );
    }

    #[test]
    fn load_failure_disables_adapter() {
        let dir = tempfile::tempdir().unwrap();
        let adapter = ClassifierAdapter::load(
            &dir.path().join("missing.json"),
            &dir.path().join("labels.txt"),
        );
        assert!(!adapter.is_ready());
        assert!(adapter.load_error().unwrap().contains("missing.json"));
        assert_eq!(adapter.predict(&NormalizedTensor::filled(0.0)).confidence, 0.0);
    }
}

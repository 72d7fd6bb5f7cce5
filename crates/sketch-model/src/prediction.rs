//! Classifier output types.

use serde::{Deserialize, Serialize};

/// The classifier's best guess for the current drawing.
///
/// `label == None` is the neutral result: no model, an inference failure,
/// or nothing predicted yet. Its confidence is always 0.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Prediction {
    pub label: Option<String>,
    pub confidence: f32,
}

impl Prediction {
    /// A labeled prediction. Confidence is clamped into `[0, 1]`.
    pub fn new(label: impl Into<String>, confidence: f32) -> Self {
        let confidence = if confidence.is_nan() {
            0.0
        } else {
            confidence.clamp(0.0, 1.0)
        };
        Self {
            label: Some(label.into()),
            confidence,
        }
    }

    /// The neutral "no prediction" result.
    pub fn none() -> Self {
        Self::default()
    }

    pub fn is_none(&self) -> bool {
        self.label.is_none()
    }

    /// Case-insensitive label comparison.
    pub fn matches(&self, word: &str) -> bool {
        self.label
            .as_deref()
            .is_some_and(|label| label.to_lowercase() == word.to_lowercase())
    }
}

/// Ordered category labels aligned with the classifier output vector.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct CategoryList {
    labels: Vec<String>,
}

impl CategoryList {
    pub fn new(labels: Vec<String>) -> Self {
        Self { labels }
    }

    /// Parse a label file: one label per line, surrounding whitespace trimmed.
    /// Interior blank lines keep their slot so indices stay aligned.
    pub fn parse(content: &str) -> Self {
        Self {
            labels: content.lines().map(|l| l.trim().to_string()).collect(),
        }
    }

    pub fn len(&self) -> usize {
        self.labels.len()
    }

    pub fn is_empty(&self) -> bool {
        self.labels.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&str> {
        self.labels.get(index).map(String::as_str)
    }

    /// Label for a class index, or the synthetic `"Class N"` fallback.
    pub fn label_for(&self, index: usize) -> String {
        match self.get(index) {
            Some(label) => label.to_string(),
            None => format!("Class {index}"),
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.labels.iter().map(String::as_str)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn matches_ignores_case() {
        let p = Prediction::new("Cat", 0.9);
        assert!(p.matches("cat"));
        assert!(p.matches("CAT"));
        assert!(!p.matches("dog"));
        assert!(!Prediction::none().matches("cat"));
    }

    #[test]
    fn confidence_is_clamped() {
        assert_eq!(Prediction::new("cat", 1.7).confidence, 1.0);
        assert_eq!(Prediction::new("cat", f32::NAN).confidence, 0.0);
        assert_eq!(Prediction::none().confidence, 0.0);
    }

    #[test]
    fn label_file_parsing_keeps_positions() {
        let labels = CategoryList::parse("cat\n  dog \n\nhouse\n");
        assert_eq!(labels.len(), 4);
        assert_eq!(labels.get(1), Some("dog"));
        assert_eq!(labels.get(2), Some(""));
        assert_eq!(labels.get(3), Some("house"));
    }

    #[test]
    fn out_of_range_index_gets_synthetic_label() {
        let labels = CategoryList::new((0..10).map(|i| format!("c{i}")).collect());
        assert_eq!(labels.label_for(3), "c3");
        assert_eq!(labels.label_for(999), "Class 999");
    }
}

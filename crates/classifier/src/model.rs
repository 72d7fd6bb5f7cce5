//! Dense-network model artifacts.
//!
//! The artifact is a JSON document listing fully connected layers in
//! evaluation order:
//!
//! ```json
//! {
//!   "input_shape": [1, 28, 28, 1],
//!   "layers": [
//!     {"rows": 64, "cols": 784, "weights": [...], "bias": [...], "activation": "relu"},
//!     {"rows": 10, "cols": 64, "weights": [...], "bias": [...], "activation": "softmax"}
//!   ]
//! }
//! ```
//!
//! `weights` is row-major `rows x cols`; each layer computes
//! `activation(W x + b)`.

use std::path::Path;

use serde::{Deserialize, Serialize};

use quickdraw_common::error::{QuickdrawError, QuickdrawResult};
use quickdraw_sketch_model::tensor::{NormalizedTensor, MODEL_INPUT_SHAPE};

use crate::Classifier;

/// Element-wise layer activation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Activation {
    #[default]
    Linear,
    Relu,
    Sigmoid,
    Softmax,
}

/// One fully connected layer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DenseLayer {
    pub rows: usize,
    pub cols: usize,
    pub weights: Vec<f32>,
    pub bias: Vec<f32>,
    #[serde(default)]
    pub activation: Activation,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
struct ModelArtifact {
    input_shape: Vec<usize>,
    layers: Vec<DenseLayer>,
}

/// A validated feed-forward network.
#[derive(Debug, Clone)]
pub struct DenseModel {
    layers: Vec<DenseLayer>,
    name: String,
}

impl DenseLayer {
    fn forward(&self, input: &[f32]) -> Vec<f32> {
        let mut out: Vec<f32> = self
            .weights
            .chunks_exact(self.cols)
            .zip(&self.bias)
            .map(|(row, b)| row.iter().zip(input).map(|(w, x)| w * x).sum::<f32>() + b)
            .collect();

        match self.activation {
            Activation::Linear => {}
            Activation::Relu => out.iter_mut().for_each(|v| *v = v.max(0.0)),
            Activation::Sigmoid => out.iter_mut().for_each(|v| *v = 1.0 / (1.0 + (-*v).exp())),
            Activation::Softmax => softmax_in_place(&mut out),
        }
        out
    }
}

fn softmax_in_place(values: &mut [f32]) {
    let max = values.iter().copied().fold(f32::NEG_INFINITY, f32::max);
    let mut sum = 0.0;
    for v in values.iter_mut() {
        *v = (*v - max).exp();
        sum += *v;
    }
    if sum > 0.0 {
        values.iter_mut().for_each(|v| *v /= sum);
    }
}

impl DenseModel {
    /// Validate and assemble a model from its layers.
    pub fn from_layers(layers: Vec<DenseLayer>) -> QuickdrawResult<Self> {
        if layers.is_empty() {
            return Err(QuickdrawError::model_load("model has no layers"));
        }

        let mut expected_cols = NormalizedTensor::LEN;
        for (i, layer) in layers.iter().enumerate() {
            if layer.rows == 0 || layer.cols == 0 {
                return Err(QuickdrawError::model_load(format!(
                    "layer {i} has an empty dimension ({}x{})",
                    layer.rows, layer.cols
                )));
            }
            if layer.cols != expected_cols {
                return Err(QuickdrawError::model_load(format!(
                    "layer {i} expects {} inputs but receives {expected_cols}",
                    layer.cols
                )));
            }
            if layer.weights.len() != layer.rows * layer.cols {
                return Err(QuickdrawError::model_load(format!(
                    "layer {i} declares {}x{} weights but stores {}",
                    layer.rows,
                    layer.cols,
                    layer.weights.len()
                )));
            }
            if layer.bias.len() != layer.rows {
                return Err(QuickdrawError::model_load(format!(
                    "layer {i} has {} rows but {} biases",
                    layer.rows,
                    layer.bias.len()
                )));
            }
            expected_cols = layer.rows;
        }

        Ok(Self {
            layers,
            name: "dense".to_string(),
        })
    }

    /// Parse an artifact from JSON text.
    pub fn from_json(json: &str) -> QuickdrawResult<Self> {
        let artifact: ModelArtifact = serde_json::from_str(json)
            .map_err(|e| QuickdrawError::model_load(format!("malformed model artifact: {e}")))?;

        if artifact.input_shape != MODEL_INPUT_SHAPE {
            return Err(QuickdrawError::invalid_input(format!(
                "model input shape {:?} does not match {:?}",
                artifact.input_shape, MODEL_INPUT_SHAPE
            )));
        }
        Self::from_layers(artifact.layers)
    }

    /// Load an artifact from disk.
    pub fn load(path: &Path) -> QuickdrawResult<Self> {
        let json =
            std::fs::read_to_string(path).map_err(|e| QuickdrawError::from_io_at(e, path))?;
        let mut model = Self::from_json(&json)?;
        if let Some(stem) = path.file_stem() {
            model.name = stem.to_string_lossy().into_owned();
        }
        tracing::info!(
            path = %path.display(),
            layers = model.layers.len(),
            outputs = model.output_len(),
            "Model loaded"
        );
        Ok(model)
    }

    /// Serialize as an artifact.
    pub fn to_json(&self) -> QuickdrawResult<String> {
        let artifact = ModelArtifact {
            input_shape: MODEL_INPUT_SHAPE.to_vec(),
            layers: self.layers.clone(),
        };
        Ok(serde_json::to_string(&artifact)?)
    }
}

impl Classifier for DenseModel {
    fn infer(&self, input: &NormalizedTensor) -> QuickdrawResult<Vec<f32>> {
        let mut activations = input.as_slice().to_vec();
        for layer in &self.layers {
            activations = layer.forward(&activations);
        }
        if activations.iter().any(|v| v.is_infinite()) {
            return Err(QuickdrawError::inference("model produced infinite outputs"));
        }
        Ok(activations)
    }

    fn output_len(&self) -> usize {
        self.layers.last().map(|l| l.rows).unwrap_or(0)
    }

    fn name(&self) -> &str {
        &self.name
    }
}

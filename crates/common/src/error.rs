//! Error types shared across Quickdraw crates.

use std::path::PathBuf;

/// Top-level error type for Quickdraw operations.
#[derive(Debug, thiserror::Error)]
pub enum QuickdrawError {
    #[error("Model load error: {message}")]
    ModelLoad { message: String },

    #[error("Label load error: {message}")]
    LabelLoad { message: String },

    #[error("Inference error: {message}")]
    Inference { message: String },

    #[error("Configuration error: {message}")]
    Config { message: String },

    #[error("Invalid input: {message}")]
    InvalidInput { message: String },

    #[error("File not found: {path}")]
    FileNotFound { path: PathBuf },

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Json(#[from] serde_json::Error),
}

/// Result type alias using QuickdrawError.
pub type QuickdrawResult<T> = Result<T, QuickdrawError>;

impl QuickdrawError {
    pub fn model_load(msg: impl Into<String>) -> Self {
        Self::ModelLoad {
            message: msg.into(),
        }
    }

    pub fn label_load(msg: impl Into<String>) -> Self {
        Self::LabelLoad {
            message: msg.into(),
        }
    }

    pub fn inference(msg: impl Into<String>) -> Self {
        Self::Inference {
            message: msg.into(),
        }
    }

    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config {
            message: msg.into(),
        }
    }

    pub fn invalid_input(msg: impl Into<String>) -> Self {
        Self::InvalidInput {
            message: msg.into(),
        }
    }

    /// Map an I/O error on `path` to `FileNotFound` when appropriate.
    pub fn from_io_at(err: std::io::Error, path: impl Into<PathBuf>) -> Self {
        if err.kind() == std::io::ErrorKind::NotFound {
            Self::FileNotFound { path: path.into() }
        } else {
            Self::Io(err)
        }
    }
}

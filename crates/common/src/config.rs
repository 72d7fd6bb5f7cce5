//! Application configuration.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::error::{QuickdrawError, QuickdrawResult};

/// Global application configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// Path to the classifier model artifact.
    pub model_path: PathBuf,

    /// Path to the category label file (one label per line).
    pub labels_path: PathBuf,

    /// Drawing surface settings.
    pub canvas: CanvasConfig,

    /// Round timing and win rules.
    pub round: RoundConfig,

    /// Image normalization settings.
    pub normalizer: NormalizerConfig,

    /// Inference scheduling settings.
    pub inference: InferenceConfig,

    /// Logging configuration.
    pub logging: LoggingConfig,
}

/// Drawing surface parameters.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CanvasConfig {
    /// Side length of the square raster in pixels.
    pub size: u32,

    /// Stroke width in pixels.
    pub brush_size: u32,

    /// Canvas top-left corner in window coordinates.
    pub origin_x: f64,
    pub origin_y: f64,
}

/// Round rules.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RoundConfig {
    /// Seconds allowed per target word.
    pub time_limit_secs: f64,

    /// A prediction must be strictly above this confidence to win.
    pub win_confidence: f32,
}

/// When the Gaussian smoothing pass runs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BlurMode {
    /// Blur unless the canvas is effectively blank.
    #[default]
    Auto,
    /// Always blur.
    Always,
    /// Never blur.
    Never,
}

/// Image normalizer parameters.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct NormalizerConfig {
    /// Grayscale standard deviation (0-255 scale) below which the canvas
    /// counts as blank.
    pub blank_std_threshold: f64,

    /// Sigma of the 3x3 Gaussian kernel.
    pub blur_sigma: f64,

    /// Blur policy.
    pub blur_mode: BlurMode,
}

/// Inference scheduling.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct InferenceConfig {
    /// Maximum motion-triggered inferences per second (0 = every event).
    pub max_rate_hz: u32,

    /// Start with diagnostic logging enabled.
    pub diagnostics: bool,
}

/// Logging configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Log level filter (e.g., "info", "debug", "quickdraw=debug,warn").
    pub level: String,

    /// Whether to output structured JSON logs.
    pub json: bool,

    /// Optional log file path.
    pub file: Option<PathBuf>,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            model_path: PathBuf::from("quickdraw_model.json"),
            labels_path: PathBuf::from("labels.txt"),
            canvas: CanvasConfig::default(),
            round: RoundConfig::default(),
            normalizer: NormalizerConfig::default(),
            inference: InferenceConfig::default(),
            logging: LoggingConfig::default(),
        }
    }
}

impl Default for CanvasConfig {
    fn default() -> Self {
        Self {
            size: 400,
            brush_size: 8,
            origin_x: 50.0,
            origin_y: 100.0,
        }
    }
}

impl Default for RoundConfig {
    fn default() -> Self {
        Self {
            time_limit_secs: 20.0,
            win_confidence: 0.5,
        }
    }
}

impl RoundConfig {
    /// Time limit as a duration. Negative or non-finite values collapse to zero.
    pub fn time_limit(&self) -> Duration {
        Duration::try_from_secs_f64(self.time_limit_secs).unwrap_or(Duration::ZERO)
    }
}

impl Default for NormalizerConfig {
    fn default() -> Self {
        Self {
            blank_std_threshold: 10.0,
            blur_sigma: 0.5,
            blur_mode: BlurMode::Auto,
        }
    }
}

impl Default for InferenceConfig {
    fn default() -> Self {
        Self {
            max_rate_hz: 0,
            diagnostics: false,
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            json: false,
            file: None,
        }
    }
}

impl AppConfig {
    /// Load config from the standard location, falling back to defaults.
    pub fn load() -> Self {
        let config_path = config_file_path();
        if !config_path.exists() {
            return Self::default();
        }
        match Self::load_from(&config_path) {
            Ok(config) => config,
            Err(e) => {
                tracing::warn!("Failed to load config at {:?}: {}", config_path, e);
                Self::default()
            }
        }
    }

    /// Load config from an explicit path.
    pub fn load_from(path: &Path) -> QuickdrawResult<Self> {
        let content =
            std::fs::read_to_string(path).map_err(|e| QuickdrawError::from_io_at(e, path))?;
        let config: Self = serde_json::from_str(&content)?;
        config.validate()?;
        Ok(config)
    }

    /// Reject settings the pipeline cannot run with.
    pub fn validate(&self) -> QuickdrawResult<()> {
        if self.canvas.size == 0 {
            return Err(QuickdrawError::config("canvas.size must be positive"));
        }
        if !(self.round.time_limit_secs.is_finite() && self.round.time_limit_secs > 0.0) {
            return Err(QuickdrawError::config(
                "round.time_limit_secs must be a positive number",
            ));
        }
        if !(0.0..=1.0).contains(&self.round.win_confidence) {
            return Err(QuickdrawError::config(
                "round.win_confidence must be within [0, 1]",
            ));
        }
        if !(self.normalizer.blur_sigma.is_finite() && self.normalizer.blur_sigma > 0.0) {
            return Err(QuickdrawError::config(
                "normalizer.blur_sigma must be a positive number",
            ));
        }
        Ok(())
    }
}

/// Standard config file location.
pub fn config_file_path() -> PathBuf {
    let base = std::env::var("XDG_CONFIG_HOME")
        .map(PathBuf::from)
        .unwrap_or_else(|_| {
            let home = std::env::var("HOME").unwrap_or_else(|_| "/tmp".to_string());
            PathBuf::from(home).join(".config")
        });
    base.join("quickdraw").join("config.json")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_game_constants() {
        let config = AppConfig::default();
        assert_eq!(config.canvas.size, 400);
        assert_eq!(config.canvas.brush_size, 8);
        assert_eq!(config.round.time_limit(), Duration::from_secs(20));
        assert_eq!(config.round.win_confidence, 0.5);
        assert_eq!(config.normalizer.blank_std_threshold, 10.0);
        assert_eq!(config.normalizer.blur_mode, BlurMode::Auto);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn partial_file_fills_in_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.json");
        std::fs::write(
            &path,
            r#"{"round":{"time_limit_secs":5.0},"normalizer":{"blur_mode":"never"}}"#,
        )
        .unwrap();

        let config = AppConfig::load_from(&path).unwrap();
        assert_eq!(config.round.time_limit(), Duration::from_secs(5));
        assert_eq!(config.round.win_confidence, 0.5);
        assert_eq!(config.normalizer.blur_mode, BlurMode::Never);
        assert_eq!(config.canvas, CanvasConfig::default());
    }

    #[test]
    fn invalid_values_are_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.json");
        std::fs::write(&path, r#"{"round":{"win_confidence":1.5}}"#).unwrap();

        let err = AppConfig::load_from(&path).unwrap_err();
        assert!(matches!(err, QuickdrawError::Config { .. }));
    }

    #[test]
    fn missing_file_is_reported() {
        let dir = tempfile::tempdir().unwrap();
        let err = AppConfig::load_from(&dir.path().join("absent.json")).unwrap_err();
        assert!(matches!(err, QuickdrawError::FileNotFound { .. }));
    }
}

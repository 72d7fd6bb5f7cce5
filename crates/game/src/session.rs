//! Headless game session: the application state a front-end drives.

use std::time::{Duration, Instant};

use quickdraw_canvas::{CanvasPoint, CanvasViewport, StrokeCanvas};
use quickdraw_classifier::ClassifierAdapter;
use quickdraw_common::clock::RateController;
use quickdraw_common::config::AppConfig;
use quickdraw_processing_core::Normalizer;
use quickdraw_sketch_model::event::{Command, PointerEvent, PointerPhase};
use quickdraw_sketch_model::prediction::Prediction;

use crate::judge::{RoundJudge, RoundOutcome, RoundPhase};

/// Target used when the category list has no usable labels.
const FALLBACK_WORD: &str = "cat";

/// Whether the driving loop should keep going.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionControl {
    Continue,
    Quit,
}

/// Everything a front-end needs to draw one frame.
#[derive(Debug, Clone, PartialEq)]
pub struct SessionStatus {
    pub phase: RoundPhase,
    pub target_word: Option<String>,
    pub remaining: Duration,
    pub prediction: Option<Prediction>,
    /// The current guess would win the round.
    pub winning: bool,
    pub score: u32,
    pub diagnostics: bool,
    /// Persistent notice when the classifier failed to load.
    pub load_error: Option<String>,
    pub categories: usize,
}

/// Owns the pipeline components and the player's progress.
#[derive(Debug)]
pub struct GameSession {
    canvas: StrokeCanvas,
    viewport: CanvasViewport,
    brush_size: u32,
    normalizer: Normalizer,
    classifier: ClassifierAdapter,
    judge: RoundJudge,
    inference_gate: RateController,
    inference_pending: bool,
    drawing: bool,
    last_point: Option<CanvasPoint>,
    score: u32,
    diagnostics: bool,
    rng: fastrand::Rng,
}

impl GameSession {
    /// Build a session around an already-loaded classifier.
    pub fn new(config: &AppConfig, classifier: ClassifierAdapter) -> Self {
        let mut session = Self {
            canvas: StrokeCanvas::new(config.canvas.size),
            viewport: CanvasViewport::from_config(&config.canvas),
            brush_size: config.canvas.brush_size,
            normalizer: Normalizer::new(config.normalizer),
            classifier,
            judge: RoundJudge::new(&config.round),
            inference_gate: RateController::new(config.inference.max_rate_hz),
            inference_pending: false,
            drawing: false,
            last_point: None,
            score: 0,
            diagnostics: false,
            rng: fastrand::Rng::new(),
        };
        session.set_diagnostics(config.inference.diagnostics);
        session
    }

    /// Build a session, loading the classifier from the configured paths.
    /// A load failure leaves the session usable with a disabled classifier.
    pub fn from_config(config: &AppConfig) -> Self {
        let classifier = ClassifierAdapter::load(&config.model_path, &config.labels_path);
        if classifier.is_ready() {
            tracing::info!(
                categories = classifier.labels().len(),
                "Classifier ready"
            );
        }
        Self::new(config, classifier)
    }

    /// Seed the target-word generator for reproducible sessions.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.rng = fastrand::Rng::with_seed(seed);
        self
    }

    pub fn canvas(&self) -> &StrokeCanvas {
        &self.canvas
    }

    pub fn judge(&self) -> &RoundJudge {
        &self.judge
    }

    pub fn classifier(&self) -> &ClassifierAdapter {
        &self.classifier
    }

    pub fn score(&self) -> u32 {
        self.score
    }

    pub fn diagnostics(&self) -> bool {
        self.diagnostics
    }

    /// Apply one pointer sample. Only has an effect while a round is
    /// being played.
    pub fn handle_pointer(&mut self, event: PointerEvent, now: Instant) -> Option<RoundOutcome> {
        if !self.judge.is_playing() {
            return None;
        }

        // Releasing the button ends the stroke wherever it happens.
        if event.phase == PointerPhase::Up {
            self.end_stroke();
            return None;
        }

        let point = self.viewport.to_canvas(event.x, event.y)?;
        match event.phase {
            PointerPhase::Down => {
                self.drawing = true;
                self.last_point = Some(point);
                None
            }
            PointerPhase::Move if self.drawing => {
                if let Some(last) = self.last_point {
                    self.canvas.draw_segment(last, point, self.brush_size);
                }
                self.last_point = Some(point);
                self.request_inference(now)
            }
            _ => None,
        }
    }

    /// Apply a shell command.
    pub fn handle_command(&mut self, command: Command, now: Instant) -> SessionControl {
        match command {
            Command::Clear => {
                if self.judge.is_playing() {
                    self.canvas.clear();
                    self.judge.clear_prediction();
                    self.inference_pending = false;
                }
            }
            Command::StartOrSkip => match self.judge.phase() {
                RoundPhase::Idle if !self.classifier.is_ready() => {
                    tracing::warn!("Cannot start a round: classifier is not loaded");
                }
                _ => self.start_round(now),
            },
            Command::ToggleDiagnostics => {
                self.set_diagnostics(!self.diagnostics);
                tracing::info!(
                    "Debug mode: {}",
                    if self.diagnostics { "ON" } else { "OFF" }
                );
            }
            Command::Menu => {
                self.judge.abandon();
                self.end_stroke();
                self.inference_pending = false;
            }
            Command::Quit => return SessionControl::Quit,
        }
        SessionControl::Continue
    }

    /// Advance one frame: flush a throttled inference, then check the clock.
    pub fn tick(&mut self, now: Instant) -> Option<RoundOutcome> {
        if self.inference_pending && self.judge.is_playing() && self.inference_gate.should_tick(now)
        {
            self.inference_pending = false;
            if let Some(outcome) = self.run_inference() {
                return Some(outcome);
            }
        }
        let outcome = self.judge.tick(now);
        self.record_outcome(outcome)
    }

    /// Start a round with a randomly chosen target word.
    pub fn start_round(&mut self, now: Instant) {
        let word = self.pick_word();
        self.start_round_with(word, now);
    }

    /// Start a round with a specific target word.
    pub fn start_round_with(&mut self, word: impl Into<String>, now: Instant) {
        self.judge.start_round(word, &mut self.canvas, now);
        self.end_stroke();
        self.inference_pending = false;
        self.inference_gate.reset();
    }

    /// Snapshot for rendering.
    pub fn status(&self, now: Instant) -> SessionStatus {
        let round = self.judge.round();
        SessionStatus {
            phase: self.judge.phase(),
            target_word: round.map(|r| r.target_word.clone()),
            remaining: self.judge.remaining(now),
            prediction: round.and_then(|r| r.latest_prediction.clone()),
            winning: self.judge.is_winning(),
            score: self.score,
            diagnostics: self.diagnostics,
            load_error: self.classifier.load_error().map(str::to_string),
            categories: self.classifier.labels().len(),
        }
    }

    fn set_diagnostics(&mut self, enabled: bool) {
        self.diagnostics = enabled;
        self.normalizer.set_diagnostics(enabled);
        self.classifier.set_diagnostics(enabled);
    }

    fn end_stroke(&mut self) {
        self.drawing = false;
        self.last_point = None;
    }

    /// Run inference now if the rate gate allows it; otherwise mark the
    /// frame dirty so the next tick picks up the latest raster.
    fn request_inference(&mut self, now: Instant) -> Option<RoundOutcome> {
        if self.inference_gate.should_tick(now) {
            self.inference_pending = false;
            self.run_inference()
        } else {
            self.inference_pending = true;
            None
        }
    }

    fn run_inference(&mut self) -> Option<RoundOutcome> {
        let tensor = self.normalizer.normalize(self.canvas.raster());
        let prediction = self.classifier.predict(&tensor);
        tracing::debug!(
            label = ?prediction.label,
            confidence = prediction.confidence,
            blurred = tensor.blurred(),
            "Prediction"
        );
        let outcome = self.judge.submit_prediction(prediction);
        self.record_outcome(outcome)
    }

    /// Every round result passes through here; a win scores one point.
    fn record_outcome(&mut self, outcome: Option<RoundOutcome>) -> Option<RoundOutcome> {
        if outcome == Some(RoundOutcome::Won) {
            self.score += 1;
            tracing::info!(score = self.score, "Round won");
        }
        outcome
    }

    fn pick_word(&mut self) -> String {
        let candidates: Vec<&str> = self
            .classifier
            .labels()
            .iter()
            .filter(|label| !label.is_empty())
            .collect();
        if candidates.is_empty() {
            return FALLBACK_WORD.to_string();
        }
        candidates[self.rng.usize(..candidates.len())].to_string()
    }
}

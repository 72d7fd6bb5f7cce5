//! Round lifecycle and win/loss evaluation.

use std::time::{Duration, Instant};

use quickdraw_canvas::StrokeCanvas;
use quickdraw_common::config::RoundConfig;
use quickdraw_sketch_model::prediction::Prediction;

/// How a round ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RoundOutcome {
    /// The classifier recognized the target word.
    Won,
    /// The time limit ran out.
    TimedOut,
}

/// Where the judge is in the round lifecycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RoundPhase {
    /// No round (menu).
    Idle,
    /// Drawing in progress.
    Playing,
    /// Round over; stays here until the next round starts.
    Finished(RoundOutcome),
}

/// State of the current or most recent round.
#[derive(Debug, Clone, PartialEq)]
pub struct RoundState {
    pub target_word: String,
    pub started_at: Instant,
    pub latest_prediction: Option<Prediction>,
}

/// Tracks one round at a time and decides its outcome.
#[derive(Debug, Clone)]
pub struct RoundJudge {
    time_limit: Duration,
    win_confidence: f32,
    phase: RoundPhase,
    round: Option<RoundState>,
}

impl RoundJudge {
    pub fn new(config: &RoundConfig) -> Self {
        Self {
            time_limit: config.time_limit(),
            win_confidence: config.win_confidence,
            phase: RoundPhase::Idle,
            round: None,
        }
    }

    pub fn with_defaults() -> Self {
        Self::new(&RoundConfig::default())
    }

    pub fn phase(&self) -> RoundPhase {
        self.phase
    }

    pub fn is_playing(&self) -> bool {
        self.phase == RoundPhase::Playing
    }

    pub fn time_limit(&self) -> Duration {
        self.time_limit
    }

    /// The current round, or the finished one kept for display.
    pub fn round(&self) -> Option<&RoundState> {
        self.round.as_ref()
    }

    /// Begin a new round from any phase.
    ///
    /// Clears the canvas, stamps the start time, and drops any previous
    /// prediction. Calling this while playing skips the current word.
    pub fn start_round(
        &mut self,
        target_word: impl Into<String>,
        canvas: &mut StrokeCanvas,
        now: Instant,
    ) {
        canvas.clear();
        let target_word = target_word.into();
        tracing::info!(target_word = %target_word, "New round");
        self.round = Some(RoundState {
            target_word,
            started_at: now,
            latest_prediction: None,
        });
        self.phase = RoundPhase::Playing;
    }

    /// Advance the clock. A pending win is checked before the timeout, and
    /// reaching the time limit exactly counts as expired.
    pub fn tick(&mut self, now: Instant) -> Option<RoundOutcome> {
        if !self.is_playing() {
            return None;
        }
        if self.is_winning() {
            return Some(self.finish(RoundOutcome::Won));
        }
        let round = self.round.as_ref()?;
        if now.saturating_duration_since(round.started_at) >= self.time_limit {
            return Some(self.finish(RoundOutcome::TimedOut));
        }
        None
    }

    /// Record the latest guess and check it against the target.
    ///
    /// Ignored outside of `Playing`, so a finished round keeps the
    /// prediction it ended with.
    pub fn submit_prediction(&mut self, prediction: Prediction) -> Option<RoundOutcome> {
        if !self.is_playing() {
            return None;
        }
        let round = self.round.as_mut()?;
        round.latest_prediction = Some(prediction);
        if self.is_winning() {
            return Some(self.finish(RoundOutcome::Won));
        }
        None
    }

    /// Forget the latest guess (the player cleared the canvas).
    pub fn clear_prediction(&mut self) {
        if let Some(round) = self.round.as_mut() {
            round.latest_prediction = None;
        }
    }

    /// Return to idle, discarding the round.
    pub fn abandon(&mut self) {
        self.phase = RoundPhase::Idle;
        self.round = None;
    }

    /// Whether the latest guess names the target with enough confidence.
    pub fn is_winning(&self) -> bool {
        let Some(round) = self.round.as_ref() else {
            return false;
        };
        round.latest_prediction.as_ref().is_some_and(|p| {
            p.matches(&round.target_word) && p.confidence > self.win_confidence
        })
    }

    /// Time left in the current round, saturating at zero.
    pub fn remaining(&self, now: Instant) -> Duration {
        match (&self.phase, &self.round) {
            (RoundPhase::Playing, Some(round)) => self
                .time_limit
                .saturating_sub(now.saturating_duration_since(round.started_at)),
            _ => Duration::ZERO,
        }
    }

    fn finish(&mut self, outcome: RoundOutcome) -> RoundOutcome {
        self.phase = RoundPhase::Finished(outcome);
        if let Some(round) = self.round.as_ref() {
            tracing::info!(
                target_word = %round.target_word,
                ?outcome,
                guess = ?round.latest_prediction.as_ref().and_then(|p| p.label.as_deref()),
                "Round finished"
            );
        }
        outcome
    }
}

//! Clock and timing utilities for the game loop.
//!
//! A session is anchored to a monotonic epoch recorded when the shell
//! starts. This module provides:
//! - The session epoch and conversions from script offsets to instants
//! - A rate gate used to debounce motion-triggered inference

use std::time::{Duration, Instant};

/// A session clock that provides monotonic instants relative to a fixed
/// epoch (the moment the shell started).
#[derive(Debug, Clone)]
pub struct SessionClock {
    /// The instant the session started.
    epoch: Instant,

    /// Wall-clock time at epoch (RFC 3339 string).
    epoch_wall: String,
}

impl SessionClock {
    /// Create a new session clock anchored to now.
    pub fn start() -> Self {
        Self {
            epoch: Instant::now(),
            epoch_wall: chrono::Utc::now().to_rfc3339(),
        }
    }

    /// The instant `offset_ns` nanoseconds after the epoch.
    pub fn at_offset_ns(&self, offset_ns: u64) -> Instant {
        self.epoch + Duration::from_nanos(offset_ns)
    }

    /// Wall-clock time at session start.
    pub fn epoch_wall(&self) -> &str {
        &self.epoch_wall
    }

    /// The underlying epoch instant.
    pub fn epoch(&self) -> Instant {
        self.epoch
    }

    /// Convert a nanosecond value to seconds.
    pub fn ns_to_secs(ns: u64) -> f64 {
        ns as f64 / 1_000_000_000.0
    }
}

/// Minimum-interval gate for expensive per-event work.
///
/// A rate of 0 Hz disables gating: every call fires.
#[derive(Debug, Clone)]
pub struct RateController {
    min_interval: Duration,
    last_tick: Option<Instant>,
}

impl RateController {
    /// Create a controller targeting the given Hz rate.
    pub fn new(target_hz: u32) -> Self {
        let min_interval = if target_hz == 0 {
            Duration::ZERO
        } else {
            Duration::from_nanos(1_000_000_000 / target_hz as u64)
        };
        Self {
            min_interval,
            last_tick: None,
        }
    }

    /// A controller that never throttles.
    pub fn unlimited() -> Self {
        Self::new(0)
    }

    /// Check if enough time has passed for the next tick.
    /// Returns true and updates internal state if ready.
    /// The first call always returns true.
    pub fn should_tick(&mut self, now: Instant) -> bool {
        match self.last_tick {
            Some(last) if now.saturating_duration_since(last) < self.min_interval => false,
            _ => {
                self.last_tick = Some(now);
                true
            }
        }
    }

    /// Forget the last tick so the next call fires immediately.
    pub fn reset(&mut self) {
        self.last_tick = None;
    }

    /// Minimum interval between ticks.
    pub fn interval(&self) -> Duration {
        self.min_interval
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_clock_offsets() {
        let clock = SessionClock::start();
        let later = clock.at_offset_ns(1_500_000_000);
        assert_eq!(later - clock.epoch(), Duration::from_millis(1500));
        assert!(!clock.epoch_wall().is_empty());
    }

    #[test]
    fn test_ns_to_secs_conversion() {
        assert!((SessionClock::ns_to_secs(1_500_000_000) - 1.5).abs() < 1e-9);
    }

    #[test]
    fn test_rate_controller() {
        let t0 = Instant::now();
        let mut ctrl = RateController::new(60);
        assert!(ctrl.should_tick(t0)); // first tick always fires
        assert!(!ctrl.should_tick(t0 + Duration::from_millis(1)));
        assert!(ctrl.should_tick(t0 + Duration::from_millis(17)));
    }

    #[test]
    fn test_unlimited_rate_always_fires() {
        let t0 = Instant::now();
        let mut ctrl = RateController::unlimited();
        assert!(ctrl.should_tick(t0));
        assert!(ctrl.should_tick(t0));
        assert_eq!(ctrl.interval(), Duration::ZERO);
    }

    #[test]
    fn test_reset_rearms_controller() {
        let t0 = Instant::now();
        let mut ctrl = RateController::new(10);
        assert!(ctrl.should_tick(t0));
        assert!(!ctrl.should_tick(t0));
        ctrl.reset();
        assert!(ctrl.should_tick(t0));
    }
}

//! Quickdraw Game
//!
//! Round lifecycle and the application state that ties the pipeline
//! together:
//! - **Judge:** idle → playing → finished, with timeout and win rules
//! - **Session:** owns canvas, normalizer, classifier, judge, and score,
//!   and applies pointer input and commands from whatever loop drives it
//!
//! Everything runs synchronously on the caller's thread.

pub mod judge;
pub mod session;

pub use judge::{RoundJudge, RoundOutcome, RoundPhase, RoundState};
pub use session::{GameSession, SessionControl, SessionStatus};

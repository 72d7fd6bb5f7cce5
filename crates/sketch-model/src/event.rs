//! Input event types for driving a game session.
//!
//! A script is a JSONL stream of timestamped events: pointer transitions in
//! window coordinates, shell commands, and explicit frame ticks. Blank lines
//! and lines starting with `#` are ignored.

use serde::{Deserialize, Serialize};

/// Monotonic timestamp in nanoseconds since session start.
pub type TimestampNs = u64;

/// Pointer transition kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PointerPhase {
    Down,
    Up,
    Move,
}

/// A single pointer sample in window coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PointerEvent {
    pub phase: PointerPhase,
    pub x: f64,
    pub y: f64,
}

impl PointerEvent {
    pub fn down(x: f64, y: f64) -> Self {
        Self {
            phase: PointerPhase::Down,
            x,
            y,
        }
    }

    pub fn up(x: f64, y: f64) -> Self {
        Self {
            phase: PointerPhase::Up,
            x,
            y,
        }
    }

    pub fn moved(x: f64, y: f64) -> Self {
        Self {
            phase: PointerPhase::Move,
            x,
            y,
        }
    }
}

/// Commands the shell exposes to the player.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Command {
    /// Wipe the canvas and the current guess.
    Clear,
    /// Start a round from the menu, or skip to a new word.
    StartOrSkip,
    /// Toggle diagnostic logging of preprocessing and top-k guesses.
    ToggleDiagnostics,
    /// Return to the menu.
    Menu,
    /// Leave the game.
    Quit,
}

/// A single scripted event with timestamp.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScriptEvent {
    /// Monotonic nanoseconds since session start.
    #[serde(rename = "t")]
    pub timestamp_ns: TimestampNs,

    /// The event payload.
    #[serde(flatten)]
    pub kind: EventKind,
}

/// Discriminated union of scripted event types.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum EventKind {
    /// Pointer transition in window coordinates.
    Pointer { phase: PointerPhase, x: f64, y: f64 },

    /// Shell command.
    Command { command: Command },

    /// Frame tick with no input.
    Tick,
}

impl ScriptEvent {
    pub fn pointer(timestamp_ns: TimestampNs, event: PointerEvent) -> Self {
        Self {
            timestamp_ns,
            kind: EventKind::Pointer {
                phase: event.phase,
                x: event.x,
                y: event.y,
            },
        }
    }

    pub fn command(timestamp_ns: TimestampNs, command: Command) -> Self {
        Self {
            timestamp_ns,
            kind: EventKind::Command { command },
        }
    }

    pub fn tick(timestamp_ns: TimestampNs) -> Self {
        Self {
            timestamp_ns,
            kind: EventKind::Tick,
        }
    }

    /// Pointer payload, if this is a pointer event.
    pub fn pointer_event(&self) -> Option<PointerEvent> {
        match self.kind {
            EventKind::Pointer { phase, x, y } => Some(PointerEvent { phase, x, y }),
            _ => None,
        }
    }
}

/// Parse events from JSONL content (one JSON object per line).
pub fn parse_events(jsonl: &str) -> Result<Vec<ScriptEvent>, serde_json::Error> {
    jsonl
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty() && !line.starts_with('#'))
        .map(serde_json::from_str)
        .collect()
}

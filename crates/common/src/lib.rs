//! Quickdraw Common Utilities
//!
//! Shared infrastructure for all Quickdraw crates:
//! - Error types and result aliases
//! - Session clock and inference rate gating
//! - Tracing/logging initialization
//! - Configuration loading

pub mod clock;
pub mod config;
pub mod error;
pub mod logging;

pub use clock::*;
pub use config::*;
pub use error::*;

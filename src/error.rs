//! Crate-level error types.
//!
//! Runtime input anomalies (missing touches, missing camera, missing axis
//! sample) never surface here; they degrade to an inactive source. Only
//! configuration I/O and misuse of the lifecycle are reported as errors.

use std::fmt;

use crate::source::lifecycle::{LifecycleOp, LifecycleState};

/// Errors produced by the locomote crate.
#[derive(Debug)]
pub enum LocomoteError {
    /// Generic I/O failure while reading or writing options.
    Io(std::io::Error),
    /// TOML options parsing/serialization failure.
    OptionsParse(String),
    /// Demo viewer event-loop failure.
    Viewer(String),
    /// A lifecycle hook was called from a state that does not allow it.
    Lifecycle {
        /// State the source was in.
        from: LifecycleState,
        /// Hook that was rejected.
        operation: LifecycleOp,
    },
}

impl fmt::Display for LocomoteError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Io(e) => write!(f, "I/O error: {e}"),
            Self::OptionsParse(msg) => {
                write!(f, "options parse error: {msg}")
            }
            Self::Viewer(msg) => write!(f, "viewer error: {msg}"),
            Self::Lifecycle { from, operation } => {
                write!(f, "cannot {operation} a source that is {from}")
            }
        }
    }
}

impl std::error::Error for LocomoteError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Io(e) => Some(e),
            _ => None,
        }
    }
}

impl From<std::io::Error> for LocomoteError {
    fn from(e: std::io::Error) -> Self {
        Self::Io(e)
    }
}

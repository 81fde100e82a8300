//! Error types for the collaborator boundary.
//!
//! The simulation tick itself never fails. These errors come from loading
//! configuration and from the score store, and callers are expected to log
//! them and carry on with defaults or the last known value.

use std::fmt;
use std::io;

/// Top-level error enum for configuration and persistence.
#[derive(Debug)]
pub enum GameError {
    /// Reading or writing a file failed.
    Io(io::Error),

    /// A JSON document could not be parsed or produced.
    Parse(serde_json::Error),

    /// A tuning knob is outside the range the simulation can run with.
    InvalidTuning {
        /// Name of the knob (for logging).
        name: &'static str,
        /// The value that was rejected.
        value: f32,
    },
}

impl fmt::Display for GameError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GameError::Io(e) => write!(f, "i/o error: {}", e),
            GameError::Parse(e) => write!(f, "invalid json: {}", e),
            GameError::InvalidTuning { name, value } => {
                write!(f, "tuning value '{}' out of range: {}", name, value)
            }
        }
    }
}

impl std::error::Error for GameError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            GameError::Io(e) => Some(e),
            GameError::Parse(e) => Some(e),
            GameError::InvalidTuning { .. } => None,
        }
    }
}

impl From<io::Error> for GameError {
    fn from(e: io::Error) -> Self {
        GameError::Io(e)
    }
}

impl From<serde_json::Error> for GameError {
    fn from(e: serde_json::Error) -> Self {
        GameError::Parse(e)
    }
}

//! Crate error types.
//!
//! Only the edges of the program can fail: save-file I/O, tuning files and
//! display setup. The simulation core is total and never returns these.

use std::fmt;

/// Top-level error enum for Dodge Master.
#[derive(Debug)]
pub enum GameError {
    /// Reading or writing a file failed.
    Io(std::io::Error),

    /// A save or tuning file held malformed JSON or mistyped fields.
    Json(serde_json::Error),

    /// A tuning value is outside the range the simulation can handle.
    InvalidTuning {
        /// Name of the field (for logging).
        name: &'static str,
        /// The value that was rejected.
        value: f32,
        /// Human-readable description of the accepted range.
        expected: &'static str,
    },

    /// The display refused a window mode.
    Display {
        /// Mode that was requested ("fullscreen" / "windowed").
        mode: &'static str,
        /// Backend-provided reason.
        reason: String,
    },
}

impl fmt::Display for GameError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GameError::Io(e) => write!(f, "i/o error: {}", e),
            GameError::Json(e) => write!(f, "malformed json: {}", e),
            GameError::InvalidTuning {
                name,
                value,
                expected,
            } => write!(
                f,
                "tuning value '{}' = {} is outside accepted range {}",
                name, value, expected
            ),
            GameError::Display { mode, reason } => {
                write!(f, "could not set {} display mode: {}", mode, reason)
            }
        }
    }
}

impl std::error::Error for GameError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            GameError::Io(e) => Some(e),
            GameError::Json(e) => Some(e),
            _ => None,
        }
    }
}

impl From<std::io::Error> for GameError {
    fn from(e: std::io::Error) -> Self {
        GameError::Io(e)
    }
}

impl From<serde_json::Error> for GameError {
    fn from(e: serde_json::Error) -> Self {
        GameError::Json(e)
    }
}

/// Convenience alias: a `Result` using `GameError` as the error type.
pub type GameResult<T> = Result<T, GameError>;

//! Error types for Homestead.
//!
//! Only malformed startup input and positions outside the map are treated as
//! hard failures. Gameplay rule violations are reported by the subsystem that
//! owns the rule.

use thiserror::Error;

use crate::coords::Position;

/// Top-level error type for Homestead operations.
#[derive(Debug, Error)]
pub enum HomesteadError {
    /// Map errors
    #[error("Map error: {0}")]
    Map(#[from] MapError),

    /// Configuration errors
    #[error("Configuration error: {0}")]
    Config(String),

    /// IO errors
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Map and position errors.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MapError {
    /// Position lies outside the map
    #[error("Position {position} is outside the {rows}x{cols} map")]
    OutOfBounds {
        /// Offending position
        position: Position,
        /// Map row count
        rows: usize,
        /// Map column count
        cols: usize,
    },

    /// Malformed map description
    #[error("Malformed map at line {line}: {reason}")]
    Format {
        /// 1-based line number (0 when the whole input is at fault)
        line: usize,
        /// What was wrong
        reason: String,
    },
}

impl MapError {
    /// Creates a format error for the given line.
    #[must_use]
    pub fn format(line: usize, reason: impl Into<String>) -> Self {
        Self::Format {
            line,
            reason: reason.into(),
        }
    }
}

/// Result type alias for map operations.
pub type MapResult<T> = Result<T, MapError>;

/// Result type alias for Homestead operations.
pub type HomesteadResult<T> = Result<T, HomesteadError>;

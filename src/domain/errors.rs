//! Domain errors for the negotiation engines' boundary.

use thiserror::Error;

/// Errors raised when input is rejected before it reaches the engines.
///
/// The engines themselves never fail: degenerate move lists produce their
/// documented fallbacks instead.
#[derive(Debug, Error)]
pub enum DomainError {
    /// A move failed the amount checks
    #[error("Invalid move at index {index}: {reason}")]
    InvalidMove { index: usize, reason: String },

    /// A stamped move precedes an earlier stamp
    #[error("Moves out of order: move {index} is stamped earlier than a move before it")]
    MovesOutOfOrder { index: usize },

    /// A context field is negative, non-finite or out of range
    #[error("Invalid negotiation context: {0}")]
    InvalidContext(String),

    /// JSON or YAML could not be read or written
    #[error("Serialization error: {0}")]
    SerializationError(String),

    /// Filesystem failure
    #[error("I/O error: {0}")]
    Io(String),
}

/// Result alias for boundary checks
pub type DomainResult<T> = Result<T, DomainError>;

impl From<serde_json::Error> for DomainError {
    fn from(err: serde_json::Error) -> Self {
        DomainError::SerializationError(err.to_string())
    }
}

impl From<serde_yaml::Error> for DomainError {
    fn from(err: serde_yaml::Error) -> Self {
        DomainError::SerializationError(err.to_string())
    }
}

impl From<std::io::Error> for DomainError {
    fn from(err: std::io::Error) -> Self {
        DomainError::Io(err.to_string())
    }
}

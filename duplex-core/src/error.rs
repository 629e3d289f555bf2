//! Structured error types for the Duplex workspace.

use thiserror::Error;

/// Unified error type for all Duplex operations.
///
/// Search-path outcomes (an extension that empties, a base that does not map
/// uniquely) are ordinary values, never errors; this type covers genuine
/// failures such as malformed input and I/O problems.
#[derive(Debug, Error)]
pub enum DuplexError {
    /// I/O error (file not found, permission denied, etc.)
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Parse error (malformed or incompatible serialized data)
    #[error("parse error: {0}")]
    Parse(String),

    /// Invalid input (bad arguments, out-of-range values, unknown bases)
    #[error("invalid input: {0}")]
    InvalidInput(String),

    /// Catch-all for other errors
    #[error("{0}")]
    Other(String),
}

/// Convenience alias used throughout the Duplex workspace.
pub type Result<T> = std::result::Result<T, DuplexError>;

//! Error types for protocol operations.

use thiserror::Error;

/// Errors that can occur during protocol operations.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ProtocolError {
    /// Message too long for the channel in the encoding its content forces.
    #[error("message too long: max {max} units, got {actual}")]
    MessageTooLong {
        /// Maximum allowed encoding units.
        max: usize,
        /// Actual encoding unit count.
        actual: usize,
    },
}

/// Result type for protocol operations.
pub type Result<T> = std::result::Result<T, ProtocolError>;

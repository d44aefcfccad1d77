//! Error types for core operations.

use thiserror::Error;

use courier_protocol::ProtocolError;
use courier_store::StoreError;

use crate::peer::InvalidPeerReason;

/// Errors that can occur during core operations.
///
/// Per-fragment channel failures are not errors; they reach the caller
/// through the listener passed to a send operation.
#[derive(Error, Debug)]
pub enum CoreError {
    /// The message text failed capacity validation.
    ///
    /// Recoverable: the caller must shorten the text.
    #[error("invalid message content: {0}")]
    InvalidContent(#[from] ProtocolError),

    /// The destination identifier failed peer validation.
    ///
    /// Recoverable: the caller must fix the identifier.
    #[error("invalid peer {identifier:?}: {reason}")]
    InvalidPeer {
        /// The rejected identifier.
        identifier: String,
        /// Why validation rejected it.
        reason: InvalidPeerReason,
    },

    /// The preference store failed.
    #[error("store error: {0}")]
    Store(#[from] StoreError),
}

/// Result type for core operations.
pub type Result<T> = std::result::Result<T, CoreError>;

//! Error types for review sessions

use stockscribe_domain::SessionId;
use thiserror::Error;

/// Errors that can occur while reviewing extracted items
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ReviewError {
    /// Operation not allowed in the current session or item state
    #[error("Invalid state: {0}")]
    InvalidState(String),

    /// Item index out of range
    #[error("Item not found: index {index} (session has {len} items)")]
    NotFound {
        /// Requested index
        index: usize,
        /// Number of items in the session
        len: usize,
    },

    /// No open session with this id
    #[error("Session not found: {0}")]
    SessionNotFound(SessionId),
}

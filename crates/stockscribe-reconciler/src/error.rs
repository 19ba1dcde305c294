//! Reconciler error types

use thiserror::Error;

/// Errors that can occur while setting up reconciliation
///
/// Problems with individual items never surface here; they are collected
/// as [`BatchError`](stockscribe_domain::BatchError)s in the batch.
#[derive(Error, Debug)]
pub enum ReconcileError {
    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),
}

//! Error types for the CLI application.

use thiserror::Error;

/// Result type alias for CLI operations.
pub type Result<T> = std::result::Result<T, CliError>;

/// CLI-specific errors.
#[derive(Debug, Error)]
pub enum CliError {
    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// Extraction failed
    #[error("Extraction error: {0}")]
    Extractor(#[from] stockscribe_extractor::ExtractorError),

    /// Review session error
    #[error("Review error: {0}")]
    Review(#[from] stockscribe_review::ReviewError),

    /// Reconciler configuration error
    #[error("Reconcile error: {0}")]
    Reconcile(#[from] stockscribe_reconciler::ReconcileError),

    /// Storage error
    #[error("Storage error: {0}")]
    Store(#[from] stockscribe_store::StoreError),

    /// I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialization error
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// TOML parsing error
    #[error("TOML parsing error: {0}")]
    Toml(#[from] toml::de::Error),

    /// Invalid input
    #[error("Invalid input: {0}")]
    InvalidInput(String),
}

//! Error types for the Extractor

use thiserror::Error;

/// A quantity or price token that could not be read as a number
///
/// Recovered per fragment: the fragment is skipped and reported, the rest of
/// the extraction carries on.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("Parse error: {reason} in '{input}'")]
pub struct ParseError {
    /// The text that failed to parse
    pub input: String,
    /// What was wrong with it
    pub reason: String,
}

impl ParseError {
    pub(crate) fn new(input: impl Into<String>, reason: impl Into<String>) -> Self {
        Self {
            input: input.into(),
            reason: reason.into(),
        }
    }
}

/// Errors that can occur during extraction
#[derive(Error, Debug)]
pub enum ExtractorError {
    /// Numeric parsing failed where a number was mandatory
    #[error(transparent)]
    Parse(#[from] ParseError),

    /// Text exceeds maximum length
    #[error("Text too long: {0} chars (max: {1})")]
    TextTooLong(usize, usize),

    /// Text source collaborator failed
    #[error("Text source error: {0}")]
    Source(String),

    /// Catalog collaborator failed
    #[error("Catalog error: {0}")]
    Catalog(String),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),
}

//! Result types for extraction

use serde::{Deserialize, Serialize};
use stockscribe_domain::{ResolvedItem, SourceType};

/// Result of extracting one text block
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExtractionReport {
    /// Resolved items, in document/utterance order
    pub items: Vec<ResolvedItem>,

    /// Fragments that could not become items
    pub skipped: Vec<SkippedFragment>,

    /// Metadata about the extraction
    pub metadata: ExtractionMetadata,
}

impl ExtractionReport {
    /// Items a human still has to look at
    pub fn pending_review(&self) -> impl Iterator<Item = &ResolvedItem> {
        self.items.iter().filter(|item| item.needs_review)
    }
}

/// A fragment dropped during extraction
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SkippedFragment {
    /// Position of the fragment among all fragments of the block
    pub position: usize,

    /// The fragment text
    pub fragment: String,

    /// Why it was dropped
    pub reason: String,
}

/// Metadata about an extraction operation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExtractionMetadata {
    /// Voice or invoice
    pub source_type: SourceType,

    /// Language tag of the block
    pub source_language: String,

    /// Timestamp when extraction occurred (Unix seconds)
    pub timestamp: u64,

    /// Number of fragments the segmenter produced
    pub fragment_count: usize,

    /// Processing time in milliseconds
    pub processing_time_ms: u64,
}

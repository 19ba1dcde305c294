//! Line items - from raw text block to resolved inventory line

use crate::confidence::{clamp_confidence, ReviewThreshold};
use crate::unit::Unit;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Where a block of text came from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SourceType {
    /// Speech-to-text transcript of a spoken stock count
    Voice,
    /// OCR (and possibly translated) text of a supplier invoice
    Invoice,
}

impl SourceType {
    /// Get the source type name
    pub fn as_str(&self) -> &'static str {
        match self {
            SourceType::Voice => "voice",
            SourceType::Invoice => "invoice",
        }
    }

    /// Parse a source type (case-insensitive)
    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "voice" => Some(SourceType::Voice),
            "invoice" => Some(SourceType::Invoice),
            _ => None,
        }
    }
}

impl fmt::Display for SourceType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Text produced by a transcription or OCR collaborator
///
/// Immutable input to extraction. Text is assumed to already be in the
/// working language (translation happens upstream).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RawTextBlock {
    /// The transcript or OCR text
    pub text: String,

    /// Whether this is a voice transcript or an invoice
    pub source_type: SourceType,

    /// Language tag of the text (e.g. "fr", "en")
    pub source_language: String,

    /// Upstream recognition confidence [0.0, 1.0]
    pub confidence: f64,
}

impl RawTextBlock {
    /// Create a new block; confidence is clamped into [0, 1]
    pub fn new(
        text: impl Into<String>,
        source_type: SourceType,
        source_language: impl Into<String>,
        confidence: f64,
    ) -> Self {
        Self {
            text: text.into(),
            source_type,
            source_language: source_language.into(),
            confidence: clamp_confidence(confidence),
        }
    }

    /// Voice transcript with full upstream confidence
    pub fn voice(text: impl Into<String>, language: impl Into<String>) -> Self {
        Self::new(text, SourceType::Voice, language, 1.0)
    }

    /// Invoice text with full upstream confidence
    pub fn invoice(text: impl Into<String>, language: impl Into<String>) -> Self {
        Self::new(text, SourceType::Invoice, language, 1.0)
    }
}

/// What the speaker or document asks to do with the stock
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Action {
    /// Add stock (delivery, count)
    Add,
    /// Remove stock (sale, breakage)
    Remove,
    /// Move stock between locations
    Move,
    /// No recognizable action keyword
    Unknown,
}

impl Action {
    /// Get the action name
    pub fn as_str(&self) -> &'static str {
        match self {
            Action::Add => "add",
            Action::Remove => "remove",
            Action::Move => "move",
            Action::Unknown => "unknown",
        }
    }

    /// Parse an action name (case-insensitive)
    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "add" => Some(Action::Add),
            "remove" => Some(Action::Remove),
            "move" => Some(Action::Move),
            "unknown" => Some(Action::Unknown),
            _ => None,
        }
    }

    /// Whether the action takes stock out of its location
    pub fn is_outgoing(&self) -> bool {
        matches!(self, Action::Remove)
    }
}

impl Default for Action {
    fn default() -> Self {
        Action::Add
    }
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A freshly segmented line, before unit normalization and product matching
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CandidateItem {
    /// The fragment of source text this candidate was cut from
    pub raw_fragment: String,

    /// Detected action
    pub action: Action,

    /// Quantity token as written ("5", "cinq", "2,5")
    pub quantity_raw: String,

    /// Product name as written
    pub product_raw: String,

    /// Unit word as written, if any
    pub unit_raw: Option<String>,

    /// Location phrase, if any
    pub location_raw: Option<String>,

    /// Price token as written, if any (invoices)
    pub price_raw: Option<String>,
}

/// A candidate after normalization and matching
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResolvedItem {
    /// Catalog id of the matched product
    pub product_id: Option<String>,

    /// Catalog name on an exact match, cleaned raw name otherwise
    pub product_name: String,

    /// Non-negative quantity
    pub quantity: f64,

    /// Canonical unit
    pub unit: Unit,

    /// Unit price, if known
    pub price: Option<f64>,

    /// Storage location, if known
    pub location: Option<String>,

    /// Overall confidence [0.0, 1.0]
    pub confidence: f64,

    /// Whether a human must confirm this item
    pub needs_review: bool,

    /// Source text the item was resolved from
    pub original_text: String,

    /// Action carried over from the candidate
    #[serde(default)]
    pub action: Action,
}

impl ResolvedItem {
    /// Create a resolved item with `needs_review` derived from the threshold
    pub fn new(
        product_id: Option<String>,
        product_name: impl Into<String>,
        quantity: f64,
        unit: Unit,
        confidence: f64,
        original_text: impl Into<String>,
        threshold: ReviewThreshold,
    ) -> Self {
        let confidence = clamp_confidence(confidence);
        let needs_review = threshold.needs_review(product_id.is_some(), confidence);
        Self {
            product_id,
            product_name: product_name.into(),
            quantity: quantity.max(0.0),
            unit,
            price: None,
            location: None,
            confidence,
            needs_review,
            original_text: original_text.into(),
            action: Action::Add,
        }
    }

    /// Set the unit price
    pub fn with_price(mut self, price: Option<f64>) -> Self {
        self.price = price;
        self
    }

    /// Set the location
    pub fn with_location(mut self, location: Option<String>) -> Self {
        self.location = location;
        self
    }

    /// Set the action
    pub fn with_action(mut self, action: Action) -> Self {
        self.action = action;
        self
    }

    /// Recompute `needs_review` after product id or confidence changed
    pub fn refresh_review(&mut self, threshold: ReviewThreshold) {
        self.needs_review = threshold.needs_review(self.product_id.is_some(), self.confidence);
    }

    /// Whether the item satisfies the review invariant for `threshold`
    pub fn review_flag_consistent(&self, threshold: ReviewThreshold) -> bool {
        self.needs_review == threshold.needs_review(self.product_id.is_some(), self.confidence)
    }
}

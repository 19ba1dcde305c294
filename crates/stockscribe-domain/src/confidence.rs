//! Confidence and review threshold

use serde::{Deserialize, Serialize};

/// Default confidence below which an item must be reviewed by a human
pub const DEFAULT_REVIEW_THRESHOLD: f64 = 0.75;

/// Confidence assigned to an item whose quantity could not be read as a number
pub const UNPARSED_QUANTITY_CONFIDENCE: f64 = 0.5;

/// Minimum confidence an item needs to skip human review
///
/// Every crate computes `needs_review` through this type so the rule
/// `needs_review == product_id.is_none() || confidence < threshold` lives in
/// one place.
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ReviewThreshold(f64);

impl ReviewThreshold {
    /// Create a threshold
    ///
    /// # Panics
    /// Panics if the value is outside [0, 1]
    pub fn new(value: f64) -> Self {
        assert!(
            (0.0..=1.0).contains(&value),
            "Review threshold must be in [0, 1]"
        );
        Self(value)
    }

    /// Create a threshold, rejecting values outside [0, 1]
    pub fn try_new(value: f64) -> Result<Self, String> {
        if (0.0..=1.0).contains(&value) {
            Ok(Self(value))
        } else {
            Err(format!("review threshold {} out of range [0.0, 1.0]", value))
        }
    }

    /// Get the raw threshold value
    pub fn value(&self) -> f64 {
        self.0
    }

    /// Whether an item with this product id and confidence needs review
    pub fn needs_review(&self, has_product_id: bool, confidence: f64) -> bool {
        !has_product_id || confidence < self.0
    }
}

impl Default for ReviewThreshold {
    fn default() -> Self {
        Self(DEFAULT_REVIEW_THRESHOLD)
    }
}

/// Clamp a score into [0, 1], mapping NaN to 0
pub fn clamp_confidence(value: f64) -> f64 {
    if value.is_nan() {
        0.0
    } else {
        value.clamp(0.0, 1.0)
    }
}

/// Combine matcher confidence with the quantity parse outcome
///
/// An item is never more certain than its product match; an unreadable
/// quantity caps it at [`UNPARSED_QUANTITY_CONFIDENCE`].
pub fn combine_confidence(matcher_confidence: f64, quantity_parsed: bool) -> f64 {
    let quantity_confidence = if quantity_parsed {
        1.0
    } else {
        UNPARSED_QUANTITY_CONFIDENCE
    };
    clamp_confidence(matcher_confidence.min(quantity_confidence))
}

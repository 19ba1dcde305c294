//! Per-item validation rules applied before reconciliation

use crate::ReconcilerConfig;
use std::fmt;
use stockscribe_domain::ResolvedItem;

/// Reasons an item cannot go into a batch
#[derive(Debug, Clone, PartialEq)]
pub enum RejectionReason {
    /// Quantity is zero, negative or not a number
    NonPositiveQuantity(f64),

    /// Price is negative or not a number
    InvalidPrice(f64),

    /// Product name is blank
    MissingProductName,

    /// Neither the item nor the batch has a location
    MissingLocation,
}

impl fmt::Display for RejectionReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RejectionReason::NonPositiveQuantity(q) => write!(f, "quantity must be > 0 (got {})", q),
            RejectionReason::InvalidPrice(p) => write!(f, "price must be >= 0 (got {})", p),
            RejectionReason::MissingProductName => f.write_str("product name is empty"),
            RejectionReason::MissingLocation => f.write_str("no location for item or batch"),
        }
    }
}

/// Checks items against the configured rules
#[derive(Debug, Clone)]
pub struct ItemValidator {
    config: ReconcilerConfig,
}

impl ItemValidator {
    /// Create a validator with the given configuration
    pub fn new(config: ReconcilerConfig) -> Self {
        Self { config }
    }

    /// Validate one item whose effective location is `location`
    ///
    /// Returns every rule the item breaks; empty means accepted.
    pub fn validate(&self, item: &ResolvedItem, location: &str) -> Vec<RejectionReason> {
        let mut reasons = Vec::new();

        if !(item.quantity > 0.0) {
            reasons.push(RejectionReason::NonPositiveQuantity(item.quantity));
        }

        if let Some(price) = item.price {
            if !(price >= 0.0) {
                reasons.push(RejectionReason::InvalidPrice(price));
            }
        }

        if item.product_name.trim().is_empty() {
            reasons.push(RejectionReason::MissingProductName);
        }

        if self.config.require_location && location.trim().is_empty() {
            reasons.push(RejectionReason::MissingLocation);
        }

        reasons
    }
}

/// Join reasons into the text stored in a batch error
pub fn describe(reasons: &[RejectionReason]) -> String {
    reasons
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join("; ")
}

#[cfg(test)]
mod tests {
    use super::*;
    use stockscribe_domain::{ReviewThreshold, Unit};

    fn item(quantity: f64) -> ResolvedItem {
        ResolvedItem::new(
            Some("p1".into()),
            "Wine",
            quantity,
            Unit::Bottle,
            1.0,
            "wine",
            ReviewThreshold::default(),
        )
    }

    #[test]
    fn test_valid_item() {
        let validator = ItemValidator::new(ReconcilerConfig::default());
        assert!(validator.validate(&item(3.0), "bar").is_empty());
    }

    #[test]
    fn test_zero_quantity_rejected() {
        let validator = ItemValidator::new(ReconcilerConfig::default());
        let reasons = validator.validate(&item(0.0), "bar");
        assert_eq!(reasons, vec![RejectionReason::NonPositiveQuantity(0.0)]);
    }

    #[test]
    fn test_negative_price_rejected() {
        let validator = ItemValidator::new(ReconcilerConfig::default());
        let reasons = validator.validate(&item(1.0).with_price(Some(-2.0)), "bar");
        assert_eq!(reasons, vec![RejectionReason::InvalidPrice(-2.0)]);
    }

    #[test]
    fn test_location_only_required_when_configured() {
        let lenient = ItemValidator::new(ReconcilerConfig::default());
        assert!(lenient.validate(&item(1.0), "").is_empty());

        let strict = ItemValidator::new(ReconcilerConfig::strict());
        assert_eq!(
            strict.validate(&item(1.0), " "),
            vec![RejectionReason::MissingLocation]
        );
    }

    #[test]
    fn test_describe_joins_reasons() {
        let text = describe(&[
            RejectionReason::NonPositiveQuantity(0.0),
            RejectionReason::MissingProductName,
        ]);
        assert_eq!(text, "quantity must be > 0 (got 0); product name is empty");
    }
}

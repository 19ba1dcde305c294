//! Configuration for the Extractor

use serde::{Deserialize, Serialize};
use stockscribe_domain::confidence::DEFAULT_REVIEW_THRESHOLD;
use stockscribe_domain::{Action, ReviewThreshold};

/// Default minimum token-overlap ratio for a fuzzy product match
pub const DEFAULT_TOKEN_OVERLAP_MIN: f64 = 0.3;

/// Default ceiling under which a trailing `,NN` reads as a decimal comma
pub const DEFAULT_DECIMAL_COMMA_CEILING: f64 = 100.0;

/// Configuration for the Extractor
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ExtractorConfig {
    /// Confidence below which an item needs human review
    pub review_threshold: f64,

    /// Minimum shared-word ratio for a fuzzy product match
    pub token_overlap_min: f64,

    /// A lone comma followed by one or two digits is a decimal separator
    /// only when the resulting value stays under this ceiling
    pub decimal_comma_ceiling: f64,

    /// Maximum input text length (characters)
    pub max_text_length: usize,

    /// Action assumed when a fragment opens with no action verb
    pub default_action: Action,
}

impl ExtractorConfig {
    /// The review threshold as a domain value
    ///
    /// Call [`validate`](Self::validate) first; out-of-range values are
    /// clamped here.
    pub fn threshold(&self) -> ReviewThreshold {
        ReviewThreshold::new(self.review_threshold.clamp(0.0, 1.0))
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<(), String> {
        ReviewThreshold::try_new(self.review_threshold)?;
        if !(0.0..=1.0).contains(&self.token_overlap_min) || self.token_overlap_min == 0.0 {
            return Err(format!(
                "token_overlap_min {} must be in (0.0, 1.0]",
                self.token_overlap_min
            ));
        }
        if !(self.decimal_comma_ceiling > 0.0) {
            return Err("decimal_comma_ceiling must be greater than 0".to_string());
        }
        if self.max_text_length == 0 {
            return Err("max_text_length must be greater than 0".to_string());
        }
        Ok(())
    }
}

impl Default for ExtractorConfig {
    fn default() -> Self {
        Self {
            review_threshold: DEFAULT_REVIEW_THRESHOLD,
            token_overlap_min: DEFAULT_TOKEN_OVERLAP_MIN,
            decimal_comma_ceiling: DEFAULT_DECIMAL_COMMA_CEILING,
            max_text_length: 50_000,
            default_action: Action::Add,
        }
    }
}

impl ExtractorConfig {
    /// Strict preset: more items go to human review
    pub fn strict() -> Self {
        Self {
            review_threshold: 0.9,
            token_overlap_min: 0.5,
            ..Self::default()
        }
    }

    /// Lenient preset: fuzzier matches are auto-confirmed
    pub fn lenient() -> Self {
        Self {
            review_threshold: 0.6,
            token_overlap_min: 0.2,
            ..Self::default()
        }
    }

    /// Load configuration from TOML string
    pub fn from_toml(toml_str: &str) -> Result<Self, String> {
        toml::from_str(toml_str).map_err(|e| format!("Failed to parse TOML: {}", e))
    }

    /// Serialize configuration to TOML string
    pub fn to_toml(&self) -> Result<String, String> {
        toml::to_string_pretty(self).map_err(|e| format!("Failed to serialize to TOML: {}", e))
    }
}

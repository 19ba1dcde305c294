//! Reconciler configuration

use crate::ReconcileError;
use serde::{Deserialize, Serialize};

/// Configuration for batch reconciliation
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ReconcilerConfig {
    /// Keep items still flagged for review instead of leaving them out
    pub include_unconfirmed: bool,

    /// Reject items that end up with no location at all
    pub require_location: bool,
}

impl ReconcilerConfig {
    /// Create a permissive configuration (unreviewed items go through)
    pub fn permissive() -> Self {
        Self {
            include_unconfirmed: true,
            require_location: false,
        }
    }

    /// Create a strict configuration (every row must carry a location)
    pub fn strict() -> Self {
        Self {
            include_unconfirmed: false,
            require_location: true,
        }
    }

    /// Load configuration from a TOML string
    pub fn from_toml(toml_str: &str) -> Result<Self, ReconcileError> {
        toml::from_str(toml_str).map_err(|e| ReconcileError::Config(e.to_string()))
    }

    /// Serialize configuration to a TOML string
    pub fn to_toml(&self) -> Result<String, ReconcileError> {
        toml::to_string(self).map_err(|e| ReconcileError::Config(e.to_string()))
    }
}

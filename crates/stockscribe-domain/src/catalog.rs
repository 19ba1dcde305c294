//! Product catalog entries

use crate::unit::Unit;
use serde::{Deserialize, Serialize};

/// A known product, owned by the catalog collaborator
///
/// The pipeline only ever reads a snapshot of these.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProductCatalogEntry {
    /// Catalog identifier
    pub id: String,

    /// Display name, matched against spoken or invoiced names
    pub name: String,

    /// Unit the product is stocked in
    #[serde(default)]
    pub unit: Unit,

    /// Reference unit price
    #[serde(default)]
    pub price: Option<f64>,

    /// Default storage location
    #[serde(default)]
    pub location: Option<String>,
}

impl ProductCatalogEntry {
    /// Create an entry with no price or location
    pub fn new(id: impl Into<String>, name: impl Into<String>, unit: Unit) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            unit,
            price: None,
            location: None,
        }
    }

    /// Set the reference price
    pub fn with_price(mut self, price: f64) -> Self {
        self.price = Some(price);
        self
    }

    /// Set the default location
    pub fn with_location(mut self, location: impl Into<String>) -> Self {
        self.location = Some(location.into());
        self
    }
}

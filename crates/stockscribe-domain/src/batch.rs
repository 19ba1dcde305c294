//! Inventory update batch - the write-once output of reconciliation

use crate::item::{Action, ResolvedItem};
use crate::unit::Unit;
use serde::{Deserialize, Serialize};

/// One row handed to the persistence collaborator
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InventoryUpdateRow {
    /// Catalog id, absent when the product was never matched
    pub product_id: Option<String>,

    /// Product name (catalog or raw)
    pub product_name: String,

    /// What happens to the stock; rows never mix actions
    pub action: Action,

    /// Summed quantity, always positive
    pub quantity: f64,

    /// Canonical unit
    pub unit: Unit,

    /// Storage location
    pub location: String,

    /// Unit price, if known
    pub price: Option<f64>,

    /// Unix seconds at which the batch was built
    pub timestamp: u64,
}

impl InventoryUpdateRow {
    /// Signed change this row makes to the stock at its location
    ///
    /// Removals count down; adds and moves count up at the row's location,
    /// which for a move is the destination.
    pub fn stock_delta(&self) -> f64 {
        if self.action.is_outgoing() {
            -self.quantity
        } else {
            self.quantity
        }
    }
}

/// An item that could not be saved, with the reason
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BatchError {
    /// The offending item
    pub item: ResolvedItem,

    /// Why it was rejected
    pub reason: String,
}

/// Result of reconciling a finalized session
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct InventoryUpdateBatch {
    /// Rows accepted for writing, in first-seen order
    pub items: Vec<InventoryUpdateRow>,

    /// Number of rows saved
    pub saved_count: usize,

    /// Number of rejected items
    pub error_count: usize,

    /// Per-item failures
    pub errors: Vec<BatchError>,
}

impl InventoryUpdateBatch {
    /// Whether every item made it into the batch
    pub fn is_clean(&self) -> bool {
        self.error_count == 0
    }
}

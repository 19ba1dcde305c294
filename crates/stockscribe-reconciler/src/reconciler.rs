//! Batch reconciliation of reviewed items

use crate::validator::{describe, ItemValidator};
use crate::ReconcilerConfig;
use std::collections::HashMap;
use std::time::{SystemTime, UNIX_EPOCH};
use stockscribe_domain::traits::InventorySink;
use stockscribe_domain::{Action, BatchError, InventoryUpdateBatch, InventoryUpdateRow, ResolvedItem, Unit};
use stockscribe_extractor::text::fold_words;
use tracing::{debug, info, warn};

/// A merged row plus the first item that contributed to it
struct Merged {
    row: InventoryUpdateRow,
    first: ResolvedItem,
}

/// The Reconciler turns reviewed items into an inventory update batch
///
/// Items are deduplicated by product, location, action and unit. The product
/// is its catalog id when the item has one, otherwise the folded product
/// name. Adds and removals of the same product stay in separate rows, as do
/// counts in different units. Quantities of merged items are summed; the
/// price comes from the first item, with a later price filling a missing one.
#[derive(Debug, Clone)]
pub struct Reconciler {
    config: ReconcilerConfig,
    validator: ItemValidator,
}

impl Reconciler {
    /// Create a new Reconciler with the given configuration
    pub fn new(config: ReconcilerConfig) -> Self {
        Self {
            validator: ItemValidator::new(config.clone()),
            config,
        }
    }

    /// Create a Reconciler with default configuration
    pub fn default_config() -> Self {
        Self::new(ReconcilerConfig::default())
    }

    /// The configuration in use
    pub fn config(&self) -> &ReconcilerConfig {
        &self.config
    }

    /// Build a batch from items; `location` is the fallback for items without one
    pub fn reconcile(&self, items: &[ResolvedItem], location: &str) -> InventoryUpdateBatch {
        let (merged, errors) = self.merge(items, location, unix_now());
        let rows: Vec<InventoryUpdateRow> = merged.into_iter().map(|m| m.row).collect();

        info!(
            "Reconciled {} items into {} rows ({} errors)",
            items.len(),
            rows.len(),
            errors.len()
        );

        InventoryUpdateBatch {
            saved_count: rows.len(),
            error_count: errors.len(),
            items: rows,
            errors,
        }
    }

    /// Reconcile and hand every row to a sink
    ///
    /// Rows the sink rejects become batch errors carrying the sink's reason;
    /// `saved_count` counts only the rows the sink accepted.
    pub fn reconcile_into<K>(&self, items: &[ResolvedItem], location: &str, sink: &mut K) -> InventoryUpdateBatch
    where
        K: InventorySink,
        K::Error: std::fmt::Display,
    {
        let (merged, mut errors) = self.merge(items, location, unix_now());

        let mut saved = Vec::with_capacity(merged.len());
        for Merged { row, mut first } in merged {
            match sink.write_row(&row) {
                Ok(()) => saved.push(row),
                Err(e) => {
                    warn!("Sink rejected row for '{}': {}", row.product_name, e);
                    first.quantity = row.quantity;
                    errors.push(BatchError {
                        item: first,
                        reason: e.to_string(),
                    });
                }
            }
        }

        info!(
            "Reconciled {} items: {} rows saved, {} errors",
            items.len(),
            saved.len(),
            errors.len()
        );

        InventoryUpdateBatch {
            saved_count: saved.len(),
            error_count: errors.len(),
            items: saved,
            errors,
        }
    }

    fn merge(&self, items: &[ResolvedItem], location: &str, timestamp: u64) -> (Vec<Merged>, Vec<BatchError>) {
        let mut merged: Vec<Merged> = Vec::new();
        let mut index: HashMap<DedupKey, usize> = HashMap::new();
        let mut errors = Vec::new();

        for item in items {
            if item.needs_review && !self.config.include_unconfirmed {
                debug!("Leaving out unconfirmed item '{}'", item.product_name);
                continue;
            }

            let item_location = item
                .location
                .as_deref()
                .map(str::trim)
                .filter(|l| !l.is_empty())
                .unwrap_or(location);

            let reasons = self.validator.validate(item, item_location);
            if !reasons.is_empty() {
                let reason = describe(&reasons);
                warn!("Rejected item '{}': {}", item.product_name, reason);
                errors.push(BatchError {
                    item: item.clone(),
                    reason,
                });
                continue;
            }

            let key = dedup_key(item, item_location);
            let existing = index.get(&key).copied();
            match existing {
                Some(slot) => {
                    let row = &mut merged[slot].row;
                    row.quantity += item.quantity;
                    if row.price.is_none() {
                        row.price = item.price;
                    }
                }
                None => {
                    index.insert(key, merged.len());
                    merged.push(Merged {
                        row: InventoryUpdateRow {
                            product_id: item.product_id.clone(),
                            product_name: item.product_name.clone(),
                            action: item.action,
                            quantity: item.quantity,
                            unit: item.unit,
                            location: item_location.to_string(),
                            price: item.price,
                            timestamp,
                        },
                        first: item.clone(),
                    });
                }
            }
        }

        (merged, errors)
    }
}

impl Default for Reconciler {
    fn default() -> Self {
        Self::default_config()
    }
}

type DedupKey = (String, String, Action, Unit);

fn dedup_key(item: &ResolvedItem, location: &str) -> DedupKey {
    let product = match &item.product_id {
        Some(id) => format!("id:{}", id),
        None => format!("name:{}", fold_words(&item.product_name)),
    };
    (product, fold_words(location), item.action, item.unit)
}

fn unix_now() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_secs())
        .unwrap_or(0)
}

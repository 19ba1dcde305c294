//! Review session state machine
//!
//! Every extracted item enters a session either auto-confirmed (matched and
//! confident enough) or pending. A reviewer then confirms, edits or removes
//! items by index until the session is finalized exactly once.
//!
//! ```text
//!            add (confident)            confirm / edit with product_id
//!   add ──► Pending ─────────────────────────────────► Confirmed
//!              ▲                                           │
//!              └────────────── edit ───────────────────────┘
//!   remove: any state ──► Removed (terminal)
//! ```

use crate::error::ReviewError;
use serde::{Deserialize, Serialize};
use std::fmt;
use stockscribe_domain::{ResolvedItem, ReviewThreshold, SessionId, Unit};
use tracing::{debug, info};

/// Lifecycle of a session
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SessionState {
    /// Accepting edits
    Open,
    /// Items handed off; no further changes
    Finalized,
}

/// Review status of one item
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ItemStatus {
    /// Waiting for a reviewer
    Pending,
    /// Confirmed by a reviewer or auto-confirmed
    Confirmed,
    /// Deleted by a reviewer; keeps its slot
    Removed,
}

impl ItemStatus {
    /// Get the status name
    pub fn as_str(&self) -> &'static str {
        match self {
            ItemStatus::Pending => "pending",
            ItemStatus::Confirmed => "confirmed",
            ItemStatus::Removed => "removed",
        }
    }
}

impl fmt::Display for ItemStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// An item in a session together with its review status
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReviewItem {
    /// The item
    pub item: ResolvedItem,
    /// Its review status
    pub status: ItemStatus,
}

/// Corrections a reviewer applies to one item
///
/// Fields left `None` are not touched.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ItemPatch {
    /// Catalog id; supplying one confirms the item
    pub product_id: Option<String>,
    /// Product name
    pub product_name: Option<String>,
    /// Quantity, must be >= 0
    pub quantity: Option<f64>,
    /// Unit
    pub unit: Option<Unit>,
    /// Unit price
    pub price: Option<f64>,
    /// Storage location
    pub location: Option<String>,
}

impl ItemPatch {
    /// Whether the patch changes nothing
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }
}

/// One review session: an ordered list of items awaiting confirmation
///
/// Indices always refer to the full list. Removed items keep their slot so
/// an index handed to a reviewer stays valid for the whole session.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReviewSession {
    session_id: SessionId,
    items: Vec<ReviewItem>,
    state: SessionState,
    location: String,
    period: String,
    threshold: ReviewThreshold,
}

impl ReviewSession {
    /// Open a session for a location and reporting period
    pub fn new(location: impl Into<String>, period: impl Into<String>, threshold: ReviewThreshold) -> Self {
        Self {
            session_id: SessionId::new(),
            items: Vec::new(),
            state: SessionState::Open,
            location: location.into(),
            period: period.into(),
            threshold,
        }
    }

    /// Session identifier
    pub fn session_id(&self) -> SessionId {
        self.session_id
    }

    /// Current lifecycle state
    pub fn state(&self) -> SessionState {
        self.state
    }

    /// Default location for items without one
    pub fn location(&self) -> &str {
        &self.location
    }

    /// Reporting period label
    pub fn period(&self) -> &str {
        &self.period
    }

    /// Review threshold used for auto-confirmation
    pub fn threshold(&self) -> ReviewThreshold {
        self.threshold
    }

    /// All items, removed ones included
    pub fn items(&self) -> &[ReviewItem] {
        &self.items
    }

    /// Number of slots (removed items included)
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Whether the session has no items at all
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Number of items in the given status
    pub fn count(&self, status: ItemStatus) -> usize {
        self.items.iter().filter(|i| i.status == status).count()
    }

    /// Get one item by index
    pub fn get(&self, index: usize) -> Result<&ReviewItem, ReviewError> {
        self.items.get(index).ok_or(ReviewError::NotFound {
            index,
            len: self.items.len(),
        })
    }

    /// Append an extracted item, auto-confirming it when it needs no review
    ///
    /// Returns the item's index.
    pub fn add_item(&mut self, mut item: ResolvedItem) -> Result<usize, ReviewError> {
        self.ensure_open("add items")?;

        item.refresh_review(self.threshold);
        let status = if item.needs_review {
            ItemStatus::Pending
        } else {
            ItemStatus::Confirmed
        };

        let index = self.items.len();
        debug!("Session {}: item {} '{}' added as {}", self.session_id, index, item.product_name, status);
        self.items.push(ReviewItem { item, status });
        Ok(index)
    }

    /// Append several items, in order
    pub fn add_items(&mut self, items: impl IntoIterator<Item = ResolvedItem>) -> Result<Vec<usize>, ReviewError> {
        items.into_iter().map(|item| self.add_item(item)).collect()
    }

    /// Confirm an item as reviewed
    ///
    /// A confirmed item carries full confidence. Items without a catalog
    /// product must be edited with a product id instead.
    pub fn confirm_item(&mut self, index: usize) -> Result<&ResolvedItem, ReviewError> {
        self.ensure_open("confirm items")?;
        let threshold = self.threshold;
        let session_id = self.session_id;
        let entry = self.slot_mut(index)?;
        if entry.status == ItemStatus::Removed {
            return Err(ReviewError::InvalidState(format!("item {} was removed", index)));
        }
        if entry.item.product_id.is_none() {
            return Err(ReviewError::InvalidState(format!(
                "item {} has no product id; edit it with id=<product id>",
                index
            )));
        }

        entry.status = ItemStatus::Confirmed;
        entry.item.confidence = 1.0;
        entry.item.refresh_review(threshold);
        debug!("Session {}: item {} confirmed", session_id, index);
        Ok(&entry.item)
    }

    /// Apply a reviewer's correction
    ///
    /// The item goes back to pending unless the patch names a catalog
    /// product, which confirms it at full confidence. A pending item that
    /// no longer needs review is confirmed straight away.
    pub fn edit_item(&mut self, index: usize, patch: ItemPatch) -> Result<&ResolvedItem, ReviewError> {
        self.ensure_open("edit items")?;
        if let Some(quantity) = patch.quantity {
            if !(quantity >= 0.0) {
                return Err(ReviewError::InvalidState("quantity must be >= 0".to_string()));
            }
        }

        let threshold = self.threshold;
        let session_id = self.session_id;
        let entry = self.slot_mut(index)?;
        if entry.status == ItemStatus::Removed {
            return Err(ReviewError::InvalidState(format!("item {} was removed", index)));
        }

        let item = &mut entry.item;
        let identified = patch.product_id.is_some();
        if let Some(product_id) = patch.product_id {
            item.product_id = Some(product_id);
            item.confidence = 1.0;
        }
        if let Some(name) = patch.product_name {
            item.product_name = name;
        }
        if let Some(quantity) = patch.quantity {
            item.quantity = quantity;
        }
        if let Some(unit) = patch.unit {
            item.unit = unit;
        }
        if patch.price.is_some() {
            item.price = patch.price;
        }
        if patch.location.is_some() {
            item.location = patch.location;
        }

        item.refresh_review(threshold);
        entry.status = if identified || !item.needs_review {
            ItemStatus::Confirmed
        } else {
            ItemStatus::Pending
        };
        debug!("Session {}: item {} edited, now {}", session_id, index, entry.status);
        Ok(&entry.item)
    }

    /// Remove an item; its index stays reserved
    pub fn remove_item(&mut self, index: usize) -> Result<(), ReviewError> {
        self.ensure_open("remove items")?;
        let session_id = self.session_id;
        let entry = self.slot_mut(index)?;
        entry.status = ItemStatus::Removed;
        debug!("Session {}: item {} removed", session_id, index);
        Ok(())
    }

    /// Close the session and hand off every non-removed item, in order
    ///
    /// Works once; later calls fail with [`ReviewError::InvalidState`].
    pub fn finalize(&mut self) -> Result<Vec<ResolvedItem>, ReviewError> {
        self.ensure_open("finalize")?;
        self.state = SessionState::Finalized;

        let items: Vec<ResolvedItem> = self
            .items
            .iter()
            .filter(|entry| entry.status != ItemStatus::Removed)
            .map(|entry| entry.item.clone())
            .collect();

        info!(
            "Session {} finalized: {} items ({} confirmed, {} pending, {} removed)",
            self.session_id,
            items.len(),
            self.count(ItemStatus::Confirmed),
            self.count(ItemStatus::Pending),
            self.count(ItemStatus::Removed)
        );
        Ok(items)
    }

    fn ensure_open(&self, action: &str) -> Result<(), ReviewError> {
        match self.state {
            SessionState::Open => Ok(()),
            SessionState::Finalized => Err(ReviewError::InvalidState(format!(
                "cannot {}: session {} is finalized",
                action, self.session_id
            ))),
        }
    }

    fn slot_mut(&mut self, index: usize) -> Result<&mut ReviewItem, ReviewError> {
        let len = self.items.len();
        self.items
            .get_mut(index)
            .ok_or(ReviewError::NotFound { index, len })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn item(product_id: Option<&str>, name: &str, confidence: f64) -> ResolvedItem {
        ResolvedItem::new(
            product_id.map(String::from),
            name,
            3.0,
            Unit::Bottle,
            confidence,
            format!("3 {}", name),
            ReviewThreshold::default(),
        )
    }

    fn session() -> ReviewSession {
        let mut session = ReviewSession::new("bar", "2026-10", ReviewThreshold::default());
        session.add_item(item(Some("p-wine"), "Wine", 1.0)).unwrap();
        session.add_item(item(None, "Zythum", 0.0)).unwrap();
        session.add_item(item(Some("p-vodka"), "Vodka", 0.5)).unwrap();
        session
    }

    #[test]
    fn test_add_auto_confirms_confident_matches() {
        let s = session();
        let statuses: Vec<_> = s.items().iter().map(|i| i.status).collect();
        assert_eq!(
            statuses,
            vec![ItemStatus::Confirmed, ItemStatus::Pending, ItemStatus::Pending]
        );
    }

    #[test]
    fn test_confirm_marks_reviewed() {
        let mut s = session();
        let threshold = s.threshold();
        let confirmed = s.confirm_item(2).unwrap();
        assert!(!confirmed.needs_review);
        assert_eq!(confirmed.confidence, 1.0);
        assert!(confirmed.review_flag_consistent(threshold));
        assert_eq!(s.get(2).unwrap().status, ItemStatus::Confirmed);
    }

    #[test]
    fn test_confirm_without_product_id_rejected() {
        let mut s = session();
        let before = s.clone();
        let err = s.confirm_item(1).unwrap_err();
        assert!(matches!(&err, ReviewError::InvalidState(msg) if msg.contains("id=")));
        assert_eq!(s, before);
        assert!(s.get(1).unwrap().item.review_flag_consistent(s.threshold()));
    }

    #[test]
    fn test_edit_with_product_id_confirms() {
        let mut s = session();
        let patch = ItemPatch {
            product_id: Some("p-ale".into()),
            product_name: Some("Zythum Ale".into()),
            ..ItemPatch::default()
        };
        let edited = s.edit_item(1, patch).unwrap();
        assert_eq!(edited.confidence, 1.0);
        assert!(!edited.needs_review);
        assert_eq!(edited.product_name, "Zythum Ale");
        assert_eq!(s.get(1).unwrap().status, ItemStatus::Confirmed);
    }

    #[test]
    fn test_edit_without_product_id_returns_to_pending() {
        let mut s = session();
        s.confirm_item(2).unwrap();
        let patch = ItemPatch {
            quantity: Some(4.0),
            ..ItemPatch::default()
        };
        let edited = s.edit_item(2, patch).unwrap();
        assert_eq!(edited.quantity, 4.0);
        assert!(edited.needs_review);
        assert_eq!(s.get(2).unwrap().status, ItemStatus::Pending);
    }

    #[test]
    fn test_edit_confident_item_stays_confirmed() {
        let mut s = session();
        let patch = ItemPatch {
            location: Some("cellar".into()),
            ..ItemPatch::default()
        };
        s.edit_item(0, patch).unwrap();
        assert_eq!(s.get(0).unwrap().status, ItemStatus::Confirmed);
        assert_eq!(s.get(0).unwrap().item.location.as_deref(), Some("cellar"));
    }

    #[test]
    fn test_negative_quantity_patch_rejected() {
        let mut s = session();
        let before = s.clone();
        let patch = ItemPatch {
            quantity: Some(-1.0),
            ..ItemPatch::default()
        };
        let err = s.edit_item(0, patch).unwrap_err();
        assert_eq!(err, ReviewError::InvalidState("quantity must be >= 0".into()));
        assert_eq!(s, before);
    }

    #[test]
    fn test_out_of_range_index_has_no_side_effect() {
        let mut s = session();
        let before = s.clone();
        assert_eq!(s.confirm_item(7).unwrap_err(), ReviewError::NotFound { index: 7, len: 3 });
        assert_eq!(s.remove_item(3).unwrap_err(), ReviewError::NotFound { index: 3, len: 3 });
        assert!(s.edit_item(9, ItemPatch::default()).is_err());
        assert_eq!(s, before);
    }

    #[test]
    fn test_removed_item_keeps_slot() {
        let mut s = session();
        s.remove_item(0).unwrap();
        assert_eq!(s.len(), 3);
        assert_eq!(s.get(1).unwrap().item.product_name, "Zythum");
        assert!(matches!(s.confirm_item(0), Err(ReviewError::InvalidState(_))));
        assert!(matches!(
            s.edit_item(0, ItemPatch::default()),
            Err(ReviewError::InvalidState(_))
        ));
    }

    #[test]
    fn test_finalize_once() {
        let mut s = session();
        s.remove_item(1).unwrap();

        let items = s.finalize().unwrap();
        let names: Vec<_> = items.iter().map(|i| i.product_name.as_str()).collect();
        assert_eq!(names, vec!["Wine", "Vodka"]);
        assert_eq!(s.state(), SessionState::Finalized);

        assert!(matches!(s.finalize(), Err(ReviewError::InvalidState(_))));
    }

    #[test]
    fn test_finalized_session_rejects_mutation() {
        let mut s = session();
        s.finalize().unwrap();
        assert!(matches!(s.add_item(item(None, "Gin", 0.0)), Err(ReviewError::InvalidState(_))));
        assert!(matches!(s.confirm_item(0), Err(ReviewError::InvalidState(_))));
        assert!(matches!(s.remove_item(0), Err(ReviewError::InvalidState(_))));
        assert!(matches!(
            s.edit_item(0, ItemPatch::default()),
            Err(ReviewError::InvalidState(_))
        ));
    }

    #[test]
    fn test_session_threshold_overrides_item_flag() {
        let mut s = ReviewSession::new("bar", "2026-10", ReviewThreshold::new(0.4));
        s.add_item(item(Some("p-vodka"), "Vodka", 0.5)).unwrap();
        assert_eq!(s.get(0).unwrap().status, ItemStatus::Confirmed);
        assert!(!s.get(0).unwrap().item.needs_review);
    }

    #[test]
    fn test_session_serializes() {
        let s = session();
        let json = serde_json::to_string(&s).unwrap();
        let back: ReviewSession = serde_json::from_str(&json).unwrap();
        assert_eq!(back, s);
    }
}

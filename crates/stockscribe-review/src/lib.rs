//! Stockscribe Review
//!
//! Human-in-the-loop confirmation of extracted items before they are
//! reconciled into an inventory update.
//!
//! A [`ReviewSession`] holds the items of one stock count or invoice. Items
//! that matched a catalog product with enough confidence are confirmed on
//! arrival; the rest wait for a reviewer to confirm, edit or remove them.
//! Sessions live in a [`SessionStore`] and are addressed by
//! [`SessionId`](stockscribe_domain::SessionId).
//!
//! # Example
//!
//! ```
//! use stockscribe_domain::{ResolvedItem, ReviewThreshold, Unit};
//! use stockscribe_review::{ItemPatch, SessionStore};
//!
//! let threshold = ReviewThreshold::default();
//! let mut store = SessionStore::new();
//! let id = store.open("bar", "2026-10", threshold);
//!
//! let item = ResolvedItem::new(None, "Zythum", 2.0, Unit::Can, 0.0, "2 zythum", threshold);
//! let session = store.get_mut(id).unwrap();
//! let index = session.add_item(item).unwrap();
//! session
//!     .edit_item(index, ItemPatch { product_id: Some("p-zythum".into()), ..Default::default() })
//!     .unwrap();
//!
//! let items = store.finalize(id).unwrap();
//! assert!(!items[0].needs_review);
//! ```

#![warn(missing_docs)]

mod error;
mod session;
mod store;

pub use error::ReviewError;
pub use session::{ItemPatch, ItemStatus, ReviewItem, ReviewSession, SessionState};
pub use store::SessionStore;

//! Stockscribe Reconciler
//!
//! Aggregates reviewed items into an inventory update batch.
//!
//! The Reconciler:
//! - leaves out items still flagged for review (unless configured otherwise)
//! - validates each item (positive quantity, sane price, location)
//! - deduplicates by product, location, action and unit, summing quantities
//! - stamps every row of a batch with one timestamp
//! - optionally writes the rows through an [`InventorySink`](stockscribe_domain::traits::InventorySink)
//!
//! Invalid items never abort a batch; they come back as
//! [`BatchError`](stockscribe_domain::BatchError)s next to the saved rows.
//!
//! # Examples
//!
//! ```
//! use stockscribe_domain::{ResolvedItem, ReviewThreshold, Unit};
//! use stockscribe_reconciler::Reconciler;
//!
//! let wine = |q| ResolvedItem::new(
//!     Some("p-wine".to_string()), "Wine", q, Unit::Bottle, 1.0, "wine", ReviewThreshold::default(),
//! );
//!
//! let batch = Reconciler::default().reconcile(&[wine(5.0), wine(3.0)], "bar");
//! assert_eq!(batch.items[0].quantity, 8.0);
//! assert_eq!(batch.saved_count, 1);
//! ```

#![warn(missing_docs)]

mod config;
mod error;
mod reconciler;
mod validator;

pub use config::ReconcilerConfig;
pub use error::ReconcileError;
pub use reconciler::Reconciler;
pub use validator::{describe, ItemValidator, RejectionReason};

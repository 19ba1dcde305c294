//! Stockscribe Domain Layer
//!
//! Core data model for turning voice transcripts and invoice text into
//! inventory updates. This crate holds no I/O; it defines the values that
//! flow through the pipeline and the trait interfaces of the collaborators
//! around it.
//!
//! ## Key Concepts
//!
//! - **RawTextBlock**: transcript or OCR text handed in by an upstream service
//! - **CandidateItem**: an unresolved line cut out of that text
//! - **ResolvedItem**: a candidate after unit normalization and product matching
//! - **ReviewThreshold**: the confidence below which a human must confirm
//! - **InventoryUpdateBatch**: the reconciled, deduplicated write request
//!
//! ## Pipeline
//!
//! ```text
//! RawTextBlock → Extractor → ResolvedItem[] → ReviewSession → Reconciler → InventoryUpdateBatch
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod batch;
pub mod catalog;
pub mod confidence;
pub mod item;
pub mod session_id;
pub mod traits;
pub mod unit;

// Re-exports for convenience
pub use batch::{BatchError, InventoryUpdateBatch, InventoryUpdateRow};
pub use catalog::ProductCatalogEntry;
pub use confidence::ReviewThreshold;
pub use item::{Action, CandidateItem, RawTextBlock, ResolvedItem, SourceType};
pub use session_id::SessionId;
pub use unit::Unit;

//! Trait definitions for external collaborators
//!
//! These traits define the boundaries between the extraction pipeline and
//! the services around it (transcription, OCR, catalog lookup, persistence).
//! Implementations live in other crates or in the embedding application.

use crate::{InventoryUpdateRow, ProductCatalogEntry, RawTextBlock};

/// Supplies text already transcribed, OCR'd and translated
///
/// Implemented by speech-to-text or OCR adapters outside the core
pub trait TextSource {
    /// Error type for fetch operations
    type Error;

    /// Produce the next block of text to extract from
    fn fetch(&self) -> Result<RawTextBlock, Self::Error>;
}

/// Supplies a read-only snapshot of the product catalog
///
/// Implemented by the infrastructure layer (stockscribe-store)
pub trait CatalogSource {
    /// Error type for catalog reads
    type Error;

    /// Load the full catalog, in stable iteration order
    fn catalog(&self) -> Result<Vec<ProductCatalogEntry>, Self::Error>;
}

/// Persists reconciled inventory rows
///
/// Implemented by the infrastructure layer (stockscribe-store). A rejected
/// row is reported back per row; it never aborts the rest of the batch.
pub trait InventorySink {
    /// Error type for write operations
    type Error;

    /// Write a single row
    fn write_row(&mut self, row: &InventoryUpdateRow) -> Result<(), Self::Error>;
}

impl<T: CatalogSource + ?Sized> CatalogSource for &T {
    type Error = T::Error;

    fn catalog(&self) -> Result<Vec<ProductCatalogEntry>, Self::Error> {
        (**self).catalog()
    }
}

impl<T: InventorySink + ?Sized> InventorySink for &mut T {
    type Error = T::Error;

    fn write_row(&mut self, row: &InventoryUpdateRow) -> Result<(), Self::Error> {
        (**self).write_row(row)
    }
}

/// In-memory sink that records every row it accepts
///
/// Useful for callers that reconcile first and persist later, and in tests.
#[derive(Debug, Default, Clone)]
pub struct MemorySink {
    /// Rows accepted so far
    pub rows: Vec<InventoryUpdateRow>,
}

impl InventorySink for MemorySink {
    type Error = std::convert::Infallible;

    fn write_row(&mut self, row: &InventoryUpdateRow) -> Result<(), Self::Error> {
        self.rows.push(row.clone());
        Ok(())
    }
}

impl CatalogSource for [ProductCatalogEntry] {
    type Error = std::convert::Infallible;

    fn catalog(&self) -> Result<Vec<ProductCatalogEntry>, Self::Error> {
        Ok(self.to_vec())
    }
}

impl CatalogSource for Vec<ProductCatalogEntry> {
    type Error = std::convert::Infallible;

    fn catalog(&self) -> Result<Vec<ProductCatalogEntry>, Self::Error> {
        Ok(self.clone())
    }
}

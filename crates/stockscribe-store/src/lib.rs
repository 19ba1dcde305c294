//! Stockscribe Storage Layer
//!
//! SQLite persistence for the product catalog and for the inventory update
//! rows produced by reconciliation. Implements the
//! [`CatalogSource`] and [`InventorySink`] collaborator traits.
//!
//! # Examples
//!
//! ```no_run
//! use stockscribe_domain::{ProductCatalogEntry, Unit};
//! use stockscribe_store::SqliteStore;
//!
//! let mut store = SqliteStore::new("stockscribe.db").unwrap();
//! store.upsert_product(&ProductCatalogEntry::new("p-wine", "Wine", Unit::Bottle)).unwrap();
//! ```

#![warn(missing_docs)]

use rusqlite::{params, Connection, OptionalExtension, Row};
use std::path::Path;
use stockscribe_domain::traits::{CatalogSource, InventorySink};
use stockscribe_domain::{Action, InventoryUpdateRow, ProductCatalogEntry, Unit};
use thiserror::Error;
use tracing::debug;

/// Errors that can occur during storage operations
#[derive(Error, Debug)]
pub enum StoreError {
    /// Database error
    #[error("Database error: {0}")]
    Database(#[from] rusqlite::Error),

    /// Row references a product id missing from the catalog
    #[error("Unknown product: {0}")]
    UnknownProduct(String),

    /// Invalid data format
    #[error("Invalid data: {0}")]
    InvalidData(String),
}

/// SQLite-backed catalog and inventory sink
///
/// # Thread Safety
///
/// SQLite connections are not thread-safe. Each thread should have its own
/// SqliteStore instance.
pub struct SqliteStore {
    conn: Connection,
}

impl SqliteStore {
    /// Open (or create) a store at the given path
    ///
    /// Use `:memory:` for an in-memory database (useful for testing).
    pub fn new<P: AsRef<Path>>(path: P) -> Result<Self, StoreError> {
        let conn = Connection::open(path)?;
        let store = Self { conn };
        store.initialize_schema()?;
        Ok(store)
    }

    fn initialize_schema(&self) -> Result<(), StoreError> {
        self.conn.execute_batch(include_str!("schema.sql"))?;
        Ok(())
    }

    /// Insert a product or replace the one with the same id
    pub fn upsert_product(&mut self, entry: &ProductCatalogEntry) -> Result<(), StoreError> {
        Self::upsert_with(&self.conn, entry)
    }

    /// Upsert a whole catalog in one transaction
    ///
    /// Returns the number of entries written.
    pub fn import_catalog(&mut self, entries: &[ProductCatalogEntry]) -> Result<usize, StoreError> {
        let tx = self.conn.transaction()?;
        for entry in entries {
            Self::upsert_with(&tx, entry)?;
        }
        tx.commit()?;
        debug!("Imported {} catalog entries", entries.len());
        Ok(entries.len())
    }

    fn upsert_with(conn: &Connection, entry: &ProductCatalogEntry) -> Result<(), StoreError> {
        if entry.id.trim().is_empty() {
            return Err(StoreError::InvalidData(format!(
                "product '{}' has an empty id",
                entry.name
            )));
        }
        conn.execute(
            "INSERT INTO products (id, name, unit, price, location)
             VALUES (?1, ?2, ?3, ?4, ?5)
             ON CONFLICT(id) DO UPDATE SET
             name = excluded.name, unit = excluded.unit,
             price = excluded.price, location = excluded.location",
            params![
                &entry.id,
                &entry.name,
                entry.unit.as_str(),
                entry.price,
                &entry.location,
            ],
        )?;
        Ok(())
    }

    /// Get one product by id
    pub fn get_product(&self, id: &str) -> Result<Option<ProductCatalogEntry>, StoreError> {
        let product = self
            .conn
            .query_row(
                "SELECT id, name, unit, price, location FROM products WHERE id = ?1",
                params![id],
                product_from_row,
            )
            .optional()?;
        Ok(product)
    }

    /// All products, in insertion order
    pub fn list_products(&self) -> Result<Vec<ProductCatalogEntry>, StoreError> {
        let mut stmt = self
            .conn
            .prepare("SELECT id, name, unit, price, location FROM products ORDER BY rowid")?;
        let products = stmt
            .query_map([], product_from_row)?
            .collect::<Result<Vec<_>, _>>()?;
        Ok(products)
    }

    /// Most recent inventory updates, newest first
    pub fn list_updates(&self, limit: usize) -> Result<Vec<InventoryUpdateRow>, StoreError> {
        let mut stmt = self.conn.prepare(
            "SELECT product_id, product_name, action, quantity, unit, location, price, recorded_at
             FROM inventory_updates ORDER BY id DESC LIMIT ?1",
        )?;
        let rows = stmt
            .query_map(params![limit as i64], |row| {
                Ok(InventoryUpdateRow {
                    product_id: row.get(0)?,
                    product_name: row.get(1)?,
                    action: action_column(row, 2)?,
                    quantity: row.get(3)?,
                    unit: unit_column(row, 4)?,
                    location: row.get(5)?,
                    price: row.get(6)?,
                    timestamp: row.get::<_, i64>(7)? as u64,
                })
            })?
            .collect::<Result<Vec<_>, _>>()?;
        Ok(rows)
    }

    /// Net quantity recorded for a product at a location
    ///
    /// Removals count against the total.
    pub fn stock_level(&self, product_id: &str, location: &str) -> Result<f64, StoreError> {
        let total: Option<f64> = self.conn.query_row(
            "SELECT SUM(CASE WHEN action = ?3 THEN -quantity ELSE quantity END)
             FROM inventory_updates WHERE product_id = ?1 AND location = ?2",
            params![product_id, location, Action::Remove.as_str()],
            |row| row.get(0),
        )?;
        Ok(total.unwrap_or(0.0))
    }

    fn product_exists(&self, id: &str) -> Result<bool, StoreError> {
        let exists = self
            .conn
            .query_row("SELECT 1 FROM products WHERE id = ?1", params![id], |_| Ok(true))
            .optional()?
            .unwrap_or(false);
        Ok(exists)
    }
}

fn unit_column(row: &Row<'_>, idx: usize) -> rusqlite::Result<Unit> {
    let raw: String = row.get(idx)?;
    Unit::parse(&raw).ok_or_else(|| {
        rusqlite::Error::FromSqlConversionFailure(
            idx,
            rusqlite::types::Type::Text,
            Box::new(StoreError::InvalidData(format!("Unknown unit: {}", raw))),
        )
    })
}

fn action_column(row: &Row<'_>, idx: usize) -> rusqlite::Result<Action> {
    let raw: String = row.get(idx)?;
    Action::parse(&raw).ok_or_else(|| {
        rusqlite::Error::FromSqlConversionFailure(
            idx,
            rusqlite::types::Type::Text,
            Box::new(StoreError::InvalidData(format!("Unknown action: {}", raw))),
        )
    })
}

fn product_from_row(row: &Row<'_>) -> rusqlite::Result<ProductCatalogEntry> {
    Ok(ProductCatalogEntry {
        id: row.get(0)?,
        name: row.get(1)?,
        unit: unit_column(row, 2)?,
        price: row.get(3)?,
        location: row.get(4)?,
    })
}

impl CatalogSource for SqliteStore {
    type Error = StoreError;

    fn catalog(&self) -> Result<Vec<ProductCatalogEntry>, Self::Error> {
        self.list_products()
    }
}

impl InventorySink for SqliteStore {
    type Error = StoreError;

    /// Persist one row; rows naming an unknown product are rejected
    fn write_row(&mut self, row: &InventoryUpdateRow) -> Result<(), Self::Error> {
        if let Some(id) = &row.product_id {
            if !self.product_exists(id)? {
                return Err(StoreError::UnknownProduct(id.clone()));
            }
        }

        self.conn.execute(
            "INSERT INTO inventory_updates
             (product_id, product_name, action, quantity, unit, location, price, recorded_at)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8)",
            params![
                &row.product_id,
                &row.product_name,
                row.action.as_str(),
                row.quantity,
                row.unit.as_str(),
                &row.location,
                row.price,
                row.timestamp as i64,
            ],
        )?;
        debug!(
            "Recorded {} {} {} of '{}' at '{}'",
            row.action, row.quantity, row.unit, row.product_name, row.location
        );
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_id_rejected() {
        let mut store = SqliteStore::new(":memory:").unwrap();
        let entry = ProductCatalogEntry::new("  ", "Wine", Unit::Bottle);
        assert!(matches!(
            store.upsert_product(&entry),
            Err(StoreError::InvalidData(_))
        ));
    }

    #[test]
    fn test_schema_is_idempotent() {
        let store = SqliteStore::new(":memory:").unwrap();
        assert!(store.initialize_schema().is_ok());
    }
}

//! Integration tests for stockscribe-store
//!
//! These tests cover catalog import and persisting reconciled batches.

use stockscribe_domain::traits::{CatalogSource, InventorySink};
use stockscribe_domain::{
    Action, InventoryUpdateRow, ProductCatalogEntry, ResolvedItem, ReviewThreshold, Unit,
};
use stockscribe_reconciler::Reconciler;
use stockscribe_store::{SqliteStore, StoreError};
use tempfile::TempDir;

fn catalog() -> Vec<ProductCatalogEntry> {
    vec![
        ProductCatalogEntry::new("p-wine", "House Red Wine", Unit::Bottle).with_price(12.5),
        ProductCatalogEntry::new("p-vodka", "Vodka", Unit::Bottle).with_location("bar"),
        ProductCatalogEntry::new("p-flour", "Flour", Unit::Kg),
    ]
}

fn confirmed(id: &str, name: &str, quantity: f64) -> ResolvedItem {
    ResolvedItem::new(
        Some(id.to_string()),
        name,
        quantity,
        Unit::Bottle,
        1.0,
        format!("{} {}", quantity, name),
        ReviewThreshold::default(),
    )
}

#[test]
fn test_store_initialization() {
    let store = SqliteStore::new(":memory:");
    assert!(store.is_ok(), "Store should initialize successfully");
}

#[test]
fn test_import_and_list_catalog() {
    let mut store = SqliteStore::new(":memory:").unwrap();
    assert_eq!(store.import_catalog(&catalog()).unwrap(), 3);

    let listed = store.catalog().unwrap();
    assert_eq!(listed, catalog());

    let vodka = store.get_product("p-vodka").unwrap().unwrap();
    assert_eq!(vodka.location.as_deref(), Some("bar"));
    assert!(store.get_product("p-missing").unwrap().is_none());
}

#[test]
fn test_upsert_replaces_existing_product() {
    let mut store = SqliteStore::new(":memory:").unwrap();
    store.import_catalog(&catalog()).unwrap();

    let repriced = ProductCatalogEntry::new("p-wine", "House Red Wine", Unit::Bottle).with_price(14.0);
    store.upsert_product(&repriced).unwrap();

    let listed = store.list_products().unwrap();
    assert_eq!(listed.len(), 3);
    assert_eq!(listed[0].price, Some(14.0));
}

#[test]
fn test_catalog_persists_across_reopen() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("stock.db");

    {
        let mut store = SqliteStore::new(&path).unwrap();
        store.import_catalog(&catalog()).unwrap();
    }

    let store = SqliteStore::new(&path).unwrap();
    assert_eq!(store.list_products().unwrap().len(), 3);
}

#[test]
fn test_reconcile_into_store() {
    let dir = TempDir::new().unwrap();
    let mut store = SqliteStore::new(dir.path().join("stock.db")).unwrap();
    store.import_catalog(&catalog()).unwrap();

    let items = vec![
        confirmed("p-wine", "House Red Wine", 5.0),
        confirmed("p-vodka", "Vodka", 2.0),
        confirmed("p-wine", "House Red Wine", 3.0),
    ];

    let batch = Reconciler::default_config().reconcile_into(&items, "cellar", &mut store);
    assert!(batch.is_clean());
    assert_eq!(batch.saved_count, 2);

    assert_eq!(store.stock_level("p-wine", "cellar").unwrap(), 8.0);
    assert_eq!(store.stock_level("p-vodka", "cellar").unwrap(), 2.0);

    let updates = store.list_updates(10).unwrap();
    assert_eq!(updates.len(), 2);
    // newest first
    assert_eq!(updates[0].product_id.as_deref(), Some("p-vodka"));
    assert_eq!(updates[1].quantity, 8.0);
}

#[test]
fn test_removal_lowers_stock_level() {
    let mut store = SqliteStore::new(":memory:").unwrap();
    store.import_catalog(&catalog()).unwrap();

    let items = vec![
        confirmed("p-wine", "House Red Wine", 5.0).with_location(Some("bar".to_string())),
        confirmed("p-wine", "House Red Wine", 2.0)
            .with_location(Some("bar".to_string()))
            .with_action(Action::Remove),
    ];

    let batch = Reconciler::default_config().reconcile_into(&items, "cellar", &mut store);
    assert!(batch.is_clean());
    assert_eq!(batch.saved_count, 2);

    assert_eq!(store.stock_level("p-wine", "bar").unwrap(), 3.0);
    assert_eq!(store.stock_level("p-wine", "cellar").unwrap(), 0.0);

    let updates = store.list_updates(10).unwrap();
    assert_eq!(updates[0].action, Action::Remove);
    assert_eq!(updates[0].quantity, 2.0);
    assert_eq!(updates[1].action, Action::Add);
}

#[test]
fn test_unknown_product_becomes_batch_error() {
    let mut store = SqliteStore::new(":memory:").unwrap();
    store.import_catalog(&catalog()).unwrap();

    let items = vec![
        confirmed("p-wine", "House Red Wine", 1.0),
        confirmed("p-ghost", "Ghost Gin", 4.0),
    ];

    let batch = Reconciler::default_config().reconcile_into(&items, "bar", &mut store);
    assert_eq!(batch.saved_count, 1);
    assert_eq!(batch.error_count, 1);
    assert_eq!(batch.errors[0].item.product_name, "Ghost Gin");
    assert!(batch.errors[0].reason.contains("p-ghost"));
    assert_eq!(store.list_updates(10).unwrap().len(), 1);
}

#[test]
fn test_name_only_rows_are_stored() {
    let mut store = SqliteStore::new(":memory:").unwrap();
    let row = InventoryUpdateRow {
        product_id: None,
        product_name: "Zythum".to_string(),
        action: Action::Add,
        quantity: 2.0,
        unit: Unit::Can,
        location: "bar".to_string(),
        price: None,
        timestamp: 1_700_000_000,
    };

    store.write_row(&row).unwrap();
    assert_eq!(store.list_updates(1).unwrap(), vec![row]);
}

#[test]
fn test_write_row_rejects_unknown_id() {
    let mut store = SqliteStore::new(":memory:").unwrap();
    let row = InventoryUpdateRow {
        product_id: Some("p-none".to_string()),
        product_name: "Nothing".to_string(),
        action: Action::Add,
        quantity: 1.0,
        unit: Unit::Piece,
        location: "bar".to_string(),
        price: None,
        timestamp: 0,
    };

    assert!(matches!(
        store.write_row(&row),
        Err(StoreError::UnknownProduct(id)) if id == "p-none"
    ));
}

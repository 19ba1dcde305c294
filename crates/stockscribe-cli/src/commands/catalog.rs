//! Catalog command implementation.

use super::open_store;
use crate::cli::{CatalogAction, CatalogArgs};
use crate::config::Config;
use crate::error::Result;
use crate::output::Formatter;
use crate::source::read_catalog_file;

/// Execute a catalog action.
pub fn execute_catalog(args: CatalogArgs, config: &Config, formatter: &Formatter) -> Result<()> {
    let mut store = open_store(config)?;

    match args.action {
        CatalogAction::Import { file } => {
            let entries = read_catalog_file(&file)?;
            let count = store.import_catalog(&entries)?;
            println!("{}", formatter.success(&format!("Imported {} product(s)", count)));
        }
        CatalogAction::List => {
            let products = store.list_products()?;
            println!("{}", formatter.format_products(&products)?);
        }
        CatalogAction::History { limit } => {
            let rows = store.list_updates(limit)?;
            println!("{}", formatter.format_updates(&rows)?);
        }
    }

    Ok(())
}

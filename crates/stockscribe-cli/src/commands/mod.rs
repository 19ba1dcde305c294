//! Command implementations.

pub mod catalog;
pub mod extract;
pub mod reconcile;
pub mod review;

pub use self::catalog::execute_catalog;
pub use self::extract::execute_extract;
pub use self::reconcile::execute_reconcile;
pub use self::review::execute_review;

use crate::cli::InputArgs;
use crate::config::Config;
use crate::error::Result;
use crate::source::{read_catalog_file, FileSource};
use std::fs;
use stockscribe_extractor::{ExtractionReport, Extractor};
use stockscribe_store::SqliteStore;
use tracing::debug;

/// Open the configured database, creating its directory if needed.
pub fn open_store(config: &Config) -> Result<SqliteStore> {
    let path = config.database_path()?;
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent)?;
        }
    }
    debug!("Opening database at {}", path.display());
    Ok(SqliteStore::new(&path)?)
}

/// Extract from the input file against a JSON catalog or the database.
pub fn run_extraction(input: &InputArgs, config: &Config) -> Result<ExtractionReport> {
    let extractor = Extractor::new(config.extractor.clone())?;
    let source = FileSource::from_args(input);

    let report = match &input.catalog {
        Some(path) => {
            let entries = read_catalog_file(path)?;
            extractor.extract_from(&source, &entries)?
        }
        None => {
            let store = open_store(config)?;
            extractor.extract_from(&source, &store)?
        }
    };
    debug!(
        "Extracted {} item(s), skipped {} fragment(s) from {}",
        report.items.len(),
        report.skipped.len(),
        source.path().display()
    );
    Ok(report)
}

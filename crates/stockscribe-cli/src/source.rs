//! File-backed text and catalog inputs.

use crate::cli::InputArgs;
use crate::error::{CliError, Result};
use std::fs;
use std::path::{Path, PathBuf};
use stockscribe_domain::traits::TextSource;
use stockscribe_domain::{ProductCatalogEntry, RawTextBlock, SourceType};

/// Reads a transcript or OCR dump from disk.
///
/// The file is read on every fetch, so the block always reflects the
/// current contents.
#[derive(Debug, Clone)]
pub struct FileSource {
    path: PathBuf,
    source_type: SourceType,
    language: String,
}

impl FileSource {
    /// Create a source for one file.
    pub fn new(path: impl Into<PathBuf>, source_type: SourceType, language: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            source_type,
            language: language.into(),
        }
    }

    /// Build a source from command-line input arguments.
    pub fn from_args(args: &InputArgs) -> Self {
        Self::new(args.file.clone(), args.source.into(), args.lang.clone())
    }

    /// The file being read.
    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl TextSource for FileSource {
    type Error = CliError;

    fn fetch(&self) -> Result<RawTextBlock> {
        let text = fs::read_to_string(&self.path)?;
        Ok(RawTextBlock::new(text, self.source_type, self.language.clone(), 1.0))
    }
}

/// Load a JSON array of catalog entries.
pub fn read_catalog_file(path: &Path) -> Result<Vec<ProductCatalogEntry>> {
    let contents = fs::read_to_string(path)?;
    let entries: Vec<ProductCatalogEntry> = serde_json::from_str(&contents)?;
    if let Some(entry) = entries.iter().find(|e| e.id.trim().is_empty()) {
        return Err(CliError::InvalidInput(format!(
            "catalog entry '{}' has no id",
            entry.name
        )));
    }
    Ok(entries)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_fetch_reads_file() {
        let mut file = NamedTempFile::new().unwrap();
        write!(file, "add 6 bottles of wine").unwrap();

        let source = FileSource::new(file.path(), SourceType::Voice, "en");
        let block = source.fetch().unwrap();
        assert_eq!(block.text, "add 6 bottles of wine");
        assert_eq!(block.source_type, SourceType::Voice);
        assert_eq!(block.source_language, "en");
    }

    #[test]
    fn test_missing_file() {
        let source = FileSource::new("/nonexistent/count.txt", SourceType::Voice, "en");
        assert!(matches!(source.fetch(), Err(CliError::Io(_))));
    }

    #[test]
    fn test_catalog_without_id_rejected() {
        let mut file = NamedTempFile::new().unwrap();
        write!(file, r#"[{{"id": "", "name": "Wine", "unit": "bottle"}}]"#).unwrap();
        assert!(matches!(
            read_catalog_file(file.path()),
            Err(CliError::InvalidInput(_))
        ));
    }
}

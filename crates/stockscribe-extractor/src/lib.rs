//! Stockscribe Extractor
//!
//! Turns a voice transcript or an OCR'd invoice into resolved inventory
//! line items.
//!
//! # Overview
//!
//! Text arrives already transcribed (and translated, when needed) by an
//! upstream service. The extractor cuts it into fragments, reads action,
//! quantity, unit, product, price and location out of each one, normalizes
//! the numbers and units, and matches the product name against a catalog
//! snapshot. Every resolved item carries a confidence and a review flag.
//!
//! # Architecture
//!
//! ```text
//! RawTextBlock → TextSegmenter → parse_fragment → Normalizer + ProductMatcher → ResolvedItem
//! ```
//!
//! # Key Features
//!
//! - **Multilingual keyword tables**: French, English and Japanese unit
//!   words, action verbs and category hints, kept as data in [`keywords`]
//! - **Locale-aware numbers**: `¥2,500`, `12,50 €`, `14,995`, `cinq`
//! - **Invoice labels**: `Quantité:`, `Qty:`, `数量:`, `Prix unitaire:`, `単価:`
//! - **Explicit catalog**: no global lookup state; the catalog is an argument
//!
//! # Example Usage
//!
//! ```
//! use stockscribe_domain::{ProductCatalogEntry, RawTextBlock, Unit};
//! use stockscribe_extractor::Extractor;
//!
//! let catalog = vec![ProductCatalogEntry::new("p-wine", "Wine", Unit::Bottle)];
//! let block = RawTextBlock::voice("add 6 bottles of wine to the cellar", "en");
//!
//! let report = Extractor::default().extract(&block, &catalog).unwrap();
//! assert_eq!(report.items.len(), 1);
//! assert_eq!(report.items[0].quantity, 6.0);
//! assert_eq!(report.items[0].location.as_deref(), Some("cellar"));
//! ```

#![warn(missing_docs)]

mod config;
mod error;
mod extractor;
mod fragment;
pub mod keywords;
mod matcher;
mod normalizer;
mod segmenter;
pub mod text;
mod types;

#[cfg(test)]
mod tests;

pub use config::{ExtractorConfig, DEFAULT_DECIMAL_COMMA_CEILING, DEFAULT_TOKEN_OVERLAP_MIN};
pub use error::{ExtractorError, ParseError};
pub use extractor::Extractor;
pub use fragment::parse_fragment;
pub use matcher::{match_product, MatchResult, ProductMatcher};
pub use normalizer::{
    infer_unit, lookup_unit, normalize, NormalizedQuantity, Normalizer, ParsedNumber, UnitSource,
};
pub use segmenter::TextSegmenter;
pub use types::{ExtractionMetadata, ExtractionReport, SkippedFragment};

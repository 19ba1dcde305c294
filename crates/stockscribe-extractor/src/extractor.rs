//! Core Extractor implementation

use crate::config::ExtractorConfig;
use crate::error::{ExtractorError, ParseError};
use crate::fragment::parse_fragment;
use crate::matcher::ProductMatcher;
use crate::normalizer::{Normalizer, UnitSource};
use crate::segmenter::TextSegmenter;
use crate::types::{ExtractionMetadata, ExtractionReport, SkippedFragment};
use std::time::{SystemTime, UNIX_EPOCH};
use stockscribe_domain::confidence::combine_confidence;
use stockscribe_domain::traits::{CatalogSource, TextSource};
use stockscribe_domain::{
    CandidateItem, ProductCatalogEntry, RawTextBlock, ResolvedItem, ReviewThreshold,
};
use tracing::{debug, info, warn};

/// The Extractor turns a transcript or invoice text into resolved line items
///
/// Extraction is a pure function of the text block, the catalog snapshot and
/// the configuration: the same inputs always give the same items.
#[derive(Debug, Clone)]
pub struct Extractor {
    config: ExtractorConfig,
    threshold: ReviewThreshold,
    normalizer: Normalizer,
    matcher: ProductMatcher,
}

impl Extractor {
    /// Create a new Extractor, rejecting invalid configuration
    pub fn new(config: ExtractorConfig) -> Result<Self, ExtractorError> {
        config.validate().map_err(ExtractorError::Config)?;
        Ok(Self {
            threshold: config.threshold(),
            normalizer: Normalizer::new(config.decimal_comma_ceiling),
            matcher: ProductMatcher::new(config.token_overlap_min),
            config,
        })
    }

    /// The configuration in use
    pub fn config(&self) -> &ExtractorConfig {
        &self.config
    }

    /// Extract resolved items from a text block against a catalog snapshot
    pub fn extract(
        &self,
        block: &RawTextBlock,
        catalog: &[ProductCatalogEntry],
    ) -> Result<ExtractionReport, ExtractorError> {
        let length = block.text.chars().count();
        if length > self.config.max_text_length {
            return Err(ExtractorError::TextTooLong(length, self.config.max_text_length));
        }

        let start_time = SystemTime::now();
        info!(
            "Starting extraction: {} text, language '{}', {} chars, {} catalog entries",
            block.source_type,
            block.source_language,
            length,
            catalog.len()
        );

        let (candidates, mut skipped, fragment_count) = self.segment_candidates(block);

        let mut items = Vec::with_capacity(candidates.len());
        for (position, candidate) in candidates {
            match self.resolve(&candidate, catalog) {
                Ok(item) => {
                    debug!(
                        "Resolved '{}' -> {} x {} {} (confidence {:.2}, review: {})",
                        candidate.raw_fragment,
                        item.product_name,
                        item.quantity,
                        item.unit,
                        item.confidence,
                        item.needs_review
                    );
                    items.push(item);
                }
                Err(e) => {
                    warn!("Skipping fragment {} '{}': {}", position, candidate.raw_fragment, e);
                    skipped.push(SkippedFragment {
                        position,
                        fragment: candidate.raw_fragment,
                        reason: e.to_string(),
                    });
                }
            }
        }
        skipped.sort_by_key(|s| s.position);

        let processing_time_ms = start_time.elapsed().map(|d| d.as_millis() as u64).unwrap_or(0);
        info!(
            "Extraction complete: {} items ({} need review), {} skipped",
            items.len(),
            items.iter().filter(|i| i.needs_review).count(),
            skipped.len()
        );

        Ok(ExtractionReport {
            items,
            skipped,
            metadata: ExtractionMetadata {
                source_type: block.source_type,
                source_language: block.source_language.clone(),
                timestamp: unix_now(),
                fragment_count,
                processing_time_ms,
            },
        })
    }

    /// Fetch the block and catalog from collaborators, then extract
    pub fn extract_from<S, C>(&self, source: &S, catalog: &C) -> Result<ExtractionReport, ExtractorError>
    where
        S: TextSource,
        C: CatalogSource,
        S::Error: std::fmt::Display,
        C::Error: std::fmt::Display,
    {
        let block = source
            .fetch()
            .map_err(|e| ExtractorError::Source(e.to_string()))?;
        let entries = catalog
            .catalog()
            .map_err(|e| ExtractorError::Catalog(e.to_string()))?;
        self.extract(&block, &entries)
    }

    /// Segment a block and parse every fragment
    ///
    /// Returns the candidates with their fragment position, the fragments
    /// that could not be parsed, and the total fragment count.
    pub fn segment_candidates(
        &self,
        block: &RawTextBlock,
    ) -> (Vec<(usize, CandidateItem)>, Vec<SkippedFragment>, usize) {
        let fragments = TextSegmenter::new(block.source_type).segment(&block.text);
        debug!("Split text into {} fragments", fragments.len());

        let mut candidates = Vec::new();
        let mut skipped = Vec::new();
        for (position, fragment) in fragments.iter().enumerate() {
            match parse_fragment(fragment, block.source_type, self.config.default_action) {
                Ok(candidate) => candidates.push((position, candidate)),
                Err(reason) => {
                    warn!("Skipping fragment {} '{}': {}", position, fragment, reason);
                    skipped.push(SkippedFragment {
                        position,
                        fragment: fragment.clone(),
                        reason,
                    });
                }
            }
        }
        (candidates, skipped, fragments.len())
    }

    /// Normalize and match one candidate
    ///
    /// A matched catalog entry fills in what the text left out: unit (when
    /// no unit word was given), price and location. Its name replaces the
    /// written one only on an exact match.
    pub fn resolve(
        &self,
        candidate: &CandidateItem,
        catalog: &[ProductCatalogEntry],
    ) -> Result<ResolvedItem, ParseError> {
        let matched = self.matcher.match_name(&candidate.product_raw, catalog);
        let entry = matched.entry;

        let normalized = self.normalizer.normalize(
            &candidate.quantity_raw,
            candidate.unit_raw.as_deref(),
            &candidate.product_raw,
        )?;

        let unit = match entry {
            Some(e) if normalized.unit_source != UnitSource::Explicit => e.unit,
            _ => normalized.unit,
        };

        let catalog_price = entry.and_then(|e| e.price);
        let price = match candidate.price_raw.as_deref() {
            Some(raw) => match self.normalizer.parse_number(raw) {
                Ok(parsed) => Some(parsed.value),
                Err(e) => {
                    warn!("Ignoring unreadable price: {}", e);
                    catalog_price
                }
            },
            None => catalog_price,
        };

        let location = candidate
            .location_raw
            .clone()
            .or_else(|| entry.and_then(|e| e.location.clone()));

        // partial matches keep the wording of the text
        let product_name = match entry {
            Some(e) if matched.confidence >= 1.0 => e.name.clone(),
            _ => candidate.product_raw.clone(),
        };

        let confidence = combine_confidence(matched.confidence, normalized.exact);

        Ok(ResolvedItem::new(
            entry.map(|e| e.id.clone()),
            product_name,
            normalized.quantity,
            unit,
            confidence,
            candidate.raw_fragment.clone(),
            self.threshold,
        )
        .with_price(price)
        .with_location(location)
        .with_action(candidate.action))
    }
}

impl Default for Extractor {
    fn default() -> Self {
        let config = ExtractorConfig::default();
        Self {
            threshold: config.threshold(),
            normalizer: Normalizer::new(config.decimal_comma_ceiling),
            matcher: ProductMatcher::new(config.token_overlap_min),
            config,
        }
    }
}

fn unix_now() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_secs())
        .unwrap_or(0)
}

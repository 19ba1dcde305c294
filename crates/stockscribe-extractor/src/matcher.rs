//! Product matching against a catalog snapshot

use crate::config::DEFAULT_TOKEN_OVERLAP_MIN;
use crate::text::fold_words;
use std::collections::HashSet;
use stockscribe_domain::ProductCatalogEntry;

/// Confidence of an exact (folded) name match
pub const EXACT_MATCH_CONFIDENCE: f64 = 1.0;

/// Confidence of a whole-word containment match
pub const CONTAINMENT_CONFIDENCE: f64 = 0.8;

/// Outcome of matching one name against the catalog
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MatchResult<'a> {
    /// Best catalog entry, if any cleared the bar
    pub entry: Option<&'a ProductCatalogEntry>,
    /// Confidence of that entry, 0.0 when there is none
    pub confidence: f64,
}

impl<'a> MatchResult<'a> {
    /// The no-match result
    pub fn none() -> Self {
        Self {
            entry: None,
            confidence: 0.0,
        }
    }
}

/// Fuzzy product matcher
///
/// Policy, in order: exact folded equality (1.0), whole-word containment in
/// either direction (0.8), shared-word ratio strictly above
/// `token_overlap_min` (the ratio itself), otherwise no match. The best
/// score wins; on a tie the entry earliest in catalog order wins.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ProductMatcher {
    token_overlap_min: f64,
}

impl ProductMatcher {
    /// Create a matcher with the given minimum overlap ratio
    pub fn new(token_overlap_min: f64) -> Self {
        Self { token_overlap_min }
    }

    /// Match a free-text product name against the catalog
    pub fn match_name<'a>(
        &self,
        name_raw: &str,
        catalog: &'a [ProductCatalogEntry],
    ) -> MatchResult<'a> {
        let query = fold_words(name_raw);
        if query.is_empty() {
            return MatchResult::none();
        }
        let query_words: HashSet<&str> = query.split(' ').collect();

        let mut best = MatchResult::none();
        for entry in catalog {
            let candidate = fold_words(&entry.name);
            if candidate.is_empty() {
                continue;
            }
            let score = self.score(&query, &query_words, &candidate);
            if score > best.confidence {
                best = MatchResult {
                    entry: Some(entry),
                    confidence: score,
                };
                if score >= EXACT_MATCH_CONFIDENCE {
                    break;
                }
            }
        }
        best
    }

    fn score(&self, query: &str, query_words: &HashSet<&str>, candidate: &str) -> f64 {
        if query == candidate {
            return EXACT_MATCH_CONFIDENCE;
        }
        if contains_words(candidate, query) || contains_words(query, candidate) {
            return CONTAINMENT_CONFIDENCE;
        }

        let candidate_words: HashSet<&str> = candidate.split(' ').collect();
        let shared = query_words.intersection(&candidate_words).count();
        let ratio = shared as f64 / query_words.len().max(candidate_words.len()) as f64;
        if shared > 0 && ratio > self.token_overlap_min {
            ratio
        } else {
            0.0
        }
    }
}

impl Default for ProductMatcher {
    fn default() -> Self {
        Self::new(DEFAULT_TOKEN_OVERLAP_MIN)
    }
}

/// Match with the default overlap threshold
pub fn match_product<'a>(name_raw: &str, catalog: &'a [ProductCatalogEntry]) -> MatchResult<'a> {
    ProductMatcher::default().match_name(name_raw, catalog)
}

/// Whether `needle`'s words appear as a contiguous run inside `haystack`
///
/// Both sides are folded, single-space separated strings.
fn contains_words(haystack: &str, needle: &str) -> bool {
    format!(" {} ", haystack).contains(&format!(" {} ", needle))
}

//! Segmentation of raw text into line-like fragments

use crate::fragment::quantity_token;
use crate::keywords;
use crate::text::{fold, trim_punct};
use stockscribe_domain::SourceType;

/// Splits a text block into fragments, one candidate line item each
pub struct TextSegmenter {
    source_type: SourceType,
}

impl TextSegmenter {
    /// Create a segmenter for the given kind of source
    pub fn new(source_type: SourceType) -> Self {
        Self { source_type }
    }

    /// Segment the given text, preserving document/utterance order
    pub fn segment(&self, text: &str) -> Vec<String> {
        match self.source_type {
            SourceType::Invoice => self.segment_invoice(text),
            SourceType::Voice => self.segment_voice(text),
        }
    }

    /// Invoices: one fragment per OCR row
    fn segment_invoice(&self, text: &str) -> Vec<String> {
        text.lines()
            .flat_map(split_rows)
            .filter(|row| row.chars().any(char::is_alphanumeric))
            .collect()
    }

    /// Voice: a fragment opens at each action verb, or at a second quantity
    ///
    /// "add 5 vodka and 3 gin to the bar" gives "add 5 vodka" and
    /// "3 gin to the bar". A number right after a location word
    /// ("shelf 3") stays in the current fragment.
    fn segment_voice(&self, text: &str) -> Vec<String> {
        let mut fragments = Vec::new();
        let mut current: Vec<&str> = Vec::new();
        let mut has_quantity = false;
        let mut has_product_after_quantity = false;
        let mut prev_folded = String::new();

        for word in text.split_whitespace() {
            let folded = fold(trim_punct(word));
            let is_action = keywords::action_word(&folded).is_some();
            let is_quantity = quantity_token(word).is_some();

            let prev_blocks_split = keywords::is_location_preposition(&prev_folded)
                || keywords::is_location_marker(&prev_folded)
                || keywords::action_word(&prev_folded).is_some();

            let starts_new = (is_action && has_content(&current))
                || (is_quantity && has_quantity && has_product_after_quantity && !prev_blocks_split);

            if starts_new {
                push_fragment(&mut fragments, &current);
                current.clear();
                has_quantity = false;
                has_product_after_quantity = false;
            }

            current.push(word);
            if is_quantity {
                has_quantity = true;
            } else if has_quantity && !is_action && !keywords::is_connective(&folded) {
                has_product_after_quantity = true;
            }

            if ends_sentence(word) {
                push_fragment(&mut fragments, &current);
                current.clear();
                has_quantity = false;
                has_product_after_quantity = false;
                prev_folded.clear();
                continue;
            }
            prev_folded = folded;
        }
        push_fragment(&mut fragments, &current);

        fragments
    }
}

/// Split one OCR line on `|`
///
/// When every piece holds both a letter and a digit the pipes mark row
/// boundaries; otherwise they are column separators and the cells are
/// joined back into a single row.
fn split_rows(line: &str) -> Vec<String> {
    let pieces: Vec<&str> = line
        .split('|')
        .map(str::trim)
        .filter(|p| !p.is_empty())
        .collect();
    let is_row = |p: &&str| {
        p.chars().any(char::is_alphabetic) && p.chars().any(|c| c.is_ascii_digit())
    };
    if pieces.len() > 1 && pieces.iter().all(is_row) {
        pieces.into_iter().map(String::from).collect()
    } else {
        vec![pieces.join(" ")]
    }
}

fn has_content(words: &[&str]) -> bool {
    words
        .iter()
        .any(|w| !keywords::is_connective(&fold(trim_punct(w))) && !trim_punct(w).is_empty())
}

/// Sentence punctuation closes a spoken fragment, unless it ends an abbreviation
fn ends_sentence(word: &str) -> bool {
    let Some(last) = word.chars().last() else {
        return false;
    };
    match last {
        '!' | '?' | ';' | '。' => true,
        '.' => {
            keywords::unit_word(&fold(trim_punct(word))).is_none()
        }
        _ => false,
    }
}

/// Trim connectives off both ends and push the fragment if anything remains
fn push_fragment(fragments: &mut Vec<String>, words: &[&str]) {
    let is_edge_noise = |w: &&str| {
        let trimmed = trim_punct(w);
        trimmed.is_empty() || keywords::is_connective(&fold(trimmed))
    };
    let start = words.iter().position(|w| !is_edge_noise(w));
    let end = words.iter().rposition(|w| !is_edge_noise(w));

    if let (Some(start), Some(end)) = (start, end) {
        let text = words[start..=end].join(" ");
        let text = text.trim_end_matches([',', '.', ';', '!', '?', '。']).trim();
        if !text.is_empty() {
            fragments.push(text.to_string());
        }
    }
}

//! Text folding shared by the unit tables, segmenter and matcher

use unicode_normalization::char::is_combining_mark;
use unicode_normalization::UnicodeNormalization;

/// Currency markers stripped before numeric parsing
pub(crate) const CURRENCY_MARKS: [&str; 6] = ["¥", "￥", "€", "$", "£", "円"];

/// Map full-width digits and separators (common in Japanese OCR) to ASCII
pub fn fold_width(s: &str) -> String {
    s.chars()
        .map(|c| match c {
            '０'..='９' => char::from_u32(c as u32 - '０' as u32 + '0' as u32).unwrap_or(c),
            '，' => ',',
            '．' => '.',
            '：' => ':',
            '\u{00A0}' | '\u{202F}' | '\u{3000}' => ' ',
            _ => c,
        })
        .collect()
}

/// Lowercase, strip diacritics and collapse whitespace
///
/// "  Rosé  d'Anjou " becomes "rose d'anjou".
pub fn fold(s: &str) -> String {
    let stripped: String = fold_width(s)
        .nfd()
        .filter(|c| !is_combining_mark(*c))
        .collect::<String>()
        .to_lowercase();
    collapse_whitespace(&stripped)
}

/// Fold and replace every non-alphanumeric character with a space
///
/// Used for name comparison, where "Grey-Goose" and "grey goose" are equal.
pub fn fold_words(s: &str) -> String {
    let folded: String = fold(s)
        .chars()
        .map(|c| if c.is_alphanumeric() { c } else { ' ' })
        .collect();
    collapse_whitespace(&folded)
}

/// Join whitespace-separated words with single spaces
pub fn collapse_whitespace(s: &str) -> String {
    s.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Strip punctuation from both ends of a word, keeping inner apostrophes
pub fn trim_punct(word: &str) -> &str {
    word.trim_matches(|c: char| {
        !c.is_alphanumeric() && !CURRENCY_MARKS.iter().any(|m| m.starts_with(c))
    })
}

/// Remove a French elided article ("d'", "l'") from the start of a word
pub fn strip_elision(word: &str) -> &str {
    for prefix in ["d'", "l'", "d’", "l’", "D'", "L'", "D’", "L’"] {
        if let Some(rest) = word.strip_prefix(prefix) {
            if !rest.is_empty() {
                return rest;
            }
        }
    }
    word
}

//! Unit and quantity normalization
//!
//! Turns quantity, price and unit tokens as they come out of a transcript or
//! an OCR'd invoice into canonical numbers and [`Unit`]s.
//!
//! # Separator policy
//!
//! Invoices mix European (`12,50`) and grouped-thousands (`14,995`)
//! notation. The rules, in order:
//!
//! 1. Both `,` and `.` present: whichever comes last is the decimal point.
//! 2. Only dots: one dot is a decimal point; several dots are grouping.
//! 3. One comma followed by exactly three digits (`14,995`): grouping.
//! 4. One comma followed by one or two digits (`12,5`, `2,50`): decimal
//!    when the decimal reading stays under `decimal_comma_ceiling`,
//!    grouping otherwise. The result is flagged inexact.
//! 5. Several commas: grouping.

use crate::error::ParseError;
use crate::keywords;
use crate::text::{fold, fold_width, trim_punct, CURRENCY_MARKS};
use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};
use stockscribe_domain::Unit;

use crate::config::DEFAULT_DECIMAL_COMMA_CEILING;

static NUMBER_TOKEN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"[0-9][0-9.,]*").expect("number token regex is valid"));

/// A number read from text
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ParsedNumber {
    /// The value
    pub value: f64,
    /// False when the separator reading was a heuristic guess
    pub exact: bool,
}

/// How the unit of a normalized quantity was decided
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum UnitSource {
    /// A recognized unit word was present
    Explicit,
    /// Inferred from the product name's category
    Category,
    /// Nothing matched; fell back to pieces
    Fallback,
}

/// Output of [`Normalizer::normalize`]
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct NormalizedQuantity {
    /// Non-negative quantity
    pub quantity: f64,
    /// Canonical unit
    pub unit: Unit,
    /// Where the unit came from
    pub unit_source: UnitSource,
    /// False when the quantity relied on the decimal-comma heuristic
    pub exact: bool,
}

/// Stateless quantity, price and unit normalizer
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Normalizer {
    decimal_comma_ceiling: f64,
}

impl Normalizer {
    /// Create a normalizer with the given decimal-comma ceiling
    pub fn new(decimal_comma_ceiling: f64) -> Self {
        Self {
            decimal_comma_ceiling,
        }
    }

    /// Normalize a quantity token and an optional unit word
    ///
    /// When `unit_raw` is missing or unrecognized the unit is inferred from
    /// `product_name_hint` through the category keyword tables.
    pub fn normalize(
        &self,
        quantity_raw: &str,
        unit_raw: Option<&str>,
        product_name_hint: &str,
    ) -> Result<NormalizedQuantity, ParseError> {
        let parsed = self.parse_quantity(quantity_raw)?;

        let (unit, unit_source) = match unit_raw.and_then(lookup_unit) {
            Some(unit) => (unit, UnitSource::Explicit),
            None => match infer_unit(product_name_hint) {
                Some(unit) => (unit, UnitSource::Category),
                None => (Unit::Piece, UnitSource::Fallback),
            },
        };

        Ok(NormalizedQuantity {
            quantity: parsed.value,
            unit,
            unit_source,
            exact: parsed.exact,
        })
    }

    /// Parse a quantity: digits first, then spoken number words
    pub fn parse_quantity(&self, raw: &str) -> Result<ParsedNumber, ParseError> {
        match self.parse_number(raw) {
            Ok(parsed) => Ok(parsed),
            Err(err) => fold(raw)
                .split_whitespace()
                .map(trim_punct)
                .find_map(keywords::number_word)
                .map(|value| ParsedNumber { value, exact: true })
                .ok_or(err),
        }
    }

    /// Parse a numeric or currency string such as `¥2,500`, `12,50 €` or `14,995`
    pub fn parse_number(&self, raw: &str) -> Result<ParsedNumber, ParseError> {
        let mut cleaned = fold_width(raw);
        for mark in CURRENCY_MARKS {
            cleaned = cleaned.replace(mark, " ");
        }

        let token = NUMBER_TOKEN
            .find(&cleaned)
            .map(|m| m.as_str().trim_end_matches(['.', ',']))
            .ok_or_else(|| ParseError::new(raw, "no numeric token"))?;

        interpret_separators(token, self.decimal_comma_ceiling)
            .ok_or_else(|| ParseError::new(raw, format!("malformed number '{}'", token)))
    }
}

impl Default for Normalizer {
    fn default() -> Self {
        Self::new(DEFAULT_DECIMAL_COMMA_CEILING)
    }
}

/// Normalize with the default decimal-comma ceiling
pub fn normalize(
    quantity_raw: &str,
    unit_raw: Option<&str>,
    product_name_hint: &str,
) -> Result<NormalizedQuantity, ParseError> {
    Normalizer::default().normalize(quantity_raw, unit_raw, product_name_hint)
}

/// Map a unit word in any supported language to a [`Unit`]
pub fn lookup_unit(raw: &str) -> Option<Unit> {
    let folded = fold(raw);
    let word = trim_punct(&folded);
    if word.is_empty() {
        return None;
    }
    keywords::unit_word(word)
        .or_else(|| Unit::parse(word))
        .or_else(|| word.split_whitespace().map(trim_punct).find_map(keywords::unit_word))
}

/// Infer a unit from a product name via the category keyword tables
pub fn infer_unit(product_name: &str) -> Option<Unit> {
    keywords::category_unit(&fold(product_name)).map(|(unit, category)| {
        tracing::trace!(category, unit = %unit, "inferred unit from product name");
        unit
    })
}

fn interpret_separators(token: &str, ceiling: f64) -> Option<ParsedNumber> {
    let commas = token.matches(',').count();
    let dots = token.matches('.').count();

    let exact = |value: f64| Some(ParsedNumber { value, exact: true });

    match (commas, dots) {
        (0, 0) | (0, 1) => exact(token.parse().ok()?),
        (0, _) => exact(token.replace('.', "").parse().ok()?),
        (1, 0) => {
            let (int_part, frac_part) = token.split_once(',')?;
            match frac_part.len() {
                3 => exact(format!("{}{}", int_part, frac_part).parse().ok()?),
                1 | 2 => {
                    let decimal: f64 = format!("{}.{}", int_part, frac_part).parse().ok()?;
                    let value = if decimal < ceiling {
                        decimal
                    } else {
                        format!("{}{}", int_part, frac_part).parse().ok()?
                    };
                    Some(ParsedNumber { value, exact: false })
                }
                _ => Some(ParsedNumber {
                    value: token.replace(',', "").parse().ok()?,
                    exact: false,
                }),
            }
        }
        (_, 0) => exact(token.replace(',', "").parse().ok()?),
        _ => {
            let last_comma = token.rfind(',')?;
            let last_dot = token.rfind('.')?;
            let normalized = if last_comma > last_dot {
                // 1.234,56
                token.replace('.', "").replace(',', ".")
            } else {
                // 1,234.56
                token.replace(',', "")
            };
            exact(normalized.parse().ok()?)
        }
    }
}


#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;

    proptest! {
        /// Same inputs, same output
        #[test]
        fn test_normalize_is_idempotent(q in "[0-9]{1,6}([.,][0-9]{1,3})?", hint in "[a-z ]{0,20}") {
            let first = normalize(&q, None, &hint);
            let second = normalize(&q, None, &hint);
            prop_assert_eq!(first, second);
        }

        /// Plain integers always parse to themselves
        #[test]
        fn test_integers_roundtrip(v in 0u32..1_000_000) {
            let parsed = Normalizer::default().parse_number(&v.to_string()).unwrap();
            prop_assert_eq!(parsed.value, v as f64);
            prop_assert!(parsed.exact);
        }

        /// Parsed quantities are never negative
        #[test]
        fn test_quantities_non_negative(s in "\\PC{0,12}") {
            if let Ok(parsed) = Normalizer::default().parse_quantity(&s) {
                prop_assert!(parsed.value >= 0.0);
            }
        }
    }
}

//! Parse one segmented fragment into a candidate item

use crate::keywords;
use crate::text::{collapse_whitespace, fold, fold_width, strip_elision, trim_punct, CURRENCY_MARKS};
use once_cell::sync::Lazy;
use regex::Regex;
use stockscribe_domain::{Action, CandidateItem, SourceType};

static QTY_LABEL: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)(?:quantit[eé]|quantity|qty|qt[eé]|数量)\s*[:：]?\s*([0-9][0-9.,]*)")
        .expect("quantity label regex is valid")
});

static PRICE_LABEL: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r"(?i)(?:prix\s+unitaire|prix\s+unit\.?|unit\s+price|prix|price|単価|価格)\s*[:：]?\s*((?:[¥€$£]\s*)?[0-9][0-9.,]*(?:\s*(?:[¥€$£]|円))?)",
    )
    .expect("price label regex is valid")
});

static UNIT_LABEL: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)(?:unit[eé]|unit|単位)\s*[:：]\s*(\S+)").expect("unit label regex is valid")
});

static PRODUCT_LABEL: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)(?:produit|product|article|d[eé]signation|description|品名|商品名|商品)\s*[:：]\s*")
        .expect("product label regex is valid")
});

static ROW_NUMBER: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^\s*\d+[.)]\s+").expect("row number regex is valid"));

static ATTACHED_SUFFIX: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^([0-9][0-9.,]*)([^0-9.,]+)$").expect("suffix regex is valid"));

/// A word that reads as a quantity
#[derive(Debug, Clone, PartialEq)]
pub(crate) struct QuantityToken {
    /// The number part as written ("5", "2,5", "cinq")
    pub number: String,
    /// A unit glued to the number ("5kg", "20本")
    pub unit: Option<String>,
}

/// Classify a word as a quantity
///
/// Bare numbers, numbers with a unit suffix and spoken numbers qualify.
/// "70cl", "SKU12345" and "7up" do not.
pub(crate) fn quantity_token(word: &str) -> Option<QuantityToken> {
    let widened = fold_width(word);
    let token = trim_punct(&widened);
    if token.is_empty() {
        return None;
    }

    let numeric = |c: char| c.is_ascii_digit() || c == '.' || c == ',';
    if token.starts_with(|c: char| c.is_ascii_digit()) && token.chars().all(numeric) {
        return Some(QuantityToken {
            number: token.to_string(),
            unit: None,
        });
    }

    if let Some(caps) = ATTACHED_SUFFIX.captures(token) {
        let suffix = &caps[2];
        let folded = fold(suffix);
        if folded == "x" || folded == "×" {
            return Some(QuantityToken {
                number: caps[1].to_string(),
                unit: None,
            });
        }
        return keywords::unit_word(&folded).map(|_| QuantityToken {
            number: caps[1].to_string(),
            unit: Some(suffix.to_string()),
        });
    }

    keywords::number_word(&fold(token)).map(|_| QuantityToken {
        number: token.to_string(),
        unit: None,
    })
}

/// Parse a fragment into a candidate, or say why it cannot be one
pub fn parse_fragment(
    fragment: &str,
    source_type: SourceType,
    default_action: Action,
) -> Result<CandidateItem, String> {
    match source_type {
        SourceType::Invoice => parse_invoice_row(fragment, default_action),
        SourceType::Voice => parse_words(fragment, fragment, source_type, default_action),
    }
}

fn parse_invoice_row(fragment: &str, default_action: Action) -> Result<CandidateItem, String> {
    let widened = fold_width(fragment);
    let line = ROW_NUMBER.replace(&widened, "");

    if keywords::is_invoice_noise(&fold(&line)) {
        return Err("header or total line".to_string());
    }

    match QTY_LABEL.captures(&line) {
        Some(caps) => parse_labelled(fragment, &line, &caps, default_action),
        None => parse_words(fragment, &line, SourceType::Invoice, default_action),
    }
}

/// Rows such as `Vodka Grey Goose ... Quantité: 20 ... Prix unitaire: 2500 ¥`
fn parse_labelled(
    fragment: &str,
    line: &str,
    qty: &regex::Captures<'_>,
    action: Action,
) -> Result<CandidateItem, String> {
    let qty_match = qty.get(0).ok_or("quantity label without match")?;
    let quantity_raw = qty[1].trim_end_matches(['.', ',']).to_string();

    let price = PRICE_LABEL.captures(line);
    let unit_label = UNIT_LABEL.captures(line);

    let unit_raw = match &unit_label {
        Some(caps) => Some(trim_punct(&caps[1]).to_string()),
        None => line[qty_match.end()..]
            .split_whitespace()
            .next()
            .map(trim_punct)
            .filter(|w| keywords::unit_word(&fold(w)).is_some())
            .map(String::from),
    };

    let label_starts = [
        Some(qty_match.start()),
        price.as_ref().and_then(|c| c.get(0)).map(|m| m.start()),
        unit_label.as_ref().and_then(|c| c.get(0)).map(|m| m.start()),
    ];

    let product_span = match PRODUCT_LABEL.find(line) {
        Some(label) => {
            let end = label_starts
                .iter()
                .flatten()
                .copied()
                .filter(|start| *start >= label.end())
                .min()
                .unwrap_or(line.len());
            &line[label.end()..end]
        }
        None => {
            let end = label_starts.iter().flatten().copied().min().unwrap_or(0);
            &line[..end]
        }
    };

    let product_raw = clean_product(product_span.split_whitespace());
    if product_raw.is_empty() {
        return Err("no product name".to_string());
    }

    Ok(CandidateItem {
        raw_fragment: fragment.to_string(),
        action,
        quantity_raw,
        product_raw,
        unit_raw,
        location_raw: None,
        price_raw: price.map(|c| c[1].trim().to_string()),
    })
}

/// Free-form parse: `[action] [words] quantity [unit] product [price] [prep location]`
fn parse_words(
    fragment: &str,
    text: &str,
    source_type: SourceType,
    default_action: Action,
) -> Result<CandidateItem, String> {
    let words: Vec<&str> = text.split_whitespace().collect();
    let folded: Vec<String> = words.iter().map(|w| fold(trim_punct(w))).collect();

    let mut i = 0;
    while i < words.len() && keywords::is_connective(&folded[i]) {
        i += 1;
    }

    let action = match folded.get(i).and_then(|w| keywords::action_word(w)) {
        Some(action) => {
            i += 1;
            action
        }
        None => default_action,
    };

    let (q, token) = words
        .iter()
        .enumerate()
        .skip(i)
        .find_map(|(idx, w)| quantity_token(w).map(|t| (idx, t)))
        .ok_or("no numeric quantity")?;

    let mut unit_raw = token.unit;
    let mut j = q + 1;
    if unit_raw.is_none() && j < words.len() && keywords::unit_word(&folded[j]).is_some() {
        unit_raw = Some(trim_punct(words[j]).to_string());
        j += 1;
    }

    let mut product_words: Vec<&str> = words[i..q].to_vec();
    let mut price_raw = None;
    let mut location_raw = None;

    while j < words.len() {
        let word = words[j];
        if keywords::is_location_preposition(&folded[j]) && j + 1 < words.len() {
            // "from the bar to the cellar" resolves to the destination
            let at = if keywords::is_source_preposition(&folded[j]) {
                (j + 1..words.len() - 1)
                    .find(|&k| {
                        keywords::is_location_preposition(&folded[k])
                            && !keywords::is_source_preposition(&folded[k])
                    })
                    .unwrap_or(j)
            } else {
                j
            };
            let end = if at == j {
                (j + 1..words.len())
                    .find(|&k| keywords::is_location_preposition(&folded[k]))
                    .unwrap_or(words.len())
            } else {
                words.len()
            };
            location_raw = location_phrase(&words[at + 1..end], &folded[at + 1..end]);
            break;
        }
        let priced = CURRENCY_MARKS.iter().any(|m| word.contains(m))
            || (source_type == SourceType::Invoice && quantity_token(word).is_some());
        if priced {
            let mut price = word.to_string();
            if let Some(next) = words.get(j + 1) {
                if CURRENCY_MARKS.contains(next) {
                    price.push(' ');
                    price.push_str(next);
                }
            }
            price_raw = Some(price);
            break;
        }
        product_words.push(word);
        j += 1;
    }

    let product_raw = clean_product(product_words.into_iter());
    if product_raw.is_empty() {
        return Err("no product name".to_string());
    }

    Ok(CandidateItem {
        raw_fragment: fragment.to_string(),
        action,
        quantity_raw: token.number,
        product_raw,
        unit_raw,
        location_raw,
        price_raw,
    })
}

/// The location after a preposition, without leading marker words
///
/// A bare number keeps its marker: "shelf 3" stays "shelf 3", while
/// "inventory location A3" becomes "A3".
fn location_phrase(words: &[&str], folded: &[String]) -> Option<String> {
    let start = folded
        .iter()
        .position(|w| !keywords::is_location_marker(w))
        .unwrap_or(words.len().saturating_sub(1));
    let start = match words.get(start) {
        Some(w) if start > 0 && trim_punct(w).chars().all(|c| c.is_ascii_digit()) => start - 1,
        _ => start,
    };

    let phrase = words[start..]
        .iter()
        .map(|w| trim_punct(w))
        .filter(|w| !w.is_empty())
        .collect::<Vec<_>>()
        .join(" ");
    (!phrase.is_empty()).then_some(phrase)
}

/// Strip separators, leading filler and elided articles from a product name
fn clean_product<'a>(words: impl Iterator<Item = &'a str>) -> String {
    let cleaned: Vec<&str> = words
        .flat_map(|w| w.split(['…']))
        .flat_map(|w| w.split("..."))
        .map(trim_punct)
        .filter(|w| !w.is_empty())
        .skip_while(|w| keywords::is_product_filler(&fold(w)))
        .map(strip_elision)
        .collect();
    collapse_whitespace(&cleaned.join(" "))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn voice(text: &str) -> CandidateItem {
        parse_fragment(text, SourceType::Voice, Action::Add).unwrap()
    }

    fn invoice(text: &str) -> CandidateItem {
        parse_fragment(text, SourceType::Invoice, Action::Add).unwrap()
    }

    #[test]
    fn test_quantity_tokens() {
        assert_eq!(quantity_token("5").map(|t| t.number), Some("5".to_string()));
        assert_eq!(quantity_token("2,5,").map(|t| t.number), Some("2,5".to_string()));
        assert_eq!(
            quantity_token("20本"),
            Some(QuantityToken { number: "20".into(), unit: Some("本".into()) })
        );
        assert_eq!(quantity_token("5kg").and_then(|t| t.unit), Some("kg".to_string()));
        assert_eq!(quantity_token("24x").map(|t| t.number), Some("24".to_string()));
        assert!(quantity_token("cinq").is_some());
        assert!(quantity_token("70cl").is_none());
        assert!(quantity_token("SKU12345").is_none());
        assert!(quantity_token("7up").is_none());
        assert!(quantity_token("¥2,500").is_none());
    }

    #[test]
    fn test_voice_full_instruction() {
        let item = voice("add 5 units of product SKU12345 to inventory location A3");
        assert_eq!(item.action, Action::Add);
        assert_eq!(item.quantity_raw, "5");
        assert_eq!(item.unit_raw.as_deref(), Some("units"));
        assert_eq!(item.product_raw, "SKU12345");
        assert_eq!(item.location_raw.as_deref(), Some("A3"));
        assert_eq!(item.price_raw, None);
    }

    #[test]
    fn test_voice_french_with_elision() {
        let item = voice("retire trois bouteilles d'Armagnac");
        assert_eq!(item.action, Action::Remove);
        assert_eq!(item.quantity_raw, "trois");
        assert_eq!(item.unit_raw.as_deref(), Some("bouteilles"));
        assert_eq!(item.product_raw, "Armagnac");
    }

    #[test]
    fn test_voice_french_location() {
        let item = voice("ajoute 6 bouteilles de vin rouge au bar");
        assert_eq!(item.product_raw, "vin rouge");
        assert_eq!(item.location_raw.as_deref(), Some("bar"));
    }

    #[test]
    fn test_location_keeps_marker_before_number() {
        let item = voice("move 4 rum to shelf 3");
        assert_eq!(item.action, Action::Move);
        assert_eq!(item.location_raw.as_deref(), Some("shelf 3"));
    }

    #[test]
    fn test_removal_from_location() {
        let item = voice("remove 2 wine from the bar");
        assert_eq!(item.action, Action::Remove);
        assert_eq!(item.product_raw, "wine");
        assert_eq!(item.location_raw.as_deref(), Some("bar"));

        let item = voice("retire 2 vin depuis la réserve");
        assert_eq!(item.action, Action::Remove);
        assert_eq!(item.product_raw, "vin");
        assert_eq!(item.location_raw.as_deref(), Some("réserve"));
    }

    #[test]
    fn test_move_resolves_to_destination() {
        let item = voice("move 3 gin from the bar to the cellar");
        assert_eq!(item.action, Action::Move);
        assert_eq!(item.product_raw, "gin");
        assert_eq!(item.location_raw.as_deref(), Some("cellar"));
    }

    #[test]
    fn test_default_action_applies() {
        let item = parse_fragment("3 gin", SourceType::Voice, Action::Remove).unwrap();
        assert_eq!(item.action, Action::Remove);
        assert_eq!(item.product_raw, "gin");
    }

    #[test]
    fn test_product_before_quantity() {
        let item = voice("vodka 12");
        assert_eq!(item.product_raw, "vodka");
        assert_eq!(item.quantity_raw, "12");
    }

    #[test]
    fn test_missing_quantity_is_rejected() {
        let err = parse_fragment("add some vodka", SourceType::Voice, Action::Add).unwrap_err();
        assert_eq!(err, "no numeric quantity");
    }

    #[test]
    fn test_missing_product_is_rejected() {
        let err = parse_fragment("add 5 bottles", SourceType::Voice, Action::Add).unwrap_err();
        assert_eq!(err, "no product name");
    }

    #[test]
    fn test_invoice_labelled_row() {
        let item = invoice("Vodka Grey Goose ... Quantité: 20 ... Prix unitaire: 2500 ¥");
        assert_eq!(item.product_raw, "Vodka Grey Goose");
        assert_eq!(item.quantity_raw, "20");
        assert_eq!(item.price_raw.as_deref(), Some("2500 ¥"));
        assert_eq!(item.action, Action::Add);
    }

    #[test]
    fn test_invoice_labelled_row_japanese() {
        let item = invoice("ウォッカ グレイグース ... 数量：２０本 ... 単価: ¥2,500");
        assert_eq!(item.product_raw, "ウォッカ グレイグース");
        assert_eq!(item.quantity_raw, "20");
        assert_eq!(item.unit_raw.as_deref(), Some("本"));
        assert_eq!(item.price_raw.as_deref(), Some("¥2,500"));
    }

    #[test]
    fn test_invoice_product_label() {
        let item = invoice("Produit: Gin Tanqueray Qty: 12 Unit: bottle Price: 21,50 €");
        assert_eq!(item.product_raw, "Gin Tanqueray");
        assert_eq!(item.quantity_raw, "12");
        assert_eq!(item.unit_raw.as_deref(), Some("bottle"));
        assert_eq!(item.price_raw.as_deref(), Some("21,50 €"));
    }

    #[test]
    fn test_invoice_plain_columns() {
        let item = invoice("3. Heineken 33cl 24 1,20 €");
        assert_eq!(item.product_raw, "Heineken 33cl");
        assert_eq!(item.quantity_raw, "24");
        assert_eq!(item.price_raw.as_deref(), Some("1,20 €"));
    }

    #[test]
    fn test_invoice_totals_are_rejected() {
        let err = parse_fragment("Total TTC 12 500 €", SourceType::Invoice, Action::Add).unwrap_err();
        assert_eq!(err, "header or total line");
    }
}

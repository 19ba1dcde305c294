//! Declarative keyword tables
//!
//! Every multilingual word list the pipeline consults lives here as data:
//! unit words, product-category hints for unit inference, action verbs,
//! spoken numbers and the small grammatical words the segmenter skips.
//! Adding a language means adding rows, not control flow.
//!
//! Tables are folded through [`crate::text::fold`] once, on first use, so
//! lookups compare folded input against folded keywords.

use crate::text::fold;
use once_cell::sync::Lazy;
use std::collections::HashMap;
use stockscribe_domain::{Action, Unit};

/// Keyword tokens for one language
pub struct LanguageTokens {
    /// Language tag
    pub language: &'static str,
    /// Tokens as written (folded at load time)
    pub tokens: &'static [&'static str],
}

/// A category of products that implies a unit when none was spoken
pub struct UnitCategory {
    /// Category name, for logs
    pub name: &'static str,
    /// Unit implied by the category
    pub unit: Unit,
    /// Keywords per language
    pub keywords: &'static [LanguageTokens],
}

/// Unit words as they appear after a quantity
pub static UNIT_WORDS: &[(Unit, &[LanguageTokens])] = &[
    (
        Unit::Bottle,
        &[
            LanguageTokens { language: "en", tokens: &["bottle", "bottles", "btl", "btls"] },
            LanguageTokens { language: "fr", tokens: &["bouteille", "bouteilles", "btle", "btles"] },
            LanguageTokens { language: "ja", tokens: &["本", "ボトル", "瓶"] },
        ],
    ),
    (
        Unit::Can,
        &[
            LanguageTokens { language: "en", tokens: &["can", "cans", "tin", "tins"] },
            LanguageTokens { language: "fr", tokens: &["canette", "canettes", "cannette", "cannettes"] },
            LanguageTokens { language: "ja", tokens: &["缶"] },
        ],
    ),
    (
        Unit::Box,
        &[
            LanguageTokens { language: "en", tokens: &["box", "boxes", "case", "cases", "carton", "cartons", "pack", "packs", "crate", "crates"] },
            LanguageTokens { language: "fr", tokens: &["boîte", "boîtes", "caisse", "caisses", "carton", "cartons", "paquet", "paquets", "colis"] },
            LanguageTokens { language: "ja", tokens: &["箱", "ケース", "パック"] },
        ],
    ),
    (
        Unit::Kg,
        &[
            LanguageTokens { language: "en", tokens: &["kg", "kgs", "kilo", "kilos", "kilogram", "kilograms"] },
            LanguageTokens { language: "fr", tokens: &["kilogramme", "kilogrammes"] },
            LanguageTokens { language: "ja", tokens: &["キロ", "キログラム"] },
        ],
    ),
    (
        Unit::G,
        &[
            LanguageTokens { language: "en", tokens: &["g", "gr", "gram", "grams"] },
            LanguageTokens { language: "fr", tokens: &["gramme", "grammes"] },
            LanguageTokens { language: "ja", tokens: &["グラム"] },
        ],
    ),
    (
        Unit::L,
        &[
            LanguageTokens { language: "en", tokens: &["l", "liter", "liters", "litre", "litres"] },
            LanguageTokens { language: "fr", tokens: &["litre", "litres"] },
            LanguageTokens { language: "ja", tokens: &["リットル"] },
        ],
    ),
    (
        Unit::Ml,
        &[
            LanguageTokens { language: "en", tokens: &["ml", "milliliter", "milliliters", "millilitre", "millilitres"] },
            LanguageTokens { language: "fr", tokens: &["millilitre", "millilitres"] },
            LanguageTokens { language: "ja", tokens: &["ミリリットル"] },
        ],
    ),
    (
        Unit::Piece,
        &[
            LanguageTokens { language: "en", tokens: &["piece", "pieces", "pc", "pcs", "unit", "units", "item", "items"] },
            LanguageTokens { language: "fr", tokens: &["pièce", "pièces", "unité", "unités"] },
            LanguageTokens { language: "ja", tokens: &["個", "点"] },
        ],
    ),
];

/// Product categories consulted, in order, when no unit word was given
pub static UNIT_CATEGORIES: &[UnitCategory] = &[
    UnitCategory {
        name: "spirits_and_wine",
        unit: Unit::Bottle,
        keywords: &[
            LanguageTokens {
                language: "en",
                tokens: &["wine", "vodka", "whisky", "whiskey", "gin", "rum", "tequila", "champagne", "cognac", "liqueur", "prosecco", "port", "sake", "bourbon", "brandy"],
            },
            LanguageTokens {
                language: "fr",
                tokens: &["vin", "rhum", "pastis", "armagnac", "calvados", "porto", "crémant", "rosé", "bordeaux", "bourgogne", "mousseux"],
            },
            LanguageTokens {
                language: "ja",
                tokens: &["ワイン", "ウォッカ", "ウイスキー", "ジン", "ラム", "テキーラ", "シャンパン", "日本酒", "焼酎", "酒"],
            },
        ],
    },
    UnitCategory {
        name: "beer_and_soda",
        unit: Unit::Can,
        keywords: &[
            LanguageTokens {
                language: "en",
                tokens: &["beer", "lager", "ale", "soda", "cola", "coke", "lemonade", "tonic", "sprite", "redbull"],
            },
            LanguageTokens {
                language: "fr",
                tokens: &["bière", "bières", "limonade", "soda", "coca"],
            },
            LanguageTokens {
                language: "ja",
                tokens: &["ビール", "コーラ", "ソーダ", "サイダー"],
            },
        ],
    },
    UnitCategory {
        name: "dry_goods",
        unit: Unit::Kg,
        keywords: &[
            LanguageTokens {
                language: "en",
                tokens: &["flour", "sugar", "rice", "pasta", "coffee", "salt", "beans", "lentils", "oats"],
            },
            LanguageTokens {
                language: "fr",
                tokens: &["farine", "sucre", "riz", "pâtes", "café", "sel", "lentilles", "haricots", "semoule"],
            },
            LanguageTokens {
                language: "ja",
                tokens: &["米", "小麦粉", "砂糖", "塩", "コーヒー豆", "パスタ"],
            },
        ],
    },
];

/// Verbs that open an instruction in a voice transcript
pub static ACTION_WORDS: &[(Action, &[LanguageTokens])] = &[
    (
        Action::Add,
        &[
            LanguageTokens { language: "en", tokens: &["add", "adds", "added", "plus", "received", "receive", "restock"] },
            LanguageTokens { language: "fr", tokens: &["ajouter", "ajoute", "ajoutez", "ajouté", "rajouter", "rajoute", "reçu", "recevoir"] },
            LanguageTokens { language: "ja", tokens: &["追加"] },
        ],
    ),
    (
        Action::Remove,
        &[
            LanguageTokens { language: "en", tokens: &["remove", "removes", "removed", "minus", "subtract", "take", "sold"] },
            LanguageTokens { language: "fr", tokens: &["retirer", "retire", "retirez", "enlever", "enlève", "enlevez", "supprimer", "supprime", "moins", "vendu"] },
            LanguageTokens { language: "ja", tokens: &["削除", "出庫"] },
        ],
    ),
    (
        Action::Move,
        &[
            LanguageTokens { language: "en", tokens: &["move", "moves", "moved", "transfer", "transfers"] },
            LanguageTokens { language: "fr", tokens: &["déplacer", "déplace", "déplacez", "transférer", "transfère"] },
            LanguageTokens { language: "ja", tokens: &["移動"] },
        ],
    ),
];

/// Spoken numbers accepted as quantities
pub static NUMBER_WORDS: &[(f64, &[LanguageTokens])] = &[
    (1.0, &[LanguageTokens { language: "en", tokens: &["one"] }, LanguageTokens { language: "fr", tokens: &["un", "une"] }]),
    (2.0, &[LanguageTokens { language: "en", tokens: &["two"] }, LanguageTokens { language: "fr", tokens: &["deux"] }]),
    (3.0, &[LanguageTokens { language: "en", tokens: &["three"] }, LanguageTokens { language: "fr", tokens: &["trois"] }]),
    (4.0, &[LanguageTokens { language: "en", tokens: &["four"] }, LanguageTokens { language: "fr", tokens: &["quatre"] }]),
    (5.0, &[LanguageTokens { language: "en", tokens: &["five"] }, LanguageTokens { language: "fr", tokens: &["cinq"] }]),
    (6.0, &[LanguageTokens { language: "en", tokens: &["six"] }, LanguageTokens { language: "fr", tokens: &["six"] }]),
    (7.0, &[LanguageTokens { language: "en", tokens: &["seven"] }, LanguageTokens { language: "fr", tokens: &["sept"] }]),
    (8.0, &[LanguageTokens { language: "en", tokens: &["eight"] }, LanguageTokens { language: "fr", tokens: &["huit"] }]),
    (9.0, &[LanguageTokens { language: "en", tokens: &["nine"] }, LanguageTokens { language: "fr", tokens: &["neuf"] }]),
    (10.0, &[LanguageTokens { language: "en", tokens: &["ten"] }, LanguageTokens { language: "fr", tokens: &["dix"] }]),
    (11.0, &[LanguageTokens { language: "en", tokens: &["eleven"] }, LanguageTokens { language: "fr", tokens: &["onze"] }]),
    (12.0, &[LanguageTokens { language: "en", tokens: &["twelve", "dozen"] }, LanguageTokens { language: "fr", tokens: &["douze", "douzaine"] }]),
    (13.0, &[LanguageTokens { language: "en", tokens: &["thirteen"] }, LanguageTokens { language: "fr", tokens: &["treize"] }]),
    (14.0, &[LanguageTokens { language: "en", tokens: &["fourteen"] }, LanguageTokens { language: "fr", tokens: &["quatorze"] }]),
    (15.0, &[LanguageTokens { language: "en", tokens: &["fifteen"] }, LanguageTokens { language: "fr", tokens: &["quinze"] }]),
    (16.0, &[LanguageTokens { language: "en", tokens: &["sixteen"] }, LanguageTokens { language: "fr", tokens: &["seize"] }]),
    (17.0, &[LanguageTokens { language: "en", tokens: &["seventeen"] }, LanguageTokens { language: "fr", tokens: &["dix-sept"] }]),
    (18.0, &[LanguageTokens { language: "en", tokens: &["eighteen"] }, LanguageTokens { language: "fr", tokens: &["dix-huit"] }]),
    (19.0, &[LanguageTokens { language: "en", tokens: &["nineteen"] }, LanguageTokens { language: "fr", tokens: &["dix-neuf"] }]),
    (20.0, &[LanguageTokens { language: "en", tokens: &["twenty"] }, LanguageTokens { language: "fr", tokens: &["vingt"] }]),
    (30.0, &[LanguageTokens { language: "en", tokens: &["thirty"] }, LanguageTokens { language: "fr", tokens: &["trente"] }]),
    (40.0, &[LanguageTokens { language: "en", tokens: &["forty"] }, LanguageTokens { language: "fr", tokens: &["quarante"] }]),
    (50.0, &[LanguageTokens { language: "en", tokens: &["fifty"] }, LanguageTokens { language: "fr", tokens: &["cinquante"] }]),
    (100.0, &[LanguageTokens { language: "en", tokens: &["hundred"] }, LanguageTokens { language: "fr", tokens: &["cent"] }]),
];

/// Prepositions that introduce a location phrase
pub static LOCATION_PREPOSITIONS: &[LanguageTokens] = &[
    LanguageTokens { language: "en", tokens: &["to", "in", "at", "into", "on"] },
    LanguageTokens { language: "fr", tokens: &["à", "dans", "au", "aux", "vers", "sur", "en"] },
];

/// Prepositions naming where stock comes from; a later destination wins
pub static SOURCE_PREPOSITIONS: &[LanguageTokens] = &[
    LanguageTokens { language: "en", tokens: &["from", "off"] },
    LanguageTokens { language: "fr", tokens: &["depuis"] },
];

/// Nouns that may follow a location preposition before the location itself
pub static LOCATION_MARKERS: &[LanguageTokens] = &[
    LanguageTokens { language: "en", tokens: &["the", "inventory", "location", "stock", "storage", "shelf", "zone", "area"] },
    LanguageTokens { language: "fr", tokens: &["le", "la", "les", "l'", "inventaire", "emplacement", "stock", "réserve", "étagère", "zone", "rayon"] },
];

/// Words dropped from the start of a product name
pub static PRODUCT_FILLERS: &[LanguageTokens] = &[
    LanguageTokens { language: "en", tokens: &["of", "the", "a", "an", "product", "products", "x", "more"] },
    LanguageTokens { language: "fr", tokens: &["de", "du", "des", "d'", "le", "la", "les", "produit", "produits", "x", "encore"] },
];

/// Words joining two spoken instructions, trimmed from fragment edges
pub static CONNECTIVES: &[LanguageTokens] = &[
    LanguageTokens { language: "en", tokens: &["and", "then", "also", "please"] },
    LanguageTokens { language: "fr", tokens: &["et", "puis", "ensuite", "aussi", "ainsi", "que", "stp"] },
];

/// Invoice lines starting with these are totals or headers, never items
pub static INVOICE_NOISE: &[LanguageTokens] = &[
    LanguageTokens { language: "en", tokens: &["total", "subtotal", "vat", "tax", "invoice", "date", "page", "balance", "shipping"] },
    LanguageTokens { language: "fr", tokens: &["total", "sous-total", "tva", "facture", "date", "page", "montant", "livraison", "remise"] },
    LanguageTokens { language: "ja", tokens: &["合計", "小計", "消費税", "請求書", "日付", "送料"] },
];

fn fold_all(tables: &[LanguageTokens]) -> Vec<String> {
    tables
        .iter()
        .flat_map(|t| t.tokens.iter().map(|tok| fold(tok)))
        .collect()
}

fn build_lookup<T: Copy>(rows: &[(T, &[LanguageTokens])]) -> HashMap<String, T> {
    let mut map = HashMap::new();
    for (value, tables) in rows {
        for token in fold_all(tables) {
            // First row wins, so table order decides shared tokens
            map.entry(token).or_insert(*value);
        }
    }
    map
}

static UNIT_LOOKUP: Lazy<HashMap<String, Unit>> = Lazy::new(|| build_lookup(UNIT_WORDS));
static ACTION_LOOKUP: Lazy<HashMap<String, Action>> = Lazy::new(|| build_lookup(ACTION_WORDS));
static NUMBER_LOOKUP: Lazy<HashMap<String, f64>> = Lazy::new(|| build_lookup(NUMBER_WORDS));
static CATEGORY_KEYWORDS: Lazy<Vec<(Unit, &'static str, Vec<String>)>> = Lazy::new(|| {
    UNIT_CATEGORIES
        .iter()
        .map(|c| (c.unit, c.name, fold_all(c.keywords)))
        .collect()
});
static PREPOSITIONS: Lazy<Vec<String>> = Lazy::new(|| fold_all(LOCATION_PREPOSITIONS));
static SOURCE_WORDS: Lazy<Vec<String>> = Lazy::new(|| fold_all(SOURCE_PREPOSITIONS));
static MARKERS: Lazy<Vec<String>> = Lazy::new(|| fold_all(LOCATION_MARKERS));
static FILLERS: Lazy<Vec<String>> = Lazy::new(|| fold_all(PRODUCT_FILLERS));
static CONNECTIVE_WORDS: Lazy<Vec<String>> = Lazy::new(|| fold_all(CONNECTIVES));
static NOISE: Lazy<Vec<String>> = Lazy::new(|| fold_all(INVOICE_NOISE));

/// Look up a unit word (input must already be folded)
pub fn unit_word(folded: &str) -> Option<Unit> {
    UNIT_LOOKUP.get(folded).copied()
}

/// Look up an action verb (input must already be folded)
pub fn action_word(folded: &str) -> Option<Action> {
    ACTION_LOOKUP.get(folded).copied()
}

/// Look up a spoken number (input must already be folded)
pub fn number_word(folded: &str) -> Option<f64> {
    NUMBER_LOOKUP.get(folded).copied()
}

/// Infer a unit from a folded product name, returning the category name too
///
/// ASCII keywords must match a whole word; other scripts (Japanese has no
/// spaces) match anywhere in the name.
pub fn category_unit(folded_name: &str) -> Option<(Unit, &'static str)> {
    let words: Vec<&str> = folded_name
        .split(|c: char| !c.is_alphanumeric())
        .filter(|w| !w.is_empty())
        .collect();
    CATEGORY_KEYWORDS.iter().find_map(|(unit, name, keywords)| {
        let hit = keywords.iter().any(|kw| {
            if kw.is_ascii() {
                words.iter().any(|w| w == kw)
            } else {
                folded_name.contains(kw.as_str())
            }
        });
        hit.then_some((*unit, *name))
    })
}

/// Whether a folded word introduces a location
pub fn is_location_preposition(folded: &str) -> bool {
    PREPOSITIONS.iter().any(|p| p == folded) || is_source_preposition(folded)
}

/// Whether a folded word introduces the place stock is taken from
pub fn is_source_preposition(folded: &str) -> bool {
    SOURCE_WORDS.iter().any(|p| p == folded)
}

/// Whether a folded word is a location marker noun or article
pub fn is_location_marker(folded: &str) -> bool {
    MARKERS.iter().any(|m| m == folded)
}

/// Whether a folded word is filler before a product name
pub fn is_product_filler(folded: &str) -> bool {
    FILLERS.iter().any(|f| f == folded)
}

/// Whether a folded word joins two instructions
pub fn is_connective(folded: &str) -> bool {
    CONNECTIVE_WORDS.iter().any(|c| c == folded)
}

/// Whether a folded invoice line opens with a header/total keyword
pub fn is_invoice_noise(folded_line: &str) -> bool {
    NOISE.iter().any(|n| {
        folded_line
            .strip_prefix(n.as_str())
            .map(|rest| rest.is_empty() || !rest.starts_with(|c: char| c.is_alphanumeric()) || !n.is_ascii())
            .unwrap_or(false)
    })
}

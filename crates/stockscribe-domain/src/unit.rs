//! Unit module - canonical units of measure for inventory lines

use serde::{Deserialize, Serialize};
use std::fmt;

/// Canonical unit of an inventory quantity
///
/// Free-text unit words ("bouteilles", "缶", "kilos") are mapped onto this
/// enum by the extractor's unit tables. Only the canonical lowercase names
/// are accepted by [`Unit::parse`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Unit {
    /// Bottles (wine, spirits)
    Bottle,

    /// Cans (beer, soda)
    Can,

    /// Boxes, cartons, cases
    Box,

    /// Kilograms
    Kg,

    /// Grams
    G,

    /// Litres
    L,

    /// Millilitres
    Ml,

    /// Individual pieces (fallback)
    Piece,
}

impl Unit {
    /// All units in declaration order
    pub const ALL: [Unit; 8] = [
        Unit::Bottle,
        Unit::Can,
        Unit::Box,
        Unit::Kg,
        Unit::G,
        Unit::L,
        Unit::Ml,
        Unit::Piece,
    ];

    /// Get the canonical unit name
    pub fn as_str(&self) -> &'static str {
        match self {
            Unit::Bottle => "bottle",
            Unit::Can => "can",
            Unit::Box => "box",
            Unit::Kg => "kg",
            Unit::G => "g",
            Unit::L => "l",
            Unit::Ml => "ml",
            Unit::Piece => "piece",
        }
    }

    /// Parse a canonical unit name (case-insensitive)
    pub fn parse(s: &str) -> Option<Self> {
        let lowered = s.trim().to_lowercase();
        Self::ALL.iter().copied().find(|u| u.as_str() == lowered)
    }

    /// Whether the unit measures mass or volume rather than a count
    pub fn is_measure(&self) -> bool {
        matches!(self, Unit::Kg | Unit::G | Unit::L | Unit::Ml)
    }
}

impl Default for Unit {
    fn default() -> Self {
        Unit::Piece
    }
}

impl fmt::Display for Unit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for Unit {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s).ok_or_else(|| format!("Invalid unit: {}", s))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_canonical_names() {
        for unit in Unit::ALL {
            assert_eq!(Unit::parse(unit.as_str()), Some(unit));
        }
        assert_eq!(Unit::parse(" KG "), Some(Unit::Kg));
        assert_eq!(Unit::parse("bouteille"), None);
    }

    #[test]
    fn test_measure_units() {
        assert!(Unit::Kg.is_measure());
        assert!(Unit::Ml.is_measure());
        assert!(!Unit::Bottle.is_measure());
        assert!(!Unit::Piece.is_measure());
    }

    #[test]
    fn test_serde_lowercase() {
        let json = serde_json::to_string(&Unit::Bottle).unwrap();
        assert_eq!(json, "\"bottle\"");
        let parsed: Unit = serde_json::from_str("\"ml\"").unwrap();
        assert_eq!(parsed, Unit::Ml);
    }
}

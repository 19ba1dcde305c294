//! Integration tests for the Extractor

#[cfg(test)]
mod tests {
    use crate::{Extractor, ExtractorConfig, ExtractorError, Normalizer};
    use stockscribe_domain::traits::TextSource;
    use stockscribe_domain::{Action, ProductCatalogEntry, RawTextBlock, ReviewThreshold, Unit};

    fn bar_catalog() -> Vec<ProductCatalogEntry> {
        vec![
            ProductCatalogEntry::new("p-wine", "Wine", Unit::Bottle),
            ProductCatalogEntry::new("p-beer", "Beer", Unit::Can),
            ProductCatalogEntry::new("p-vodka", "Vodka", Unit::Bottle),
        ]
    }

    #[test]
    fn test_voice_instruction_with_location() {
        let catalog = vec![ProductCatalogEntry::new("sku-12345", "SKU12345", Unit::Piece)];
        let block = RawTextBlock::voice("add 5 units of product SKU12345 to inventory location A3", "en");

        let report = Extractor::default().extract(&block, &catalog).unwrap();

        assert_eq!(report.items.len(), 1);
        let item = &report.items[0];
        assert_eq!(item.action, Action::Add);
        assert_eq!(item.quantity, 5.0);
        assert_eq!(item.unit, Unit::Piece);
        assert_eq!(item.product_id.as_deref(), Some("sku-12345"));
        assert_eq!(item.location.as_deref(), Some("A3"));
        assert!(!item.needs_review);
    }

    #[test]
    fn test_translated_invoice_row() {
        let catalog = vec![ProductCatalogEntry::new("p-gg", "Vodka Grey Goose", Unit::Bottle)];
        let block = RawTextBlock::invoice(
            "Vodka Grey Goose ... Quantité: 20 ... Prix unitaire: 2500 ¥",
            "fr",
        );

        let report = Extractor::default().extract(&block, &catalog).unwrap();

        assert_eq!(report.items.len(), 1);
        let item = &report.items[0];
        assert_eq!(item.product_name, "Vodka Grey Goose");
        assert_eq!(item.quantity, 20.0);
        assert_eq!(item.price, Some(2500.0));
        assert_eq!(item.unit, Unit::Bottle);
        assert_eq!(item.confidence, 1.0);
    }

    #[test]
    fn test_translated_invoice_row_keeps_written_name_on_partial_match() {
        let block = RawTextBlock::invoice(
            "Vodka Grey Goose ... Quantité: 20 ... Prix unitaire: 2500 ¥",
            "fr",
        );

        let report = Extractor::default().extract(&block, &bar_catalog()).unwrap();

        assert_eq!(report.items.len(), 1);
        let item = &report.items[0];
        assert_eq!(item.product_name, "Vodka Grey Goose");
        assert_eq!(item.product_id.as_deref(), Some("p-vodka"));
        assert_eq!(item.quantity, 20.0);
        assert_eq!(item.price, Some(2500.0));
        assert_eq!(item.confidence, 0.8);
        assert!(!item.needs_review);
    }

    #[test]
    fn test_removal_from_location_in_same_utterance() {
        let block = RawTextBlock::voice("add 5 wine to the bar then remove 2 wine from the bar", "en");

        let report = Extractor::default().extract(&block, &bar_catalog()).unwrap();

        assert_eq!(report.items.len(), 2);
        let actions: Vec<_> = report.items.iter().map(|i| i.action).collect();
        assert_eq!(actions, vec![Action::Add, Action::Remove]);
        for item in &report.items {
            assert_eq!(item.product_id.as_deref(), Some("p-wine"));
            assert_eq!(item.location.as_deref(), Some("bar"));
        }
        assert_eq!(report.items[1].quantity, 2.0);
    }

    #[test]
    fn test_japanese_invoice_row_without_catalog_match() {
        let block = RawTextBlock::invoice("ウォッカ グレイグース ... 数量: 20 ... 単価: ¥2,500", "ja");

        let report = Extractor::default().extract(&block, &[]).unwrap();

        let item = &report.items[0];
        assert_eq!(item.product_name, "ウォッカ グレイグース");
        assert_eq!(item.quantity, 20.0);
        assert_eq!(item.price, Some(2500.0));
        assert_eq!(item.unit, Unit::Bottle);
        assert_eq!(item.product_id, None);
        assert!(item.needs_review);
    }

    #[test]
    fn test_grouping_comma_price() {
        let normalizer = Normalizer::default();
        assert_eq!(normalizer.parse_number("14,995").unwrap().value, 14995.0);

        let block = RawTextBlock::invoice("Champagne Brut Qty: 1 Price: 14,995", "en");
        let report = Extractor::default().extract(&block, &[]).unwrap();
        assert_eq!(report.items[0].price, Some(14995.0));
    }

    #[test]
    fn test_unknown_product_needs_review() {
        let block = RawTextBlock::voice("add 2 Zythum Exotic Ale", "en");

        let report = Extractor::default().extract(&block, &bar_catalog()).unwrap();

        let item = &report.items[0];
        assert_eq!(item.product_id, None);
        assert_eq!(item.product_name, "Zythum Exotic Ale");
        assert_eq!(item.confidence, 0.0);
        assert!(item.needs_review);
        // "ale" puts it in the beer category
        assert_eq!(item.unit, Unit::Can);
    }

    #[test]
    fn test_order_preserved_across_fragments() {
        let block = RawTextBlock::voice("add 2 wine and 3 beer then remove 1 vodka", "en");

        let report = Extractor::default().extract(&block, &bar_catalog()).unwrap();

        let names: Vec<_> = report.items.iter().map(|i| i.product_name.as_str()).collect();
        assert_eq!(names, vec!["Wine", "Beer", "Vodka"]);
        let actions: Vec<_> = report.items.iter().map(|i| i.action).collect();
        assert_eq!(actions, vec![Action::Add, Action::Add, Action::Remove]);
        let quantities: Vec<_> = report.items.iter().map(|i| i.quantity).collect();
        assert_eq!(quantities, vec![2.0, 3.0, 1.0]);
    }

    #[test]
    fn test_french_voice_several_items() {
        let catalog = vec![
            ProductCatalogEntry::new("p-vin", "Vin", Unit::Bottle),
            ProductCatalogEntry::new("p-biere", "Bière", Unit::Can),
        ];
        let block = RawTextBlock::voice(
            "ajoute six bouteilles de vin et deux canettes de bière au bar",
            "fr",
        );

        let report = Extractor::default().extract(&block, &catalog).unwrap();

        assert_eq!(report.items.len(), 2);
        assert_eq!(report.items[0].product_id.as_deref(), Some("p-vin"));
        assert_eq!(report.items[0].quantity, 6.0);
        assert_eq!(report.items[0].unit, Unit::Bottle);
        assert_eq!(report.items[1].product_id.as_deref(), Some("p-biere"));
        assert_eq!(report.items[1].quantity, 2.0);
        assert_eq!(report.items[1].unit, Unit::Can);
        assert_eq!(report.items[1].location.as_deref(), Some("bar"));
    }

    #[test]
    fn test_invoice_noise_and_skips_are_reported() {
        let text = "FACTURE N° 2024-118\n\
                    1. Vodka Grey Goose ... Quantité: 20 ... Prix unitaire: 2500 ¥\n\
                    2. Gin Tanqueray ... Quantité: 12 ... Prix unitaire: 1800 ¥\n\
                    Livraison offerte\n\
                    Total: 64600 ¥\n";
        let block = RawTextBlock::invoice(text, "fr");

        let report = Extractor::default().extract(&block, &bar_catalog()).unwrap();

        assert_eq!(report.items.len(), 2);
        assert_eq!(report.items[1].product_name, "Gin Tanqueray");
        assert_eq!(report.items[1].price, Some(1800.0));
        let positions: Vec<_> = report.skipped.iter().map(|s| s.position).collect();
        assert_eq!(positions, vec![0, 3, 4]);
        assert_eq!(report.metadata.fragment_count, 5);
    }

    #[test]
    fn test_fragment_without_quantity_is_skipped() {
        let block = RawTextBlock::voice("add some vodka. add 3 wine", "en");

        let report = Extractor::default().extract(&block, &bar_catalog()).unwrap();

        assert_eq!(report.items.len(), 1);
        assert_eq!(report.items[0].product_name, "Wine");
        assert_eq!(report.skipped.len(), 1);
        assert_eq!(report.skipped[0].fragment, "add some vodka");
        assert_eq!(report.skipped[0].reason, "no numeric quantity");
    }

    #[test]
    fn test_strict_config_sends_fuzzy_matches_to_review() {
        let block = RawTextBlock::voice("add 4 vodka grey goose", "en");

        let default = Extractor::default().extract(&block, &bar_catalog()).unwrap();
        assert!(!default.items[0].needs_review);

        let strict = Extractor::new(ExtractorConfig::strict()).unwrap();
        let report = strict.extract(&block, &bar_catalog()).unwrap();
        assert_eq!(report.items[0].confidence, 0.8);
        assert!(report.items[0].needs_review);
    }

    #[test]
    fn test_extraction_is_idempotent() {
        let block = RawTextBlock::voice("add 2 wine and 3 beer to the cellar", "en");
        let extractor = Extractor::default();

        let first = extractor.extract(&block, &bar_catalog()).unwrap();
        let second = extractor.extract(&block, &bar_catalog()).unwrap();

        assert_eq!(first.items, second.items);
        assert_eq!(first.skipped, second.skipped);
    }

    struct FailingSource;

    impl TextSource for FailingSource {
        type Error = String;

        fn fetch(&self) -> Result<RawTextBlock, Self::Error> {
            Err("transcription service unavailable".to_string())
        }
    }

    struct FixedSource(RawTextBlock);

    impl TextSource for FixedSource {
        type Error = std::convert::Infallible;

        fn fetch(&self) -> Result<RawTextBlock, Self::Error> {
            Ok(self.0.clone())
        }
    }

    #[test]
    fn test_extract_from_collaborators() {
        let source = FixedSource(RawTextBlock::voice("remove 1 beer", "en"));
        let report = Extractor::default().extract_from(&source, &bar_catalog()).unwrap();
        assert_eq!(report.items[0].action, Action::Remove);

        let err = Extractor::default()
            .extract_from(&FailingSource, &bar_catalog())
            .unwrap_err();
        assert!(matches!(err, ExtractorError::Source(msg) if msg.contains("unavailable")));
    }

    mod properties {
        use super::*;
        use proptest::prelude::*;

        fn word() -> impl Strategy<Value = &'static str> {
            prop::sample::select(vec![
                "add", "remove", "move", "ajoute", "retire", "5", "12", "2,5", "cinq", "one",
                "bottles", "cans", "kg", "wine", "beer", "vodka", "grey", "goose", "zythum",
                "and", "et", "to", "the", "bar", "au", "cellar", "of", "¥2,500", "€", ".",
            ])
        }

        proptest! {
            /// Every item honors the review invariant and has a non-negative quantity
            #[test]
            fn test_review_flag_always_consistent(words in prop::collection::vec(word(), 0..16)) {
                let text = words.join(" ");
                let report = Extractor::default()
                    .extract(&RawTextBlock::voice(text, "en"), &bar_catalog())
                    .unwrap();
                for item in &report.items {
                    prop_assert!(item.review_flag_consistent(ReviewThreshold::default()));
                    prop_assert!(item.quantity >= 0.0);
                    prop_assert!((0.0..=1.0).contains(&item.confidence));
                }
            }

            /// Same input, same items
            #[test]
            fn test_extract_deterministic(words in prop::collection::vec(word(), 0..16)) {
                let block = RawTextBlock::invoice(words.join(" "), "en");
                let extractor = Extractor::default();
                let first = extractor.extract(&block, &bar_catalog()).unwrap();
                let second = extractor.extract(&block, &bar_catalog()).unwrap();
                prop_assert_eq!(first.items, second.items);
            }
        }
    }
}

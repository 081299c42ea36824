use proptest::prelude::*;

use treemap_rs::core::{ContentItem, FallbackLabels, build_hierarchy};

fn labels() -> FallbackLabels {
    FallbackLabels {
        unknown_country: "Unknown".to_owned(),
        unnamed_set: "No set".to_owned(),
    }
}

fn item_strategy() -> impl Strategy<Value = ContentItem> {
    (
        proptest::option::of("[A-Z]{2}"),
        proptest::option::of("[a-z]{1,3}"),
        proptest::option::of(0u64..10_000),
    )
        .prop_map(|(country, set, word_count)| ContentItem {
            id: None,
            country,
            set,
            word_count,
        })
}

proptest! {
    #[test]
    fn leaf_sums_always_match_totals(items in proptest::collection::vec(item_strategy(), 0..128)) {
        let hierarchy = build_hierarchy(&items, &labels()).expect("build");

        let leaves = hierarchy.root.leaves();
        let leaf_words: u64 = leaves.iter().map(|leaf| leaf.word_count.unwrap_or(0)).sum();
        let leaf_items: u64 = leaves.iter().map(|leaf| leaf.item_count.unwrap_or(0)).sum();

        prop_assert_eq!(leaf_words, hierarchy.totals.word_count);
        prop_assert_eq!(leaf_items, hierarchy.totals.item_count);
        prop_assert_eq!(hierarchy.totals.item_count, items.len() as u64);
    }

    #[test]
    fn no_group_is_ever_empty(items in proptest::collection::vec(item_strategy(), 0..128)) {
        let hierarchy = build_hierarchy(&items, &labels()).expect("build");

        for country in &hierarchy.root.children {
            prop_assert!(!country.children.is_empty());
            for leaf in &country.children {
                prop_assert!(leaf.item_count.unwrap_or(0) >= 1);
                prop_assert!(leaf.children.is_empty());
            }
        }
    }

    #[test]
    fn rebuilds_are_deterministic(items in proptest::collection::vec(item_strategy(), 0..128)) {
        let first = build_hierarchy(&items, &labels()).expect("build");
        let second = build_hierarchy(&items, &labels()).expect("build");
        prop_assert_eq!(first, second);
    }
}

//! Property-based tests for the overlap measure and exact-match clustering.
//!
//! - Symmetry
//! - Boundedness
//! - Identity
//! - Exact-match transitivity

use corefer::similarity::{count_overlap_percent, contains_unordered_words};
use corefer::{Document, OverlapBaseline};
use proptest::prelude::*;

/// Whitespace-joined words, none equal to "the".
fn phrase() -> impl Strategy<Value = String> {
    prop::collection::vec("[a-zA-Z0-9]{1,8}", 1..6)
        .prop_filter("no bare 'the'", |words| {
            words.iter().all(|w| !w.eq_ignore_ascii_case("the"))
        })
        .prop_map(|words| words.join(" "))
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(1000))]

    /// overlap(a, b) == overlap(b, a)
    #[test]
    fn overlap_symmetric(a in ".{1,60}", b in ".{1,60}") {
        let ab = count_overlap_percent(&a, &b);
        let ba = count_overlap_percent(&b, &a);
        prop_assert_eq!(ab, ba, "overlap({:?}, {:?})", a, b);
    }

    /// Always in [0.0, 1.0]
    #[test]
    fn overlap_bounded(a in ".{0,60}", b in ".{0,60}") {
        let sim = count_overlap_percent(&a, &b);
        prop_assert!((0.0..=1.0).contains(&sim), "overlap({:?}, {:?}) = {}", a, b, sim);
    }

    /// A phrase without "the" fully overlaps itself.
    #[test]
    fn overlap_identity(a in phrase()) {
        prop_assert_eq!(count_overlap_percent(&a, &a), 1.0);
    }

    /// Word order does not matter for containment.
    #[test]
    fn containment_ignores_order(words in prop::collection::vec("[a-z]{1,6}", 1..5)) {
        let forward = words.join(" ");
        let mut reversed = words.clone();
        reversed.reverse();
        prop_assert!(contains_unordered_words(&reversed.join(" "), &forward));
    }

    /// Mentions with the same lowercase gloss always share an entity after phase 1.
    #[test]
    fn exact_match_transitive(
        glosses in prop::collection::vec(prop::sample::select(vec!["Obama", "obama", "OBAMA", "the president", "Michelle", "michelle"]), 1..12)
    ) {
        let doc = Document::from_glosses("prop", &glosses);
        let clustering = OverlapBaseline::default().exact_match(&doc).unwrap();
        for i in 0..glosses.len() {
            for j in 0..glosses.len() {
                let same_text = glosses[i].to_lowercase() == glosses[j].to_lowercase();
                prop_assert_eq!(same_text, clustering.coreferent(i, j));
            }
        }
    }

    /// Resolution yields exactly one assignment per mention, in input order.
    #[test]
    fn resolve_one_assignment_per_mention(glosses in prop::collection::vec(phrase(), 0..10)) {
        let doc = Document::from_glosses("prop", &glosses);
        let clustering = OverlapBaseline::default().resolve(&doc).unwrap();
        prop_assert!(clustering.is_complete());
        for (position, cm) in clustering.iter().enumerate() {
            prop_assert_eq!(cm.mention.index(), position);
            prop_assert!(clustering.entity(cm.entity).map_or(false, |e| e.contains(position)));
        }
    }
}

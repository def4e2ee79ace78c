//! Property-based tests for the feature taxonomy.
//!
//! - Bucket construction stays in range for in-range values
//! - Equal features hash equal, whatever the construction path
//! - Kinds never collide when used as map keys

use corefer_core::{Bucket, Error, Feature, FeatureKind};
use proptest::prelude::*;
use std::collections::hash_map::DefaultHasher;
use std::collections::HashMap;
use std::hash::{Hash, Hasher};

fn hash_of(f: &Feature) -> u64 {
    let mut h = DefaultHasher::new();
    f.hash(&mut h);
    h.finish()
}

const INDICATOR_KINDS: [FeatureKind; 6] = [
    FeatureKind::ExactMatch,
    FeatureKind::HwExact,
    FeatureKind::HwGender,
    FeatureKind::HwNumberMatch,
    FeatureKind::HwStrictNumberMatch,
    FeatureKind::HwBothPronoun,
];

proptest! {
    #![proptest_config(ProptestConfig::with_cases(500))]

    /// Any value in [0, max) lands in [0, num_buckets).
    #[test]
    fn bucket_in_range(
        max in 1i64..10_000,
        num_buckets in 1i64..100,
        frac in 0.0f64..1.0,
    ) {
        let value = ((max as f64) * frac) as i64;
        let value = value.min(max - 1);
        let bucket = Bucket::new(value, max, num_buckets);
        prop_assert!(bucket.is_ok(), "value {} max {} n {} rejected", value, max, num_buckets);
        let bucket = bucket.unwrap();
        prop_assert!(i64::from(bucket.index()) < num_buckets);
    }

    /// value == max is always rejected.
    #[test]
    fn bucket_at_max_rejected(max in 1i64..10_000, num_buckets in 1i64..100) {
        let result = Bucket::new(max, max, num_buckets);
        let rejected = matches!(result, Err(Error::BucketOutOfRange { .. }));
        prop_assert!(rejected);
    }

    /// Rebuilding a feature from the same inputs gives an equal, equal-hashing value.
    #[test]
    fn rebuilt_features_hash_equal(value in any::<i64>(), flag in any::<bool>(), word in "[a-z]{0,12}") {
        let pairs = [
            (Feature::hw_mention_dist(value), Feature::int_indicator(FeatureKind::HwMentionDist, value).unwrap()),
            (Feature::hw_exact(flag), Feature::indicator(FeatureKind::HwExact, flag).unwrap()),
            (
                Feature::string(FeatureKind::HeadWordPair, word.clone()).unwrap(),
                Feature::string(FeatureKind::HeadWordPair, word.as_str()).unwrap(),
            ),
        ];
        for (a, b) in pairs.iter() {
            prop_assert_eq!(a, b);
            prop_assert_eq!(hash_of(a), hash_of(b));
        }
    }

    /// Same payload under different kinds never compares equal.
    #[test]
    fn kinds_distinguish_equal_payloads(flag in any::<bool>()) {
        let mut map: HashMap<Feature, usize> = HashMap::new();
        for (i, kind) in INDICATOR_KINDS.iter().enumerate() {
            map.insert(Feature::indicator(*kind, flag).unwrap(), i);
        }
        prop_assert_eq!(map.len(), INDICATOR_KINDS.len());
        for (i, kind) in INDICATOR_KINDS.iter().enumerate() {
            prop_assert_eq!(map[&Feature::indicator(*kind, flag).unwrap()], i);
        }
    }
}

#[test]
fn every_named_indicator_is_distinct() {
    let features = vec![
        Feature::coreferent(true),
        Feature::exact_match(true),
        Feature::hw_exact(true),
        Feature::hw_gender(true),
        Feature::hw_pos(true),
        Feature::hw_ner(true),
        Feature::hw_lemma(true),
        Feature::hw_noun(true),
        Feature::hw_proper_noun(true),
        Feature::hw_plural_noun(true),
        Feature::hw_word_inclusion(true),
        Feature::hw_compatible_modifiers(true),
        Feature::hw_unigram(true),
        Feature::hw_bigram(true),
        Feature::hw_one_pronoun(true),
        Feature::hw_both_pronoun(true),
        Feature::hw_both_contain_uppercase(true),
        Feature::hw_number_match(true),
        Feature::hw_strict_number_match(true),
        Feature::hw_gender_match(true),
        Feature::hw_strict_gender_match(true),
        Feature::hw_person_match(true),
        Feature::hw_strict_person_match(true),
        Feature::hw_overlap_count(1),
        Feature::hw_mention_dist(1),
        Feature::hw_sentence_dist(1),
    ];
    let as_set: std::collections::HashSet<&Feature> = features.iter().collect();
    assert_eq!(as_set.len(), features.len());

    let names: std::collections::HashSet<String> = features.iter().map(|f| f.to_string()).collect();
    assert_eq!(names.len(), features.len());
}

//! Pairwise features for a downstream mention-pair scorer.
//!
//! Which features describe a pair is a policy choice that belongs to the
//! scorer. [`PairFeaturizer`] is the seam; [`SurfacePairFeatures`] is one
//! policy built from surface text and whatever annotations the mentions
//! carry. Head-word features are only emitted when both mentions have a
//! head word.
//!
//! # Example
//!
//! ```rust
//! use corefer::{Document, Feature, FeatureKind, PairFeaturizer, SurfacePairFeatures};
//!
//! let doc = Document::from_glosses("d", &["Barack Obama", "Obama"]);
//! let featurizer = SurfacePairFeatures::default();
//! let features = featurizer.featurize(&doc.mentions()[0], &doc.mentions()[1])?;
//!
//! assert!(features.contains(&Feature::exact_match(false)));
//! assert_eq!(features.get(FeatureKind::HwOverlapCount), Some(&Feature::hw_overlap_count(1)));
//! # Ok::<(), corefer::Error>(())
//! ```

use crate::config::PairFeatureConfig;
use crate::lexicon::{
    is_article, is_noun_tag, is_plural_noun_tag, is_pronoun, is_pronoun_mention,
    is_proper_noun_tag,
};
use crate::similarity::{bigrams, contains_unordered_words, shared_words};
use corefer_core::{
    Agreement, Clustering, Feature, FeatureKind, FeatureSet, HeadWord, Mention, Result,
};
use std::collections::BTreeSet;

/// Produces the features describing an ordered mention pair.
pub trait PairFeaturizer {
    /// Features for `(first, second)`.
    fn featurize(&self, first: &Mention, second: &Mention) -> Result<FeatureSet>;
}

/// Gold label for a pair: whether the clustering puts both mentions in one entity.
#[must_use]
pub fn coreference_label(clustering: &Clustering<'_>, first: usize, second: usize) -> Feature {
    Feature::coreferent(clustering.coreferent(first, second))
}

/// Surface-text and annotation features.
#[derive(Debug, Clone, Default)]
pub struct SurfacePairFeatures {
    config: PairFeatureConfig,
}

impl SurfacePairFeatures {
    /// Create a featurizer after validating `config`.
    pub fn new(config: PairFeatureConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self { config })
    }

    fn distance_bucket(&self, kind: FeatureKind, distance: i64, max: i64) -> Result<Feature> {
        // Out-of-range distances are clamped into the last bucket.
        let clamped = distance.clamp(0, max - 1);
        Feature::bucket(kind, clamped, max, self.config.distance_buckets)
    }
}

fn content_words(gloss: &str) -> BTreeSet<String> {
    gloss
        .split_whitespace()
        .filter(|w| !is_article(w) && !is_pronoun(w))
        .map(str::to_lowercase)
        .collect()
}

/// Head word text: the annotated head, else the last token.
fn head_text(mention: &Mention) -> Option<String> {
    match &mention.head {
        Some(head) => Some(head.word.to_lowercase()),
        None => mention.words().last().map(str::to_lowercase),
    }
}

/// Words other than the head and articles.
fn modifiers(mention: &Mention) -> BTreeSet<String> {
    let head = head_text(mention);
    mention
        .words()
        .filter(|w| !is_article(w))
        .map(str::to_lowercase)
        .filter(|w| Some(w) != head.as_ref())
        .collect()
}

fn same_tag(a: &Option<String>, b: &Option<String>) -> bool {
    match (a, b) {
        (Some(x), Some(y)) => x.eq_ignore_ascii_case(y),
        _ => false,
    }
}

fn both_tags(a: &HeadWord, b: &HeadWord, test: fn(&str) -> bool) -> bool {
    match (&a.pos, &b.pos) {
        (Some(x), Some(y)) => test(x) && test(y),
        _ => false,
    }
}

fn has_uppercase(text: &str) -> bool {
    text.chars().any(char::is_uppercase)
}

fn to_i64(n: usize) -> i64 {
    i64::try_from(n).unwrap_or(i64::MAX)
}

impl PairFeaturizer for SurfacePairFeatures {
    fn featurize(&self, first: &Mention, second: &Mention) -> Result<FeatureSet> {
        let mut features = FeatureSet::new();
        features.insert(Feature::placeholder(FeatureKind::Bias)?);
        features.insert(Feature::exact_match(first.lowercase() == second.lowercase()));

        // Head-word comparisons
        if let (Some(a), Some(b)) = (&first.head, &second.head) {
            features.insert(Feature::hw_exact(a.word.eq_ignore_ascii_case(&b.word)));
            features.insert(Feature::hw_gender(first.gender.agrees_strictly(&second.gender)));
            features.insert(Feature::hw_pos(same_tag(&a.pos, &b.pos)));
            features.insert(Feature::hw_ner(same_tag(&a.ner, &b.ner)));
            features.insert(Feature::hw_lemma(same_tag(&a.lemma, &b.lemma)));
            features.insert(Feature::hw_noun(both_tags(a, b, is_noun_tag)));
            features.insert(Feature::hw_proper_noun(both_tags(a, b, is_proper_noun_tag)));
            features.insert(Feature::hw_plural_noun(both_tags(a, b, is_plural_noun_tag)));
            features.insert(Feature::string(
                FeatureKind::HeadWordPair,
                format!("{}|{}", a.word.to_lowercase(), b.word.to_lowercase()),
            )?);
        }

        // Word overlap
        let (shorter, longer) = if first.words().count() <= second.words().count() {
            (first, second)
        } else {
            (second, first)
        };
        features.insert(Feature::hw_word_inclusion(contains_unordered_words(
            shorter.gloss(),
            longer.gloss(),
        )));
        let longer_words: BTreeSet<String> = longer.words().map(str::to_lowercase).collect();
        features.insert(Feature::hw_compatible_modifiers(
            modifiers(shorter).is_subset(&longer_words),
        ));

        let shared: BTreeSet<String> = shared_words(first.gloss(), second.gloss())
            .intersection(&content_words(first.gloss()))
            .cloned()
            .collect();
        features.insert(Feature::hw_unigram(!shared.is_empty()));
        features.insert(Feature::hw_bigram(
            !bigrams(first.gloss()).is_disjoint(&bigrams(second.gloss())),
        ));
        features.insert(Feature::hw_overlap_count(to_i64(shared.len())));

        // Pronouns and casing
        let first_pronoun = is_pronoun_mention(first.gloss());
        let second_pronoun = is_pronoun_mention(second.gloss());
        features.insert(Feature::hw_one_pronoun(first_pronoun != second_pronoun));
        features.insert(Feature::hw_both_pronoun(first_pronoun && second_pronoun));
        features.insert(Feature::hw_both_contain_uppercase(
            has_uppercase(first.gloss()) && has_uppercase(second.gloss()),
        ));

        // Agreement
        let gender_match = first.gender.agrees_loosely(&second.gender);
        features.insert(Feature::hw_number_match(first.number.agrees_loosely(&second.number)));
        features.insert(Feature::hw_strict_number_match(
            first.number.agrees_strictly(&second.number),
        ));
        features.insert(Feature::hw_gender_match(gender_match));
        features.insert(Feature::hw_strict_gender_match(
            first.gender.agrees_strictly(&second.gender),
        ));
        features.insert(Feature::hw_person_match(first.person.agrees_loosely(&second.person)));
        features.insert(Feature::hw_strict_person_match(
            first.person.agrees_strictly(&second.person),
        ));
        features.insert(Feature::pair(
            Feature::hw_one_pronoun(first_pronoun != second_pronoun),
            Feature::hw_gender_match(gender_match),
        ));

        // Distances: intervening mentions and sentences
        let mention_dist = to_i64(first.index().abs_diff(second.index()).saturating_sub(1));
        let sentence_dist = to_i64(first.sentence.abs_diff(second.sentence).saturating_sub(1));
        features.insert(Feature::hw_mention_dist(mention_dist));
        features.insert(Feature::hw_sentence_dist(sentence_dist));
        features.insert(self.distance_bucket(
            FeatureKind::MentionDistBucket,
            mention_dist,
            self.config.max_mention_distance,
        )?);
        features.insert(self.distance_bucket(
            FeatureKind::SentenceDistBucket,
            sentence_dist,
            self.config.max_sentence_distance,
        )?);

        if !shared.is_empty() {
            features.insert(Feature::set(FeatureKind::SharedWords, shared)?);
        }
        Ok(features)
    }
}

//! Typed features describing a mention or a mention pair.
//!
//! Features are immutable value objects meant to be used as keys in a
//! learned model's weight map, so equality and hashing are structural:
//! two features are equal only when they have the same payload shape, the
//! same [`FeatureKind`], and equal payloads. `ExactMatch(true)` and
//! `HwExact(true)` therefore never collide.
//!
//! # Payload shapes
//!
//! | Shape | Payload | Equality |
//! |-------|---------|----------|
//! | [`Feature::Indicator`] | `bool` | value |
//! | [`Feature::IntIndicator`] | `i64` | value |
//! | [`Feature::Bucket`] | [`Bucket`] | bucket index only |
//! | [`Feature::Placeholder`] | none | kind only |
//! | [`Feature::String`] | `String` | value |
//! | [`Feature::Set`] | `BTreeSet<String>` | set equality |
//! | [`Feature::Pair`] | two features | pairwise |
//!
//! # Example
//!
//! ```rust
//! use corefer_core::{Feature, FeatureKind};
//! use std::collections::HashMap;
//!
//! let mut weights: HashMap<Feature, f64> = HashMap::new();
//! weights.insert(Feature::exact_match(true), 1.5);
//! weights.insert(Feature::hw_exact(true), 0.5);
//!
//! assert_eq!(weights.len(), 2);
//! assert_eq!(weights[&Feature::exact_match(true)], 1.5);
//!
//! let bucket = Feature::bucket(FeatureKind::MentionDistBucket, 7, 10, 5)?;
//! assert_eq!(bucket.to_string(), "MentionDistBucket(3/5)");
//! # Ok::<(), corefer_core::Error>(())
//! ```

use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::hash::{Hash, Hasher};

// =============================================================================
// Shapes and kinds
// =============================================================================

/// Payload shape a [`FeatureKind`] is declared with.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum FeatureShape {
    /// Boolean flag
    Indicator,
    /// Integer count or distance
    IntIndicator,
    /// Quantized integer
    Bucket,
    /// No payload
    Placeholder,
    /// String identity
    String,
    /// Set of strings
    Set,
}

impl FeatureShape {
    /// Short name used in error messages.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            FeatureShape::Indicator => "indicator",
            FeatureShape::IntIndicator => "int-indicator",
            FeatureShape::Bucket => "bucket",
            FeatureShape::Placeholder => "placeholder",
            FeatureShape::String => "string",
            FeatureShape::Set => "set",
        }
    }
}

impl std::fmt::Display for FeatureShape {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Named feature kinds.
///
/// Each kind is bound to one [`FeatureShape`]. New kinds are added here as
/// new variants; they reuse an existing shape and so inherit its equality.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[non_exhaustive]
pub enum FeatureKind {
    /// Gold label: the two mentions corefer.
    Coreferent,
    /// Whole glosses match ignoring case.
    ExactMatch,
    /// Head words match lexically.
    HwExact,
    /// Head words carry the same gender.
    HwGender,
    /// Head words share a part-of-speech tag.
    HwPos,
    /// Head words share a named-entity tag.
    HwNer,
    /// Head words share a lemma.
    HwLemma,
    /// Both heads are common nouns.
    HwNoun,
    /// Both heads are proper nouns.
    HwProperNoun,
    /// Both heads are plural nouns.
    HwPluralNoun,
    /// Every word of one mention occurs in the other.
    HwWordInclusion,
    /// Modifiers of one mention are compatible with the other.
    HwCompatibleModifiers,
    /// Mentions share a content unigram.
    HwUnigram,
    /// Mentions share a bigram.
    HwBigram,
    /// Exactly one mention is a pronoun.
    HwOnePronoun,
    /// Both mentions are pronouns.
    HwBothPronoun,
    /// Both mentions contain an uppercase letter.
    HwBothContainUppercase,
    /// Number agrees (unknown tolerated).
    HwNumberMatch,
    /// Number agrees and is known on both sides.
    HwStrictNumberMatch,
    /// Gender agrees (unknown tolerated).
    HwGenderMatch,
    /// Gender agrees and is known on both sides.
    HwStrictGenderMatch,
    /// Person agrees (unknown tolerated).
    HwPersonMatch,
    /// Person agrees and is known on both sides.
    HwStrictPersonMatch,
    /// Count of shared tokens.
    HwOverlapCount,
    /// Count of mentions between the pair.
    HwMentionDist,
    /// Count of sentences between the pair.
    HwSentenceDist,
    /// Bucketed mention distance.
    MentionDistBucket,
    /// Bucketed sentence distance.
    SentenceDistBucket,
    /// The two head words, joined.
    HeadWordPair,
    /// Lowercased words both mentions contain.
    SharedWords,
    /// Always-on bias term.
    Bias,
}

impl FeatureKind {
    /// Payload shape this kind is declared with.
    #[must_use]
    pub const fn shape(&self) -> FeatureShape {
        use FeatureKind::*;
        match self {
            HwOverlapCount | HwMentionDist | HwSentenceDist => FeatureShape::IntIndicator,
            MentionDistBucket | SentenceDistBucket => FeatureShape::Bucket,
            HeadWordPair => FeatureShape::String,
            SharedWords => FeatureShape::Set,
            Bias => FeatureShape::Placeholder,
            _ => FeatureShape::Indicator,
        }
    }

    /// Name used in debug output and error messages.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        use FeatureKind::*;
        match self {
            Coreferent => "CoreferentIndicator",
            ExactMatch => "ExactMatch",
            HwExact => "HwExact",
            HwGender => "HwGender",
            HwPos => "HwPos",
            HwNer => "HwNer",
            HwLemma => "HwLemma",
            HwNoun => "HwNoun",
            HwProperNoun => "HwProperNoun",
            HwPluralNoun => "HwPluralNoun",
            HwWordInclusion => "HwWordInclusion",
            HwCompatibleModifiers => "HwCompatibleModifiers",
            HwUnigram => "HwUnigram",
            HwBigram => "HwBigram",
            HwOnePronoun => "HwOnePronoun",
            HwBothPronoun => "HwBothPronoun",
            HwBothContainUppercase => "HwBothContainUppercase",
            HwNumberMatch => "HwNumberMatch",
            HwStrictNumberMatch => "HwStrictNumberMatch",
            HwGenderMatch => "HwGenderMatch",
            HwStrictGenderMatch => "HwStrictGenderMatch",
            HwPersonMatch => "HwPersonMatch",
            HwStrictPersonMatch => "HwStrictPersonMatch",
            HwOverlapCount => "HwOverlapCount",
            HwMentionDist => "HwMentionDist",
            HwSentenceDist => "HwSentenceDist",
            MentionDistBucket => "MentionDistBucket",
            SentenceDistBucket => "SentenceDistBucket",
            HeadWordPair => "HeadWordPair",
            SharedWords => "SharedWords",
            Bias => "Bias",
        }
    }

    fn require_shape(self, found: FeatureShape) -> Result<()> {
        let expected = self.shape();
        if expected == found {
            Ok(())
        } else {
            Err(Error::ShapeMismatch {
                kind: self.as_str(),
                expected: expected.as_str(),
                found: found.as_str(),
            })
        }
    }
}

impl std::fmt::Display for FeatureKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

// =============================================================================
// Bucket
// =============================================================================

/// A value quantized into one of `num_buckets` equal-width ranges.
///
/// Equality and hashing look at the bucket index only. Deserialization
/// re-checks `index < num_buckets`.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
#[serde(try_from = "RawBucket")]
pub struct Bucket {
    index: u32,
    num_buckets: u32,
}

impl Bucket {
    /// Quantize `value` over `[0, max)` into `num_buckets` buckets.
    ///
    /// `bucket = floor(value * num_buckets / max)`. Fails when the result
    /// falls outside `[0, num_buckets)`, which includes `value >= max` and
    /// negative values; callers clamp first. A non-positive `max` is
    /// rejected the same way.
    pub fn new(value: i64, max: i64, num_buckets: i64) -> Result<Self> {
        let out_of_range = |bucket| Error::BucketOutOfRange {
            value,
            max,
            num_buckets,
            bucket,
        };
        if max <= 0 {
            return Err(out_of_range(-1));
        }
        let bucket = i128::from(value) * i128::from(num_buckets);
        let bucket = bucket.div_euclid(i128::from(max));
        let bucket = i64::try_from(bucket).unwrap_or(i64::MAX);
        if bucket < 0 || bucket >= num_buckets {
            return Err(out_of_range(bucket));
        }
        let index = u32::try_from(bucket).map_err(|_| out_of_range(bucket))?;
        let num_buckets = u32::try_from(num_buckets).map_err(|_| out_of_range(bucket))?;
        Ok(Self { index, num_buckets })
    }

    /// Bucket index in `[0, num_buckets)`.
    #[must_use]
    pub fn index(&self) -> u32 {
        self.index
    }

    /// Declared bucket count.
    #[must_use]
    pub fn num_buckets(&self) -> u32 {
        self.num_buckets
    }
}

#[derive(Deserialize)]
struct RawBucket {
    index: u32,
    num_buckets: u32,
}

impl TryFrom<RawBucket> for Bucket {
    type Error = Error;

    fn try_from(raw: RawBucket) -> Result<Self> {
        if raw.num_buckets == 0 || raw.index >= raw.num_buckets {
            return Err(Error::BucketOutOfRange {
                value: i64::from(raw.index),
                max: i64::from(raw.num_buckets),
                num_buckets: i64::from(raw.num_buckets),
                bucket: i64::from(raw.index),
            });
        }
        Ok(Self {
            index: raw.index,
            num_buckets: raw.num_buckets,
        })
    }
}

impl PartialEq for Bucket {
    fn eq(&self, other: &Self) -> bool {
        self.index == other.index
    }
}

impl Eq for Bucket {}

impl Hash for Bucket {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.index.hash(state);
    }
}

// =============================================================================
// Feature
// =============================================================================

/// A single typed feature value.
///
/// Prefer the checked constructors ([`Feature::indicator`],
/// [`Feature::bucket`], ...) or the per-kind shortcuts
/// ([`Feature::exact_match`], ...) over building variants by hand; they
/// reject kinds paired with the wrong payload shape.
///
/// The tuple variants themselves are unchecked: constructing one directly
/// (or deserializing one) does not verify that the kind's shape matches
/// the payload. [`Feature::is_well_formed`] runs that check after the fact.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Feature {
    /// Boolean flag.
    Indicator(FeatureKind, bool),
    /// Integer count or distance.
    IntIndicator(FeatureKind, i64),
    /// Quantized integer.
    Bucket(FeatureKind, Bucket),
    /// Zero-payload marker.
    Placeholder(FeatureKind),
    /// String identity.
    String(FeatureKind, String),
    /// Order-free set of strings.
    Set(FeatureKind, BTreeSet<String>),
    /// Ordered conjunction of two features.
    Pair(Box<Feature>, Box<Feature>),
}

impl Feature {
    /// Boolean feature of an indicator kind.
    pub fn indicator(kind: FeatureKind, value: bool) -> Result<Self> {
        kind.require_shape(FeatureShape::Indicator)?;
        Ok(Feature::Indicator(kind, value))
    }

    /// Integer feature of an int-indicator kind.
    pub fn int_indicator(kind: FeatureKind, value: i64) -> Result<Self> {
        kind.require_shape(FeatureShape::IntIndicator)?;
        Ok(Feature::IntIndicator(kind, value))
    }

    /// Bucketed feature; see [`Bucket::new`] for the range rule.
    pub fn bucket(kind: FeatureKind, value: i64, max: i64, num_buckets: i64) -> Result<Self> {
        kind.require_shape(FeatureShape::Bucket)?;
        Ok(Feature::Bucket(kind, Bucket::new(value, max, num_buckets)?))
    }

    /// Payload-free marker.
    pub fn placeholder(kind: FeatureKind) -> Result<Self> {
        kind.require_shape(FeatureShape::Placeholder)?;
        Ok(Feature::Placeholder(kind))
    }

    /// String-valued feature.
    pub fn string(kind: FeatureKind, value: impl Into<String>) -> Result<Self> {
        kind.require_shape(FeatureShape::String)?;
        Ok(Feature::String(kind, value.into()))
    }

    /// Set-valued feature.
    pub fn set<I, S>(kind: FeatureKind, values: I) -> Result<Self>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        kind.require_shape(FeatureShape::Set)?;
        Ok(Feature::Set(kind, values.into_iter().map(Into::into).collect()))
    }

    /// Conjunction of two features.
    #[must_use]
    pub fn pair(first: Feature, second: Feature) -> Self {
        Feature::Pair(Box::new(first), Box::new(second))
    }

    /// Kind of this feature; `None` for pairs.
    #[must_use]
    pub fn kind(&self) -> Option<FeatureKind> {
        match self {
            Feature::Indicator(k, _)
            | Feature::IntIndicator(k, _)
            | Feature::Bucket(k, _)
            | Feature::Placeholder(k)
            | Feature::String(k, _)
            | Feature::Set(k, _) => Some(*k),
            Feature::Pair(..) => None,
        }
    }

    /// Whether every kind in this feature matches its payload shape.
    ///
    /// Always true for features built through the checked constructors.
    #[must_use]
    pub fn is_well_formed(&self) -> bool {
        let (kind, shape) = match self {
            Feature::Indicator(k, _) => (k, FeatureShape::Indicator),
            Feature::IntIndicator(k, _) => (k, FeatureShape::IntIndicator),
            Feature::Bucket(k, _) => (k, FeatureShape::Bucket),
            Feature::Placeholder(k) => (k, FeatureShape::Placeholder),
            Feature::String(k, _) => (k, FeatureShape::String),
            Feature::Set(k, _) => (k, FeatureShape::Set),
            Feature::Pair(a, b) => return a.is_well_formed() && b.is_well_formed(),
        };
        kind.shape() == shape
    }

    /// Boolean payload, if this is an indicator.
    #[must_use]
    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Feature::Indicator(_, v) => Some(*v),
            _ => None,
        }
    }

    /// Integer payload, if this is an int indicator.
    #[must_use]
    pub fn as_int(&self) -> Option<i64> {
        match self {
            Feature::IntIndicator(_, v) => Some(*v),
            _ => None,
        }
    }
}

macro_rules! indicator_constructors {
    ($($name:ident => $kind:ident),* $(,)?) => {
        impl Feature {
            $(
                #[doc = concat!("`", stringify!($kind), "` indicator.")]
                #[must_use]
                pub fn $name(value: bool) -> Self {
                    Feature::Indicator(FeatureKind::$kind, value)
                }
            )*
        }
    };
}

macro_rules! int_constructors {
    ($($name:ident => $kind:ident),* $(,)?) => {
        impl Feature {
            $(
                #[doc = concat!("`", stringify!($kind), "` count.")]
                #[must_use]
                pub fn $name(value: i64) -> Self {
                    Feature::IntIndicator(FeatureKind::$kind, value)
                }
            )*
        }
    };
}

indicator_constructors! {
    coreferent => Coreferent,
    exact_match => ExactMatch,
    hw_exact => HwExact,
    hw_gender => HwGender,
    hw_pos => HwPos,
    hw_ner => HwNer,
    hw_lemma => HwLemma,
    hw_noun => HwNoun,
    hw_proper_noun => HwProperNoun,
    hw_plural_noun => HwPluralNoun,
    hw_word_inclusion => HwWordInclusion,
    hw_compatible_modifiers => HwCompatibleModifiers,
    hw_unigram => HwUnigram,
    hw_bigram => HwBigram,
    hw_one_pronoun => HwOnePronoun,
    hw_both_pronoun => HwBothPronoun,
    hw_both_contain_uppercase => HwBothContainUppercase,
    hw_number_match => HwNumberMatch,
    hw_strict_number_match => HwStrictNumberMatch,
    hw_gender_match => HwGenderMatch,
    hw_strict_gender_match => HwStrictGenderMatch,
    hw_person_match => HwPersonMatch,
    hw_strict_person_match => HwStrictPersonMatch,
}

int_constructors! {
    hw_overlap_count => HwOverlapCount,
    hw_mention_dist => HwMentionDist,
    hw_sentence_dist => HwSentenceDist,
}

impl std::fmt::Display for Feature {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Feature::Indicator(k, v) => write!(f, "{}({})", k, v),
            Feature::IntIndicator(k, v) => write!(f, "{}({})", k, v),
            Feature::Bucket(k, b) => write!(f, "{}({}/{})", k, b.index, b.num_buckets),
            Feature::Placeholder(k) => write!(f, "{}", k),
            Feature::String(k, s) => write!(f, "{}({})", k, s),
            Feature::Set(k, set) => {
                write!(f, "{}( ", k)?;
                for s in set {
                    write!(f, "{} ", s)?;
                }
                write!(f, ")")
            }
            Feature::Pair(a, b) => write!(f, "({},{})", a, b),
        }
    }
}

// =============================================================================
// FeatureSet
// =============================================================================

/// An insertion-ordered set of features describing one mention pair.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FeatureSet {
    features: Vec<Feature>,
}

impl FeatureSet {
    /// Empty set.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a feature; returns false if an equal one was already present.
    pub fn insert(&mut self, feature: Feature) -> bool {
        if self.features.contains(&feature) {
            return false;
        }
        self.features.push(feature);
        true
    }

    /// Whether an equal feature is present.
    #[must_use]
    pub fn contains(&self, feature: &Feature) -> bool {
        self.features.contains(feature)
    }

    /// First feature of the given kind.
    #[must_use]
    pub fn get(&self, kind: FeatureKind) -> Option<&Feature> {
        self.features.iter().find(|f| f.kind() == Some(kind))
    }

    /// Features in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = &Feature> {
        self.features.iter()
    }

    /// Number of features.
    #[must_use]
    pub fn len(&self) -> usize {
        self.features.len()
    }

    /// Whether the set is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.features.is_empty()
    }
}

impl Extend<Feature> for FeatureSet {
    fn extend<T: IntoIterator<Item = Feature>>(&mut self, iter: T) {
        for feature in iter {
            self.insert(feature);
        }
    }
}

impl FromIterator<Feature> for FeatureSet {
    fn from_iter<T: IntoIterator<Item = Feature>>(iter: T) -> Self {
        let mut set = FeatureSet::new();
        set.extend(iter);
        set
    }
}

impl IntoIterator for FeatureSet {
    type Item = Feature;
    type IntoIter = std::vec::IntoIter<Feature>;

    fn into_iter(self) -> Self::IntoIter {
        self.features.into_iter()
    }
}

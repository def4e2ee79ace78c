//! Word-overlap measures used by the partial-match phase and by pair features.
//!
//! All comparisons are case-insensitive and work on whitespace-delimited
//! tokens. Containment is substring containment, not token equality:
//! "york" counts as present in "newyork".

use std::cmp::Ordering;
use std::collections::BTreeSet;

/// Tokens ignored by [`count_overlap_percent`].
pub const DEFAULT_IGNORED_TOKENS: &[&str] = &["the"];

/// Fraction of the longer string's tokens found inside the shorter string.
///
/// Tokens equal to "the" (any case) are not counted. Returns a value in
/// [0.0, 1.0]; 0.0 when the longer string has no countable tokens.
///
/// # Examples
///
/// ```
/// use corefer::similarity::count_overlap_percent;
///
/// // "obama" is found in "Obama", "barack" is not.
/// assert_eq!(count_overlap_percent("Barack Obama", "Obama"), 0.5);
/// assert_eq!(count_overlap_percent("New York City Hall", "New York City"), 0.75);
/// assert_eq!(count_overlap_percent("", ""), 0.0);
/// ```
#[must_use]
pub fn count_overlap_percent(a: &str, b: &str) -> f64 {
    overlap_percent_ignoring(a, b, DEFAULT_IGNORED_TOKENS)
}

/// [`count_overlap_percent`] with a caller-supplied list of ignored tokens.
///
/// "Longer" is measured in characters. Equal-length inputs are scored in
/// both directions and the smaller score is kept, so the measure is
/// symmetric.
#[must_use]
pub fn overlap_percent_ignoring<S: AsRef<str>>(a: &str, b: &str, ignored: &[S]) -> f64 {
    match a.chars().count().cmp(&b.chars().count()) {
        Ordering::Greater => directed_overlap(a, b, ignored),
        Ordering::Less => directed_overlap(b, a, ignored),
        Ordering::Equal => directed_overlap(a, b, ignored).min(directed_overlap(b, a, ignored)),
    }
}

fn directed_overlap<S: AsRef<str>>(long: &str, short: &str, ignored: &[S]) -> f64 {
    let short = short.to_lowercase();
    let mut counted = 0usize;
    let mut common = 0usize;
    for word in long.split_whitespace() {
        let word = word.to_lowercase();
        if ignored.iter().any(|t| t.as_ref().to_lowercase() == word) {
            continue;
        }
        counted += 1;
        if short.contains(&word) {
            common += 1;
        }
    }
    if counted == 0 {
        0.0
    } else {
        common as f64 / counted as f64
    }
}

/// True if every token of `a` occurs somewhere inside `b`, in any order.
///
/// An `a` with no tokens is trivially contained.
///
/// ```
/// use corefer::similarity::contains_unordered_words;
///
/// assert!(contains_unordered_words("Obama Barack", "barack obama"));
/// assert!(!contains_unordered_words("Michelle Obama", "Barack Obama"));
/// ```
#[must_use]
pub fn contains_unordered_words(a: &str, b: &str) -> bool {
    let b = b.to_lowercase();
    a.split_whitespace()
        .all(|word| b.contains(&word.to_lowercase()))
}

/// Lowercased tokens appearing (as whole tokens) in both strings.
#[must_use]
pub fn shared_words(a: &str, b: &str) -> BTreeSet<String> {
    let words_a: BTreeSet<String> = a.split_whitespace().map(str::to_lowercase).collect();
    let words_b: BTreeSet<String> = b.split_whitespace().map(str::to_lowercase).collect();
    words_a.intersection(&words_b).cloned().collect()
}

/// Lowercased adjacent token pairs of a string.
#[must_use]
pub fn bigrams(text: &str) -> BTreeSet<(String, String)> {
    let words: Vec<String> = text.split_whitespace().map(str::to_lowercase).collect();
    words
        .windows(2)
        .map(|w| (w[0].clone(), w[1].clone()))
        .collect()
}

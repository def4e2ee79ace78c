//! Word co-occurrence counts collected from gold clusters.
//!
//! Words that keep showing up in the same gold cluster ("Obama",
//! "president") are candidate synonyms. The counts are training-time signal
//! only; the baseline's clustering decision does not read them.

use crate::lexicon::{is_article, is_pronoun};
use std::collections::HashMap;

/// Symmetric pairwise co-occurrence counter.
#[derive(Debug, Clone, Default)]
pub struct CooccurrenceCounter {
    counts: HashMap<String, HashMap<String, f64>>,
}

impl CooccurrenceCounter {
    /// Empty counter.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Add `by` to the count of `(a, b)`. Not symmetric on its own.
    pub fn increment(&mut self, a: &str, b: &str, by: f64) {
        *self
            .counts
            .entry(a.to_string())
            .or_default()
            .entry(b.to_string())
            .or_insert(0.0) += by;
    }

    /// Count recorded for `(a, b)`; 0.0 if never seen.
    #[must_use]
    pub fn count(&self, a: &str, b: &str) -> f64 {
        self.counts
            .get(a)
            .and_then(|row| row.get(b))
            .copied()
            .unwrap_or(0.0)
    }

    /// Words seen with `word`, highest count first (ties alphabetical).
    #[must_use]
    pub fn neighbours(&self, word: &str) -> Vec<(&str, f64)> {
        let mut row: Vec<(&str, f64)> = self
            .counts
            .get(word)
            .map(|r| r.iter().map(|(w, c)| (w.as_str(), *c)).collect())
            .unwrap_or_default();
        row.sort_by(|a, b| b.1.total_cmp(&a.1).then_with(|| a.0.cmp(b.0)));
        row
    }

    /// Record every pair of content words drawn from one cluster's glosses.
    ///
    /// Pronouns and articles are skipped and words are lowercased. Each
    /// ordered pair of distinct positions is counted once, so the result is
    /// symmetric; pairs of the same word are not counted.
    pub fn observe_cluster<I, S>(&mut self, glosses: I)
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut words: Vec<String> = Vec::new();
        for gloss in glosses {
            words.extend(
                gloss
                    .as_ref()
                    .split_whitespace()
                    .filter(|w| !is_pronoun(w) && !is_article(w))
                    .map(str::to_lowercase),
            );
        }
        for (i, first) in words.iter().enumerate() {
            for (j, second) in words.iter().enumerate() {
                if i != j && first != second {
                    self.increment(first, second, 1.0);
                }
            }
        }
    }

    /// Number of distinct words with at least one recorded pair.
    #[must_use]
    pub fn len(&self) -> usize {
        self.counts.len()
    }

    /// Whether nothing has been recorded.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.counts.is_empty()
    }
}

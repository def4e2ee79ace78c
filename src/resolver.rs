//! Two-phase baseline coreference resolver.
//!
//! # Algorithm
//!
//! 1. **Exact match**: walk mentions in document order, keyed by lowercased
//!    gloss. The first mention with a given text founds an entity; later
//!    mentions with the same text join it.
//! 2. **Partial match**: walk the phase-1 output in order. For each mention,
//!    score every other entity founded before it (represented by its first
//!    current member) with [`overlap_percent_ignoring`]. If the best score is
//!    strictly above the threshold, redirect the mention to that entity.
//!    Ties go to the entity founded first.
//!
//! Phase 2 is an all-pairs scan, quadratic in the number of mentions. Every
//! call works on its own [`Clustering`]; nothing is shared across documents.
//!
//! # Example
//!
//! ```rust
//! use corefer::{CoreferenceSystem, Document, OverlapBaseline};
//!
//! let doc = Document::from_glosses("d", &["New York City Hall", "New York City", "Boston"]);
//! let baseline = OverlapBaseline::default();
//! let clustering = baseline.run_coreference(&doc)?;
//!
//! assert!(clustering.coreferent(0, 1));
//! assert!(!clustering.coreferent(0, 2));
//! # Ok::<(), corefer::Error>(())
//! ```

use crate::config::BaselineConfig;
use crate::similarity::overlap_percent_ignoring;
use crate::synonyms::CooccurrenceCounter;
use corefer_core::{Clustering, Document, EntityId, Result};
use std::collections::HashMap;

// =============================================================================
// Trait
// =============================================================================

/// A document paired with its gold clusters, as mention indices.
#[derive(Debug, Clone)]
pub struct TrainingExample {
    /// The annotated document
    pub document: Document,
    /// Gold clusters; each inner list holds mention indices into `document`
    pub gold: Vec<Vec<usize>>,
}

impl TrainingExample {
    /// Pair a document with its gold clusters.
    #[must_use]
    pub fn new(document: Document, gold: Vec<Vec<usize>>) -> Self {
        Self { document, gold }
    }
}

/// Trait for coreference systems.
///
/// Allows different resolution strategies to be used interchangeably.
pub trait CoreferenceSystem {
    /// Learn from annotated documents. Systems without a learned component
    /// may ignore the data.
    fn train(&mut self, data: &[TrainingExample]);

    /// Assign every mention of `document` to an entity.
    fn run_coreference<'d>(&self, document: &'d Document) -> Result<Clustering<'d>>;

    /// System name.
    fn name(&self) -> &'static str;
}

// =============================================================================
// Baseline
// =============================================================================

/// Exact-match clustering followed by overlap-threshold merging.
#[derive(Debug, Clone, Default)]
pub struct OverlapBaseline {
    config: BaselineConfig,
    synonyms: CooccurrenceCounter,
}

impl OverlapBaseline {
    /// Create a resolver after validating `config`.
    pub fn new(config: BaselineConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self {
            config,
            synonyms: CooccurrenceCounter::new(),
        })
    }

    /// Active configuration.
    #[must_use]
    pub fn config(&self) -> &BaselineConfig {
        &self.config
    }

    /// Co-occurrences collected by [`CoreferenceSystem::train`].
    #[must_use]
    pub fn synonyms(&self) -> &CooccurrenceCounter {
        &self.synonyms
    }

    /// Run both phases over `document`.
    pub fn resolve<'d>(&self, document: &'d Document) -> Result<Clustering<'d>> {
        let mut clustering = self.exact_match(document)?;
        self.partial_match(&mut clustering)?;
        Ok(clustering)
    }

    /// Phase 1: cluster mentions whose lowercased glosses are identical.
    pub fn exact_match<'d>(&self, document: &'d Document) -> Result<Clustering<'d>> {
        let mut clustering = Clustering::new(document);
        let mut seen: HashMap<String, EntityId> = HashMap::new();

        for mention in document.mentions() {
            let key = mention.lowercase();
            match seen.get(&key) {
                Some(&entity) => clustering.mark_coreferent(mention.index(), entity)?,
                None => {
                    let entity = clustering.mark_singleton(mention.index())?;
                    seen.insert(key, entity);
                }
            }
        }

        log::debug!(
            "exact match: {} mentions -> {} entities in '{}'",
            document.len(),
            seen.len(),
            document.id
        );
        Ok(clustering)
    }

    /// Phase 2: redirect mentions to a better-overlapping earlier entity.
    ///
    /// Returns the number of mentions redirected.
    pub fn partial_match(&self, clustering: &mut Clustering<'_>) -> Result<usize> {
        let mut redirected = 0;
        for position in 0..clustering.len() {
            let Some(current) = clustering.get(position).copied() else {
                continue;
            };
            if let Some(best) = self.best_match(clustering, current.mention.index()) {
                clustering.change_coreference(current.mention.index(), best)?;
                redirected += 1;
            }
        }
        log::debug!(
            "partial match: {} of {} mentions redirected",
            redirected,
            clustering.len()
        );
        Ok(redirected)
    }

    /// Best entity for the mention at `index`, if any scores above threshold.
    ///
    /// Candidates are the non-empty entities other than the mention's own,
    /// founded by an earlier mention.
    #[must_use]
    pub fn best_match(&self, clustering: &Clustering<'_>, index: usize) -> Option<EntityId> {
        let mention = clustering.document().mention(index)?;
        let own = clustering.entity_of(index);

        let mut best: Option<EntityId> = None;
        let mut best_overlap = 0.0;
        for entity in clustering.entities() {
            if Some(entity.id) == own || entity.founder >= index {
                continue;
            }
            let Some(exemplar) = clustering.exemplar(entity.id) else {
                continue;
            };
            let overlap = overlap_percent_ignoring(
                exemplar.gloss(),
                mention.gloss(),
                &self.config.ignored_tokens,
            );
            if overlap > self.config.match_threshold && overlap > best_overlap {
                best_overlap = overlap;
                best = Some(entity.id);
            }
        }
        best
    }

    fn train_synonyms(&mut self, example: &TrainingExample) {
        for cluster in &example.gold {
            let mut glosses = Vec::with_capacity(cluster.len());
            for &index in cluster {
                match example.document.mention(index) {
                    Some(mention) => glosses.push(mention.gloss()),
                    None => log::warn!(
                        "Gold cluster in '{}' references mention {} but the document has {}",
                        example.document.id,
                        index,
                        example.document.len()
                    ),
                }
            }
            self.synonyms.observe_cluster(glosses);
        }
    }
}

impl CoreferenceSystem for OverlapBaseline {
    fn train(&mut self, data: &[TrainingExample]) {
        if !self.config.collect_synonyms {
            return;
        }
        for example in data {
            self.train_synonyms(example);
        }
        log::debug!(
            "collected co-occurrences for {} words from {} documents",
            self.synonyms.len(),
            data.len()
        );
    }

    fn run_coreference<'d>(&self, document: &'d Document) -> Result<Clustering<'d>> {
        self.resolve(document)
    }

    fn name(&self) -> &'static str {
        "overlap-baseline"
    }
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use corefer_core::LinkOrigin;

    fn doc(glosses: &[&str]) -> Document {
        Document::from_glosses("test", glosses)
    }

    #[test]
    fn test_exact_match_is_case_insensitive() {
        let d = doc(&["Obama", "the president", "OBAMA", "obama"]);
        let c = OverlapBaseline::default().exact_match(&d).unwrap();
        assert!(c.coreferent(0, 2));
        assert!(c.coreferent(0, 3));
        assert!(!c.coreferent(0, 1));
        assert_eq!(c.get(0).unwrap().origin, LinkOrigin::Singleton);
        assert_eq!(c.get(2).unwrap().origin, LinkOrigin::ExactMatch);
        assert_eq!(c.entities().count(), 2);
    }

    #[test]
    fn test_partial_match_strict_threshold() {
        let d = doc(&["New York City", "New York"]);
        let c = OverlapBaseline::default().resolve(&d).unwrap();
        assert!(!c.coreferent(0, 1), "2/3 is not above 0.67");

        let d = doc(&["New York City Hall", "New York City"]);
        let c = OverlapBaseline::default().resolve(&d).unwrap();
        assert!(c.coreferent(0, 1), "3/4 is above 0.67");
        assert_eq!(c.get(1).unwrap().origin, LinkOrigin::PartialMatch);
    }

    #[test]
    fn test_best_overlap_wins() {
        // "New York City" scores 3/4 against the hall and 1.0 against "york city new".
        let d = doc(&["New York City Hall", "York City New", "New York City"]);
        let baseline = OverlapBaseline::default();
        let c = baseline.exact_match(&d).unwrap();
        let hall = c.entity_of(0).unwrap();
        let scrambled = c.entity_of(1).unwrap();
        // Mention 1 matches the hall (3/4), mention 2 prefers entity 1 (1.0 > 0.75).
        assert_eq!(baseline.best_match(&c, 1), Some(hall));
        assert_eq!(baseline.best_match(&c, 2), Some(scrambled));
    }

    #[test]
    fn test_ties_go_to_first_entity() {
        let d = doc(&["New York City Hall", "New York City Pier", "New York City"]);
        let baseline = OverlapBaseline::default();
        let c = baseline.exact_match(&d).unwrap();
        // Both candidates score 3/4 for mention 2.
        assert_eq!(baseline.best_match(&c, 2), c.entity_of(0));
    }

    #[test]
    fn test_first_mention_never_redirected() {
        let d = doc(&["New York City", "New York City Hall"]);
        let baseline = OverlapBaseline::default();
        let c = baseline.exact_match(&d).unwrap();
        assert_eq!(baseline.best_match(&c, 0), None);
        let c = baseline.resolve(&d).unwrap();
        assert!(c.coreferent(0, 1));
        assert_eq!(c.entity_of(1), c.entity_of(0));
    }

    #[test]
    fn test_custom_threshold() {
        let d = doc(&["Barack Obama", "Obama"]);
        let strict = OverlapBaseline::default().resolve(&d).unwrap();
        assert!(!strict.coreferent(0, 1));

        let loose = OverlapBaseline::new(BaselineConfig::default().with_threshold(0.4)).unwrap();
        let c = loose.resolve(&d).unwrap();
        assert!(c.coreferent(0, 1));
    }

    #[test]
    fn test_invalid_config_rejected() {
        assert!(OverlapBaseline::new(BaselineConfig::default().with_threshold(2.0)).is_err());
    }

    #[test]
    fn test_empty_document() {
        let d = doc(&[]);
        let c = OverlapBaseline::default().resolve(&d).unwrap();
        assert!(c.is_empty());
        assert_eq!(c.entities().count(), 0);
    }

    #[test]
    fn test_blank_glosses_do_not_merge_by_overlap() {
        let d = doc(&["", "   ", "Obama"]);
        let c = OverlapBaseline::default().resolve(&d).unwrap();
        assert_eq!(c.entities().count(), 3);
    }

    #[test]
    fn test_train_is_inactive_by_default() {
        let example = TrainingExample::new(doc(&["Barack Obama", "the president"]), vec![vec![0, 1]]);
        let mut baseline = OverlapBaseline::default();
        baseline.train(std::slice::from_ref(&example));
        assert!(baseline.synonyms().is_empty());

        let mut collecting =
            OverlapBaseline::new(BaselineConfig::default().collect_synonyms(true)).unwrap();
        collecting.train(&[example]);
        assert_eq!(collecting.synonyms().count("obama", "president"), 1.0);
    }

    #[test]
    fn test_train_skips_out_of_range_gold() {
        let example = TrainingExample::new(doc(&["Obama", "president"]), vec![vec![0, 1, 7]]);
        let mut baseline =
            OverlapBaseline::new(BaselineConfig::default().collect_synonyms(true)).unwrap();
        baseline.train(&[example]);
        assert_eq!(baseline.synonyms().count("obama", "president"), 1.0);
    }

    #[test]
    fn test_name() {
        assert_eq!(OverlapBaseline::default().name(), "overlap-baseline");
    }
}

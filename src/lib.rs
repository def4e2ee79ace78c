//! # corefer
//!
//! Within-document coreference for Rust.
//!
//! - **Baseline resolver**: exact-string clustering, then overlap-threshold merging
//! - **Features**: typed, hashable mention-pair features for a learned scorer
//! - **Training signal**: word co-occurrence counts from gold clusters
//!
//! Parsing, tagging, corpus loading and scoring metrics live elsewhere; this
//! crate starts from already-extracted mentions.
//!
//! ## Quick Start
//!
//! ```rust
//! use corefer::{CoreferenceSystem, Document, OverlapBaseline};
//!
//! let doc = Document::from_glosses(
//!     "news-1",
//!     &["Barack Obama", "Obama", "the president", "obama", "Michelle"],
//! );
//!
//! let baseline = OverlapBaseline::default();
//! let clustering = baseline.run_coreference(&doc)?;
//!
//! // "Obama" and "obama" are exact matches; "Barack Obama" only overlaps 1/2.
//! assert!(clustering.coreferent(1, 3));
//! assert!(!clustering.coreferent(0, 1));
//! assert_eq!(clustering.len(), doc.len());
//! # Ok::<(), corefer::Error>(())
//! ```
//!
//! ## Pair Features
//!
//! ```rust
//! use corefer::{Document, Feature, PairFeaturizer, SurfacePairFeatures};
//! use std::collections::HashMap;
//!
//! let doc = Document::from_glosses("d", &["she", "her"]);
//! let features = SurfacePairFeatures::default()
//!     .featurize(&doc.mentions()[0], &doc.mentions()[1])?;
//!
//! let mut weights: HashMap<Feature, f64> = HashMap::new();
//! for f in features.iter() {
//!     *weights.entry(f.clone()).or_insert(0.0) += 1.0;
//! }
//! assert_eq!(weights.get(&Feature::hw_both_pronoun(true)), Some(&1.0));
//! # Ok::<(), corefer::Error>(())
//! ```

#![warn(missing_docs)]

pub mod config;
pub mod lexicon;
pub mod pair_features;
pub mod resolver;
pub mod similarity;
pub mod synonyms;

pub use config::{BaselineConfig, PairFeatureConfig};
pub use pair_features::{coreference_label, PairFeaturizer, SurfacePairFeatures};
pub use resolver::{CoreferenceSystem, OverlapBaseline, TrainingExample};
pub use synonyms::CooccurrenceCounter;

// Re-export core types
pub use corefer_core::{
    Agreement, Bucket, ClusteredMention, Clustering, Document, Entity, EntityId, Error, Feature,
    FeatureKind, FeatureSet, FeatureShape, Gender, HeadWord, LinkOrigin, Mention, Number, Person,
    Result,
};

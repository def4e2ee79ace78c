//! # corefer-core
//!
//! Core types for the corefer workspace: the data a coreference resolver
//! consumes and produces, and the typed features a pairwise scorer learns
//! from.
//!
//! This crate provides:
//! - **Mentions**: `Mention`, `Document`, `HeadWord`, agreement attributes
//! - **Clusters**: `Entity`, `EntityId`, `ClusteredMention`, `Clustering`
//! - **Features**: `Feature`, `FeatureKind`, `Bucket`, `FeatureSet`
//!
//! The resolver itself lives in the `corefer` crate.

#![warn(missing_docs)]

pub mod cluster;
pub mod error;
pub mod feature;
pub mod mention;

// Re-exports for convenience
pub use cluster::{ClusteredMention, Clustering, Entity, EntityId, LinkOrigin};
pub use error::{Error, Result};
pub use feature::{Bucket, Feature, FeatureKind, FeatureSet, FeatureShape};
pub use mention::{Agreement, Document, Gender, HeadWord, Mention, Number, Person};

//! Error types for corefer-core.

use thiserror::Error;

/// Result type for corefer-core operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Error type for corefer-core operations.
#[derive(Error, Debug, Clone, PartialEq)]
#[non_exhaustive]
pub enum Error {
    /// A bucket feature computed an index outside `[0, num_buckets)`.
    #[error("Bucket out of range: {value} max={max} numbuckets={num_buckets} (bucket {bucket})")]
    BucketOutOfRange {
        /// Raw value handed to the constructor.
        value: i64,
        /// Declared maximum.
        max: i64,
        /// Declared bucket count.
        num_buckets: i64,
        /// The offending bucket index.
        bucket: i64,
    },

    /// A feature kind was built with a payload of the wrong shape.
    #[error("Feature {kind} expects a {expected} payload, got {found}")]
    ShapeMismatch {
        /// Name of the feature kind.
        kind: &'static str,
        /// Shape the kind is declared with.
        expected: &'static str,
        /// Shape that was supplied.
        found: &'static str,
    },

    /// Mention index does not belong to the document.
    #[error("Unknown mention: index {0}")]
    UnknownMention(usize),

    /// Entity id does not belong to the clustering.
    #[error("Unknown entity: {0}")]
    UnknownEntity(usize),

    /// Mention already has an entity assignment.
    #[error("Mention {0} is already clustered")]
    AlreadyClustered(usize),

    /// Mention has no entity assignment yet.
    #[error("Mention {0} is not clustered")]
    NotClustered(usize),

    /// Configuration value rejected by validation.
    #[error("Invalid config: {0}")]
    InvalidConfig(String),

    /// Invalid input provided.
    #[error("Invalid input: {0}")]
    InvalidInput(String),
}

impl Error {
    /// Create an invalid input error.
    #[must_use]
    pub fn invalid_input(msg: impl Into<String>) -> Self {
        Self::InvalidInput(msg.into())
    }

    /// Create an invalid config error.
    #[must_use]
    pub fn invalid_config(msg: impl Into<String>) -> Self {
        Self::InvalidConfig(msg.into())
    }
}

//! Configuration for the baseline resolver and the pair featurizer.

use corefer_core::{Error, Result};
use serde::{Deserialize, Serialize};

/// Policy constants for [`OverlapBaseline`](crate::OverlapBaseline).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BaselineConfig {
    /// A partial match must score strictly above this overlap (0.0-1.0)
    pub match_threshold: f64,
    /// Tokens not counted by the overlap measure (case-insensitive)
    pub ignored_tokens: Vec<String>,
    /// Collect word co-occurrences from gold clusters during `train`
    pub collect_synonyms: bool,
}

impl Default for BaselineConfig {
    fn default() -> Self {
        Self {
            match_threshold: 0.67,
            ignored_tokens: vec!["the".to_string()],
            collect_synonyms: false,
        }
    }
}

impl BaselineConfig {
    /// Set the partial-match threshold.
    #[must_use]
    pub fn with_threshold(mut self, threshold: f64) -> Self {
        self.match_threshold = threshold;
        self
    }

    /// Replace the ignored-token list.
    #[must_use]
    pub fn with_ignored_tokens<I, S>(mut self, tokens: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.ignored_tokens = tokens.into_iter().map(Into::into).collect();
        self
    }

    /// Enable or disable synonym collection during training.
    #[must_use]
    pub fn collect_synonyms(mut self, collect: bool) -> Self {
        self.collect_synonyms = collect;
        self
    }

    /// Reject thresholds that are not finite or fall outside [0, 1].
    pub fn validate(&self) -> Result<()> {
        if !self.match_threshold.is_finite() || !(0.0..=1.0).contains(&self.match_threshold) {
            return Err(Error::invalid_config(format!(
                "match_threshold must be in [0, 1], got {}",
                self.match_threshold
            )));
        }
        Ok(())
    }
}

/// Bucketing parameters for [`SurfacePairFeatures`](crate::SurfacePairFeatures).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PairFeatureConfig {
    /// Number of buckets for distance features
    pub distance_buckets: i64,
    /// Mention distances at or above this share the last bucket
    pub max_mention_distance: i64,
    /// Sentence distances at or above this share the last bucket
    pub max_sentence_distance: i64,
}

impl Default for PairFeatureConfig {
    fn default() -> Self {
        Self {
            distance_buckets: 5,
            max_mention_distance: 50,
            max_sentence_distance: 10,
        }
    }
}

impl PairFeatureConfig {
    /// Set the bucket count.
    #[must_use]
    pub fn with_buckets(mut self, buckets: i64) -> Self {
        self.distance_buckets = buckets;
        self
    }

    /// Bucket counts and maxima must be positive.
    pub fn validate(&self) -> Result<()> {
        if self.distance_buckets <= 0 {
            return Err(Error::invalid_config("distance_buckets must be positive"));
        }
        if self.max_mention_distance <= 0 || self.max_sentence_distance <= 0 {
            return Err(Error::invalid_config("distance maxima must be positive"));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = BaselineConfig::default();
        assert_eq!(config.match_threshold, 0.67);
        assert_eq!(config.ignored_tokens, vec!["the"]);
        assert!(!config.collect_synonyms);
        assert!(config.validate().is_ok());
        assert!(PairFeatureConfig::default().validate().is_ok());
    }

    #[test]
    fn test_empty_json_gives_defaults() {
        let config: BaselineConfig = serde_json::from_str("{}").unwrap();
        assert_eq!(config, BaselineConfig::default());

        let config: BaselineConfig =
            serde_json::from_str(r#"{"match_threshold": 0.5}"#).unwrap();
        assert_eq!(config.match_threshold, 0.5);
        assert_eq!(config.ignored_tokens, vec!["the"]);

        let pair: PairFeatureConfig = serde_json::from_str("{}").unwrap();
        assert_eq!(pair, PairFeatureConfig::default());
    }

    #[test]
    fn test_invalid_thresholds() {
        assert!(BaselineConfig::default().with_threshold(1.5).validate().is_err());
        assert!(BaselineConfig::default().with_threshold(-0.1).validate().is_err());
        assert!(BaselineConfig::default()
            .with_threshold(f64::NAN)
            .validate()
            .is_err());
        assert!(BaselineConfig::default().with_threshold(1.0).validate().is_ok());
    }

    #[test]
    fn test_invalid_pair_config() {
        assert!(PairFeatureConfig::default().with_buckets(0).validate().is_err());
        let config = PairFeatureConfig {
            max_sentence_distance: 0,
            ..PairFeatureConfig::default()
        };
        assert!(config.validate().is_err());
    }
}

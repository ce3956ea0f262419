//! Auditor configuration.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Default similarity floor for accepting a semantic advisory match.
/// A heuristic derived from a distance-to-similarity transform; treat as a
/// tunable, not a constant of nature.
pub const DEFAULT_SIMILARITY_THRESHOLD: f64 = 0.85;

/// Default normalized edit-distance ratio for fuzzy trigger matching.
pub const DEFAULT_FUZZY_THRESHOLD: f64 = 0.85;

/// Default bounded capacity of the result cache.
pub const DEFAULT_CACHE_CAPACITY: usize = 1000;

/// Configuration for a [`crate::FairHousingAuditor`] instance.
///
/// Jurisdictions are fixed per instance: one rule store and one result cache
/// serve all concurrent callers for a given jurisdiction set.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct AuditorConfig {
    /// Path to the base (federal) rule file. Jurisdiction overlays resolve
    /// relative to this file's directory.
    pub rules_path: PathBuf,
    /// Jurisdiction overlays, merged in request order after the base rules.
    pub jurisdictions: Vec<String>,
    /// Acceptance floor for semantic advisory matches, in [0, 1].
    pub similarity_threshold: f64,
    /// Acceptance floor for fuzzy lexical matches, in [0, 1].
    pub fuzzy_threshold: f64,
    /// Maximum number of cached reports before LRU eviction.
    pub cache_capacity: usize,
}

impl Default for AuditorConfig {
    fn default() -> Self {
        Self {
            rules_path: PathBuf::from("rules/fha_rules.json"),
            jurisdictions: Vec::new(),
            similarity_threshold: DEFAULT_SIMILARITY_THRESHOLD,
            fuzzy_threshold: DEFAULT_FUZZY_THRESHOLD,
            cache_capacity: DEFAULT_CACHE_CAPACITY,
        }
    }
}

impl AuditorConfig {
    pub fn new(rules_path: impl Into<PathBuf>) -> Self {
        Self {
            rules_path: rules_path.into(),
            ..Self::default()
        }
    }

    pub fn with_jurisdictions<I, S>(mut self, jurisdictions: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.jurisdictions = jurisdictions.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_similarity_threshold(mut self, threshold: f64) -> Self {
        self.similarity_threshold = threshold;
        self
    }

    pub fn with_fuzzy_threshold(mut self, threshold: f64) -> Self {
        self.fuzzy_threshold = threshold;
        self
    }

    pub fn with_cache_capacity(mut self, capacity: usize) -> Self {
        self.cache_capacity = capacity;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = AuditorConfig::default();
        assert_eq!(config.similarity_threshold, DEFAULT_SIMILARITY_THRESHOLD);
        assert_eq!(config.fuzzy_threshold, DEFAULT_FUZZY_THRESHOLD);
        assert_eq!(config.cache_capacity, DEFAULT_CACHE_CAPACITY);
        assert!(config.jurisdictions.is_empty());
    }

    #[test]
    fn test_partial_config_fills_defaults() {
        let config: AuditorConfig =
            serde_json::from_str(r#"{"rules_path": "custom/rules.json"}"#).unwrap();
        assert_eq!(config.rules_path, PathBuf::from("custom/rules.json"));
        assert_eq!(config.cache_capacity, DEFAULT_CACHE_CAPACITY);
        assert_eq!(config.fuzzy_threshold, DEFAULT_FUZZY_THRESHOLD);
    }

    #[test]
    fn test_builder_methods() {
        let config = AuditorConfig::new("fha.json")
            .with_jurisdictions(["california", "nyc"])
            .with_cache_capacity(10);
        assert_eq!(config.rules_path, PathBuf::from("fha.json"));
        assert_eq!(config.jurisdictions, vec!["california", "nyc"]);
        assert_eq!(config.cache_capacity, 10);
    }
}

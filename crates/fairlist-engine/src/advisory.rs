//! Semantic advisory port.
//!
//! The engine consumes three optional external capabilities through this
//! interface: vector similarity search over rule triggers, zero-shot intent
//! classification, and generative listing revision. The engine never
//! implements these; callers inject a provider at construction time. Every
//! call returns a typed `Result` so a failed capability is an outcome the
//! orchestrator matches on, and it always degrades to "no additional
//! signal" rather than failing a scan.

use fairlist_types::Rule;
use thiserror::Error;

/// Sentinel rule id attached to synthetic flags from intent classification.
pub const NEURAL_RULE_ID: &str = "NEURAL-ZERO-SHOT";

/// Confidence floor for accepting an adverse intent classification.
pub const CLASSIFY_CONFIDENCE_FLOOR: f64 = 0.85;

/// Minimum fragment length for the semantic similarity pass.
pub const SEMANTIC_MIN_SENTENCE_CHARS: usize = 10;

/// Minimum fragment length for the intent classification pass.
pub const CLASSIFY_MIN_SENTENCE_CHARS: usize = 15;

/// A capability call that did not produce a usable signal.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum AdvisoryError {
    #[error("advisory capability unavailable: {0}")]
    Unavailable(&'static str),

    #[error("advisory backend failed: {0}")]
    Backend(String),

    #[error("advisory call timed out")]
    Timeout,
}

/// Best trigger match for one sentence from the similarity capability.
#[derive(Debug, Clone, PartialEq)]
pub struct SemanticMatch {
    /// Id of the rule owning the matched trigger.
    pub rule_id: String,
    /// The trigger phrase that matched.
    pub trigger: String,
    /// Similarity in [0, 1]. Providers converting a raw distance metric
    /// should document the transform; the acceptance threshold is tunable.
    pub similarity: f64,
}

/// Intent labels the classification capability ranks.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IntentLabel {
    Discriminatory,
    Exclusionary,
    Restrictive,
    Welcoming,
    Inclusive,
}

impl IntentLabel {
    /// Labels that turn a confident classification into a flag.
    pub fn is_adverse(&self) -> bool {
        matches!(
            self,
            IntentLabel::Discriminatory | IntentLabel::Exclusionary | IntentLabel::Restrictive
        )
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            IntentLabel::Discriminatory => "discriminatory",
            IntentLabel::Exclusionary => "exclusionary",
            IntentLabel::Restrictive => "restrictive",
            IntentLabel::Welcoming => "welcoming",
            IntentLabel::Inclusive => "inclusive",
        }
    }
}

/// Ranked labels with confidence scores, best first.
#[derive(Debug, Clone, PartialEq)]
pub struct IntentClassification {
    pub ranked: Vec<(IntentLabel, f64)>,
}

impl IntentClassification {
    pub fn top(&self) -> Option<(IntentLabel, f64)> {
        self.ranked.first().copied()
    }
}

/// Interface to the external semantic capabilities.
///
/// Each capability is independently optional; the `supports_*` flags let the
/// orchestrator skip absent ones without a failed call. Implementations are
/// expected to be slow or absent, never to block the scan: callers apply
/// their own timeout and map it to [`AdvisoryError::Timeout`].
pub trait SemanticAdvisory: Send + Sync {
    /// Vector similarity search over the indexed rule triggers.
    fn supports_semantic(&self) -> bool {
        false
    }

    /// Zero-shot intent classification of sentences.
    fn supports_classification(&self) -> bool {
        false
    }

    /// Generative rewriting of a problematic listing.
    fn supports_revision(&self) -> bool {
        false
    }

    /// Rebuilds the provider's trigger index. Called after every rule
    /// reload; a provider with no index can keep the default no-op.
    fn reindex(&self, _rules: &[Rule]) -> Result<(), AdvisoryError> {
        Ok(())
    }

    /// Best trigger match per sentence, aligned with the input order.
    /// `None` entries mean no candidate for that sentence.
    fn semantic_match(&self, sentences: &[String]) -> Result<Vec<Option<SemanticMatch>>, AdvisoryError> {
        let _ = sentences;
        Err(AdvisoryError::Unavailable("semantic similarity search"))
    }

    /// Ranked intent labels for one sentence.
    fn classify_intent(&self, sentence: &str) -> Result<IntentClassification, AdvisoryError> {
        let _ = sentence;
        Err(AdvisoryError::Unavailable("intent classification"))
    }

    /// A compliant rewrite of the listing text.
    fn suggest_revision(&self, text: &str) -> Result<String, AdvisoryError> {
        let _ = text;
        Err(AdvisoryError::Unavailable("generative revision"))
    }
}

/// Splits text into sentence fragments on `.`, `!`, `?`, and newlines,
/// keeping trimmed fragments longer than `min_chars`.
pub fn split_sentences(text: &str, min_chars: usize) -> Vec<String> {
    text.split(['.', '!', '?', '\n'])
        .map(str::trim)
        .filter(|fragment| fragment.chars().count() > min_chars)
        .map(str::to_string)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_split_sentences_drops_short_fragments() {
        let text = "Great flat. No! Families with children are not welcome here.\nCall now";
        let fragments = split_sentences(text, SEMANTIC_MIN_SENTENCE_CHARS);
        assert_eq!(
            fragments,
            vec![
                "Families with children are not welcome here".to_string(),
            ]
        );
    }

    #[test]
    fn test_split_sentences_stricter_floor() {
        let text = "Adults only. This building is strictly for adults and professionals.";
        let loose = split_sentences(text, SEMANTIC_MIN_SENTENCE_CHARS);
        let strict = split_sentences(text, CLASSIFY_MIN_SENTENCE_CHARS);
        assert_eq!(loose.len(), 2);
        assert_eq!(strict.len(), 1);
    }

    #[test]
    fn test_adverse_labels() {
        assert!(IntentLabel::Discriminatory.is_adverse());
        assert!(IntentLabel::Exclusionary.is_adverse());
        assert!(IntentLabel::Restrictive.is_adverse());
        assert!(!IntentLabel::Welcoming.is_adverse());
        assert!(!IntentLabel::Inclusive.is_adverse());
    }

    #[test]
    fn test_default_trait_methods_report_unavailable() {
        struct Bare;
        impl SemanticAdvisory for Bare {}

        let bare = Bare;
        assert!(!bare.supports_semantic());
        assert!(!bare.supports_classification());
        assert!(!bare.supports_revision());
        assert!(matches!(
            bare.semantic_match(&[]),
            Err(AdvisoryError::Unavailable(_))
        ));
        assert!(bare.reindex(&[]).is_ok());
    }
}

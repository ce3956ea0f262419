//! Fair-housing compliance scan engine.
//!
//! Scans free-text property listings against a merged federal-plus-
//! jurisdiction rule set and returns a scored report of potential
//! fair-housing violations. Detection runs in layers per scan:
//! lexical matching, then an optional semantic similarity pass, then an
//! optional intent-classification pass, then scoring. A rule flagged by one
//! layer is never flagged again by a later layer.

pub mod advisory;
pub mod cache;
pub mod config;
pub mod error;
pub mod jurisdiction;
pub mod matcher;
pub mod rules;

pub use advisory::{AdvisoryError, IntentClassification, IntentLabel, SemanticAdvisory, SemanticMatch, NEURAL_RULE_ID};
pub use cache::ReportCache;
pub use config::AuditorConfig;
pub use error::ConfigError;
pub use rules::{ReloadSummary, RuleStore};

use advisory::{
    split_sentences, CLASSIFY_CONFIDENCE_FLOOR, CLASSIFY_MIN_SENTENCE_CHARS,
    SEMANTIC_MIN_SENTENCE_CHARS,
};
use fairlist_types::{AuditReport, FlaggedItem, Severity};
use std::collections::HashSet;
use std::sync::Arc;
use tracing::{debug, warn};

/// Returned by [`FairHousingAuditor::suggest_fix`] when the revision
/// capability is absent or failed.
pub const MANUAL_REVISION_FALLBACK: &str =
    "Automated rewriting is not available. Revise the listing manually using the per-rule suggestions.";

/// Scan orchestrator. One instance serves concurrent callers for one
/// configured jurisdiction set; scans share the rule store and result cache
/// but touch no other mutable state.
pub struct FairHousingAuditor {
    config: AuditorConfig,
    store: RuleStore,
    cache: ReportCache,
    advisory: Option<Arc<dyn SemanticAdvisory>>,
}

impl FairHousingAuditor {
    /// Builds an auditor without semantic capabilities (rule-only mode).
    pub fn new(config: AuditorConfig) -> Result<Self, ConfigError> {
        let store = RuleStore::load(&config.rules_path, config.jurisdictions.clone())?;
        let cache = ReportCache::new(config.cache_capacity);
        Ok(Self {
            config,
            store,
            cache,
            advisory: None,
        })
    }

    /// Builds an auditor with an injected advisory provider. The provider's
    /// trigger index is built once here and rebuilt on every reload.
    pub fn with_advisory(
        config: AuditorConfig,
        advisory: Arc<dyn SemanticAdvisory>,
    ) -> Result<Self, ConfigError> {
        let mut auditor = Self::new(config)?;
        if let Err(e) = advisory.reindex(&auditor.store.snapshot()) {
            warn!(error = %e, "advisory index build failed, continuing without it");
        }
        auditor.advisory = Some(advisory);
        Ok(auditor)
    }

    pub fn rule_count(&self) -> usize {
        self.store.rule_count()
    }

    pub fn jurisdictions(&self) -> &[String] {
        self.store.jurisdictions()
    }

    /// Scans listing text and returns the scored report.
    ///
    /// With `use_cache`, identical (text, jurisdiction set) pairs return the
    /// memoized report until the next reload. Without it, the call routes
    /// around the cache entirely: no reads, no writes, no eviction pressure.
    pub fn scan(&self, text: &str, use_cache: bool) -> AuditReport {
        if !use_cache {
            return self.scan_uncached(text);
        }
        let key = self.cache.key(text, self.store.jurisdictions());
        if let Some(hit) = self.cache.get(&key) {
            debug!("scan served from cache");
            return hit;
        }
        let report = self.scan_uncached(text);
        self.cache.insert(key, report.clone());
        report
    }

    /// Hot-reloads the rule set from disk, invalidates the result cache,
    /// and rebuilds the advisory trigger index. On failure the previous
    /// rule set and cache stay intact.
    pub fn reload(&self) -> Result<ReloadSummary, ConfigError> {
        let summary = self.store.reload()?;
        self.cache.invalidate();
        if let Some(advisory) = &self.advisory {
            if let Err(e) = advisory.reindex(&self.store.snapshot()) {
                warn!(error = %e, "advisory reindex failed after reload");
            }
        }
        Ok(summary)
    }

    /// Asks the revision capability for a compliant rewrite, degrading to a
    /// fixed manual-revision message when it is absent or fails.
    pub fn suggest_fix(&self, text: &str) -> String {
        let Some(advisory) = &self.advisory else {
            return MANUAL_REVISION_FALLBACK.to_string();
        };
        if !advisory.supports_revision() {
            return MANUAL_REVISION_FALLBACK.to_string();
        }
        match advisory.suggest_revision(text) {
            Ok(revised) => revised,
            Err(e) => {
                warn!(error = %e, "revision capability failed");
                MANUAL_REVISION_FALLBACK.to_string()
            }
        }
    }

    fn scan_uncached(&self, text: &str) -> AuditReport {
        let rules = self.store.snapshot();
        let mut flagged_rule_ids: HashSet<String> = HashSet::new();

        // Layer 1: lexical matching.
        let mut flagged_items =
            matcher::lexical_scan(&rules, text, self.config.fuzzy_threshold, &mut flagged_rule_ids);

        if let Some(advisory) = &self.advisory {
            // Layer 2: semantic similarity over sentences.
            if advisory.supports_semantic() {
                self.semantic_pass(
                    advisory.as_ref(),
                    text,
                    &rules,
                    &mut flagged_items,
                    &mut flagged_rule_ids,
                );
            }
            // Layer 3: intent classification.
            if advisory.supports_classification() {
                self.classification_pass(advisory.as_ref(), text, &mut flagged_items);
            }
        }

        AuditReport::from_items(flagged_items)
    }

    fn semantic_pass(
        &self,
        advisory: &dyn SemanticAdvisory,
        text: &str,
        rules: &[fairlist_types::Rule],
        flagged_items: &mut Vec<FlaggedItem>,
        flagged_rule_ids: &mut HashSet<String>,
    ) {
        let sentences = split_sentences(text, SEMANTIC_MIN_SENTENCE_CHARS);
        if sentences.is_empty() {
            return;
        }
        let matches = match advisory.semantic_match(&sentences) {
            Ok(matches) => matches,
            Err(e) => {
                warn!(error = %e, "semantic search failed, continuing without it");
                return;
            }
        };
        for (sentence, candidate) in sentences.iter().zip(matches) {
            let Some(candidate) = candidate else { continue };
            if candidate.similarity < self.config.similarity_threshold
                || flagged_rule_ids.contains(&candidate.rule_id)
            {
                continue;
            }
            let Some(rule) = rules.iter().find(|r| r.id == candidate.rule_id) else {
                debug!(rule_id = %candidate.rule_id, "semantic match references unknown rule");
                continue;
            };
            let mut item = FlaggedItem::from_rule(rule, &candidate.trigger, sentence);
            item.suggestion.push_str(" (Detected via semantic analysis)");
            flagged_rule_ids.insert(rule.id.clone());
            flagged_items.push(item);
        }
    }

    fn classification_pass(
        &self,
        advisory: &dyn SemanticAdvisory,
        text: &str,
        flagged_items: &mut Vec<FlaggedItem>,
    ) {
        for sentence in split_sentences(text, CLASSIFY_MIN_SENTENCE_CHARS) {
            let classification = match advisory.classify_intent(&sentence) {
                Ok(classification) => classification,
                Err(e) => {
                    warn!(error = %e, "intent classification failed for a sentence");
                    continue;
                }
            };
            let Some((label, confidence)) = classification.top() else {
                continue;
            };
            if label.is_adverse() && confidence > CLASSIFY_CONFIDENCE_FLOOR {
                flagged_items.push(synthetic_intent_flag(&sentence, label, confidence));
                // One synthetic flag per scan keeps near-duplicate neural
                // detections from flooding the report.
                break;
            }
        }
    }
}

/// The single synthetic flag emitted by the classification layer.
fn synthetic_intent_flag(sentence: &str, label: IntentLabel, confidence: f64) -> FlaggedItem {
    let mut found: String = sentence.chars().take(50).collect();
    found.push_str("...");
    FlaggedItem {
        id: NEURAL_RULE_ID.to_string(),
        category: format!("Potential {} language", label.as_str()),
        trigger_words: vec!["(AI Intent Analysis)".to_string()],
        matched_trigger: "(AI Intent Analysis)".to_string(),
        found_word: found,
        severity: Severity::Critical,
        legal_basis: format!(
            "Intent model reported high probability ({confidence:.2}) of {} language.",
            label.as_str()
        ),
        suggestion: "Review tone to ensure it is welcoming and inclusive to all protected classes."
            .to_string(),
    }
}

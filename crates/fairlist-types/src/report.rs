//! Scan reports: flagged items and the scored audit report.

use crate::rule::{Rule, Severity};
use serde::{Deserialize, Serialize};

/// Reports scoring at or above this are considered safe to publish.
pub const SAFE_SCORE_FLOOR: u8 = 70;

/// One detection event. Created during a scan, immutable afterwards.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FlaggedItem {
    /// Id of the rule that fired (or a sentinel id for synthetic flags).
    pub id: String,
    pub category: String,
    /// The rule's full trigger list, for context in the report.
    pub trigger_words: Vec<String>,
    /// The trigger phrase that actually matched.
    pub matched_trigger: String,
    /// The literal token or fragment found in the listing text.
    pub found_word: String,
    pub severity: Severity,
    pub legal_basis: String,
    pub suggestion: String,
}

impl FlaggedItem {
    /// Builds a flag from the rule it violates.
    pub fn from_rule(rule: &Rule, matched_trigger: &str, found_word: &str) -> Self {
        Self {
            id: rule.id.clone(),
            category: rule.category.clone(),
            trigger_words: rule.trigger_words.clone(),
            matched_trigger: matched_trigger.to_string(),
            found_word: found_word.to_string(),
            severity: rule.severity,
            legal_basis: rule.legal_basis.clone(),
            suggestion: rule.suggestion.clone(),
        }
    }
}

/// The result of scanning one listing.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AuditReport {
    /// 0-100. 100 means no flags.
    pub score: u8,
    /// Insertion order is detection order.
    pub flagged_items: Vec<FlaggedItem>,
    /// `score >= SAFE_SCORE_FLOOR`.
    pub is_safe: bool,
}

impl AuditReport {
    /// Scores a set of post-dedup flagged items:
    /// `score = max(0, 100 - 25*criticals - 10*warnings)`.
    pub fn from_items(flagged_items: Vec<FlaggedItem>) -> Self {
        let mut score: u8 = 100;
        for item in &flagged_items {
            score = score.saturating_sub(item.severity.penalty());
        }
        Self {
            score,
            is_safe: score >= SAFE_SCORE_FLOOR,
            flagged_items,
        }
    }
}


#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;

    proptest! {
        /// Score always equals the clamped penalty formula.
        #[test]
        fn score_matches_penalty_formula(
            criticals in 0usize..10,
            warnings in 0usize..10,
        ) {
            let mut items = Vec::new();
            for i in 0..criticals {
                items.push(FlaggedItem {
                    id: format!("C{i}"),
                    category: "X".into(),
                    trigger_words: vec!["x".into()],
                    matched_trigger: "x".into(),
                    found_word: "x".into(),
                    severity: Severity::Critical,
                    legal_basis: "X".into(),
                    suggestion: "X".into(),
                });
            }
            for i in 0..warnings {
                items.push(FlaggedItem {
                    id: format!("W{i}"),
                    category: "X".into(),
                    trigger_words: vec!["x".into()],
                    matched_trigger: "x".into(),
                    found_word: "x".into(),
                    severity: Severity::Warning,
                    legal_basis: "X".into(),
                    suggestion: "X".into(),
                });
            }

            let report = AuditReport::from_items(items);
            let expected = 100i64 - 25 * criticals as i64 - 10 * warnings as i64;
            prop_assert_eq!(report.score as i64, expected.max(0));
            prop_assert_eq!(report.is_safe, report.score >= SAFE_SCORE_FLOOR);
        }
    }
}

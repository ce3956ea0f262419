//! Lexical trigger matching: exact substring/token checks plus a fuzzy
//! edit-distance pass for single tokens.

use fairlist_types::{FlaggedItem, Rule};
use lazy_static::lazy_static;
use regex::Regex;
use std::collections::HashSet;

lazy_static! {
    static ref WORD: Regex = Regex::new(r"\w+").unwrap();
}

/// Lowercased word tokens of the input text.
pub fn tokenize(text: &str) -> Vec<String> {
    let lower = text.to_lowercase();
    WORD.find_iter(&lower).map(|m| m.as_str().to_string()).collect()
}

/// Tests one trigger phrase against the text. Returns the literal fragment
/// that matched, or `None`.
///
/// Multi-word triggers and triggers shorter than 4 characters are excluded
/// from fuzzy comparison; common short words would otherwise produce false
/// positives. For those, only an exact substring (multi-word) or exact token
/// match counts.
fn match_trigger(
    trigger: &str,
    text_lower: &str,
    tokens: &[String],
    fuzzy_threshold: f64,
) -> Option<String> {
    let trigger = trigger.to_lowercase();
    if trigger.contains(' ') {
        return text_lower.contains(&trigger).then(|| trigger.clone());
    }
    if trigger.chars().count() < 4 {
        return tokens.iter().find(|token| **token == trigger).cloned();
    }
    tokens
        .iter()
        .find(|token| strsim::normalized_levenshtein(&trigger, token) >= fuzzy_threshold)
        .cloned()
}

/// Runs the lexical pass over every rule not yet flagged. The first trigger
/// that matches flags the rule and the matcher moves on; no rule is flagged
/// twice. Output order follows rule-set iteration order.
pub fn lexical_scan(
    rules: &[Rule],
    text: &str,
    fuzzy_threshold: f64,
    flagged_rule_ids: &mut HashSet<String>,
) -> Vec<FlaggedItem> {
    let text_lower = text.to_lowercase();
    let tokens = tokenize(text);
    let mut items = Vec::new();

    for rule in rules {
        if flagged_rule_ids.contains(&rule.id) {
            continue;
        }
        for trigger in &rule.trigger_words {
            if let Some(found) = match_trigger(trigger, &text_lower, &tokens, fuzzy_threshold) {
                items.push(FlaggedItem::from_rule(rule, trigger, &found));
                flagged_rule_ids.insert(rule.id.clone());
                break;
            }
        }
    }

    items
}


#[cfg(test)]
mod proptests {
    use super::*;
    use fairlist_types::Severity;
    use proptest::prelude::*;

    fn fixture_rules() -> Vec<Rule> {
        let mk = |id: &str, triggers: &[&str], severity| Rule {
            id: id.to_string(),
            category: "Test".to_string(),
            trigger_words: triggers.iter().map(|t| t.to_string()).collect(),
            severity,
            legal_basis: "Test Act".to_string(),
            suggestion: "Rephrase.".to_string(),
        };
        vec![
            mk("A", &["no children", "kids", "childless"], Severity::Critical),
            mk("B", &["adults only", "adult"], Severity::Warning),
            mk("C", &["christian"], Severity::Critical),
        ]
    }

    proptest! {
        /// No rule id ever appears twice in a lexical pass.
        #[test]
        fn no_rule_flagged_twice(text in ".{0,300}") {
            let rules = fixture_rules();
            let mut flagged = HashSet::new();
            let items = lexical_scan(&rules, &text, 0.85, &mut flagged);
            let mut seen = HashSet::new();
            for item in &items {
                prop_assert!(seen.insert(item.id.clone()), "duplicate flag for {}", item.id);
            }
        }

        /// The flagged-id set returned through the accumulator matches the items.
        #[test]
        fn accumulator_matches_output(text in "[a-z ]{0,200}") {
            let rules = fixture_rules();
            let mut flagged = HashSet::new();
            let items = lexical_scan(&rules, &text, 0.85, &mut flagged);
            let ids: HashSet<String> = items.iter().map(|i| i.id.clone()).collect();
            prop_assert_eq!(ids, flagged);
        }
    }
}

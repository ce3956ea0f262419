//! Rule definitions loaded from the jurisdiction rule files.

use serde::{Deserialize, Serialize};

/// Severity of a violation, with its fixed score penalty.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Severity {
    Critical,
    Warning,
}

impl Severity {
    /// Points deducted from the 100-point compliance score per flagged rule.
    pub fn penalty(&self) -> u8 {
        match self {
            Severity::Critical => 25,
            Severity::Warning => 10,
        }
    }
}

impl std::fmt::Display for Severity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Severity::Critical => write!(f, "Critical"),
            Severity::Warning => write!(f, "Warning"),
        }
    }
}

/// A single fair-housing rule. Immutable once loaded; the rule store is
/// the only component that constructs these.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Rule {
    /// Globally unique identifier, e.g. "FHA-FAM-001".
    pub id: String,
    /// Protected-class label, e.g. "Familial Status".
    pub category: String,
    /// Ordered phrases whose presence in a listing flags this rule.
    pub trigger_words: Vec<String>,
    pub severity: Severity,
    /// Statute or ordinance citation backing the rule.
    pub legal_basis: String,
    /// Remediation text shown to the listing author.
    pub suggestion: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_severity_penalties() {
        assert_eq!(Severity::Critical.penalty(), 25);
        assert_eq!(Severity::Warning.penalty(), 10);
    }

    #[test]
    fn test_rule_deserializes_from_json() {
        let json = r#"{
            "id": "FHA-FAM-001",
            "category": "Familial Status",
            "trigger_words": ["no children", "adults only"],
            "severity": "Critical",
            "legal_basis": "42 U.S.C. § 3604(c)",
            "suggestion": "Remove restrictions on children."
        }"#;
        let rule: Rule = serde_json::from_str(json).unwrap();
        assert_eq!(rule.id, "FHA-FAM-001");
        assert_eq!(rule.severity, Severity::Critical);
        assert_eq!(rule.trigger_words.len(), 2);
    }

    #[test]
    fn test_unknown_severity_rejected() {
        let json = r#"{
            "id": "X",
            "category": "X",
            "trigger_words": ["x"],
            "severity": "Fatal",
            "legal_basis": "X",
            "suggestion": "X"
        }"#;
        assert!(serde_json::from_str::<Rule>(json).is_err());
    }
}

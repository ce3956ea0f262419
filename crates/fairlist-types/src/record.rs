//! Persisted audit records with tamper-evident signatures.

use crate::report::AuditReport;
use crate::rule::Severity;
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};

/// One violation as stored in a persisted record. Only the identifying
/// fields survive condensation; trigger lists and suggestions do not.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CondensedViolation {
    pub id: String,
    pub category: String,
    pub severity: Severity,
    pub found_word: String,
}

/// The condensed form of an [`AuditReport`] embedded in a record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CondensedReport {
    pub score: u8,
    pub is_safe: bool,
    pub violations_count: usize,
    pub violations: Vec<CondensedViolation>,
}

impl From<&AuditReport> for CondensedReport {
    fn from(report: &AuditReport) -> Self {
        Self {
            score: report.score,
            is_safe: report.is_safe,
            violations_count: report.flagged_items.len(),
            violations: report
                .flagged_items
                .iter()
                .map(|item| CondensedViolation {
                    id: item.id.clone(),
                    category: item.category.clone(),
                    severity: item.severity,
                    found_word: item.found_word.clone(),
                })
                .collect(),
        }
    }
}

/// A signed, persisted summary of one scan. The raw listing text is never
/// stored, only its hash and length. Records are immutable once written;
/// corrections require a new record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AuditRecord {
    pub audit_id: String,
    /// RFC 3339 UTC timestamp of record creation.
    pub timestamp: String,
    pub user_id: String,
    /// SHA-256 hex digest of the scanned text.
    pub text_hash: String,
    pub text_length: usize,
    pub report: CondensedReport,
    /// Free-form caller metadata.
    pub metadata: serde_json::Value,
    pub version: String,
    /// SHA-256 over the canonical serialization of every other field.
    pub signature: String,
}

impl AuditRecord {
    /// Computes the signature over the canonical JSON form of the record
    /// with the `signature` field removed. serde_json's map type is
    /// BTreeMap-backed, so object keys serialize in sorted order and the
    /// serialization is deterministic.
    pub fn compute_signature(&self) -> Result<String, serde_json::Error> {
        let mut value = serde_json::to_value(self)?;
        if let Some(object) = value.as_object_mut() {
            object.remove("signature");
        }
        let canonical = serde_json::to_string(&value)?;
        let mut hasher = Sha256::new();
        hasher.update(canonical.as_bytes());
        Ok(hex::encode(hasher.finalize()))
    }

    /// True iff the stored signature matches a fresh recomputation.
    /// Any field mutation after signing makes this false.
    pub fn verify(&self) -> bool {
        if self.signature.is_empty() {
            return false;
        }
        match self.compute_signature() {
            Ok(expected) => expected == self.signature,
            Err(_) => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::report::FlaggedItem;

    fn sample_record() -> AuditRecord {
        let report = AuditReport::from_items(vec![FlaggedItem {
            id: "FHA-FAM-001".into(),
            category: "Familial Status".into(),
            trigger_words: vec!["no children".into()],
            matched_trigger: "no children".into(),
            found_word: "no children".into(),
            severity: Severity::Critical,
            legal_basis: "42 U.S.C. § 3604(c)".into(),
            suggestion: "Remove restrictions on children.".into(),
        }]);
        let mut record = AuditRecord {
            audit_id: "test-audit-id".into(),
            timestamp: "2026-01-15T10:00:00+00:00".into(),
            user_id: "anonymous".into(),
            text_hash: crate::hash_text("No children allowed."),
            text_length: 20,
            report: CondensedReport::from(&report),
            metadata: serde_json::json!({}),
            version: "1.0.0".into(),
            signature: String::new(),
        };
        record.signature = record.compute_signature().unwrap();
        record
    }

    #[test]
    fn test_fresh_record_verifies() {
        assert!(sample_record().verify());
    }

    #[test]
    fn test_score_tampering_detected() {
        let mut record = sample_record();
        record.report.score = 100;
        assert!(!record.verify());
    }

    #[test]
    fn test_metadata_tampering_detected() {
        let mut record = sample_record();
        record.metadata = serde_json::json!({"approved_by": "nobody"});
        assert!(!record.verify());
    }

    #[test]
    fn test_empty_signature_fails() {
        let mut record = sample_record();
        record.signature = String::new();
        assert!(!record.verify());
    }

    #[test]
    fn test_signature_survives_json_roundtrip() {
        let record = sample_record();
        let json = serde_json::to_string_pretty(&record).unwrap();
        let restored: AuditRecord = serde_json::from_str(&json).unwrap();
        assert!(restored.verify());
        assert_eq!(record, restored);
    }

    #[test]
    fn test_condensed_report_counts_items() {
        let record = sample_record();
        assert_eq!(record.report.violations_count, 1);
        assert_eq!(record.report.violations[0].id, "FHA-FAM-001");
        assert_eq!(record.report.score, 75);
    }
}

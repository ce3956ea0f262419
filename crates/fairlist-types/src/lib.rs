//! Shared data model for the fair-housing listing auditor:
//! rules, scan reports, and signed audit records.

pub mod record;
pub mod report;
pub mod rule;

pub use record::{AuditRecord, CondensedReport, CondensedViolation};
pub use report::{AuditReport, FlaggedItem, SAFE_SCORE_FLOOR};
pub use rule::{Rule, Severity};

use sha2::{Digest, Sha256};

/// SHA-256 hex digest of listing text. Used for privacy-preserving
/// record keeping and cache keys; the raw text is never persisted.
pub fn hash_text(text: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(text.as_bytes());
    hex::encode(hasher.finalize())
}

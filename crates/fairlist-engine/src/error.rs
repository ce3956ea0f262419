//! Engine error taxonomy.
//!
//! Only base rule-set problems are fatal. Jurisdiction overlay problems are
//! logged and skipped by the rule store; advisory capability failures are
//! typed ([`crate::advisory::AdvisoryError`]) and recovered at the call site.

use std::path::PathBuf;
use thiserror::Error;

/// Fatal configuration errors. Raised when the base rule file is missing or
/// malformed, or when a base rule entry fails validation. Aborts auditor
/// construction (and leaves the previous rule set active on reload).
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("rules file not found at {0:?}")]
    MissingRuleFile(PathBuf),

    #[error("failed to read rules file {path:?}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse rules file {path:?}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("invalid rule in {path:?}: {reason}")]
    InvalidRule { path: PathBuf, reason: String },
}

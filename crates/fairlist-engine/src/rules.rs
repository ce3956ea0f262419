//! Rule store: loads, merges, validates, and atomically swaps rule sets.

use crate::error::ConfigError;
use crate::jurisdiction;
use fairlist_types::Rule;
use parking_lot::RwLock;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tracing::{debug, info, warn};

/// Counts reported by a hot reload.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ReloadSummary {
    pub old_count: usize,
    pub new_count: usize,
}

/// Owns the active rule set for the lifetime of an auditor instance.
///
/// The merged set is the base rules followed by each jurisdiction's rules in
/// request order. Duplicate rule ids across overlays are retained here;
/// deduplication happens at scan time. `reload` swaps the whole
/// `Arc<Vec<Rule>>` under a write lock, so concurrent readers always see a
/// complete pre- or post-reload set.
#[derive(Debug)]
pub struct RuleStore {
    base_path: PathBuf,
    jurisdictions: Vec<String>,
    active: RwLock<Arc<Vec<Rule>>>,
}

impl RuleStore {
    /// Loads the base rule file plus the requested jurisdiction overlays.
    /// Fails only on base-file problems; a missing or malformed jurisdiction
    /// file is logged and skipped.
    pub fn load(base_path: impl Into<PathBuf>, jurisdictions: Vec<String>) -> Result<Self, ConfigError> {
        let base_path = base_path.into();
        let rules = load_rule_set(&base_path, &jurisdictions)?;
        info!(
            total = rules.len(),
            jurisdictions = jurisdictions.len(),
            "loaded rule set"
        );
        Ok(Self {
            base_path,
            jurisdictions,
            active: RwLock::new(Arc::new(rules)),
        })
    }

    /// A consistent snapshot of the active rule set. Cheap to clone; holds
    /// no lock while the caller iterates.
    pub fn snapshot(&self) -> Arc<Vec<Rule>> {
        Arc::clone(&self.active.read())
    }

    pub fn rule_count(&self) -> usize {
        self.active.read().len()
    }

    pub fn jurisdictions(&self) -> &[String] {
        &self.jurisdictions
    }

    /// Re-runs the load against the current configuration and swaps the
    /// active set. On failure the previous set stays active.
    pub fn reload(&self) -> Result<ReloadSummary, ConfigError> {
        let rules = load_rule_set(&self.base_path, &self.jurisdictions)?;
        let new_count = rules.len();
        let old_count = {
            let mut active = self.active.write();
            let old = active.len();
            *active = Arc::new(rules);
            old
        };
        info!(old_count, new_count, "rules reloaded");
        Ok(ReloadSummary { old_count, new_count })
    }
}

fn load_rule_set(base_path: &Path, jurisdictions: &[String]) -> Result<Vec<Rule>, ConfigError> {
    let mut rules = parse_rule_file(base_path)?;

    let base_dir = base_path.parent().unwrap_or_else(|| Path::new("."));
    for key in jurisdictions {
        let Some(relative) = jurisdiction::rule_file(key) else {
            debug!(jurisdiction = %key, "unknown jurisdiction key, skipping");
            continue;
        };
        let path = base_dir.join(relative);
        if !path.exists() {
            warn!(jurisdiction = %key, path = %path.display(), "jurisdiction rules not found, skipping");
            continue;
        }
        match parse_rule_file(&path) {
            Ok(overlay) => {
                info!(jurisdiction = %key, count = overlay.len(), "loaded jurisdiction rules");
                rules.extend(overlay);
            }
            Err(e) => {
                warn!(jurisdiction = %key, error = %e, "failed to load jurisdiction rules, skipping");
            }
        }
    }

    Ok(rules)
}

/// Parses and validates one rule file. Every entry must carry a non-empty id
/// and at least one trigger phrase; malformed entries fail the whole file.
fn parse_rule_file(path: &Path) -> Result<Vec<Rule>, ConfigError> {
    if !path.exists() {
        return Err(ConfigError::MissingRuleFile(path.to_path_buf()));
    }
    let raw = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    let rules: Vec<Rule> = serde_json::from_str(&raw).map_err(|source| ConfigError::Parse {
        path: path.to_path_buf(),
        source,
    })?;

    for (index, rule) in rules.iter().enumerate() {
        if rule.id.trim().is_empty() {
            return Err(ConfigError::InvalidRule {
                path: path.to_path_buf(),
                reason: format!("rule at index {index} has an empty id"),
            });
        }
        if rule.trigger_words.iter().all(|t| t.trim().is_empty()) {
            return Err(ConfigError::InvalidRule {
                path: path.to_path_buf(),
                reason: format!("rule '{}' has no usable trigger phrases", rule.id),
            });
        }
    }

    Ok(rules)
}

//! Tamper-evident audit trail for compliance scan results.
//!
//! Each scan can be condensed into a signed [`AuditRecord`] and persisted
//! as one JSON file under a UTC date partition:
//! `<storage_dir>/YYYY-MM-DD/<audit_id>.json`. Records never change after
//! they are written; corrections are new records. Retrieval verifies the
//! signature and treats any failure as "not found".

use chrono::Utc;
use fairlist_types::{AuditRecord, AuditReport, CondensedReport};
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::{info, warn};
use uuid::Uuid;

pub mod certificate;

pub use certificate::render_certificate;

/// Schema version stamped into every record.
pub const RECORD_VERSION: &str = "1.0.0";

/// User id recorded when the caller supplies none.
pub const ANONYMOUS_USER: &str = "anonymous";

/// Failures while creating or persisting a record. Write failures are fatal
/// to that `create_record` call; the caller must know persistence did not
/// happen. Read-side failures never surface as errors.
#[derive(Debug, Error)]
pub enum PersistenceError {
    #[error("failed to create audit partition {path:?}")]
    CreateDir {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to serialize audit record {audit_id}")]
    Serialize {
        audit_id: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("failed to write audit record {path:?}")]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("audit record {0} not found")]
    RecordNotFound(String),

    #[error("failed to render certificate for {audit_id}")]
    Render {
        audit_id: String,
        #[source]
        source: lopdf::Error,
    },
}

/// Creates, persists, retrieves, and verifies audit records.
///
/// Per-record writes are independent; uuid-v4 ids make them collision-free
/// without cross-call coordination.
pub struct AuditTrail {
    storage_dir: PathBuf,
}

impl AuditTrail {
    /// Opens (creating if needed) the partition root.
    pub fn new(storage_dir: impl Into<PathBuf>) -> Result<Self, PersistenceError> {
        let storage_dir = storage_dir.into();
        fs::create_dir_all(&storage_dir).map_err(|source| PersistenceError::CreateDir {
            path: storage_dir.clone(),
            source,
        })?;
        info!(path = %storage_dir.display(), "audit trail initialized");
        Ok(Self { storage_dir })
    }

    /// Builds, signs, and persists a record for one scan. Only the text's
    /// hash and length are stored, never the text itself.
    pub fn create_record(
        &self,
        text: &str,
        report: &AuditReport,
        user_id: Option<&str>,
        metadata: Option<serde_json::Value>,
    ) -> Result<AuditRecord, PersistenceError> {
        let mut record = AuditRecord {
            audit_id: Uuid::new_v4().to_string(),
            timestamp: Utc::now().to_rfc3339(),
            user_id: user_id.unwrap_or(ANONYMOUS_USER).to_string(),
            text_hash: fairlist_types::hash_text(text),
            text_length: text.chars().count(),
            report: CondensedReport::from(report),
            metadata: metadata.unwrap_or_else(|| serde_json::json!({})),
            version: RECORD_VERSION.to_string(),
            signature: String::new(),
        };
        record.signature =
            record
                .compute_signature()
                .map_err(|source| PersistenceError::Serialize {
                    audit_id: record.audit_id.clone(),
                    source,
                })?;

        self.save(&record)?;
        info!(audit_id = %record.audit_id, "created audit record");
        Ok(record)
    }

    /// Recomputes the signature over every field except `signature`.
    pub fn verify_record(&self, record: &AuditRecord) -> bool {
        record.verify()
    }

    /// Looks a record up across date partitions. A record that is missing,
    /// unreadable, or fails verification is "not found"; an integrity
    /// failure is additionally logged since it indicates tampering or
    /// corruption.
    pub fn get_record(&self, audit_id: &str) -> Option<AuditRecord> {
        let partitions = fs::read_dir(&self.storage_dir).ok()?;
        for entry in partitions.flatten() {
            let partition = entry.path();
            if !partition.is_dir() {
                continue;
            }
            let path = partition.join(format!("{audit_id}.json"));
            if !path.exists() {
                continue;
            }
            let record = match read_record(&path) {
                Ok(record) => record,
                Err(e) => {
                    warn!(%audit_id, error = %e, "audit record unreadable");
                    return None;
                }
            };
            if record.verify() {
                return Some(record);
            }
            warn!(%audit_id, "audit record failed integrity check");
            return None;
        }
        None
    }

    /// All verified records in one date partition (`YYYY-MM-DD`). Records
    /// that fail to read or verify are skipped, not fatal.
    pub fn get_records_by_date(&self, date: &str) -> Vec<AuditRecord> {
        let partition = self.storage_dir.join(date);
        let Ok(entries) = fs::read_dir(&partition) else {
            return Vec::new();
        };

        let mut records = Vec::new();
        for entry in entries.flatten() {
            let path = entry.path();
            if path.extension().and_then(|e| e.to_str()) != Some("json") {
                continue;
            }
            match read_record(&path) {
                Ok(record) if record.verify() => records.push(record),
                Ok(record) => {
                    warn!(audit_id = %record.audit_id, "skipping record that failed integrity check");
                }
                Err(e) => {
                    warn!(path = %path.display(), error = %e, "skipping unreadable record");
                }
            }
        }
        records
    }

    /// Renders the record with `audit_id` into a PDF compliance certificate
    /// and writes it to `output_path`, defaulting to
    /// `<storage_dir>/compliance_certificate_<audit_id>.pdf`. The record is
    /// re-verified on the way out; a missing or tampered record fails with
    /// [`PersistenceError::RecordNotFound`].
    pub fn generate_certificate(
        &self,
        audit_id: &str,
        output_path: Option<&Path>,
    ) -> Result<PathBuf, PersistenceError> {
        let record = self
            .get_record(audit_id)
            .ok_or_else(|| PersistenceError::RecordNotFound(audit_id.to_string()))?;
        let bytes = certificate::render_certificate(&record).map_err(|source| {
            PersistenceError::Render {
                audit_id: audit_id.to_string(),
                source,
            }
        })?;

        let path = match output_path {
            Some(path) => path.to_path_buf(),
            None => self
                .storage_dir
                .join(format!("compliance_certificate_{audit_id}.pdf")),
        };
        fs::write(&path, bytes).map_err(|source| PersistenceError::Write {
            path: path.clone(),
            source,
        })?;
        info!(%audit_id, path = %path.display(), "generated compliance certificate");
        Ok(path)
    }

    fn save(&self, record: &AuditRecord) -> Result<(), PersistenceError> {
        let partition = self.storage_dir.join(Utc::now().format("%Y-%m-%d").to_string());
        fs::create_dir_all(&partition).map_err(|source| PersistenceError::CreateDir {
            path: partition.clone(),
            source,
        })?;

        let body = serde_json::to_string_pretty(record).map_err(|source| {
            PersistenceError::Serialize {
                audit_id: record.audit_id.clone(),
                source,
            }
        })?;
        let path = partition.join(format!("{}.json", record.audit_id));
        fs::write(&path, body).map_err(|source| PersistenceError::Write { path, source })
    }
}

fn read_record(path: &Path) -> Result<AuditRecord, Box<dyn std::error::Error>> {
    let raw = fs::read_to_string(path)?;
    Ok(serde_json::from_str(&raw)?)
}

//! Bounded, content-addressed cache of scan reports.

use fairlist_types::AuditReport;
use lru::LruCache;
use parking_lot::RwLock;
use sha2::{Digest, Sha256};
use std::num::NonZeroUsize;
use std::sync::atomic::{AtomicU64, Ordering};

/// LRU cache of reports keyed by a hash over (text, sorted jurisdictions).
///
/// The write lock covers the whole get-then-promote and insert-then-evict
/// sequences, so racing callers cannot lose an entry or double-count
/// capacity. Callers that bypass the cache simply never touch it; bypassing
/// neither pollutes nor evicts.
///
/// Keys fold in a generation counter that `invalidate` bumps. A scan that
/// computed its key before an invalidation can still insert afterwards, but
/// under the stale generation; post-invalidation lookups hash with the new
/// generation and can never hit it.
pub struct ReportCache {
    inner: RwLock<LruCache<String, AuditReport>>,
    generation: AtomicU64,
}

impl ReportCache {
    pub fn new(capacity: usize) -> Self {
        let capacity = NonZeroUsize::new(capacity).unwrap_or(NonZeroUsize::MIN);
        Self {
            inner: RwLock::new(LruCache::new(capacity)),
            generation: AtomicU64::new(0),
        }
    }

    /// Content key for a scan: SHA-256 over the current generation, the
    /// text, and the sorted jurisdiction list, so jurisdiction order never
    /// splits cache entries. Compute once per scan; get and insert with the
    /// same key.
    pub fn key(&self, text: &str, jurisdictions: &[String]) -> String {
        let mut sorted: Vec<&str> = jurisdictions.iter().map(String::as_str).collect();
        sorted.sort_unstable();
        let mut hasher = Sha256::new();
        hasher.update(self.generation.load(Ordering::Acquire).to_le_bytes());
        hasher.update(text.as_bytes());
        hasher.update(b":");
        hasher.update(sorted.join(",").as_bytes());
        hex::encode(hasher.finalize())
    }

    pub fn get(&self, key: &str) -> Option<AuditReport> {
        self.inner.write().get(key).cloned()
    }

    pub fn insert(&self, key: String, report: AuditReport) {
        self.inner.write().put(key, report);
    }

    /// Drops every entry and bumps the key generation. Called after a rule
    /// reload, since the same text could legitimately score differently
    /// against the new rule set; the generation bump also strands any insert
    /// from a scan that started before the reload.
    pub fn invalidate(&self) {
        self.generation.fetch_add(1, Ordering::AcqRel);
        self.inner.write().clear();
    }

    pub fn len(&self) -> usize {
        self.inner.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.inner.read().is_empty()
    }
}

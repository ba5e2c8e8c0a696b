//! Time-bounded memoization of ranked query results.
//!
//! Keyed by the exact `(query, k)` pair — no fuzzy or partial-key
//! matching. Entries expire after a TTL fixed at construction and are
//! evicted lazily on the next lookup; there is no background sweep.
//!
//! The cache is best-effort by contract: a miss always falls through to a
//! full index search, and an internal failure (a poisoned lock) is
//! absorbed and logged rather than propagated. A broken cache may slow a
//! query down, never prevent a correct answer.

use std::collections::HashMap;
use std::time::{Duration, Instant};

use tracing::debug;

use crate::models::RankedResult;

/// Default entry lifetime: one hour.
pub const DEFAULT_TTL: Duration = Duration::from_secs(3600);

struct CacheEntry {
    results: Vec<RankedResult>,
    created_at: Instant,
}

/// TTL-bounded `(query, k)` → ranked results cache.
pub struct RelevanceCache {
    ttl: Duration,
    entries: std::sync::RwLock<HashMap<(String, usize), CacheEntry>>,
}

impl RelevanceCache {
    pub fn new(ttl: Duration) -> Self {
        Self {
            ttl,
            entries: std::sync::RwLock::new(HashMap::new()),
        }
    }

    /// Look up a fresh entry; an expired entry is removed and reported as
    /// a miss.
    pub fn get(&self, query: &str, k: usize) -> Option<Vec<RankedResult>> {
        let key = (query.to_string(), k);
        let mut entries = self.entries.write().unwrap_or_else(|e| e.into_inner());

        match entries.get(&key) {
            Some(entry) if entry.created_at.elapsed() < self.ttl => {
                debug!(query, k, "cache hit");
                Some(entry.results.clone())
            }
            Some(_) => {
                entries.remove(&key);
                debug!(query, k, "cache entry expired, evicted");
                None
            }
            None => None,
        }
    }

    /// Store results for `(query, k)`, overwriting any previous entry.
    pub fn put(&self, query: &str, k: usize, results: Vec<RankedResult>) {
        let mut entries = self.entries.write().unwrap_or_else(|e| e.into_inner());
        entries.insert(
            (query.to_string(), k),
            CacheEntry {
                results,
                created_at: Instant::now(),
            },
        );
    }

    /// Number of stored entries, expired or not (expiry is lazy).
    pub fn len(&self) -> usize {
        let entries = self.entries.read().unwrap_or_else(|e| e.into_inner());
        entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl Default for RelevanceCache {
    fn default() -> Self {
        Self::new(DEFAULT_TTL)
    }
}

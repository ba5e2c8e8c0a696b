//! Multi-source event aggregation with deduplication.
//!
//! Calls every registered [`EventSource`], merges the results, drops
//! duplicates by the `(name, date, venue)` identity key, and sorts the
//! merged list ascending by raw date string. A failing source is logged
//! and contributes zero events; the pass never aborts on a single source
//! failure, and an all-sources-empty result is success, not an error.

use std::collections::HashSet;

use sha2::{Digest, Sha256};
use tracing::{info, warn};

use eventide_core::EventRecord;

use crate::sources::SourceRegistry;

pub struct Aggregator {
    registry: SourceRegistry,
    case_insensitive_dedup: bool,
}

impl Aggregator {
    pub fn new(registry: SourceRegistry, case_insensitive_dedup: bool) -> Self {
        Self {
            registry,
            case_insensitive_dedup,
        }
    }

    pub fn registry(&self) -> &SourceRegistry {
        &self.registry
    }

    /// Collect events for a location from every source.
    ///
    /// First-seen wins on identity collisions; later duplicates from other
    /// sources are silently dropped. Lexicographic ordering on the raw
    /// date string is correct for normalized ISO-8601 dates; the `"N/A"`
    /// sentinel sorts arbitrarily, which is accepted.
    pub async fn collect(&self, location: &str, interests: &[String]) -> Vec<EventRecord> {
        let mut merged: Vec<EventRecord> = Vec::new();
        let mut seen: HashSet<[u8; 32]> = HashSet::new();

        for source in self.registry.iter() {
            match source.fetch(location, interests).await {
                Ok(events) => {
                    info!(source = source.name(), count = events.len(), "fetched events");
                    for event in events {
                        let key = identity_hash(&event, self.case_insensitive_dedup);
                        if seen.insert(key) {
                            merged.push(event);
                        }
                    }
                }
                Err(e) => {
                    warn!(source = source.name(), error = %e, "source unavailable, contributing zero events");
                }
            }
        }

        merged.sort_by(|a, b| a.date.cmp(&b.date));
        info!(total = merged.len(), "aggregated unique events");
        merged
    }
}

/// SHA-256 of the event's identity key.
fn identity_hash(event: &EventRecord, case_insensitive: bool) -> [u8; 32] {
    let mut hasher = Sha256::new();
    hasher.update(event.identity_key(case_insensitive).as_bytes());
    hasher.finalize().into()
}

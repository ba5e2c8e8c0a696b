//! In-memory vector index over event records.
//!
//! Append-only brute-force k-NN store: each entry is an [`EventRecord`]
//! plus its L2-normalized embedding. The index has an explicit two-state
//! lifecycle — `Empty` until the first non-empty insertion, `Ready`
//! afterwards — and `search` checks that state before acting instead of
//! relying on an error raised from an underlying store.
//!
//! Entries are never mutated or removed after insertion, and nothing is
//! persisted across restarts (intentional: the index is rebuilt per
//! process). Interior locking follows the in-memory store pattern: a
//! single `RwLock` guards all entries, so a shared index is safe to use
//! from concurrent `insert`/`search` callers.

use std::sync::RwLock;

use tracing::{debug, info};

use crate::embedding::{cosine_distance, l2_normalize};
use crate::error::RecommendError;
use crate::models::EventRecord;

/// Index lifecycle state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum IndexState {
    /// No events inserted yet; a search is a caller error.
    Empty,
    /// At least one event indexed; searches are valid even if they match poorly.
    Ready,
}

/// An event plus its embedding, owned exclusively by the index.
struct IndexedEvent {
    event: EventRecord,
    vector: Vec<f32>,
}

struct Inner {
    state: IndexState,
    dims: usize,
    entries: Vec<IndexedEvent>,
}

/// Append-only in-memory vector index.
pub struct VectorIndex {
    inner: RwLock<Inner>,
}

impl VectorIndex {
    pub fn new() -> Self {
        Self {
            inner: RwLock::new(Inner {
                state: IndexState::Empty,
                dims: 0,
                entries: Vec::new(),
            }),
        }
    }

    /// Whether at least one event has been indexed.
    pub fn is_ready(&self) -> bool {
        let inner = self.inner.read().unwrap_or_else(|e| e.into_inner());
        inner.state == IndexState::Ready
    }

    /// Number of indexed events.
    pub fn len(&self) -> usize {
        let inner = self.inner.read().unwrap_or_else(|e| e.into_inner());
        inner.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Insert a batch of events with their embedding vectors.
    ///
    /// The first non-empty batch builds the index and fixes its
    /// dimensionality; later batches append incrementally without a
    /// rebuild. An empty batch is a no-op that leaves the state unchanged.
    /// Vectors are L2-normalized before storage.
    ///
    /// # Errors
    ///
    /// [`RecommendError::DimensionMismatch`] if `events` and `vectors`
    /// disagree in length, or any vector's length disagrees with the
    /// established dimensionality.
    pub fn insert(
        &self,
        events: Vec<EventRecord>,
        vectors: Vec<Vec<f32>>,
    ) -> Result<usize, RecommendError> {
        if events.is_empty() {
            return Ok(0);
        }
        if events.len() != vectors.len() {
            return Err(RecommendError::DimensionMismatch {
                expected: events.len(),
                got: vectors.len(),
            });
        }

        let mut inner = self.inner.write().unwrap_or_else(|e| e.into_inner());

        let dims = if inner.state == IndexState::Empty {
            vectors[0].len()
        } else {
            inner.dims
        };
        for vec in &vectors {
            if vec.len() != dims {
                return Err(RecommendError::DimensionMismatch {
                    expected: dims,
                    got: vec.len(),
                });
            }
        }

        let count = events.len();
        for (event, mut vector) in events.into_iter().zip(vectors) {
            l2_normalize(&mut vector);
            inner.entries.push(IndexedEvent { event, vector });
        }
        inner.dims = dims;
        inner.state = IndexState::Ready;

        info!(inserted = count, total = inner.entries.len(), "indexed events");
        Ok(count)
    }

    /// Return the `k` nearest events to `query_vec` by cosine distance,
    /// ascending (smaller = more similar).
    ///
    /// If `k` exceeds the number of indexed events, all of them are
    /// returned.
    ///
    /// # Errors
    ///
    /// - [`RecommendError::NotIndexed`] if no events were ever inserted.
    /// - [`RecommendError::DimensionMismatch`] if the query vector's
    ///   length disagrees with the index dimensionality.
    pub fn search(
        &self,
        query_vec: &[f32],
        k: usize,
    ) -> Result<Vec<(EventRecord, f64)>, RecommendError> {
        let inner = self.inner.read().unwrap_or_else(|e| e.into_inner());

        if inner.state == IndexState::Empty {
            return Err(RecommendError::NotIndexed);
        }
        if query_vec.len() != inner.dims {
            return Err(RecommendError::DimensionMismatch {
                expected: inner.dims,
                got: query_vec.len(),
            });
        }

        let mut query = query_vec.to_vec();
        l2_normalize(&mut query);

        let mut scored: Vec<(EventRecord, f64)> = inner
            .entries
            .iter()
            .map(|entry| {
                // f32 rounding can push similarity a hair past 1.0; clamp so
                // distances (and the scores derived from them) stay in range.
                let distance = cosine_distance(&query, &entry.vector).max(0.0) as f64;
                (entry.event.clone(), distance)
            })
            .collect();

        scored.sort_by(|a, b| a.1.partial_cmp(&b.1).unwrap_or(std::cmp::Ordering::Equal));
        scored.truncate(k);

        debug!(k, returned = scored.len(), "vector search");
        Ok(scored)
    }
}

impl Default for VectorIndex {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn event(name: &str) -> EventRecord {
        EventRecord {
            name: name.to_string(),
            description: String::new(),
            date: "2026-09-01".to_string(),
            location: "Test City".to_string(),
            postal_code: "00000".to_string(),
            categories: Vec::new(),
            url: None,
            price: None,
            venue: None,
        }
    }

    #[test]
    fn test_search_before_insert_is_not_indexed() {
        let index = VectorIndex::new();
        assert!(!index.is_ready());
        let err = index.search(&[1.0, 0.0], 3).unwrap_err();
        assert!(matches!(err, RecommendError::NotIndexed));
    }

    #[test]
    fn test_empty_insert_keeps_empty_state() {
        let index = VectorIndex::new();
        assert_eq!(index.insert(Vec::new(), Vec::new()).unwrap(), 0);
        assert!(!index.is_ready());
        assert!(matches!(
            index.search(&[1.0], 1).unwrap_err(),
            RecommendError::NotIndexed
        ));
    }

    #[test]
    fn test_search_orders_by_distance() {
        let index = VectorIndex::new();
        index
            .insert(
                vec![event("near"), event("far"), event("mid")],
                vec![
                    vec![1.0, 0.0],  // identical direction to query
                    vec![-1.0, 0.0], // opposite
                    vec![1.0, 1.0],  // 45 degrees
                ],
            )
            .unwrap();

        let results = index.search(&[2.0, 0.0], 3).unwrap();
        let names: Vec<&str> = results.iter().map(|(e, _)| e.name.as_str()).collect();
        assert_eq!(names, vec!["near", "mid", "far"]);
        assert!(results[0].1 < results[1].1);
        assert!(results[1].1 < results[2].1);
    }

    #[test]
    fn test_k_exceeding_len_returns_all() {
        let index = VectorIndex::new();
        index
            .insert(vec![event("a"), event("b")], vec![vec![1.0, 0.0], vec![0.0, 1.0]])
            .unwrap();
        let results = index.search(&[1.0, 0.0], 50).unwrap();
        assert_eq!(results.len(), 2);
    }

    #[test]
    fn test_incremental_insert_appends() {
        let index = VectorIndex::new();
        index.insert(vec![event("a")], vec![vec![1.0, 0.0]]).unwrap();
        assert_eq!(index.len(), 1);
        index.insert(vec![event("b")], vec![vec![0.0, 1.0]]).unwrap();
        assert_eq!(index.len(), 2);
        assert!(index.is_ready());
    }

    #[test]
    fn test_dimension_mismatch_on_insert() {
        let index = VectorIndex::new();
        index.insert(vec![event("a")], vec![vec![1.0, 0.0]]).unwrap();
        let err = index
            .insert(vec![event("b")], vec![vec![1.0, 0.0, 0.0]])
            .unwrap_err();
        assert!(matches!(
            err,
            RecommendError::DimensionMismatch { expected: 2, got: 3 }
        ));
    }

    #[test]
    fn test_dimension_mismatch_on_search() {
        let index = VectorIndex::new();
        index.insert(vec![event("a")], vec![vec![1.0, 0.0]]).unwrap();
        let err = index.search(&[1.0, 0.0, 0.0], 1).unwrap_err();
        assert!(matches!(err, RecommendError::DimensionMismatch { .. }));
    }
}

//! Recommendation orchestration.
//!
//! [`Recommender`] composes the encoder, vector index, relevance cache,
//! and conversation memory into the two operations the rest of the system
//! calls: `index_events` and `query`. All state lives on the instance —
//! there are no process-wide singletons, so multiple independent
//! recommenders can coexist in one process.
//!
//! # Query flow
//!
//! 1. Cache lookup — a hit is returned verbatim.
//! 2. On a miss, the index state is checked: querying a never-populated
//!    index surfaces [`RecommendError::NotIndexed`] instead of an empty
//!    list.
//! 3. The query text is encoded; encoder failures propagate typed, with
//!    no partial results.
//! 4. k-NN search; each distance `d` becomes `score = 1 / (1 + d)`.
//! 5. Each hit gets a reasoning string (categories + score) and a
//!    personalization sentence from conversation memory.
//! 6. The ranked list is cached and appended to history — both
//!    best-effort, neither blocks the result.

use std::sync::Arc;
use std::time::Duration;

use tracing::{debug, info};

use crate::cache::RelevanceCache;
use crate::embedding::Encoder;
use crate::error::RecommendError;
use crate::index::VectorIndex;
use crate::memory::ConversationMemory;
use crate::models::{EventRecord, Interaction, RankedResult};

/// Default number of neighbors returned by a query.
pub const DEFAULT_K: usize = 10;

/// The retrieval-and-ranking engine.
pub struct Recommender {
    encoder: Arc<dyn Encoder>,
    index: VectorIndex,
    cache: RelevanceCache,
    memory: ConversationMemory,
}

impl Recommender {
    pub fn new(encoder: Arc<dyn Encoder>, cache_ttl: Duration) -> Self {
        Self {
            encoder,
            index: VectorIndex::new(),
            cache: RelevanceCache::new(cache_ttl),
            memory: ConversationMemory::new(),
        }
    }

    /// Whether any events have been indexed.
    pub fn is_indexed(&self) -> bool {
        self.index.is_ready()
    }

    /// Number of indexed events.
    pub fn indexed_len(&self) -> usize {
        self.index.len()
    }

    /// Encode and index a batch of events, recording one interaction per
    /// event so their categories feed the personalization signal.
    ///
    /// An empty batch is a successful no-op. Returns the number of events
    /// indexed.
    ///
    /// # Errors
    ///
    /// Encoder failures propagate as [`RecommendError::Encoding`]; vector
    /// shape problems as [`RecommendError::DimensionMismatch`].
    pub async fn index_events(&self, events: Vec<EventRecord>) -> Result<usize, RecommendError> {
        if events.is_empty() {
            return Ok(0);
        }

        let texts: Vec<String> = events.iter().map(EventRecord::retrieval_text).collect();
        let vectors = self.encoder.encode(&texts).await?;
        if vectors.len() != events.len() {
            return Err(RecommendError::Encoding {
                message: format!(
                    "encoder returned {} vectors for {} texts",
                    vectors.len(),
                    events.len()
                ),
            });
        }

        // Snapshot before the index takes ownership of the records.
        let snapshots: Vec<EventRecord> = events.clone();
        let count = self.index.insert(events, vectors)?;

        for event in snapshots {
            let query = format!("Added event: {}", event.name);
            let snapshot = RankedResult {
                event,
                relevance_score: 1.0,
                reasoning: String::new(),
                personalization: String::new(),
            };
            self.memory.record(&query, &[snapshot]);
        }

        Ok(count)
    }

    /// Return the `k` most relevant events for a free-text query, ranked
    /// by normalized similarity.
    pub async fn query(&self, text: &str, k: usize) -> Result<Vec<RankedResult>, RecommendError> {
        if let Some(hit) = self.cache.get(text, k) {
            return Ok(hit);
        }

        if !self.index.is_ready() {
            return Err(RecommendError::NotIndexed);
        }

        let query_vec = self
            .encoder
            .encode(&[text.to_string()])
            .await?
            .into_iter()
            .next()
            .ok_or_else(|| RecommendError::Encoding {
                message: "encoder returned an empty batch for the query".to_string(),
            })?;

        let neighbors = self.index.search(&query_vec, k)?;

        let mut results = Vec::with_capacity(neighbors.len());
        for (event, distance) in neighbors {
            let score = 1.0 / (1.0 + distance);
            let reasoning = format!(
                "This event matches your query based on its {} content with a relevance score of {:.2}",
                event.categories.join(", "),
                score
            );
            let personalization = self.memory.personalization_for(&event);
            results.push(RankedResult {
                event,
                relevance_score: score,
                reasoning,
                personalization,
            });
        }

        self.cache.put(text, k, results.clone());
        self.memory.record(text, &results);

        info!(query = text, k, returned = results.len(), "served recommendations");
        Ok(results)
    }

    /// Record like/dislike feedback for an event name.
    pub fn feedback(&self, event_name: &str, liked: bool) {
        self.memory.preference(event_name, liked);
        debug!(event_name, liked, "recorded feedback");
    }

    /// The last few interactions, oldest first.
    pub fn recent_history(&self) -> Vec<Interaction> {
        self.memory.recent()
    }

    /// Human-readable summary of accumulated preferences.
    pub fn preference_summary(&self) -> String {
        self.memory.preference_summary()
    }
}

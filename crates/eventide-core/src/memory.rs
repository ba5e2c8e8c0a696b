//! Conversation memory: rolling interaction history and preference counters.
//!
//! Holds the short-term signal that personalizes results without touching
//! the vector index: a FIFO log of the last [`MAX_HISTORY`] interactions
//! and monotonic like/dislike counters per event name. Both are
//! process-wide state with no persistence across restarts — a deliberate
//! non-goal.
//!
//! History recording is a best-effort subsystem: a poisoned lock is
//! absorbed so that recording never blocks the primary result.

use std::collections::{BTreeMap, HashSet, VecDeque};
use std::sync::RwLock;

use chrono::Utc;
use tracing::debug;

use crate::models::{EventRecord, Interaction, PreferenceCount, RankedResult};

/// Full history capacity; the oldest interaction is evicted first.
pub const MAX_HISTORY: usize = 10;

/// How many interactions `recent()` returns.
pub const RECENT_WINDOW: usize = 5;

struct Inner {
    history: VecDeque<Interaction>,
    // BTreeMap keeps `preference_summary` output deterministic (sorted by name).
    preferences: BTreeMap<String, PreferenceCount>,
}

/// Rolling conversation log plus accumulated like/dislike feedback.
pub struct ConversationMemory {
    inner: RwLock<Inner>,
}

impl ConversationMemory {
    pub fn new() -> Self {
        Self {
            inner: RwLock::new(Inner {
                history: VecDeque::with_capacity(MAX_HISTORY),
                preferences: BTreeMap::new(),
            }),
        }
    }

    /// Append an interaction, evicting the oldest past [`MAX_HISTORY`].
    pub fn record(&self, query: &str, results: &[RankedResult]) {
        let mut inner = self.inner.write().unwrap_or_else(|e| e.into_inner());
        inner.history.push_back(Interaction {
            timestamp: Utc::now(),
            query: query.to_string(),
            results: results.to_vec(),
        });
        while inner.history.len() > MAX_HISTORY {
            inner.history.pop_front();
        }
    }

    /// Increment the like or dislike counter for `event_name`.
    ///
    /// Unseen names are created on first reference with both counters at
    /// zero before the increment.
    pub fn preference(&self, event_name: &str, liked: bool) {
        let mut inner = self.inner.write().unwrap_or_else(|e| e.into_inner());
        let counts = inner.preferences.entry(event_name.to_string()).or_default();
        if liked {
            counts.likes += 1;
        } else {
            counts.dislikes += 1;
        }
        debug!(event_name, liked, "updated preference");
    }

    /// Current counters for an event name, if any feedback was recorded.
    pub fn preference_counts(&self, event_name: &str) -> Option<PreferenceCount> {
        let inner = self.inner.read().unwrap_or_else(|e| e.into_inner());
        inner.preferences.get(event_name).copied()
    }

    /// The last [`RECENT_WINDOW`] interactions, oldest first.
    pub fn recent(&self) -> Vec<Interaction> {
        let inner = self.inner.read().unwrap_or_else(|e| e.into_inner());
        let skip = inner.history.len().saturating_sub(RECENT_WINDOW);
        inner.history.iter().skip(skip).cloned().collect()
    }

    /// Total interactions currently held (bounded by [`MAX_HISTORY`]).
    pub fn history_len(&self) -> usize {
        let inner = self.inner.read().unwrap_or_else(|e| e.into_inner());
        inner.history.len()
    }

    /// Render every tracked event as `"<name> (Likes: L, Dislikes: D)"`,
    /// joined by `" | "`, sorted by event name.
    pub fn preference_summary(&self) -> String {
        let inner = self.inner.read().unwrap_or_else(|e| e.into_inner());
        if inner.preferences.is_empty() {
            return "No preferences recorded yet.".to_string();
        }
        inner
            .preferences
            .iter()
            .map(|(name, counts)| {
                format!("{} (Likes: {}, Dislikes: {})", name, counts.likes, counts.dislikes)
            })
            .collect::<Vec<_>>()
            .join(" | ")
    }

    /// Derive a personalization sentence for a candidate event.
    ///
    /// Interests are the union of all words from recent queries plus all
    /// categories of events seen in recent results; the candidate's own
    /// name, description, and categories are intersected against that set.
    pub fn personalization_for(&self, event: &EventRecord) -> String {
        let history = self.recent();
        if history.is_empty() {
            return "No personalization data available yet.".to_string();
        }

        let mut interests: HashSet<String> = HashSet::new();
        for interaction in &history {
            interests.extend(
                interaction
                    .query
                    .to_lowercase()
                    .split_whitespace()
                    .map(str::to_string),
            );
            for result in &interaction.results {
                interests.extend(result.event.categories.iter().map(|c| c.to_lowercase()));
            }
        }

        let event_text = format!("{} {}", event.name, event.description).to_lowercase();
        let event_categories: Vec<String> =
            event.categories.iter().map(|c| c.to_lowercase()).collect();

        let mut matched: Vec<String> = interests
            .into_iter()
            .filter(|interest| {
                event_text.contains(interest.as_str()) || event_categories.contains(interest)
            })
            .collect();
        // Sorted so the rendered sentence is stable across runs.
        matched.sort();

        if matched.is_empty() {
            "This event might introduce you to new interests.".to_string()
        } else {
            format!("This event matches your interests in: {}", matched.join(", "))
        }
    }
}

impl Default for ConversationMemory {
    fn default() -> Self {
        Self::new()
    }
}

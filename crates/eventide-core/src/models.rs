//! Core data models used throughout Eventide.
//!
//! These types represent the events, ranked results, and interaction
//! snapshots that flow through the aggregation and recommendation pipeline.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A normalized event produced by a source adapter.
///
/// Every source-specific shape is converted to this type once, at
/// ingestion; retrieval code never sees raw source payloads. Records are
/// transient per query cycle — only their indexed form accumulates.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EventRecord {
    pub name: String,
    pub description: String,
    /// ISO-8601 date string, or `"N/A"` when the source provided none.
    pub date: String,
    pub location: String,
    pub postal_code: String,
    #[serde(default)]
    pub categories: Vec<String>,
    #[serde(default)]
    pub url: Option<String>,
    #[serde(default)]
    pub price: Option<String>,
    #[serde(default)]
    pub venue: Option<String>,
}

impl EventRecord {
    /// Identity key for deduplication: `(name, date, venue)`.
    ///
    /// Two records with an equal key are the same event regardless of which
    /// source produced them. Case folding is the aggregator's choice;
    /// the default configuration is case-insensitive.
    pub fn identity_key(&self, case_insensitive: bool) -> String {
        let venue = self.venue.as_deref().unwrap_or("");
        let key = format!("{}\u{1f}{}\u{1f}{}", self.name, self.date, venue);
        if case_insensitive {
            key.to_lowercase()
        } else {
            key
        }
    }

    /// Render the event to the single text blob used as its retrieval key.
    ///
    /// Field order is fixed: name, description, categories, venue,
    /// location, date, price, url. Two events with identical rendered text
    /// are indistinguishable to the index.
    pub fn retrieval_text(&self) -> String {
        format!(
            "{} {} {} {} {} {} {} {}",
            self.name,
            self.description,
            self.categories.join(" "),
            self.venue.as_deref().unwrap_or(""),
            self.location,
            self.date,
            self.price.as_deref().unwrap_or(""),
            self.url.as_deref().unwrap_or(""),
        )
    }
}

/// A scored recommendation returned from [`Recommender::query`](crate::recommend::Recommender::query).
///
/// Produced fresh per query; never persisted beyond the cache TTL.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RankedResult {
    pub event: EventRecord,
    /// Normalized similarity in `(0, 1]`: `1 / (1 + distance)`.
    pub relevance_score: f64,
    /// Why this event matched, referencing its categories and score.
    pub reasoning: String,
    /// How this result relates to the user's recent queries and history.
    pub personalization: String,
}

/// A snapshot of one user interaction, kept in the conversation history.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Interaction {
    pub timestamp: DateTime<Utc>,
    pub query: String,
    pub results: Vec<RankedResult>,
}

/// Like/dislike counters for a single event name.
///
/// Monotonically incremented, never reset within a process lifetime.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PreferenceCount {
    pub likes: u32,
    pub dislikes: u32,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_event() -> EventRecord {
        EventRecord {
            name: "Jazz Night".to_string(),
            description: "Live jazz quartet".to_string(),
            date: "2026-09-12".to_string(),
            location: "Portland, OR".to_string(),
            postal_code: "97201".to_string(),
            categories: vec!["music".to_string(), "jazz".to_string()],
            url: Some("https://example.com/jazz".to_string()),
            price: Some("$25".to_string()),
            venue: Some("The Blue Room".to_string()),
        }
    }

    #[test]
    fn test_identity_key_case_insensitive() {
        let a = sample_event();
        let mut b = sample_event();
        b.venue = Some("THE BLUE ROOM".to_string());
        assert_eq!(a.identity_key(true), b.identity_key(true));
        assert_ne!(a.identity_key(false), b.identity_key(false));
    }

    #[test]
    fn test_identity_key_ignores_non_identity_fields() {
        let a = sample_event();
        let mut b = sample_event();
        b.description = "completely different".to_string();
        b.price = None;
        assert_eq!(a.identity_key(true), b.identity_key(true));
    }

    #[test]
    fn test_retrieval_text_field_order() {
        let text = sample_event().retrieval_text();
        let name_pos = text.find("Jazz Night").unwrap();
        let desc_pos = text.find("Live jazz quartet").unwrap();
        let venue_pos = text.find("The Blue Room").unwrap();
        let date_pos = text.find("2026-09-12").unwrap();
        assert!(name_pos < desc_pos);
        assert!(desc_pos < venue_pos);
        assert!(venue_pos < date_pos);
    }

    #[test]
    fn test_event_record_json_defaults() {
        let json = r#"{
            "name": "Minimal",
            "description": "No optional fields",
            "date": "N/A",
            "location": "Nowhere",
            "postal_code": "00000"
        }"#;
        let event: EventRecord = serde_json::from_str(json).unwrap();
        assert!(event.categories.is_empty());
        assert!(event.venue.is_none());
        assert!(event.url.is_none());
    }
}

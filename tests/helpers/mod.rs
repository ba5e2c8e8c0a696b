//! Shared fixtures for integration tests: an in-memory event source, a
//! failing source, and a deterministic vocabulary encoder.
//!
//! Not every test binary uses every fixture.
#![allow(dead_code)]

use anyhow::{bail, Result};
use async_trait::async_trait;

use eventide::{Encoder, EventRecord, EventSource, RecommendError};

/// An event source that returns a fixed list of events.
pub struct StaticSource {
    name: &'static str,
    events: Vec<EventRecord>,
}

impl StaticSource {
    pub fn new(name: &'static str, events: Vec<EventRecord>) -> Self {
        Self { name, events }
    }
}

#[async_trait]
impl EventSource for StaticSource {
    fn name(&self) -> &str {
        self.name
    }

    fn description(&self) -> &str {
        "In-memory test source"
    }

    async fn fetch(&self, _location: &str, _interests: &[String]) -> Result<Vec<EventRecord>> {
        Ok(self.events.clone())
    }
}

/// An event source whose fetch always fails.
pub struct FailingSource;

#[async_trait]
impl EventSource for FailingSource {
    fn name(&self) -> &str {
        "failing"
    }

    fn description(&self) -> &str {
        "Always-broken test source"
    }

    fn healthy(&self) -> bool {
        false
    }

    async fn fetch(&self, _location: &str, _interests: &[String]) -> Result<Vec<EventRecord>> {
        bail!("upstream API returned 503")
    }
}

/// Deterministic bag-of-words encoder over a fixed vocabulary: one
/// dimension per word, value = occurrence count in the text.
pub struct VocabEncoder {
    vocab: Vec<&'static str>,
}

impl VocabEncoder {
    pub fn new() -> Self {
        Self {
            vocab: vec![
                "music",
                "outdoor",
                "indoor",
                "technology",
                "concert",
                "festival",
                "classical",
                "conference",
                "food",
                "art",
            ],
        }
    }
}

#[async_trait]
impl Encoder for VocabEncoder {
    fn model_name(&self) -> &str {
        "vocab-test"
    }

    fn dims(&self) -> usize {
        self.vocab.len()
    }

    async fn encode(&self, texts: &[String]) -> Result<Vec<Vec<f32>>, RecommendError> {
        Ok(texts
            .iter()
            .map(|text| {
                let lower = text.to_lowercase();
                let words: Vec<&str> = lower.split_whitespace().collect();
                self.vocab
                    .iter()
                    .map(|term| words.iter().filter(|w| *w == term).count() as f32)
                    .collect()
            })
            .collect())
    }
}

/// Build a minimal event record for tests.
pub fn event(name: &str, date: &str, venue: Option<&str>) -> EventRecord {
    EventRecord {
        name: name.to_string(),
        description: String::new(),
        date: date.to_string(),
        location: "Test City".to_string(),
        postal_code: "97201".to_string(),
        categories: Vec::new(),
        url: None,
        price: None,
        venue: venue.map(|v| v.to_string()),
    }
}

//! # Eventide
//!
//! **An event discovery and recommendation engine.**
//!
//! Eventide aggregates events from independent sources, deduplicates
//! them, and ranks them for a user by semantic relevance to free-text
//! interests, folding in recent interaction history and like/dislike
//! feedback.
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────┐   ┌──────────────┐   ┌──────────────┐
//! │   Sources   │──▶│  Aggregator  │──▶│  Recommender  │
//! │ (adapters)  │   │ dedup + sort │   │ index + query │
//! └─────────────┘   └──────────────┘   └──────┬───────┘
//!                                             │
//!                        ┌────────────────────┤
//!                        ▼                    ▼
//!                  ┌──────────┐        ┌────────────┐
//!                  │  Cache   │        │  Memory    │
//!                  │  (TTL)   │        │ (history)  │
//!                  └──────────┘        └────────────┘
//! ```
//!
//! ## Data flow
//!
//! 1. **Sources** ([`sources`], [`source_fs`]) fetch provider-specific
//!    payloads and normalize them into `EventRecord`s.
//! 2. The **aggregator** ([`aggregate`]) merges all sources, drops
//!    duplicates by the `(name, date, venue)` identity key, and sorts by
//!    date. A failing source contributes zero events.
//! 3. The **recommender** (`eventide-core`) encodes each event's rendered
//!    text via an [`encoder`] backend, indexes the vectors, and answers
//!    top-k queries with a normalized `1/(1+distance)` score, reasoning,
//!    and personalization text.
//!
//! ## Modules
//!
//! | Module | Purpose |
//! |--------|---------|
//! | [`config`] | TOML configuration parsing and validation |
//! | [`sources`] | `EventSource` trait, `SourceRegistry`, health listing |
//! | [`source_fs`] | Filesystem source: JSON event files under a directory |
//! | [`aggregate`] | Multi-source collection, dedup, chronological sort |
//! | [`encoder`] | OpenAI and Ollama embedding encoder backends |
//!
//! The retrieval-and-ranking core (models, vector index, cache,
//! conversation memory, recommender) lives in the `eventide-core` crate
//! and is re-exported here.

pub mod aggregate;
pub mod config;
pub mod encoder;
pub mod source_fs;
pub mod sources;

pub use aggregate::Aggregator;
pub use eventide_core::{
    Encoder, EventRecord, Interaction, PreferenceCount, RankedResult, RecommendError, Recommender,
};
pub use sources::{EventSource, SourceRegistry};

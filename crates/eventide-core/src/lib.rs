//! # Eventide Core
//!
//! The retrieval-and-ranking core of Eventide: event data models, the
//! embedding encoder trait, an in-memory vector index, a TTL-bounded
//! relevance cache, conversation memory, and the recommender that
//! composes them.
//!
//! This crate contains no tokio runtime, HTTP client, or filesystem I/O —
//! async seams are expressed through `async-trait` only. Source adapters,
//! configuration, concrete encoders, and the CLI live in the `eventide`
//! app crate.
//!
//! ## Modules
//!
//! | Module | Purpose |
//! |--------|---------|
//! | [`models`] | `EventRecord`, `RankedResult`, `Interaction`, `PreferenceCount` |
//! | [`embedding`] | `Encoder` trait, cosine similarity/distance, L2 normalization |
//! | [`index`] | Append-only in-memory vector index with an `Empty` → `Ready` lifecycle |
//! | [`cache`] | `(query, k)` → ranked results cache with lazy TTL expiry |
//! | [`memory`] | Rolling interaction history and like/dislike preference counters |
//! | [`recommend`] | `Recommender` orchestration: `index_events` + `query` |
//! | [`error`] | Typed error taxonomy (`NotIndexed`, `Encoding`, …) |
//!
//! ## Data flow
//!
//! ```text
//! EventRecord[] ──▶ index_events ──▶ encode ──▶ VectorIndex
//!
//! query(text, k) ──▶ RelevanceCache ──hit──▶ RankedResult[]
//!                        │ miss
//!                        ▼
//!                  encode + k-NN search ──▶ score = 1/(1+d)
//!                        │
//!                        ▼
//!              ConversationMemory (personalization, history)
//! ```

pub mod cache;
pub mod embedding;
pub mod error;
pub mod index;
pub mod memory;
pub mod models;
pub mod recommend;

pub use cache::RelevanceCache;
pub use embedding::Encoder;
pub use error::RecommendError;
pub use index::VectorIndex;
pub use memory::ConversationMemory;
pub use models::{EventRecord, Interaction, PreferenceCount, RankedResult};
pub use recommend::{Recommender, DEFAULT_K};

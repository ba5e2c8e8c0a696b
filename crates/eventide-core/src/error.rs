//! Error types for the recommendation core.
//!
//! The taxonomy separates failures that affect correctness (surfaced to the
//! caller as typed errors) from failures that only affect completeness or
//! performance (absorbed at the layer where they occur):
//!
//! | Failure | Treatment |
//! |---------|-----------|
//! | Querying before any events are indexed | [`RecommendError::NotIndexed`], surfaced |
//! | Embedding encoder failure | [`RecommendError::Encoding`], surfaced, no partial results |
//! | Vector length mismatch | [`RecommendError::DimensionMismatch`], surfaced |
//! | Event source failure | absorbed by the aggregator, logged, zero events |
//! | Cache or history failure | absorbed, logged, query still answered |

use thiserror::Error;

/// The primary error type for indexing and querying operations.
#[derive(Debug, Error)]
pub enum RecommendError {
    /// The query arrived before any `index_events` call populated the index.
    ///
    /// This is distinct from an empty result set: an initialized index that
    /// matches nothing is a valid outcome, an uninitialized index is a
    /// caller error.
    #[error("no events have been indexed yet")]
    NotIndexed,

    /// The embedding encoder failed to produce vectors.
    #[error("embedding encoder failed: {message}")]
    Encoding { message: String },

    /// A vector's length disagrees with the index dimensionality.
    #[error("embedding dimension mismatch: expected {expected}, got {got}")]
    DimensionMismatch { expected: usize, got: usize },
}

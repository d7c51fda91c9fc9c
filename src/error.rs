//! Error types for sweepmesh operations.

use thiserror::Error;

/// Errors that can occur while building or configuring a triangulation.
///
/// Most session operations follow a quiet policy and never return these:
/// point edits ignore out-of-range indices and lookups return `Option`.
/// Only triangulation itself and configuration report failures.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DelaunayError {
    /// Fewer than three points were available to triangulate.
    #[error("insufficient input: {available} point(s) available, at least 3 required")]
    InsufficientPoints {
        /// Number of points that would have taken part.
        available: usize,
    },

    /// An index subset named a point that is not in the store.
    #[error("point index {index} out of range for store of {len} point(s)")]
    IndexOutOfRange {
        /// The offending index.
        index: usize,
        /// Size of the point store.
        len: usize,
    },

    /// A configuration value is unusable.
    #[error("invalid configuration: {0}")]
    InvalidConfig(&'static str),
}

//! Error types for the image cache
//!
//! Provides unified error handling using thiserror.

use thiserror::Error;

// == Image Cache Error Enum ==
/// Unified error type for the image cache.
///
/// A cache miss is never represented here; lookups return `Option`.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ImageCacheError {
    /// Cache was constructed with an unusable capacity
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// A caller-supplied collaborator broke its contract (e.g. negative weight)
    #[error("Invariant violation: {0}")]
    InvariantViolation(String),

    /// The external decoder could not produce an image
    #[error("Failed to decode '{path}': {reason}")]
    Decode { path: String, reason: String },
}

// == Result Type Alias ==
/// Convenience Result type for the image cache.
pub type Result<T> = std::result::Result<T, ImageCacheError>;

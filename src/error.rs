//! Error types for `slideloop`
//!
//! This module defines all error types used throughout the crate,
//! providing clear error messages and proper error propagation.
//!
//! Error variants use `#[source]` to preserve error chains for better
//! observability and debugging.

use thiserror::Error;

/// Simple error type for wrapping string messages while implementing `std::error::Error`
#[derive(Debug, Error)]
#[error("{0}")]
pub struct StringError(pub String);

impl StringError {
    /// Create a new `StringError` from a string message
    pub fn new(msg: impl Into<String>) -> Box<Self> {
        Box::new(Self(msg.into()))
    }
}

/// Main error type for `slideloop` operations
#[derive(Debug, Error)]
pub enum SlideLoopError {
    /// The slide deck contains no slides; a presentation session cannot be
    /// built around it
    #[error("slide deck is empty")]
    EmptyDeck,

    /// A slide index outside the deck bounds was requested
    ///
    /// Unreachable from the coordinator, whose index arithmetic is
    /// modulo/clamp-bounded; hitting this from coordinator code is a
    /// programming error.
    #[error("slide index {index} out of bounds for deck of {len} slides")]
    IndexOutOfBounds {
        /// The requested index
        index: usize,
        /// Number of slides in the deck
        len: usize,
    },

    /// Configuration error
    /// Preserves the underlying error source for full error chain transparency
    #[error("Configuration error: {0}")]
    ConfigError(#[source] Box<dyn std::error::Error + Send + Sync>),

    /// IO error
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    /// JSON serialization/deserialization error
    #[error("JSON error: {0}")]
    JsonError(#[from] serde_json::Error),
}

/// Result type alias for `slideloop` operations
pub type Result<T> = std::result::Result<T, SlideLoopError>;

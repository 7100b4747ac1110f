//! Error types for the content store layer.
//!
//! Every adapter reports failures through [`StoreError`]. The one condition
//! callers branch on is [`StoreError::NotFound`]; everything else is a
//! terminal failure for the request that triggered it.

// Error enum variant fields are self-documenting via their #[error(...)] messages
#![allow(missing_docs)]

use thiserror::Error;

/// The error type for all content store operations.
#[derive(Error, Debug)]
pub enum StoreError {
    /// The requested key does not exist in the store.
    #[error("not found: {key}")]
    NotFound { key: String },

    /// The key cannot be addressed by this store.
    #[error("invalid key '{key}': {reason}")]
    InvalidKey { key: String, reason: String },

    /// Any other failure reported by the underlying backend.
    #[error("{backend_name} backend error: {message}")]
    Backend {
        backend_name: String,
        message: String,
    },
}

impl StoreError {
    /// Creates a [`StoreError::NotFound`] for the given key.
    pub fn not_found(key: impl Into<String>) -> Self {
        StoreError::NotFound { key: key.into() }
    }

    /// Creates a [`StoreError::Backend`] error.
    pub fn backend(backend_name: impl Into<String>, message: impl Into<String>) -> Self {
        StoreError::Backend {
            backend_name: backend_name.into(),
            message: message.into(),
        }
    }

    /// Returns `true` if this error signals a missing key.
    pub fn is_not_found(&self) -> bool {
        matches!(self, StoreError::NotFound { .. })
    }
}

/// Result type alias for content store operations.
pub type StoreResult<T> = Result<T, StoreError>;

//! Cart error type.
//!
//! Bad shopper input never surfaces here: quantities clamp, unknown coupons
//! and malformed ZIP codes fall back to defaults. Only persistence failures of
//! a fallible store propagate.

use thiserror::Error;

use crate::storage::StorageError;

/// Error raised by cart operations.
#[derive(Debug, Error)]
pub enum CartError {
    /// The key-value store rejected a write.
    #[error("Storage error: {0}")]
    Storage(#[from] StorageError),

    /// Cart state could not be serialized for storage.
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// Result type alias for `CartError`.
pub type Result<T> = std::result::Result<T, CartError>;

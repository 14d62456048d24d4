//! Key-value persistence for cart state.
//!
//! The cart never caches what it reads: every operation loads its keys from a
//! [`KeyValueStore`], computes, and writes back. Two backends are provided:
//!
//! - [`MemoryStore`] - in-process map, used by tests and embedders
//! - [`JsonFileStore`] - a single JSON object on disk, rewritten on every
//!   mutation, standing in for browser local storage
//!
//! # Keys
//!
//! | key | value |
//! |---|---|
//! | `cartItems` | JSON array of cart line items |
//! | `cartCoupon` | applied coupon code, absent when none |

mod file;
mod memory;

pub use file::JsonFileStore;
pub use memory::MemoryStore;

use std::path::PathBuf;

use thiserror::Error;

/// Storage keys for persisted cart state.
pub mod keys {
    /// Key for the serialized cart line-item list.
    pub const CART_ITEMS: &str = "cartItems";

    /// Key for the applied coupon code.
    pub const CART_COUPON: &str = "cartCoupon";
}

/// Errors raised by fallible storage backends.
#[derive(Debug, Error)]
pub enum StorageError {
    #[error("I/O error on {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// An opaque string key-value store.
///
/// Reads are infallible: a backend that cannot read a value reports it as
/// absent. Writes may fail for backends with real I/O.
pub trait KeyValueStore {
    /// Get the value stored under `key`.
    fn get(&self, key: &str) -> Option<String>;

    /// Store `value` under `key`, replacing any previous value.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` if the backend cannot persist the value.
    fn set(&mut self, key: &str, value: &str) -> Result<(), StorageError>;

    /// Delete `key`. Removing an absent key is not an error.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` if the backend cannot persist the removal.
    fn remove(&mut self, key: &str) -> Result<(), StorageError>;
}

impl<S: KeyValueStore + ?Sized> KeyValueStore for &mut S {
    fn get(&self, key: &str) -> Option<String> {
        (**self).get(key)
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), StorageError> {
        (**self).set(key, value)
    }

    fn remove(&mut self, key: &str) -> Result<(), StorageError> {
        (**self).remove(key)
    }
}

impl<S: KeyValueStore + ?Sized> KeyValueStore for Box<S> {
    fn get(&self, key: &str) -> Option<String> {
        (**self).get(key)
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), StorageError> {
        (**self).set(key, value)
    }

    fn remove(&mut self, key: &str) -> Result<(), StorageError> {
        (**self).remove(key)
    }
}

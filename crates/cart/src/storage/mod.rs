//! Persistent key-value storage for the cart snapshot.
//!
//! The cart is stored as one JSON string under a single key. Backends only
//! need to get and set whole string values; serialization is the manager's
//! concern.
//!
//! # Backends
//!
//! - [`MemoryStore`] - In-process map, for tests and embedding hosts
//! - [`FileStore`] - One file per key inside a directory

mod file;
mod memory;

pub use file::FileStore;
pub use memory::MemoryStore;

use thiserror::Error;

/// Default key the cart snapshot is stored under.
pub const CART_KEY: &str = "@RocketShoes:cart";

/// Errors that can occur when reading or writing the store.
#[derive(Debug, Error)]
pub enum StorageError {
    /// Underlying I/O failed.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Key cannot be represented by this backend.
    #[error("Invalid storage key: {0}")]
    InvalidKey(String),

    /// Backend refused the write.
    #[error("Storage unavailable: {0}")]
    Unavailable(String),
}

/// A synchronous string key-value store.
///
/// All methods take `&self`; implementations use interior mutability where
/// they need it.
pub trait KeyValueStore: Send + Sync {
    /// Read the value stored under `key`.
    ///
    /// Returns `Ok(None)` if the key does not exist.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` if the backend cannot be read.
    fn get(&self, key: &str) -> Result<Option<String>, StorageError>;

    /// Store `value` under `key`, replacing any previous value.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` if the backend cannot be written.
    fn set(&self, key: &str, value: &str) -> Result<(), StorageError>;
}

impl<T: KeyValueStore + ?Sized> KeyValueStore for &T {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        (**self).get(key)
    }

    fn set(&self, key: &str, value: &str) -> Result<(), StorageError> {
        (**self).set(key, value)
    }
}

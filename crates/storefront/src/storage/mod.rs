//! On-device key-value storage.
//!
//! Shopper state is kept in named slots, each holding one JSON document.
//! Backends implement [`KeyValueStore`]; [`PersistedSlot`] layers typed
//! loading and ordered background writes on top.
//!
//! # Backends
//!
//! - [`FileStore`] - one file per key under a data directory
//! - [`MemoryStore`] - in-process map, used by tests and previews

mod file;
mod memory;
mod slot;

use async_trait::async_trait;
use thiserror::Error;

pub use file::FileStore;
pub use memory::MemoryStore;
pub use slot::{PendingWrite, PersistedSlot};

/// Errors raised by storage backends.
#[derive(Debug, Error)]
pub enum StorageError {
    /// Filesystem operation failed.
    #[error("I/O error on slot {key}: {source}")]
    Io {
        key: String,
        #[source]
        source: std::io::Error,
    },

    /// Key contains characters the backend cannot store.
    #[error("invalid storage key: {0:?}")]
    InvalidKey(String),

    /// Backend refused the operation.
    #[error("storage unavailable: {0}")]
    Unavailable(String),
}

/// Asynchronous string key-value storage.
///
/// Values are opaque strings; callers own the encoding. `get` on a missing
/// key returns `Ok(None)` and `remove` on a missing key succeeds.
#[async_trait]
pub trait KeyValueStore: Send + Sync + std::fmt::Debug {
    /// Read the value stored under `key`.
    async fn get(&self, key: &str) -> Result<Option<String>, StorageError>;

    /// Replace the value stored under `key`.
    async fn set(&self, key: &str, value: &str) -> Result<(), StorageError>;

    /// Delete the value stored under `key`.
    async fn remove(&self, key: &str) -> Result<(), StorageError>;
}

/// Check that a key is safe to use as a file stem.
///
/// # Errors
///
/// Returns `StorageError::InvalidKey` for empty keys or keys containing
/// anything other than ASCII alphanumerics, `-`, `_` and `.` (not leading).
pub fn validate_key(key: &str) -> Result<(), StorageError> {
    let valid = !key.is_empty()
        && !key.starts_with('.')
        && key
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || matches!(c, '-' | '_' | '.'));
    if valid {
        Ok(())
    } else {
        Err(StorageError::InvalidKey(key.to_owned()))
    }
}

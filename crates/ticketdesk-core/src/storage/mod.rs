//! Synchronous key-value persistence.
//!
//! The ticket store only needs two operations: read a whole value by key and
//! replace it. [`MemoryStore`] backs tests and throwaway sessions;
//! [`FileStore`] keeps one file per key on disk.

mod file;
mod memory;

pub use file::FileStore;
pub use memory::MemoryStore;

use std::io;
use std::path::PathBuf;

use crate::error::ErrorCode;
use crate::lock::LockError;

/// Errors raised by a [`KeyValueStore`] backend.
#[derive(Debug, thiserror::Error)]
pub enum StorageError {
    /// Key contains characters outside `[A-Za-z0-9_.-]`, is empty, or starts with `.`.
    #[error("invalid storage key '{key}'")]
    InvalidKey { key: String },

    #[error("failed to read {}: {source}", .path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("failed to write {}: {source}", .path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("lock error: {0}")]
    Lock(#[from] LockError),
}

impl StorageError {
    /// Machine-readable code associated with this error.
    #[must_use]
    pub const fn code(&self) -> ErrorCode {
        match self {
            Self::InvalidKey { .. } => ErrorCode::InvalidStorageKey,
            Self::Read { .. } => ErrorCode::StorageReadFailed,
            Self::Write { .. } => ErrorCode::StorageWriteFailed,
            Self::Lock(err) => err.code(),
        }
    }
}

/// A synchronous string key-value store.
pub trait KeyValueStore {
    /// Return the value stored under `key`, or `None` if nothing is stored.
    fn get(&self, key: &str) -> Result<Option<String>, StorageError>;

    /// Replace the value stored under `key`.
    fn set(&mut self, key: &str, value: &str) -> Result<(), StorageError>;
}

impl<T: KeyValueStore + ?Sized> KeyValueStore for Box<T> {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        (**self).get(key)
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), StorageError> {
        (**self).set(key, value)
    }
}

/// Check that `key` is usable as a storage key on every backend.
pub fn validate_key(key: &str) -> Result<(), StorageError> {
    let valid = !key.is_empty()
        && !key.starts_with('.')
        && key
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || matches!(c, '_' | '-' | '.'));
    if valid {
        Ok(())
    } else {
        Err(StorageError::InvalidKey {
            key: key.to_string(),
        })
    }
}

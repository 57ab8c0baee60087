//! Directory-backed key-value store.
//!
//! # Layout
//!
//! ```text
//! <root>/
//!   tickets.json          # value for key "tickets"
//!   .tickets.lock         # advisory lock guarding reads/writes of that key
//! ```
//!
//! Writes land in a sibling temp file which is then renamed over the value
//! file, so a reader never observes a half-written snapshot.

use std::fs::{self, OpenOptions};
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::time::Duration;

use super::{KeyValueStore, StorageError, validate_key};
use crate::lock::SnapshotLock;

/// Default time to wait for a contended lock.
pub const DEFAULT_LOCK_TIMEOUT: Duration = Duration::from_secs(5);

/// One file per key under a root directory.
#[derive(Debug, Clone)]
pub struct FileStore {
    root: PathBuf,
    lock_timeout: Duration,
}

impl FileStore {
    /// Open (creating if needed) a store rooted at `root`.
    pub fn open(root: impl Into<PathBuf>) -> Result<Self, StorageError> {
        let root = root.into();
        fs::create_dir_all(&root).map_err(|source| StorageError::Write {
            path: root.clone(),
            source,
        })?;
        Ok(Self {
            root,
            lock_timeout: DEFAULT_LOCK_TIMEOUT,
        })
    }

    #[must_use]
    pub const fn with_lock_timeout(mut self, timeout: Duration) -> Self {
        self.lock_timeout = timeout;
        self
    }

    #[must_use]
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Path of the file holding `key`'s value.
    #[must_use]
    pub fn value_path(&self, key: &str) -> PathBuf {
        self.root.join(format!("{key}.json"))
    }

    /// Path of the advisory lock file guarding `key`.
    #[must_use]
    pub fn lock_path(&self, key: &str) -> PathBuf {
        self.root.join(format!(".{key}.lock"))
    }

    fn temp_path(&self, key: &str) -> PathBuf {
        self.root.join(format!(".{key}.json.tmp"))
    }
}

impl KeyValueStore for FileStore {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        validate_key(key)?;
        let _lock = SnapshotLock::shared(&self.lock_path(key), self.lock_timeout)?;

        let path = self.value_path(key);
        match fs::read_to_string(&path) {
            Ok(content) => Ok(Some(content)),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(None),
            Err(source) => Err(StorageError::Read { path, source }),
        }
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), StorageError> {
        validate_key(key)?;
        let _lock = SnapshotLock::exclusive(&self.lock_path(key), self.lock_timeout)?;

        let tmp = self.temp_path(key);
        let write_tmp = || -> io::Result<()> {
            let mut file = OpenOptions::new()
                .create(true)
                .write(true)
                .truncate(true)
                .open(&tmp)?;
            file.write_all(value.as_bytes())?;
            file.flush()?;
            file.sync_all()
        };
        write_tmp().map_err(|source| StorageError::Write {
            path: tmp.clone(),
            source,
        })?;

        let path = self.value_path(key);
        fs::rename(&tmp, &path).map_err(|source| StorageError::Write { path, source })?;
        tracing::debug!(key, bytes = value.len(), "wrote value file");
        Ok(())
    }
}

//! Advisory file locks guarding a single snapshot file.
//!
//! Readers take a shared lock, writers an exclusive one. Acquisition polls
//! until the configured timeout elapses.

use fs2::FileExt;
use std::fs::{self, File, OpenOptions};
use std::io;
use std::path::{Path, PathBuf};
use std::thread;
use std::time::{Duration, Instant};

use crate::error::ErrorCode;

const POLL_INTERVAL: Duration = Duration::from_millis(10);

#[derive(Debug, thiserror::Error)]
pub enum LockError {
    #[error("lock on {} not acquired within {waited:?}", .path.display())]
    Timeout { path: PathBuf, waited: Duration },

    #[error("lock file error: {0}")]
    Io(#[from] io::Error),
}

impl LockError {
    #[must_use]
    pub const fn code(&self) -> ErrorCode {
        match self {
            Self::Timeout { .. } => ErrorCode::LockContention,
            Self::Io(_) => ErrorCode::StorageWriteFailed,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LockMode {
    Shared,
    Exclusive,
}

/// RAII guard over a lock file. Released on drop.
#[derive(Debug)]
pub struct SnapshotLock {
    file: File,
    path: PathBuf,
    mode: LockMode,
}

impl SnapshotLock {
    /// Shared lock for reading a snapshot.
    pub fn shared(path: &Path, timeout: Duration) -> Result<Self, LockError> {
        Self::acquire(path, LockMode::Shared, timeout)
    }

    /// Exclusive lock for replacing a snapshot.
    pub fn exclusive(path: &Path, timeout: Duration) -> Result<Self, LockError> {
        Self::acquire(path, LockMode::Exclusive, timeout)
    }

    pub fn acquire(path: &Path, mode: LockMode, timeout: Duration) -> Result<Self, LockError> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        let file = OpenOptions::new()
            .create(true)
            .read(true)
            .write(true)
            .truncate(false)
            .open(path)?;

        let start = Instant::now();
        loop {
            let attempt = match mode {
                LockMode::Shared => FileExt::try_lock_shared(&file),
                LockMode::Exclusive => FileExt::try_lock_exclusive(&file),
            };
            if attempt.is_ok() {
                tracing::trace!(path = %path.display(), ?mode, "lock acquired");
                return Ok(Self {
                    file,
                    path: path.to_path_buf(),
                    mode,
                });
            }

            let waited = start.elapsed();
            if waited >= timeout {
                return Err(LockError::Timeout {
                    path: path.to_path_buf(),
                    waited,
                });
            }
            thread::sleep(POLL_INTERVAL);
        }
    }

    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    #[must_use]
    pub const fn mode(&self) -> LockMode {
        self.mode
    }
}

impl Drop for SnapshotLock {
    fn drop(&mut self) {
        let _ = FileExt::unlock(&self.file);
    }
}

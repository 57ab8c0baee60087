//! Whole-collection snapshot codec.
//!
//! A snapshot is a JSON array of [`Ticket`] records stored under a single key.
//! There is no version field and no per-record key: every mutation rewrites
//! the full array.

use crate::model::Ticket;
use crate::storage::{KeyValueStore, StorageError};

/// Serialize a ticket collection to its stored form.
pub fn encode(tickets: &[Ticket]) -> Result<String, serde_json::Error> {
    serde_json::to_string(tickets)
}

/// Parse a stored snapshot.
pub fn decode(raw: &str) -> Result<Vec<Ticket>, serde_json::Error> {
    serde_json::from_str(raw)
}

/// Read the snapshot under `key`.
///
/// A missing key, a storage read error or unparseable content yield an empty
/// collection and are only logged. Lock contention is returned as an error.
pub fn read<S: KeyValueStore + ?Sized>(storage: &S, key: &str) -> Result<Vec<Ticket>, StorageError> {
    let raw = match storage.get(key) {
        Ok(Some(raw)) => raw,
        Ok(None) => {
            tracing::debug!(key, "no snapshot stored, starting empty");
            return Ok(Vec::new());
        }
        Err(e @ StorageError::Lock(_)) => {
            tracing::warn!(key, error = %e, "snapshot is locked by another process");
            return Err(e);
        }
        Err(e) => {
            tracing::warn!(key, error = %e, "snapshot read failed, starting empty");
            return Ok(Vec::new());
        }
    };

    match decode(&raw) {
        Ok(tickets) => {
            tracing::debug!(key, count = tickets.len(), "loaded snapshot");
            Ok(tickets)
        }
        Err(e) => {
            tracing::warn!(key, error = %e, "snapshot is not parseable, starting empty");
            Ok(Vec::new())
        }
    }
}

/// Like [`read`], but never fails: lock contention also yields an empty
/// collection. For read-only views only.
pub fn load<S: KeyValueStore + ?Sized>(storage: &S, key: &str) -> Vec<Ticket> {
    read(storage, key).unwrap_or_default()
}

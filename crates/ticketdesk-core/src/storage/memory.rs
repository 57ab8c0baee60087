use std::collections::HashMap;

use super::{KeyValueStore, StorageError, validate_key};

/// In-process key-value store. Values live as long as the store.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    values: HashMap<String, String>,
}

impl MemoryStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed a value without key validation, e.g. to simulate a foreign writer.
    #[must_use]
    pub fn with_value(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.values.insert(key.into(), value.into());
        self
    }

    /// Number of keys held.
    #[must_use]
    pub fn len(&self) -> usize {
        self.values.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        validate_key(key)?;
        Ok(self.values.get(key).cloned())
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), StorageError> {
        validate_key(key)?;
        self.values.insert(key.to_string(), value.to_string());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn get_missing_is_none() {
        let store = MemoryStore::new();
        assert_eq!(store.get("tickets").expect("get"), None);
    }

    #[test]
    fn set_replaces_value() {
        let mut store = MemoryStore::new();
        store.set("tickets", "[]").expect("set");
        store.set("tickets", "[1]").expect("set");
        assert_eq!(store.get("tickets").expect("get").as_deref(), Some("[1]"));
        assert_eq!(store.len(), 1);
    }

    #[test]
    fn rejects_invalid_key() {
        let mut store = MemoryStore::new();
        assert!(store.set("../x", "v").is_err());
        assert!(store.is_empty());
    }
}

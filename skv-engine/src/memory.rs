//! # In-Memory Backend
//!
//! A host-store stand-in used for embedding and tests.
//!
//! ## Design Principles
//!
//! 1. **Read-Mostly Locking**: `parking_lot::RwLock` lets `contains`/`get`
//!    run concurrently while writes stay exclusive.
//! 2. **Fast Hashing**: `hashbrown` with `ahash` keeps short string keys cheap.

use ahash::RandomState;
use hashbrown::HashMap;
use parking_lot::RwLock;

use skv_common::SkvResult;

use crate::engine::Backend;

/// Thread-safe string map implementing [`Backend`].
#[derive(Debug, Default)]
pub struct MemoryBackend {
    entries: RwLock<HashMap<String, String, RandomState>>,
}

impl MemoryBackend {
    /// Creates an empty backend.
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored keys.
    pub fn len(&self) -> usize {
        self.entries.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.read().is_empty()
    }

    /// Sorted list of stored keys.
    pub fn keys(&self) -> Vec<String> {
        let mut keys: Vec<String> = self.entries.read().keys().cloned().collect();
        keys.sort();
        keys
    }
}

impl Backend for MemoryBackend {
    fn get(&self, key: &str) -> SkvResult<Option<String>> {
        Ok(self.entries.read().get(key).cloned())
    }

    fn set(&self, key: &str, value: String) -> SkvResult<()> {
        self.entries.write().insert(key.to_string(), value);
        Ok(())
    }

    fn delete(&self, key: &str) -> SkvResult<()> {
        self.entries.write().remove(key);
        Ok(())
    }

    fn contains(&self, key: &str) -> SkvResult<bool> {
        Ok(self.entries.read().contains_key(key))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn get_set_delete() {
        let backend = MemoryBackend::new();
        assert_eq!(backend.get("k").unwrap(), None);

        backend.set("k", "v1".to_string()).unwrap();
        backend.set("k", "v2".to_string()).unwrap();
        assert_eq!(backend.get("k").unwrap().as_deref(), Some("v2"));
        assert!(backend.contains("k").unwrap());
        assert_eq!(backend.len(), 1);

        backend.delete("k").unwrap();
        assert!(!backend.contains("k").unwrap());
        assert!(backend.is_empty());
    }

    #[test]
    fn delete_absent_is_noop() {
        let backend = MemoryBackend::new();
        backend.set("other", "x".to_string()).unwrap();
        backend.delete("missing").unwrap();
        assert_eq!(backend.keys(), vec!["other".to_string()]);
    }
}

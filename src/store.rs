//! Cache Store
//!
//! Concurrent key-to-entry map shared between query paths. Inert storage:
//! the store carries no time logic, classification happens in the entry.
//!
//! # Design
//!
//! - DashMap for per-shard locking, so reads and writes to distinct keys do
//!   not contend.
//! - Entries are immutable value objects cloned out on read; `insert`
//!   always replaces wholesale, never merges.
//! - Unbounded, no implicit eviction; entries leave only via explicit
//!   `remove`/`clear` or process exit.

use dashmap::DashMap;

use crate::entry::CacheEntry;

/// Shared key-to-entry map
#[derive(Debug)]
pub struct CacheStore<T> {
    entries: DashMap<String, CacheEntry<T>>,
}

impl<T> Default for CacheStore<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> CacheStore<T> {
    /// Create a new empty store
    pub fn new() -> Self {
        Self {
            entries: DashMap::new(),
        }
    }

    /// Number of entries currently in the store
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the store is empty
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// All keys currently in the store
    pub fn keys(&self) -> Vec<String> {
        self.entries.iter().map(|kv| kv.key().clone()).collect()
    }

    /// Whether the store has an entry for `key`
    pub fn contains_key(&self, key: &str) -> bool {
        self.entries.contains_key(key)
    }

    /// Remove the entry for `key`, reporting whether one existed
    pub fn remove(&self, key: &str) -> bool {
        self.entries.remove(key).is_some()
    }

    /// Remove all entries
    pub fn clear(&self) {
        self.entries.clear();
    }

    /// Insert an entry, replacing any existing one for the key
    pub fn insert(&self, key: String, entry: CacheEntry<T>) {
        self.entries.insert(key, entry);
    }

    /// Apply `f` to the entry for `key` without cloning it out
    pub fn with_entry<R>(&self, key: &str, f: impl FnOnce(&CacheEntry<T>) -> R) -> Option<R> {
        self.entries.get(key).map(|kv| f(kv.value()))
    }
}

impl<T: Clone> CacheStore<T> {
    /// Get the entry for `key`, if any
    pub fn get(&self, key: &str) -> Option<CacheEntry<T>> {
        self.entries.get(key).map(|kv| kv.value().clone())
    }
}

// =============================================================================
// Tests
// =============================================================================

//! Read-Through Query Facade
//!
//! Orchestrates serve-from-cache vs. fetch vs. background-revalidate for a
//! single cached data family.
//!
//! # Query flow
//!
//! ```text
//! query(key, fetch, options)
//!     │
//!     ├─ entry usable (fresh) ──────────► return cached data
//!     ├─ entry usable (stale) ──────────► return cached data
//!     │                                   + spawn background revalidation
//!     └─ entry absent or expired ───────► await fetch() on caller's path
//!                                         store on success, error on failure
//! ```
//!
//! The caller never blocks on the data source while any usable cached value
//! exists; freshness is restored opportunistically off the critical path.

use std::future::Future;
use std::sync::Arc;

use tracing::debug;

use crate::clock::{Clock, SystemClock};
use crate::entry::CacheEntry;
use crate::error::{Error, Result};
use crate::metrics::CacheMetrics;
use crate::options::CacheOptions;
use crate::revalidate;
use crate::store::CacheStore;

/// Read-through stale-while-revalidate cache
///
/// Cheaply cloneable handle; clones share the same store, clock and
/// metrics. One instance caches one payload type, typically one per
/// storefront data family (products, collections, inventory).
pub struct SwrCache<T> {
    store: Arc<CacheStore<T>>,
    clock: Arc<dyn Clock>,
    metrics: Arc<CacheMetrics>,
}

impl<T> Clone for SwrCache<T> {
    fn clone(&self) -> Self {
        Self {
            store: Arc::clone(&self.store),
            clock: Arc::clone(&self.clock),
            metrics: Arc::clone(&self.metrics),
        }
    }
}

impl<T> Default for SwrCache<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> SwrCache<T> {
    /// Create a new cache on the system clock
    pub fn new() -> Self {
        Self::with_clock(Arc::new(SystemClock::new()))
    }

    /// Create a new cache with an injected clock
    pub fn with_clock(clock: Arc<dyn Clock>) -> Self {
        Self {
            store: Arc::new(CacheStore::new()),
            clock,
            metrics: Arc::new(CacheMetrics::new()),
        }
    }

    /// Manually populate the cache under `key`, bypassing any fetcher
    pub fn set(&self, key: &str, data: T, options: CacheOptions) -> Result<()> {
        options.validate()?;
        let key = options.resolve_key(key);
        let entry = CacheEntry::new(data, self.clock.now(), &options);
        debug!(key = %key, "manually populated entry");
        self.store.insert(key, entry);
        Ok(())
    }

    /// Remove the entry for `key`, reporting whether one existed
    pub fn clear(&self, key: &str) -> bool {
        self.store.remove(key)
    }

    /// Remove all entries
    pub fn clear_all(&self) {
        self.store.clear();
    }

    /// Whether the entry for `key` is servable but due for a background
    /// refresh. Diagnostic predicate; absent and expired entries read false.
    pub fn needs_revalidation(&self, key: &str) -> bool {
        let now = self.clock.now();
        self.store
            .with_entry(key, |entry| entry.needs_revalidation(now))
            .unwrap_or(false)
    }

    /// Handle to the underlying store, for diagnostics and tests
    pub fn store(&self) -> &CacheStore<T> {
        &self.store
    }

    /// Number of entries currently cached (including expired ones not yet
    /// overwritten)
    pub fn len(&self) -> usize {
        self.store.len()
    }

    /// Whether the cache holds no entries
    pub fn is_empty(&self) -> bool {
        self.store.is_empty()
    }

    /// All cached keys
    pub fn keys(&self) -> Vec<String> {
        self.store.keys()
    }

    /// Counters for this cache
    pub fn metrics(&self) -> &CacheMetrics {
        &self.metrics
    }
}

impl<T: Clone> SwrCache<T> {
    /// Read-only peek at the cached value for `key`
    ///
    /// Serves fresh and stale entries; an expired entry is a miss. Never
    /// triggers a fetch or a revalidation.
    pub fn get(&self, key: &str) -> Option<T> {
        let entry = self.store.get(key)?;
        if entry.is_usable(self.clock.now()) {
            Some(entry.into_data())
        } else {
            None
        }
    }
}

impl<T: Clone + Send + Sync + 'static> SwrCache<T> {
    /// Return the best available data for `key`
    ///
    /// Serves any usable cached value without touching the data source,
    /// scheduling a background refresh when the value is stale. With no
    /// usable value (absent or expired) the fetcher runs on the caller's
    /// path; its result is cached and returned, its failure propagated.
    pub async fn query<F, Fut>(&self, key: &str, fetch: F, options: CacheOptions) -> Result<T>
    where
        F: FnOnce() -> Fut + Send + 'static,
        Fut: Future<Output = anyhow::Result<T>> + Send + 'static,
    {
        options.validate()?;
        let key = options.resolve_key(key);
        let now = self.clock.now();

        if let Some(entry) = self.store.get(&key) {
            if entry.is_usable(now) {
                if entry.needs_revalidation(now) {
                    self.metrics.record_stale_hit();
                    debug!(key = %key, age = ?entry.age(now), "serving stale entry, scheduling revalidation");
                    revalidate::spawn(
                        Arc::clone(&self.store),
                        Arc::clone(&self.clock),
                        Arc::clone(&self.metrics),
                        key,
                        fetch,
                        options,
                    );
                } else {
                    self.metrics.record_fresh_hit();
                    debug!(key = %key, "serving fresh entry");
                }
                return Ok(entry.into_data());
            }
        }

        // Miss or full expiry: the fetch blocks the caller
        self.metrics.record_miss();
        debug!(key = %key, "no usable entry, fetching synchronously");
        match fetch().await {
            Ok(data) => {
                let entry = CacheEntry::new(data.clone(), self.clock.now(), &options);
                self.store.insert(key, entry);
                Ok(data)
            }
            Err(source) => {
                self.metrics.record_fetch_error();
                Err(Error::Fetch { key, source })
            }
        }
    }
}

// =============================================================================
// Tests
// =============================================================================

//! Cache Options
//!
//! Per-query configuration for the read-through facade.

use std::time::Duration;

use crate::error::{Error, Result};

/// Default fresh window (5 minutes)
pub const DEFAULT_MAX_AGE: Duration = Duration::from_secs(5 * 60);

/// Default stale-while-revalidate window (1 hour)
pub const DEFAULT_STALE_WHILE_REVALIDATE: Duration = Duration::from_secs(60 * 60);

/// Configuration for a read-through query
#[derive(Debug, Clone)]
pub struct CacheOptions {
    /// How long fetched data is considered fresh
    pub max_age: Duration,

    /// How long stale data remains usable while a refresh happens in the
    /// background
    pub stale_while_revalidate: Duration,

    /// Optional override for the derived cache key
    pub cache_key: Option<String>,
}

impl Default for CacheOptions {
    fn default() -> Self {
        Self {
            max_age: DEFAULT_MAX_AGE,
            stale_while_revalidate: DEFAULT_STALE_WHILE_REVALIDATE,
            cache_key: None,
        }
    }
}

impl CacheOptions {
    /// Create options with the default windows
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the fresh window
    pub fn with_max_age(mut self, max_age: Duration) -> Self {
        self.max_age = max_age;
        self
    }

    /// Set the stale-while-revalidate window
    pub fn with_stale_while_revalidate(mut self, window: Duration) -> Self {
        self.stale_while_revalidate = window;
        self
    }

    /// Override the cache key for this query
    pub fn with_cache_key(mut self, key: impl Into<String>) -> Self {
        self.cache_key = Some(key.into());
        self
    }

    /// Validate the options
    ///
    /// Durations are non-negative by construction; the remaining hazard is a
    /// window sum that overflows `Duration`, which would make the usable
    /// window undefined. Rejected here so the classifier never sees it.
    pub fn validate(&self) -> Result<()> {
        if self.max_age.checked_add(self.stale_while_revalidate).is_none() {
            return Err(Error::InvalidOptions(format!(
                "max_age ({:?}) + stale_while_revalidate ({:?}) overflows",
                self.max_age, self.stale_while_revalidate
            )));
        }
        Ok(())
    }

    /// Resolve the key to cache under: the override if set, otherwise the
    /// caller-supplied key
    pub(crate) fn resolve_key(&self, key: &str) -> String {
        match &self.cache_key {
            Some(override_key) => override_key.clone(),
            None => key.to_string(),
        }
    }
}

// =============================================================================
// Tests
// =============================================================================

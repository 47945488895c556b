//! Cache Entry and Freshness Classification
//!
//! The cached record and the pure function that classifies its temporal
//! state against a clock reading.
//!
//! # Design
//!
//! - Entries are immutable value objects: a refresh replaces the whole
//!   entry with a new timestamp, never mutates one in place.
//! - Classification partitions the non-negative age axis into exactly one
//!   of three states: fresh, stale-but-usable, expired.
//! - All duration arithmetic saturates, so the classifier is total for any
//!   `(max_age, stale_while_revalidate, now)` combination.

use std::time::{Duration, Instant};

use crate::options::CacheOptions;

/// Temporal state of a cache entry at an evaluation instant
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Freshness {
    /// Age below `max_age`; serve with no revalidation
    Fresh,
    /// Age within the stale-while-revalidate window; serve, but a
    /// background refresh should be scheduled
    Stale,
    /// Age at or beyond the usable window; must not be served
    Expired,
}

impl std::fmt::Display for Freshness {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Freshness::Fresh => write!(f, "fresh"),
            Freshness::Stale => write!(f, "stale"),
            Freshness::Expired => write!(f, "expired"),
        }
    }
}

/// A cached value with its freshness windows
#[derive(Debug, Clone)]
pub struct CacheEntry<T> {
    /// The cached payload, opaque to the cache
    data: T,
    /// Creation or last-refresh instant
    timestamp: Instant,
    /// Length of the fresh window after `timestamp`
    max_age: Duration,
    /// Length of the additional usable-but-stale window after `max_age`
    stale_while_revalidate: Duration,
}

impl<T> CacheEntry<T> {
    /// Create a new entry stamped at `now` with the windows from `options`
    pub fn new(data: T, now: Instant, options: &CacheOptions) -> Self {
        Self {
            data,
            timestamp: now,
            max_age: options.max_age,
            stale_while_revalidate: options.stale_while_revalidate,
        }
    }

    /// Get the cached payload
    #[inline]
    pub fn data(&self) -> &T {
        &self.data
    }

    /// Consume the entry, returning the payload
    #[inline]
    pub fn into_data(self) -> T {
        self.data
    }

    /// Get the creation/last-refresh instant
    #[inline]
    pub fn timestamp(&self) -> Instant {
        self.timestamp
    }

    /// Get the fresh window length
    #[inline]
    pub fn max_age(&self) -> Duration {
        self.max_age
    }

    /// Get the stale-while-revalidate window length
    #[inline]
    pub fn stale_while_revalidate(&self) -> Duration {
        self.stale_while_revalidate
    }

    /// Age of the entry at `now`
    ///
    /// A `now` before the entry's timestamp reads as age zero.
    #[inline]
    pub fn age(&self, now: Instant) -> Duration {
        now.saturating_duration_since(self.timestamp)
    }

    /// Classify the entry's temporal state at `now`
    pub fn freshness(&self, now: Instant) -> Freshness {
        let age = self.age(now);
        if age < self.max_age {
            Freshness::Fresh
        } else if age < self.max_age.saturating_add(self.stale_while_revalidate) {
            Freshness::Stale
        } else {
            Freshness::Expired
        }
    }

    /// Whether the entry may be served at `now` (fresh or stale)
    #[inline]
    pub fn is_usable(&self, now: Instant) -> bool {
        self.freshness(now) != Freshness::Expired
    }

    /// Whether the entry is servable but should be refreshed in the
    /// background (stale, not fresh)
    #[inline]
    pub fn needs_revalidation(&self, now: Instant) -> bool {
        self.freshness(now) == Freshness::Stale
    }
}

// =============================================================================
// Tests
// =============================================================================

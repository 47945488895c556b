//! Cache Metrics Collection
//!
//! Counters for monitoring cache health: hit/miss breakdown and the outcome
//! of background revalidations.

use std::sync::atomic::{AtomicU64, Ordering};

use chrono::{DateTime, Utc};
use serde::Serialize;

/// Cache metrics collector
#[derive(Debug, Default)]
pub struct CacheMetrics {
    /// Queries answered from a fresh entry
    fresh_hits: AtomicU64,
    /// Queries answered from a stale entry (revalidation scheduled)
    stale_hits: AtomicU64,
    /// Queries with no usable entry (absent or expired)
    misses: AtomicU64,
    /// Synchronous fetches that failed
    fetch_errors: AtomicU64,
    /// Background revalidations that replaced the entry
    revalidation_successes: AtomicU64,
    /// Background revalidations that failed and were swallowed
    revalidation_failures: AtomicU64,
}

impl CacheMetrics {
    /// Create a new metrics collector
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record_fresh_hit(&self) {
        self.fresh_hits.fetch_add(1, Ordering::Relaxed);
    }

    pub fn record_stale_hit(&self) {
        self.stale_hits.fetch_add(1, Ordering::Relaxed);
    }

    pub fn record_miss(&self) {
        self.misses.fetch_add(1, Ordering::Relaxed);
    }

    pub fn record_fetch_error(&self) {
        self.fetch_errors.fetch_add(1, Ordering::Relaxed);
    }

    pub fn record_revalidation_success(&self) {
        self.revalidation_successes.fetch_add(1, Ordering::Relaxed);
    }

    pub fn record_revalidation_failure(&self) {
        self.revalidation_failures.fetch_add(1, Ordering::Relaxed);
    }

    pub fn fresh_hits(&self) -> u64 {
        self.fresh_hits.load(Ordering::Relaxed)
    }

    pub fn stale_hits(&self) -> u64 {
        self.stale_hits.load(Ordering::Relaxed)
    }

    pub fn misses(&self) -> u64 {
        self.misses.load(Ordering::Relaxed)
    }

    pub fn fetch_errors(&self) -> u64 {
        self.fetch_errors.load(Ordering::Relaxed)
    }

    pub fn revalidation_successes(&self) -> u64 {
        self.revalidation_successes.load(Ordering::Relaxed)
    }

    pub fn revalidation_failures(&self) -> u64 {
        self.revalidation_failures.load(Ordering::Relaxed)
    }

    /// Fraction of queries served from cache (fresh or stale)
    pub fn hit_ratio(&self) -> f64 {
        let hits = (self.fresh_hits() + self.stale_hits()) as f64;
        let total = hits + self.misses() as f64;
        if total == 0.0 {
            0.0
        } else {
            hits / total
        }
    }

    /// Capture a point-in-time snapshot of all counters
    pub fn snapshot(&self) -> MetricsSnapshot {
        MetricsSnapshot {
            fresh_hits: self.fresh_hits(),
            stale_hits: self.stale_hits(),
            misses: self.misses(),
            fetch_errors: self.fetch_errors(),
            revalidation_successes: self.revalidation_successes(),
            revalidation_failures: self.revalidation_failures(),
            hit_ratio: self.hit_ratio(),
            captured_at: Utc::now(),
        }
    }
}

/// Point-in-time view of the cache counters
#[derive(Debug, Clone, Serialize)]
pub struct MetricsSnapshot {
    pub fresh_hits: u64,
    pub stale_hits: u64,
    pub misses: u64,
    pub fetch_errors: u64,
    pub revalidation_successes: u64,
    pub revalidation_failures: u64,
    pub hit_ratio: f64,
    /// When this snapshot was captured
    pub captured_at: DateTime<Utc>,
}

// =============================================================================
// Tests
// =============================================================================

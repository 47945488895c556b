//! Clock Abstraction
//!
//! Supplies the current instant to the freshness classifier. Injected as a
//! trait object so tests can simulate time passage without sleeping.

use std::sync::Arc;
use std::time::{Duration, Instant};

use parking_lot::RwLock;

/// Source of the current instant
pub trait Clock: Send + Sync {
    /// Get the current instant
    fn now(&self) -> Instant;
}

/// Production clock backed by the monotonic system clock
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemClock;

impl SystemClock {
    /// Create a new system clock
    pub fn new() -> Self {
        Self
    }
}

impl Clock for SystemClock {
    fn now(&self) -> Instant {
        Instant::now()
    }
}

/// Manually advanced clock for testing
///
/// Reports a fixed base instant plus an explicitly advanced offset. Never
/// moves on its own.
pub struct ManualClock {
    /// Base instant captured at construction
    base: Instant,
    /// Offset added to the base on every read
    offset: RwLock<Duration>,
}

impl Default for ManualClock {
    fn default() -> Self {
        Self::new()
    }
}

impl ManualClock {
    /// Create a new manual clock anchored at the current instant
    pub fn new() -> Self {
        Self {
            base: Instant::now(),
            offset: RwLock::new(Duration::ZERO),
        }
    }

    /// Create a shared handle, ready to hand to a cache
    pub fn shared() -> Arc<Self> {
        Arc::new(Self::new())
    }

    /// Advance the clock by the given duration
    pub fn advance(&self, duration: Duration) {
        let mut offset = self.offset.write();
        *offset = offset.saturating_add(duration);
    }

    /// Get the total offset advanced so far
    pub fn elapsed(&self) -> Duration {
        *self.offset.read()
    }
}

impl Clock for ManualClock {
    fn now(&self) -> Instant {
        self.base + *self.offset.read()
    }
}

// =============================================================================
// Tests
// =============================================================================

//! storecache - Read-Through Stale-While-Revalidate Cache
//!
//! In-memory caching layer for storefront data fetching. Serves any usable
//! cached value without blocking on the data source, refreshing stale
//! entries opportunistically in the background.
//!
//! # Architecture
//!
//! ```text
//! ┌───────────────────────────────────────────────────────────────┐
//! │                     SwrCache (facade)                         │
//! ├───────────────────────────────────────────────────────────────┤
//! │  CacheStore            │ Freshness Classifier │ Revalidator   │
//! │  ┌──────────────────┐  │ ┌─────────────────┐  │ ┌──────────┐  │
//! │  │ DashMap          │  │ │ fresh / stale / │  │ │ detached │  │
//! │  │ key → CacheEntry │  │ │ expired         │  │ │ tokio    │  │
//! │  └──────────────────┘  │ └─────────────────┘  │ │ task     │  │
//! │            │           │          │           │ └──────────┘  │
//! │            └───────────┴──────────┴───────────────┘           │
//! │                              │                                │
//! │                   Clock (injected, mockable)                  │
//! └───────────────────────────────────────────────────────────────┘
//! ```
//!
//! # Freshness model
//!
//! Every entry carries two windows measured from its creation instant: the
//! fresh window (`max_age`) and an additional usable-but-stale window
//! (`stale_while_revalidate`). A fresh entry is served as-is; a stale entry
//! is served immediately while a background task re-runs the fetcher; an
//! expired entry is treated as a miss and the fetcher runs on the caller's
//! path.
//!
//! # Example
//!
//! ```no_run
//! use std::time::Duration;
//! use storecache::{generate_key, CacheOptions, SwrCache};
//!
//! # async fn load_products() -> anyhow::Result<Vec<String>> { Ok(vec![]) }
//! # async fn example() -> storecache::Result<()> {
//! let cache: SwrCache<Vec<String>> = SwrCache::new();
//!
//! let key = generate_key("products", &[("category", Some("gifts".into()))]);
//! let products = cache
//!     .query(
//!         &key,
//!         || load_products(),
//!         CacheOptions::new().with_max_age(Duration::from_secs(300)),
//!     )
//!     .await?;
//! # Ok(())
//! # }
//! ```
//!
//! # Modules
//!
//! - [`cache`] - Read-through query facade
//! - [`clock`] - Injectable time source
//! - [`entry`] - Cache entry and freshness classification
//! - [`error`] - Error types
//! - [`key`] - Deterministic cache key generation
//! - [`metrics`] - Hit/miss and revalidation counters
//! - [`options`] - Per-query configuration
//! - [`store`] - Concurrent key-to-entry map

pub mod cache;
pub mod clock;
pub mod entry;
pub mod error;
pub mod key;
pub mod metrics;
pub mod options;
mod revalidate;
pub mod store;

// Re-export commonly used types
pub use cache::SwrCache;
pub use clock::{Clock, ManualClock, SystemClock};
pub use entry::{CacheEntry, Freshness};
pub use error::{Error, Result};
pub use key::{generate_key, ParamValue};
pub use metrics::{CacheMetrics, MetricsSnapshot};
pub use options::{CacheOptions, DEFAULT_MAX_AGE, DEFAULT_STALE_WHILE_REVALIDATE};
pub use store::CacheStore;

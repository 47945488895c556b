//! Background Revalidation
//!
//! Fire-and-forget refresh of a stale entry. The task owns the fetcher and
//! handles to the store, clock and metrics; nothing awaits it and nothing
//! propagates out of it. On success the entry is replaced wholesale with a
//! new timestamp; on failure the stale entry stays servable until it
//! expires on its own schedule.

use std::future::Future;
use std::sync::Arc;

use tracing::{debug, warn};

use crate::clock::Clock;
use crate::entry::CacheEntry;
use crate::metrics::CacheMetrics;
use crate::options::CacheOptions;
use crate::store::CacheStore;

/// Spawn a detached revalidation task for `key`
///
/// The returned `JoinHandle` is deliberately discarded; the caller must not
/// block on the refresh.
pub(crate) fn spawn<T, F, Fut>(
    store: Arc<CacheStore<T>>,
    clock: Arc<dyn Clock>,
    metrics: Arc<CacheMetrics>,
    key: String,
    fetch: F,
    options: CacheOptions,
) where
    T: Send + Sync + 'static,
    F: FnOnce() -> Fut + Send + 'static,
    Fut: Future<Output = anyhow::Result<T>> + Send + 'static,
{
    tokio::spawn(async move {
        match fetch().await {
            Ok(data) => {
                let entry = CacheEntry::new(data, clock.now(), &options);
                store.insert(key.clone(), entry);
                metrics.record_revalidation_success();
                debug!(key = %key, "background revalidation refreshed entry");
            }
            Err(error) => {
                metrics.record_revalidation_failure();
                warn!(
                    key = %key,
                    error = %error,
                    "background revalidation failed, keeping stale entry"
                );
            }
        }
    });
}

// =============================================================================
// Tests
// =============================================================================

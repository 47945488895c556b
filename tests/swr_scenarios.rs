//! End-to-end stale-while-revalidate scenarios
//!
//! Drives the facade through full cache lifecycles on a manually advanced
//! clock: fresh/stale/expired transitions, background refresh outcomes, and
//! concurrent access.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;

use serde_json::{json, Value};
use storecache::{generate_key, CacheOptions, Error, ManualClock, SwrCache};

fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("storecache=debug")),
        )
        .try_init();
}

fn options(max_age_ms: u64, swr_ms: u64) -> CacheOptions {
    CacheOptions::new()
        .with_max_age(Duration::from_millis(max_age_ms))
        .with_stale_while_revalidate(Duration::from_millis(swr_ms))
}

fn product_page(rev: &str) -> Value {
    json!({
        "products": [
            { "handle": "gift-card", "price": "25.00" },
            { "handle": "snowboard", "price": "699.95" },
        ],
        "rev": rev,
    })
}

/// Poll until `cond` holds, failing after ~1s
async fn wait_until(cond: impl Fn() -> bool) {
    for _ in 0..200 {
        if cond() {
            return;
        }
        tokio::time::sleep(Duration::from_millis(5)).await;
    }
    panic!("condition not met within 1s");
}

/// One entry observed fresh at t=3000, stale at t=10000 (background refresh
/// fired, here failing so the entry survives), expired at t=70000
/// (synchronous refetch).
#[tokio::test]
async fn full_lifecycle_fresh_stale_expired() {
    init_tracing();
    let clock = ManualClock::shared();
    let cache: SwrCache<Value> = SwrCache::with_clock(clock.clone());
    let fetches = Arc::new(AtomicUsize::new(0));

    // t=0: cold miss populates the entry
    let counted = Arc::clone(&fetches);
    let v1 = cache
        .query(
            "products",
            move || async move {
                counted.fetch_add(1, Ordering::SeqCst);
                Ok(product_page("v1"))
            },
            options(5000, 60000),
        )
        .await
        .unwrap();
    assert_eq!(v1["rev"], "v1");
    assert_eq!(fetches.load(Ordering::SeqCst), 1);

    // t=3000: fresh, served from cache, fetcher untouched
    clock.advance(Duration::from_millis(3000));
    let counted = Arc::clone(&fetches);
    let hit = cache
        .query(
            "products",
            move || async move {
                counted.fetch_add(1, Ordering::SeqCst);
                Ok(product_page("v2"))
            },
            options(5000, 60000),
        )
        .await
        .unwrap();
    assert_eq!(hit["rev"], "v1");
    assert_eq!(fetches.load(Ordering::SeqCst), 1);
    assert!(!cache.needs_revalidation("products"));

    // t=10000: stale, served immediately, background refresh fired (and
    // fails, leaving the original entry in place)
    clock.advance(Duration::from_millis(7000));
    assert!(cache.needs_revalidation("products"));
    let counted = Arc::clone(&fetches);
    let stale = cache
        .query(
            "products",
            move || async move {
                counted.fetch_add(1, Ordering::SeqCst);
                Err(anyhow::anyhow!("inventory service unavailable"))
            },
            options(5000, 60000),
        )
        .await
        .unwrap();
    assert_eq!(stale["rev"], "v1");

    wait_until(|| cache.metrics().revalidation_failures() == 1).await;
    assert_eq!(fetches.load(Ordering::SeqCst), 2);
    assert_eq!(cache.get("products").unwrap()["rev"], "v1");

    // t=70000: past the usable window, fetch runs on the caller's path
    clock.advance(Duration::from_millis(60000));
    assert_eq!(cache.get("products"), None);
    let counted = Arc::clone(&fetches);
    let refetched = cache
        .query(
            "products",
            move || async move {
                counted.fetch_add(1, Ordering::SeqCst);
                Ok(product_page("v3"))
            },
            options(5000, 60000),
        )
        .await
        .unwrap();
    assert_eq!(refetched["rev"], "v3");
    assert_eq!(fetches.load(Ordering::SeqCst), 3);

    assert_eq!(cache.metrics().fresh_hits(), 1);
    assert_eq!(cache.metrics().stale_hits(), 1);
    assert_eq!(cache.metrics().misses(), 2);
}

/// Generated keys are independent of parameter order and feed straight into
/// the facade.
#[tokio::test]
async fn generated_keys_are_order_independent() {
    init_tracing();
    let cache: SwrCache<Value> = SwrCache::new();

    let key_a = generate_key(
        "products",
        &[
            ("category", Some("gifts".into())),
            ("sort", Some("price".into())),
        ],
    );
    let key_b = generate_key(
        "products",
        &[
            ("sort", Some("price".into())),
            ("category", Some("gifts".into())),
        ],
    );
    assert_eq!(key_a, "products?category=gifts&sort=price");
    assert_eq!(key_a, key_b);

    cache
        .query(&key_a, || async { Ok(product_page("v1")) }, options(5000, 60000))
        .await
        .unwrap();

    // The permuted key hits the same entry
    assert_eq!(cache.get(&key_b).unwrap()["rev"], "v1");
}

/// A cold key with a failing fetcher surfaces the error and leaves the
/// store empty.
#[tokio::test]
async fn cold_key_failure_leaves_store_empty() {
    init_tracing();
    let cache: SwrCache<Value> = SwrCache::new();

    let result = cache
        .query(
            "products",
            || async { Err(anyhow::anyhow!("connection refused")) },
            options(5000, 60000),
        )
        .await;

    match result {
        Err(Error::Fetch { key, source }) => {
            assert_eq!(key, "products");
            assert!(source.to_string().contains("connection refused"));
        }
        Err(other) => panic!("unexpected error: {:?}", other),
        Ok(value) => panic!("expected fetch error, got {:?}", value),
    }
    assert!(cache.is_empty());
}

/// First fetch succeeds at t=0, a background revalidation at t=6000 fails;
/// the original data stays servable until t=65000.
#[tokio::test]
async fn failed_revalidation_preserves_original_until_expiry() {
    init_tracing();
    let clock = ManualClock::shared();
    let cache: SwrCache<Value> = SwrCache::with_clock(clock.clone());

    cache
        .query("products", || async { Ok(product_page("v1")) }, options(5000, 60000))
        .await
        .unwrap();
    let original_ts = cache
        .store()
        .with_entry("products", |e| e.timestamp())
        .unwrap();

    // t=6000: stale query, background refresh fails
    clock.advance(Duration::from_millis(6000));
    let served = cache
        .query(
            "products",
            || async { Err(anyhow::anyhow!("upstream 503")) },
            options(5000, 60000),
        )
        .await
        .unwrap();
    assert_eq!(served["rev"], "v1");
    wait_until(|| cache.metrics().revalidation_failures() == 1).await;

    // Data and timestamp untouched
    let ts_after = cache
        .store()
        .with_entry("products", |e| e.timestamp())
        .unwrap();
    assert_eq!(ts_after, original_ts);

    // Still servable just before the usable window closes...
    clock.advance(Duration::from_millis(58999)); // t=64999
    assert_eq!(cache.get("products").unwrap()["rev"], "v1");

    // ...and gone exactly at t=65000
    clock.advance(Duration::from_millis(1));
    assert_eq!(cache.get("products"), None);
}

/// Concurrent queries across distinct keys settle into a consistent store.
#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn concurrent_queries_settle_consistently() {
    init_tracing();
    let cache: SwrCache<Value> = SwrCache::new();

    let tasks: Vec<_> = (0..16)
        .map(|i| {
            let cache = cache.clone();
            let key = generate_key("products", &[("page", Some(((i % 4) as u32).into()))]);
            tokio::spawn(async move {
                let page = key.clone();
                let value = cache
                    .query(
                        &key,
                        move || async move { Ok(json!({ "page": page })) },
                        options(5000, 60000),
                    )
                    .await
                    .unwrap();
                assert_eq!(value["page"], key);
            })
        })
        .collect();

    for result in futures::future::join_all(tasks).await {
        result.unwrap();
    }

    // 4 distinct pages, each cached once regardless of which task won
    assert_eq!(cache.len(), 4);
    let mut keys = cache.keys();
    keys.sort();
    assert_eq!(
        keys,
        vec![
            "products?page=0",
            "products?page=1",
            "products?page=2",
            "products?page=3",
        ]
    );
}

/// Manual population and invalidation behave like any fetched entry.
#[tokio::test]
async fn manual_set_and_clear() {
    init_tracing();
    let clock = ManualClock::shared();
    let cache: SwrCache<Value> = SwrCache::with_clock(clock.clone());

    cache
        .set("featured", product_page("manual"), options(5000, 60000))
        .unwrap();
    assert_eq!(cache.get("featured").unwrap()["rev"], "manual");

    // Manual entries classify like fetched ones
    clock.advance(Duration::from_millis(6000));
    assert!(cache.needs_revalidation("featured"));

    assert!(cache.clear("featured"));
    assert_eq!(cache.get("featured"), None);

    cache.set("a", json!(1), options(5000, 60000)).unwrap();
    cache.set("b", json!(2), options(5000, 60000)).unwrap();
    cache.clear_all();
    assert!(cache.is_empty());
}

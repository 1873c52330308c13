//! Cache protocol behavior: one get, at most one set, hit short-circuits
//! the engine.

use std::collections::HashMap;
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;

use serde_json::json;
use veneer::{MemoryCache, RenderCacheStore, RenderEvent, Veneer, VeneerOptions};

const EJS_SOURCE: &str = "<h2><%= test.foo %></h2>";

/// Store that records cache traffic for assertions.
#[derive(Clone, Default)]
struct SpyCache {
    state: Arc<SpyState>,
}

#[derive(Default)]
struct SpyState {
    gets: AtomicUsize,
    sets: AtomicUsize,
    entries: Mutex<HashMap<String, String>>,
}

impl RenderCacheStore for SpyCache {
    fn get(&self, key: &str) -> Option<String> {
        self.state.gets.fetch_add(1, Ordering::SeqCst);
        self.state.entries.lock().unwrap().get(key).cloned()
    }

    fn set(&self, key: &str, value: String) {
        self.state.sets.fetch_add(1, Ordering::SeqCst);
        self.state.entries.lock().unwrap().insert(key.to_string(), value);
    }
}

#[tokio::test]
async fn repeated_renders_hit_the_cache() {
    let veneer = Veneer::with_options(VeneerOptions {
        default_engine: None,
        cache: true,
    });
    let data = json!({"test": {"foo": "bar"}});

    let first = veneer.render(EJS_SOURCE, Some(&data), None, None, None).await;
    let second = veneer.render(EJS_SOURCE, Some(&data), None, None, None).await;

    assert_eq!(first, "<h2>bar</h2>");
    assert_eq!(first, second);
}

#[tokio::test]
async fn cache_performs_one_get_and_at_most_one_set_per_render() {
    let mut veneer = Veneer::new();
    let spy = SpyCache::default();
    veneer.set_cache(Some(Box::new(spy.clone())));

    let data = json!({"test": {"foo": "bar"}});

    veneer.render(EJS_SOURCE, Some(&data), None, None, None).await;
    assert_eq!(spy.state.gets.load(Ordering::SeqCst), 1);
    assert_eq!(spy.state.sets.load(Ordering::SeqCst), 1);

    // Second render: the hit short-circuits the engine, so no further set.
    veneer.render(EJS_SOURCE, Some(&data), None, None, None).await;
    assert_eq!(spy.state.gets.load(Ordering::SeqCst), 2);
    assert_eq!(spy.state.sets.load(Ordering::SeqCst), 1);
}

#[tokio::test]
async fn cache_hits_and_misses_are_observable() {
    let mut veneer = Veneer::new();
    veneer.enable_cache();

    let hits = Arc::new(AtomicUsize::new(0));
    let misses = Arc::new(AtomicUsize::new(0));
    let (seen_hits, seen_misses) = (hits.clone(), misses.clone());
    veneer.on_event(move |event| match event {
        RenderEvent::CacheHit { .. } => {
            seen_hits.fetch_add(1, Ordering::SeqCst);
        }
        RenderEvent::CacheMiss { .. } => {
            seen_misses.fetch_add(1, Ordering::SeqCst);
        }
        _ => {}
    });

    let data = json!({"test": {"foo": "bar"}});
    veneer.render(EJS_SOURCE, Some(&data), None, None, None).await;
    veneer.render(EJS_SOURCE, Some(&data), None, None, None).await;

    assert_eq!(misses.load(Ordering::SeqCst), 1);
    assert_eq!(hits.load(Ordering::SeqCst), 1);
}

#[tokio::test]
async fn different_data_means_different_cache_entries() {
    let mut veneer = Veneer::new();
    let spy = SpyCache::default();
    veneer.set_cache(Some(Box::new(spy.clone())));

    veneer.render(EJS_SOURCE, Some(&json!({"test": {"foo": "bar"}})), None, None, None).await;
    veneer.render(EJS_SOURCE, Some(&json!({"test": {"foo": "baz"}})), None, None, None).await;

    assert_eq!(spy.state.sets.load(Ordering::SeqCst), 2);
    assert_eq!(spy.state.entries.lock().unwrap().len(), 2);
}

#[test]
fn sync_path_uses_its_own_cache_slot() {
    let mut veneer = Veneer::new();
    let async_spy = SpyCache::default();
    let sync_spy = SpyCache::default();
    veneer.set_cache(Some(Box::new(async_spy.clone())));
    veneer.set_cache_sync(Some(Box::new(sync_spy.clone())));

    let data = json!({"test": {"foo": "bar"}});
    let out = veneer.render_sync(EJS_SOURCE, Some(&data), None, None, None);

    assert_eq!(out, "<h2>bar</h2>");
    assert_eq!(sync_spy.state.gets.load(Ordering::SeqCst), 1);
    assert_eq!(async_spy.state.gets.load(Ordering::SeqCst), 0);
}

#[test]
fn memory_cache_counts_hits_through_the_facade() {
    let veneer = Veneer::new();
    // Drive the store directly to confirm the accounting the facade
    // relies on.
    let cache = MemoryCache::new();
    assert_eq!(cache.get("missing"), None);
    cache.set("k", "v".to_string());
    assert_eq!(cache.get("k").as_deref(), Some("v"));
    assert_eq!(cache.stats(), (1, 1));

    // And the facade starts with no cache at all.
    assert!(veneer.cache().is_none());
}

#[tokio::test]
async fn failed_renders_are_not_cached() {
    let mut veneer = Veneer::new();
    let spy = SpyCache::default();
    veneer.set_cache(Some(Box::new(spy.clone())));

    let out = veneer.render("p Hello", None, Some("pug"), None, None).await;

    assert_eq!(out, "");
    assert_eq!(spy.state.sets.load(Ordering::SeqCst), 0);
}

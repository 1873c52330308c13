//! Render-result caching.
//!
//! Caching is off by default. The facade owns no caching logic beyond key
//! construction and a get/set protocol; the store itself is an opaque
//! collaborator supplied by the caller. Two independent slots exist on the
//! facade, one for the asynchronous path and one for the synchronous path,
//! because caller-supplied stores may carry different concurrency contracts.
//!
//! [`MemoryCache`] is the built-in store: an in-process map with hit/miss
//! accounting, suitable for single-process use and for tests.

use std::collections::HashMap;
use std::sync::Mutex;

/// Contract for a render-output cache.
///
/// The facade performs exactly one `get` and at most one `set` per render
/// call, and holds no lock across the engine invocation. Two concurrent
/// renders of the same key may therefore both miss and both populate the
/// store; the last write wins. Implementations must be safe to share across
/// threads but are free to drop or evict entries at any time.
pub trait RenderCacheStore: Send + Sync {
    /// Look up a previously rendered output.
    fn get(&self, key: &str) -> Option<String>;

    /// Store a rendered output under the composite key.
    fn set(&self, key: &str, value: String);
}

#[derive(Debug, Default)]
struct MemoryCacheInner {
    entries: HashMap<String, String>,
    hits: usize,
    misses: usize,
}

/// In-process render cache with hit/miss accounting.
#[derive(Debug, Default)]
pub struct MemoryCache {
    inner: Mutex<MemoryCacheInner>,
}

impl MemoryCache {
    /// Create an empty cache.
    pub fn new() -> Self {
        Self::default()
    }

    /// Remove all cached entries and reset the counters.
    pub fn clear(&self) {
        if let Ok(mut inner) = self.inner.lock() {
            inner.entries.clear();
            inner.hits = 0;
            inner.misses = 0;
        }
    }

    /// Lifetime `(hits, misses)` counters.
    pub fn stats(&self) -> (usize, usize) {
        self.inner.lock().map(|inner| (inner.hits, inner.misses)).unwrap_or((0, 0))
    }

    /// Hit rate as a percentage of all lookups, `0.0` when untouched.
    pub fn hit_rate(&self) -> f64 {
        let (hits, misses) = self.stats();
        let total = hits + misses;
        if total == 0 {
            0.0
        } else {
            (hits as f64 / total as f64) * 100.0
        }
    }
}

impl RenderCacheStore for MemoryCache {
    fn get(&self, key: &str) -> Option<String> {
        let mut inner = self.inner.lock().ok()?;
        if let Some(value) = inner.entries.get(key).cloned() {
            inner.hits += 1;
            Some(value)
        } else {
            inner.misses += 1;
            None
        }
    }

    fn set(&self, key: &str, value: String) {
        if let Ok(mut inner) = self.inner.lock() {
            inner.entries.insert(key.to_string(), value);
        }
    }
}

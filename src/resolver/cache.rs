use lru::LruCache;
use std::num::NonZeroUsize;
use std::sync::{Mutex, PoisonError};

use crate::registry::Route;
use std::sync::Arc;

/// Bounded `(method + path) -> Route` memoization layer.
///
/// Only successful matches are stored; a miss is never cached. Eviction is
/// least-recently-used at a fixed capacity. The lock is scoped to a single
/// lookup or insert and is never held across a registry scan, so a
/// lookup-miss / scan / insert race between threads can at worst insert the
/// same key twice, which is benign: values for a given key are structurally
/// identical.
pub struct ResolutionCache {
    inner: Mutex<LruCache<String, Arc<Route>>>,
}

impl ResolutionCache {
    /// Create a cache bounded at `capacity` entries (minimum 1).
    #[must_use]
    pub fn new(capacity: usize) -> Self {
        let capacity = NonZeroUsize::new(capacity).unwrap_or(NonZeroUsize::MIN);
        Self {
            inner: Mutex::new(LruCache::new(capacity)),
        }
    }

    /// Look up a cached route, promoting the entry on hit.
    #[must_use]
    pub fn get(&self, key: &str) -> Option<Arc<Route>> {
        self.inner
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .get(key)
            .map(Arc::clone)
    }

    /// Store a successful resolution, evicting the least recently used entry
    /// if the cache is full. Last writer wins on duplicate keys.
    pub fn insert(&self, key: String, route: Arc<Route>) {
        self.inner
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .put(key, route);
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.inner
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn clear(&self) {
        self.inner
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clear();
    }
}

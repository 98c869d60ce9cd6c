//! Bounded in-memory cache for results that can no longer change
//!
//! Scoreboards and stat lines for days that are already over are immutable,
//! so re-polling them is wasted traffic. This module keeps those results in
//! an LRU so switching back and forth between past weeks stays cheap. Live
//! data must never go through it.

use lru::LruCache;
use std::{
    future::Future,
    hash::Hash,
    num::NonZeroUsize,
    sync::{Arc, Mutex, MutexGuard},
};
use tracing::debug;

use crate::Result;

/// Key usable in a [`MemoryCache`].
pub trait CacheKey: Hash + Eq + Clone + Send + Sync {
    /// Short human-readable form for logs.
    fn describe(&self) -> String;
}

/// Thread-safe LRU cache. Clones share the same storage.
pub struct MemoryCache<K, V>
where
    K: CacheKey,
    V: Clone,
{
    entries: Arc<Mutex<LruCache<K, V>>>,
    capacity: usize,
}

impl<K, V> Clone for MemoryCache<K, V>
where
    K: CacheKey,
    V: Clone,
{
    fn clone(&self) -> Self {
        Self {
            entries: Arc::clone(&self.entries),
            capacity: self.capacity,
        }
    }
}

impl<K, V> MemoryCache<K, V>
where
    K: CacheKey,
    V: Clone,
{
    /// A capacity of zero is bumped to one.
    pub fn new(capacity: usize) -> Self {
        let cap = NonZeroUsize::new(capacity).unwrap_or(NonZeroUsize::MIN);
        Self {
            entries: Arc::new(Mutex::new(LruCache::new(cap))),
            capacity: cap.get(),
        }
    }

    fn lock(&self) -> MutexGuard<'_, LruCache<K, V>> {
        self.entries.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    pub fn get(&self, key: &K) -> Option<V> {
        self.lock().get(key).cloned()
    }

    pub fn put(&self, key: K, value: V) {
        self.lock().put(key, value);
    }

    pub fn clear(&self) {
        self.lock().clear();
    }

    /// `(entries, capacity)`
    pub fn stats(&self) -> (usize, usize) {
        (self.lock().len(), self.capacity)
    }

    /// Return the cached value or run `fetch` and cache its success.
    ///
    /// Errors are passed through and never cached.
    pub async fn get_or_try_insert_with<F, Fut>(&self, key: K, fetch: F) -> Result<V>
    where
        F: FnOnce() -> Fut,
        Fut: Future<Output = Result<V>>,
    {
        if let Some(hit) = self.get(&key) {
            debug!(key = %key.describe(), "cache hit");
            return Ok(hit);
        }

        debug!(key = %key.describe(), "cache miss");
        let value = fetch().await?;
        self.put(key, value.clone());
        Ok(value)
    }
}

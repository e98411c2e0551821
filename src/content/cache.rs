// SPDX-License-Identifier: MPL-2.0
//! Request cache for resolved content.
//!
//! # Design
//!
//! - **Deduplicated**: concurrent requests for the same key share a single
//!   in-flight resolution
//! - **Memoized**: once resolved, a key is served from memory until evicted
//! - **LRU-bounded**: least recently used keys are evicted past capacity
//! - **Aged**: entries older than `gc_time` are dropped on next access
//! - Neither bound ever drops a resolution that is still running
//!
//! # Usage
//!
//! ```ignore
//! let cache = QueryCache::new(CacheConfig::default());
//! let value = cache.fetch(key, || async { expensive().await }).await;
//! ```

use lru::LruCache;
use std::collections::HashMap;
use std::future::Future;
use std::hash::Hash;
use std::num::NonZeroUsize;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex, MutexGuard, Weak};
use std::time::{Duration, Instant};
use tokio::sync::OnceCell;

use crate::config::{defaults, Config};

/// Configuration for the query cache.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CacheConfig {
    /// Maximum number of keys kept in memory.
    pub capacity: NonZeroUsize,

    /// Age after which an entry is collected.
    pub gc_time: Duration,
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self::new(
            defaults::DEFAULT_QUERY_CACHE_CAPACITY,
            Duration::from_secs(defaults::DEFAULT_QUERY_GC_TIME_SECS),
        )
    }
}

impl CacheConfig {
    /// Creates a cache configuration, clamping the capacity to the valid range.
    #[must_use]
    pub fn new(capacity: usize, gc_time: Duration) -> Self {
        let capacity = capacity.clamp(
            defaults::MIN_QUERY_CACHE_CAPACITY,
            defaults::MAX_QUERY_CACHE_CAPACITY,
        );
        Self {
            capacity: NonZeroUsize::new(capacity).unwrap_or(NonZeroUsize::MIN),
            gc_time,
        }
    }

    #[must_use]
    pub fn from_config(config: &Config) -> Self {
        Self::new(config.query_cache_capacity(), config.query_gc_time())
    }
}

/// Statistics about cache performance.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CacheStats {
    /// Number of keys currently cached.
    pub entries: usize,

    /// Requests answered by an existing entry (resolved or in flight).
    pub hits: u64,

    /// Requests that ran the loader.
    pub misses: u64,

    /// Entries dropped because of capacity or age.
    pub evictions: u64,
}

impl CacheStats {
    /// Returns the cache hit rate as a percentage (0.0 - 100.0).
    #[allow(clippy::cast_precision_loss)]
    #[must_use]
    pub fn hit_rate(&self) -> f64 {
        let total = self.hits + self.misses;
        if total == 0 {
            0.0
        } else {
            (self.hits as f64 / total as f64) * 100.0
        }
    }
}

struct Entry<V> {
    cell: Arc<OnceCell<V>>,
    created_at: Instant,
}

impl<V> Entry<V> {
    fn new(cell: Arc<OnceCell<V>>) -> Self {
        Self {
            cell,
            created_at: Instant::now(),
        }
    }
}

struct State<K: Hash + Eq, V> {
    lru: LruCache<K, Entry<V>>,
    /// Cells whose loader has not finished yet, tracked apart from the LRU so
    /// that eviction or ageing never detaches a running resolution.
    in_flight: HashMap<K, Weak<OnceCell<V>>>,
}

/// Memoizing, deduplicating cache keyed by request parameters.
pub struct QueryCache<K: Hash + Eq, V> {
    state: Mutex<State<K, V>>,
    gc_time: Duration,
    hits: AtomicU64,
    misses: AtomicU64,
    evictions: AtomicU64,
}

impl<K, V> QueryCache<K, V>
where
    K: Hash + Eq + Clone,
    V: Clone,
{
    #[must_use]
    pub fn new(config: CacheConfig) -> Self {
        Self {
            state: Mutex::new(State {
                lru: LruCache::new(config.capacity),
                in_flight: HashMap::new(),
            }),
            gc_time: config.gc_time,
            hits: AtomicU64::new(0),
            misses: AtomicU64::new(0),
            evictions: AtomicU64::new(0),
        }
    }

    fn lock(&self) -> MutexGuard<'_, State<K, V>> {
        self.state
            .lock()
            .unwrap_or_else(std::sync::PoisonError::into_inner)
    }

    /// Returns the cell for `key`, creating a fresh one when missing or aged out.
    ///
    /// A cell that is still loading is always reused, even after it left the LRU.
    fn cell_for(&self, key: &K) -> Arc<OnceCell<V>> {
        let mut state = self.lock();

        let existing = state.lru.get(key).map(|entry| {
            let usable =
                !entry.cell.initialized() || entry.created_at.elapsed() < self.gc_time;
            (usable, Arc::clone(&entry.cell))
        });
        if let Some((usable, cell)) = existing {
            if usable {
                return cell;
            }
            state.lru.pop(key);
            self.evictions.fetch_add(1, Ordering::Relaxed);
            tracing::debug!("query entry aged out");
        }

        let loading = state
            .in_flight
            .get(key)
            .and_then(Weak::upgrade)
            .filter(|cell| !cell.initialized());
        let cell = match loading {
            Some(cell) => {
                tracing::debug!("query entry rejoined in-flight resolution");
                cell
            }
            None => {
                state.in_flight.retain(|_, cell| cell.strong_count() > 0);
                let cell = Arc::new(OnceCell::new());
                state.in_flight.insert(key.clone(), Arc::downgrade(&cell));
                cell
            }
        };

        if state
            .lru
            .push(key.clone(), Entry::new(Arc::clone(&cell)))
            .is_some()
        {
            // push only returns an entry here when the LRU tail was dropped
            self.evictions.fetch_add(1, Ordering::Relaxed);
            tracing::debug!("query entry evicted at capacity");
        }
        cell
    }

    /// Forgets the in-flight marker for `key` once `cell` has resolved.
    fn settle(&self, key: &K, cell: &Arc<OnceCell<V>>) {
        let mut state = self.lock();
        let resolved = state
            .in_flight
            .get(key)
            .is_some_and(|tracked| std::ptr::eq(tracked.as_ptr(), Arc::as_ptr(cell)));
        if resolved {
            state.in_flight.remove(key);
        }
    }

    /// Returns the value for `key`, running `load` only if no entry exists.
    ///
    /// Callers that arrive while another caller's `load` is still running
    /// wait for that result instead of starting their own.
    pub async fn fetch<F, Fut>(&self, key: K, load: F) -> V
    where
        F: FnOnce() -> Fut,
        Fut: Future<Output = V>,
    {
        let cell = self.cell_for(&key);
        let mut ran_loader = false;
        let value = cell
            .get_or_init(|| {
                ran_loader = true;
                load()
            })
            .await
            .clone();

        if ran_loader {
            self.settle(&key, &cell);
            self.misses.fetch_add(1, Ordering::Relaxed);
        } else {
            self.hits.fetch_add(1, Ordering::Relaxed);
        }
        value
    }

    /// Returns the cached value without resolving anything.
    #[must_use]
    pub fn peek(&self, key: &K) -> Option<V> {
        let state = self.lock();
        state
            .lru
            .peek(key)
            .filter(|entry| entry.created_at.elapsed() < self.gc_time)
            .and_then(|entry| entry.cell.get().cloned())
    }

    /// Drops `key` so the next request resolves it again.
    pub fn invalidate(&self, key: &K) -> bool {
        self.lock().lru.pop(key).is_some()
    }

    /// Drops every entry.
    pub fn clear(&self) {
        self.lock().lru.clear();
    }

    #[must_use]
    pub fn stats(&self) -> CacheStats {
        CacheStats {
            entries: self.lock().lru.len(),
            hits: self.hits.load(Ordering::Relaxed),
            misses: self.misses.load(Ordering::Relaxed),
            evictions: self.evictions.load(Ordering::Relaxed),
        }
    }
}

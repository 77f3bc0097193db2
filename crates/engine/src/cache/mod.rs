//! Memoization of scaled values.
//!
//! Entries are keyed by `(token, base value, breakpoint alias, strategy
//! version)`. Bumping the version makes every earlier entry unreachable, so
//! config replacement never needs partial eviction.
//!
//! Persisted snapshots are written on [`ValueCache::flush`], on version bumps,
//! on invalidation and when the cache is dropped, never on the lookup path.

use lru::LruCache;
use serde::Serialize;
use std::num::NonZeroUsize;
use std::sync::{Mutex, MutexGuard, PoisonError};

mod persist;

pub use persist::{FileStore, MemoryStore, PersistedRecord, PersistedStore};

use crate::error::CacheError;
use persist::{decode_records, encode_records, storage_key};

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct CacheKey {
    pub token: String,
    base_bits: u64,
    pub breakpoint: String,
    pub version: u64,
}

impl CacheKey {
    pub fn new(
        token: impl Into<String>,
        base_value: f64,
        breakpoint: impl Into<String>,
        version: u64,
    ) -> Self {
        Self {
            token: token.into(),
            // -0.0 and 0.0 scale identically
            base_bits: if base_value == 0.0 { 0 } else { base_value.to_bits() },
            breakpoint: breakpoint.into(),
            version,
        }
    }

    pub fn base_value(&self) -> f64 {
        f64::from_bits(self.base_bits)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CacheStats {
    /// hits / (hits + misses); 0 before the first lookup
    pub hit_rate: f64,
    pub size: usize,
    pub hits: u64,
    pub misses: u64,
}

struct PersistedBackend {
    store: Box<dyn PersistedStore>,
    namespace: String,
}

struct CacheState {
    entries: LruCache<CacheKey, f64>,
    version: u64,
    hits: u64,
    misses: u64,
    persisted: Option<PersistedBackend>,
    /// Entries changed since the last snapshot write.
    dirty: bool,
    degraded: bool,
}

impl CacheState {
    /// Drops the persisted backend after its first failure. Returns true
    /// only for the failure that actually got logged.
    fn degrade(&mut self, err: &CacheError) -> bool {
        let first = !self.degraded;
        if first {
            log::warn!("Persisted cache unavailable, continuing in memory only: {err}");
        }
        self.degraded = true;
        self.persisted = None;
        first
    }

    fn load_persisted(&mut self) {
        let Some(backend) = &self.persisted else {
            return;
        };
        let json = match backend.store.get(&storage_key(&backend.namespace)) {
            Ok(Some(json)) => json,
            Ok(None) => return,
            Err(err) => {
                self.degrade(&err);
                return;
            }
        };
        match decode_records(&json, self.version) {
            Ok(entries) => {
                log::debug!("Loaded {} persisted cache entries", entries.len());
                for (key, value) in entries {
                    self.entries.put(key, value);
                }
            }
            Err(err) => {
                // The store works; only its payload is unusable.
                log::warn!("Discarding unreadable persisted cache snapshot: {err}");
                self.dirty = true;
            }
        }
    }

    /// Writes a full snapshot when entries changed since the last write.
    fn flush(&mut self) {
        if !self.dirty {
            return;
        }
        let Some(backend) = &self.persisted else {
            self.dirty = false;
            return;
        };
        let result = encode_records(self.entries.iter().rev())
            .and_then(|json| backend.store.set(&storage_key(&backend.namespace), &json));
        self.dirty = false;
        match result {
            Ok(()) => log::debug!("Persisted {} cache entries", self.entries.len()),
            Err(err) => {
                self.degrade(&err);
            }
        }
    }
}

/// Shared memo table. The lock is held across the compute closure, which
/// gives at most one computation per key per version.
pub struct ValueCache {
    state: Mutex<CacheState>,
}

impl ValueCache {
    /// In-memory cache; `capacity` enables least-recently-used eviction.
    pub fn memory(capacity: Option<usize>) -> Self {
        Self {
            state: Mutex::new(CacheState {
                entries: new_entries(capacity),
                version: 0,
                hits: 0,
                misses: 0,
                persisted: None,
                dirty: false,
                degraded: false,
            }),
        }
    }

    /// Cache backed by `store`, namespaced so that different configs never
    /// share entries. Existing entries for the current version are loaded
    /// immediately; a failing store degrades to memory-only.
    pub fn persisted(
        store: Box<dyn PersistedStore>,
        namespace: impl Into<String>,
        capacity: Option<usize>,
    ) -> Self {
        let cache = Self::memory(capacity);
        {
            let mut state = cache.lock();
            state.persisted = Some(PersistedBackend {
                store,
                namespace: namespace.into(),
            });
            state.load_persisted();
        }
        cache
    }

    fn lock(&self) -> MutexGuard<'_, CacheState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Key for the current strategy version.
    pub fn key(&self, token: &str, base_value: f64, breakpoint: &str) -> CacheKey {
        CacheKey::new(token, base_value, breakpoint, self.version())
    }

    pub fn get_or_compute(&self, key: &CacheKey, compute: impl FnOnce() -> f64) -> f64 {
        let mut state = self.lock();

        if key.version != state.version {
            // Keys minted before a version bump are never stored again.
            return compute();
        }

        if let Some(value) = state.entries.get(key).copied() {
            state.hits += 1;
            return value;
        }

        state.misses += 1;
        let value = compute();
        state.entries.put(key.clone(), value);
        state.dirty = true;
        value
    }

    /// Writes pending entries to the persisted store, if any. A failing
    /// store degrades the cache to memory-only.
    pub fn flush(&self) {
        self.lock().flush();
    }

    /// Whether `key` currently has a cached value (does not touch LRU order).
    pub fn contains(&self, key: &CacheKey) -> bool {
        self.lock().entries.contains(key)
    }

    pub fn version(&self) -> u64 {
        self.lock().version
    }

    /// Invalidates every entry and moves persistence to `namespace`.
    /// Returns the new version.
    pub fn bump_version(&self, namespace: Option<&str>) -> u64 {
        let mut state = self.lock();
        state.flush();
        state.version += 1;
        state.entries.clear();
        if let (Some(backend), Some(namespace)) = (state.persisted.as_mut(), namespace) {
            backend.namespace = namespace.to_string();
        }
        state.load_persisted();
        log::info!("Value cache moved to strategy version {}", state.version);
        state.version
    }

    /// Drops all entries (persisted snapshot included) and resets statistics.
    pub fn invalidate(&self) {
        let mut state = self.lock();
        state.entries.clear();
        state.hits = 0;
        state.misses = 0;
        state.dirty = true;
        state.flush();
        log::debug!("Value cache invalidated");
    }

    pub fn stats(&self) -> CacheStats {
        let state = self.lock();
        let lookups = state.hits + state.misses;
        let hit_rate = if lookups == 0 {
            0.0
        } else {
            state.hits as f64 / lookups as f64
        };
        CacheStats {
            hit_rate,
            size: state.entries.len(),
            hits: state.hits,
            misses: state.misses,
        }
    }

    /// True once a persisted backend has failed and the cache runs in memory.
    pub fn is_degraded(&self) -> bool {
        self.lock().degraded
    }
}

impl Drop for ValueCache {
    fn drop(&mut self) {
        self.state
            .get_mut()
            .unwrap_or_else(PoisonError::into_inner)
            .flush();
    }
}

impl std::fmt::Debug for ValueCache {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let state = self.lock();
        f.debug_struct("ValueCache")
            .field("size", &state.entries.len())
            .field("version", &state.version)
            .field("persisted", &state.persisted.is_some())
            .field("dirty", &state.dirty)
            .finish()
    }
}

fn new_entries(capacity: Option<usize>) -> LruCache<CacheKey, f64> {
    match capacity.and_then(NonZeroUsize::new) {
        Some(capacity) => LruCache::new(capacity),
        None => LruCache::unbounded(),
    }
}

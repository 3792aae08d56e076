//! Time-bounded cache for remote reads.
//!
//! Every externally observable read is addressed by a stable key: the
//! operation name plus its serialized arguments. Mutating operations evict
//! dependent keys through [`invalidate_op`](TtlCache::invalidate_op); see
//! `invalidation` for the static dependency map.

use std::any::Any;
use std::sync::Arc;
use std::time::{Duration, Instant};

use dashmap::DashMap;

/// Cache address: operation identity plus serialized arguments.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct CacheKey {
    pub op: &'static str,
    pub args: String,
}

impl CacheKey {
    pub fn of(op: &'static str) -> Self {
        Self {
            op,
            args: String::new(),
        }
    }

    pub fn with_args(op: &'static str, args: &[&str]) -> Self {
        Self {
            op,
            args: args.join("\u{1f}"),
        }
    }
}

/// Anything the cache can hold. `is_empty_value` drives the empty-bypass
/// option: a server under load answers some queries with transient empty
/// replies, and caching those would poison the window.
pub trait CacheValue: Send + Sync + 'static {
    fn is_empty_value(&self) -> bool {
        false
    }
}

impl CacheValue for String {
    fn is_empty_value(&self) -> bool {
        self.is_empty()
    }
}

impl<T: Send + Sync + 'static> CacheValue for Vec<T> {
    fn is_empty_value(&self) -> bool {
        self.is_empty()
    }
}

impl<T: Send + Sync + 'static> CacheValue for Option<T> {
    fn is_empty_value(&self) -> bool {
        self.is_none()
    }
}

impl CacheValue for bool {}
impl CacheValue for u32 {}
impl CacheValue for u64 {}
impl CacheValue for usize {}

struct Entry {
    value: Arc<dyn Any + Send + Sync>,
    stored_at: Instant,
    ttl: Duration,
}

impl Entry {
    fn fresh(&self) -> bool {
        self.stored_at.elapsed() < self.ttl
    }
}

/// Get-or-compute cache with per-entry TTL.
///
/// Concurrency: reads and writes go through a sharded map. Concurrent
/// readers of an expired key each run the computation; redundant remote
/// calls are bounded by the number of concurrent readers, and the last
/// writer wins. The computation deliberately runs outside any map lock so
/// cached getters can call other cached getters without deadlocking.
/// Invalidation is a plain removal and is linearizable with reads of the
/// same key: once a mutation invalidated a key, the same caller's next read
/// recomputes.
#[derive(Default)]
pub struct TtlCache {
    entries: DashMap<CacheKey, Entry>,
}

impl TtlCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Serve a fresh cached value, or run `compute`, store and return it.
    ///
    /// With `cache_empty = false`, a result whose `is_empty_value()` holds
    /// is returned but not stored.
    pub fn get_or_compute<T, E, F>(
        &self,
        key: CacheKey,
        ttl: Duration,
        cache_empty: bool,
        compute: F,
    ) -> Result<Arc<T>, E>
    where
        T: CacheValue,
        F: FnOnce() -> Result<T, E>,
    {
        if let Some(entry) = self.entries.get(&key) {
            if entry.fresh() {
                if let Ok(value) = entry.value.clone().downcast::<T>() {
                    return Ok(value);
                }
            }
        }

        let value = Arc::new(compute()?);
        if cache_empty || !value.is_empty_value() {
            self.entries.insert(
                key,
                Entry {
                    value: value.clone(),
                    stored_at: Instant::now(),
                    ttl,
                },
            );
        }
        Ok(value)
    }

    /// Peek without computing; misses and stale entries return `None`.
    pub fn get<T: CacheValue>(&self, key: &CacheKey) -> Option<Arc<T>> {
        let entry = self.entries.get(key)?;
        if !entry.fresh() {
            return None;
        }
        entry.value.clone().downcast::<T>().ok()
    }

    pub fn invalidate(&self, key: &CacheKey) {
        self.entries.remove(key);
    }

    /// Evict every entry of an operation, whatever its arguments.
    pub fn invalidate_op(&self, op: &str) {
        self.entries.retain(|key, _| key.op != op);
    }

    pub fn clear(&self) {
        self.entries.clear();
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

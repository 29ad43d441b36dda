//! Cache namespace implementation
//!
//! Copyright (c) 2025 Beanshift Team
//! Licensed under the Apache-2.0 license

use crate::{Error, Result};
use dashmap::DashMap;
use once_cell::sync::OnceCell;
use std::any::Any;
use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

type CachedValue = Arc<dyn Any + Send + Sync>;
type Slot = Arc<OnceCell<CachedValue>>;

/// Key of a cached entry
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum CacheKey {
    /// A single name, e.g. `"BeanValidator"`
    Name(String),
    /// Several parts identifying one entry, e.g. owning type and field name
    Composite(Vec<String>),
}

impl CacheKey {
    pub fn composite<I, S>(parts: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        CacheKey::Composite(parts.into_iter().map(Into::into).collect())
    }
}

impl fmt::Display for CacheKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CacheKey::Name(name) => write!(f, "{}", name),
            CacheKey::Composite(parts) => write!(f, "{}", parts.join("-")),
        }
    }
}

impl From<&str> for CacheKey {
    fn from(name: &str) -> Self {
        CacheKey::Name(name.to_string())
    }
}

impl From<String> for CacheKey {
    fn from(name: String) -> Self {
        CacheKey::Name(name)
    }
}

/// One cache namespace: a concurrent map from [`CacheKey`] to opaque values
///
/// Every key owns a slot that is initialized at most once. Concurrent
/// `get_or_compute` callers for the same absent key all wait on that slot, so
/// the compute function runs exactly once and every caller observes its
/// result. The slot lock is separate from the map shard lock, which means a
/// compute function may read other keys of the same namespace, but must not
/// recompute its own key.
pub struct CacheManager {
    id: u32,
    entries: DashMap<CacheKey, Slot>,
    hits: AtomicU64,
    misses: AtomicU64,
}

impl CacheManager {
    pub(crate) fn new(id: u32) -> Self {
        Self {
            id,
            entries: DashMap::new(),
            hits: AtomicU64::new(0),
            misses: AtomicU64::new(0),
        }
    }

    /// Namespace identifier
    pub fn id(&self) -> u32 {
        self.id
    }

    /// Get the value for `key`, computing and storing it on first use
    pub fn get_or_compute<T, F>(&self, key: impl Into<CacheKey>, compute: F) -> Result<Arc<T>>
    where
        T: Send + Sync + 'static,
        F: FnOnce() -> T,
    {
        self.try_get_or_compute(key, || Ok(compute()))
    }

    /// Fallible variant of [`get_or_compute`](Self::get_or_compute)
    ///
    /// A failed computation stores nothing; the next caller computes again.
    pub fn try_get_or_compute<T, F>(&self, key: impl Into<CacheKey>, compute: F) -> Result<Arc<T>>
    where
        T: Send + Sync + 'static,
        F: FnOnce() -> Result<T>,
    {
        let key = key.into();
        let slot = self.slot(&key);

        let mut computed = false;
        let initialized = slot.get_or_try_init(|| {
            computed = true;
            tracing::debug!(namespace = self.id, key = %key, "computing cache entry");
            compute().map(|v| Arc::new(v) as CachedValue)
        });
        let value = match initialized {
            Ok(value) => value,
            Err(err) => {
                self.entries.remove_if(&key, |_, current| {
                    Arc::ptr_eq(current, &slot) && current.get().is_none()
                });
                return Err(err);
            }
        };

        if computed {
            self.misses.fetch_add(1, Ordering::Relaxed);
            // A waiter may have initialized a slot that a failed caller already
            // unlinked; put it back unless the key was replaced meanwhile
            self.entries.entry(key.clone()).or_insert_with(|| Arc::clone(&slot));
        } else {
            self.hits.fetch_add(1, Ordering::Relaxed);
        }

        Arc::clone(value)
            .downcast::<T>()
            .map_err(|_| Error::CacheTypeMismatch {
                namespace: self.id,
                key: key.to_string(),
            })
    }

    /// Get a cached value
    ///
    /// Returns `None` when the key is absent or holds a value of another type.
    pub fn get<T>(&self, key: impl Into<CacheKey>) -> Option<Arc<T>>
    where
        T: Send + Sync + 'static,
    {
        let key = key.into();
        let value = self
            .entries
            .get(&key)
            .and_then(|slot| slot.get().cloned());

        match value {
            Some(value) => {
                self.hits.fetch_add(1, Ordering::Relaxed);
                value.downcast::<T>().ok()
            }
            None => {
                self.misses.fetch_add(1, Ordering::Relaxed);
                None
            }
        }
    }

    /// Store a value, replacing any previous one
    pub fn put<T>(&self, key: impl Into<CacheKey>, value: T)
    where
        T: Send + Sync + 'static,
    {
        let cached: CachedValue = Arc::new(value);
        self.entries
            .insert(key.into(), Arc::new(OnceCell::with_value(cached)));
    }

    /// Remove an entry, returning whether a populated entry was present
    pub fn remove(&self, key: impl Into<CacheKey>) -> bool {
        self.entries
            .remove(&key.into())
            .map(|(_, slot)| slot.get().is_some())
            .unwrap_or(false)
    }

    pub fn contains(&self, key: impl Into<CacheKey>) -> bool {
        self.entries
            .get(&key.into())
            .map(|slot| slot.get().is_some())
            .unwrap_or(false)
    }

    /// Number of populated entries
    pub fn len(&self) -> usize {
        self.entries
            .iter()
            .filter(|entry| entry.value().get().is_some())
            .count()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Drop every entry of this namespace
    pub fn clear(&self) {
        self.entries.clear();
    }

    /// Snapshot of the hit/miss counters
    pub fn stats(&self) -> CacheStats {
        CacheStats {
            namespace: self.id,
            entries: self.len(),
            hits: self.hits.load(Ordering::Relaxed),
            misses: self.misses.load(Ordering::Relaxed),
        }
    }

    fn slot(&self, key: &CacheKey) -> Slot {
        if let Some(slot) = self.entries.get(key) {
            return Arc::clone(slot.value());
        }
        Arc::clone(
            self.entries
                .entry(key.clone())
                .or_insert_with(|| Arc::new(OnceCell::new()))
                .value(),
        )
    }
}

impl fmt::Debug for CacheManager {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CacheManager")
            .field("id", &self.id)
            .field("entries", &self.entries.len())
            .finish()
    }
}

/// Cache statistics for monitoring and debugging
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CacheStats {
    pub namespace: u32,
    pub entries: usize,
    pub hits: u64,
    pub misses: u64,
}

impl CacheStats {
    /// Share of lookups served from the cache, as a percentage
    pub fn hit_ratio(&self) -> f64 {
        let total = self.hits + self.misses;
        if total == 0 {
            0.0
        } else {
            (self.hits as f64 / total as f64) * 100.0
        }
    }
}

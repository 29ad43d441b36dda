//! Process-wide caching layer
//!
//! Expensive introspection results and helper objects (validators, resolved
//! element types, conversion functions) are memoized in namespaces identified
//! by a small integer. A namespace is created lazily on first request and
//! lives for the rest of the process.
//!
//! ```
//! use beanshift_core::cache::{cache_manager, namespaces};
//!
//! let cache = cache_manager(namespaces::TRANSFORMER);
//! let value = cache.get_or_compute("greeting", || "hello".to_string()).unwrap();
//! assert_eq!(*value, "hello");
//! ```
//!
//! Copyright (c) 2025 Beanshift Team
//! Licensed under the Apache-2.0 license

pub mod manager;

pub use manager::{CacheKey, CacheManager, CacheStats};

use dashmap::DashMap;
use once_cell::sync::Lazy;
use std::sync::Arc;

/// Initial capacity of the namespace registry
const INITIAL_CAPACITY: usize = 5;

/// Well-known namespace identifiers
pub mod namespaces {
    /// Transformer-level entries
    pub const TRANSFORMER: u32 = 1;
    /// Resolved element types
    pub const REFLECTION: u32 = 2;
    /// The shared constraint engine
    pub const VALIDATION: u32 = 3;
    /// Primitive conversion functions
    pub const CONVERSION: u32 = 4;
}

static CACHE_MAP: Lazy<DashMap<u32, Arc<CacheManager>>> =
    Lazy::new(|| DashMap::with_capacity(INITIAL_CAPACITY));

/// Get the cache namespace for `id`, creating it on first use
///
/// Creation happens under the registry's entry lock, so concurrent first
/// callers for the same id all receive the same instance.
pub fn cache_manager(id: u32) -> Arc<CacheManager> {
    if let Some(existing) = CACHE_MAP.get(&id) {
        return Arc::clone(existing.value());
    }

    Arc::clone(
        CACHE_MAP
            .entry(id)
            .or_insert_with(|| {
                tracing::debug!(namespace = id, "creating cache namespace");
                Arc::new(CacheManager::new(id))
            })
            .value(),
    )
}

/// Statistics for every namespace created so far, ordered by id
pub fn all_stats() -> Vec<CacheStats> {
    let mut stats: Vec<CacheStats> = CACHE_MAP.iter().map(|entry| entry.value().stats()).collect();
    stats.sort_by_key(|s| s.namespace);
    stats
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_same_id_returns_same_namespace() {
        let first = cache_manager(9_001);
        let second = cache_manager(9_001);
        assert!(Arc::ptr_eq(&first, &second));
        assert_eq!(first.id(), 9_001);
    }

    #[test]
    fn test_namespaces_are_isolated() {
        let a = cache_manager(9_002);
        let b = cache_manager(9_003);
        a.put("key", 1u8);

        assert!(a.contains("key"));
        assert!(!b.contains("key"));
    }

    #[test]
    fn test_all_stats_lists_created_namespaces() {
        cache_manager(9_004);
        let stats = all_stats();
        assert!(stats.iter().any(|s| s.namespace == 9_004));
        assert!(stats.windows(2).all(|w| w[0].namespace < w[1].namespace));
    }
}

//! Decorator cache metrics.
//!
//! Counters are plain relaxed atomics; they are observational and never
//! affect dispatch. A [`CacheMetrics`] value is a point-in-time copy.

use std::sync::atomic::{AtomicU64, Ordering};

/// Snapshot of decorator cache activity.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CacheMetrics {
    pub lookups: u64,
    pub hits: u64,
    pub misses: u64,
    pub inserts: u64,
}

impl CacheMetrics {
    /// Fraction of lookups that found a cached instrumentor, or `0.0` before
    /// the first lookup.
    pub fn hit_ratio(&self) -> f64 {
        if self.lookups == 0 {
            0.0
        } else {
            self.hits as f64 / self.lookups as f64
        }
    }
}

/// Live counters owned by a [`DecoratorCache`](crate::cache::DecoratorCache).
#[derive(Debug, Default)]
pub(crate) struct CacheCounters {
    hits: AtomicU64,
    misses: AtomicU64,
    inserts: AtomicU64,
}

impl CacheCounters {
    pub(crate) fn snapshot(&self) -> CacheMetrics {
        let hits = self.hits.load(Ordering::Relaxed);
        let misses = self.misses.load(Ordering::Relaxed);
        CacheMetrics {
            lookups: hits + misses,
            hits,
            misses,
            inserts: self.inserts.load(Ordering::Relaxed),
        }
    }

    #[inline]
    pub(crate) fn inc_hit(&self) {
        self.hits.fetch_add(1, Ordering::Relaxed);
    }

    #[inline]
    pub(crate) fn inc_miss(&self) {
        self.misses.fetch_add(1, Ordering::Relaxed);
    }

    #[inline]
    pub(crate) fn inc_insert(&self) {
        self.inserts.fetch_add(1, Ordering::Relaxed);
    }
}

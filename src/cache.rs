//! Configuration-keyed instrumentor cache.
//!
//! ## Architecture
//! - Entries live in an `FxHashMap<Conf, Arc<Instrumentor<I>>>`; keys compare
//!   by value, so equal confs built independently share one entry.
//! - Entries are never evicted, replaced or removed. There is no capacity.
//! - The first instrumentor inserted for a key is the one every later lookup
//!   returns.
//!
//! ## Key Components
//! - `DecoratorCache`: the map plus hit/miss/insert counters.
//!
//! ## Core Operations
//! - `lookup`: fetch the instrumentor cached for a conf (counts hit/miss).
//! - `insert`: store an instrumentor unless one is already cached for an
//!   equal conf, returning whichever is cached afterwards.
//!
//! ## Thread Safety
//! - `DecoratorCache` has no internal locking; mutation needs `&mut self`.
//!   [`Dispatcher`](crate::dispatch::Dispatcher) guards it with a lock and
//!   tolerates two callers building for the same conf at once.
//!
//! ## Example Usage
//! ```rust
//! use std::convert::Infallible;
//! use std::sync::Arc;
//!
//! use decorkit::cache::DecoratorCache;
//! use decorkit::conf::Conf;
//! use decorkit::instrumentor::Instrumentor;
//! use decorkit::traits::ObjectInstrumenter;
//!
//! struct Identity;
//!
//! impl ObjectInstrumenter for Identity {
//!     type Target = ();
//!     type Error = Infallible;
//!
//!     fn instrument(&self, target: (), _conf: &Conf) -> Result<(), Infallible> {
//!         Ok(target)
//!     }
//! }
//!
//! let mut cache = DecoratorCache::new();
//! assert!(cache.lookup(&Conf::DEFAULT).is_none());
//!
//! let built = Arc::new(Instrumentor::new(Conf::DEFAULT, Arc::new(Identity)));
//! let stored = cache.insert(Conf::DEFAULT, Arc::clone(&built));
//! assert!(Arc::ptr_eq(&built, &stored));
//! assert!(cache.lookup(&Conf::default()).is_some());
//! ```

use std::collections::hash_map::Entry;
use std::fmt;
use std::sync::Arc;

use rustc_hash::FxHashMap;

use crate::conf::Conf;
use crate::instrumentor::Instrumentor;
use crate::metrics::{CacheCounters, CacheMetrics};

/// Mapping from configuration to the instrumentor generated for it.
pub struct DecoratorCache<I> {
    map: FxHashMap<Conf, Arc<Instrumentor<I>>>,
    counters: CacheCounters,
}

impl<I> DecoratorCache<I> {
    /// Creates an empty cache.
    pub fn new() -> Self {
        Self {
            map: FxHashMap::default(),
            counters: CacheCounters::default(),
        }
    }

    /// Returns the instrumentor cached for a conf equal to `conf`.
    pub fn lookup(&self, conf: &Conf) -> Option<Arc<Instrumentor<I>>> {
        match self.map.get(conf) {
            Some(instrumentor) => {
                self.counters.inc_hit();
                Some(Arc::clone(instrumentor))
            },
            None => {
                self.counters.inc_miss();
                None
            },
        }
    }

    /// Caches `instrumentor` under `conf` and returns the cached entry.
    ///
    /// If an equal conf is already cached, the existing instrumentor is kept
    /// and returned; `instrumentor` is dropped. Instrumentors built from equal
    /// confs behave identically, so keeping the first preserves identity for
    /// callers that already hold it.
    pub fn insert(&mut self, conf: Conf, instrumentor: Arc<Instrumentor<I>>) -> Arc<Instrumentor<I>> {
        match self.map.entry(conf) {
            Entry::Occupied(entry) => Arc::clone(entry.get()),
            Entry::Vacant(entry) => {
                self.counters.inc_insert();
                Arc::clone(entry.insert(instrumentor))
            },
        }
    }

    /// Check if an instrumentor is cached for `conf` without counting a lookup.
    pub fn contains(&self, conf: &Conf) -> bool {
        self.map.contains_key(conf)
    }

    /// Number of cached instrumentors.
    pub fn len(&self) -> usize {
        self.map.len()
    }

    pub fn is_empty(&self) -> bool {
        self.map.is_empty()
    }

    /// Iterates over the cached configurations in arbitrary order.
    pub fn confs(&self) -> impl Iterator<Item = &Conf> + '_ {
        self.map.keys()
    }

    /// Snapshot of lookup and insert counters.
    pub fn metrics(&self) -> CacheMetrics {
        self.counters.snapshot()
    }
}

impl<I> Default for DecoratorCache<I> {
    fn default() -> Self {
        Self::new()
    }
}

impl<I> fmt::Debug for DecoratorCache<I> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DecoratorCache")
            .field("len", &self.map.len())
            .field("metrics", &self.counters.snapshot())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use std::convert::Infallible;

    use super::*;
    use crate::strategy::Strategy;
    use crate::traits::ObjectInstrumenter;

    struct Identity;

    impl ObjectInstrumenter for Identity {
        type Target = u8;
        type Error = Infallible;

        fn instrument(&self, target: u8, _conf: &Conf) -> Result<u8, Infallible> {
            Ok(target)
        }
    }

    fn build(conf: &Conf) -> Arc<Instrumentor<Identity>> {
        Arc::new(Instrumentor::new(conf.clone(), Arc::new(Identity)))
    }

    #[test]
    fn lookup_on_empty_misses() {
        let cache: DecoratorCache<Identity> = DecoratorCache::new();
        assert!(cache.is_empty());
        assert!(cache.lookup(&Conf::DEFAULT).is_none());
        assert_eq!(cache.metrics().misses, 1);
    }

    #[test]
    fn insert_then_lookup_returns_same_arc() {
        let mut cache = DecoratorCache::new();
        let conf = Conf::with_strategy(Strategy::LinearSample);
        let built = build(&conf);
        cache.insert(conf.clone(), Arc::clone(&built));

        let found = cache.lookup(&Conf::with_strategy(Strategy::LinearSample)).unwrap();
        assert!(Arc::ptr_eq(&built, &found));
        assert_eq!(cache.len(), 1);
    }

    #[test]
    fn second_insert_keeps_first_entry() {
        let mut cache = DecoratorCache::new();
        let first = build(&Conf::DEFAULT);
        let second = build(&Conf::DEFAULT);

        let a = cache.insert(Conf::DEFAULT, Arc::clone(&first));
        let b = cache.insert(Conf::default(), Arc::clone(&second));

        assert!(Arc::ptr_eq(&a, &first));
        assert!(Arc::ptr_eq(&b, &first));
        assert!(!Arc::ptr_eq(&b, &second));
        assert_eq!(cache.len(), 1);
        assert_eq!(cache.metrics().inserts, 1);
    }

    #[test]
    fn distinct_confs_get_distinct_entries() {
        let mut cache = DecoratorCache::new();
        for strategy in Strategy::ALL {
            let conf = Conf::with_strategy(strategy);
            cache.insert(conf.clone(), build(&conf));
        }
        assert_eq!(cache.len(), Strategy::ALL.len());

        let mut strategies: Vec<_> = cache.confs().map(Conf::strategy).collect();
        strategies.sort();
        assert_eq!(strategies, Strategy::ALL.to_vec());
    }

    #[test]
    fn contains_does_not_count_lookup() {
        let mut cache = DecoratorCache::new();
        cache.insert(Conf::DEFAULT, build(&Conf::DEFAULT));
        assert!(cache.contains(&Conf::DEFAULT));
        assert!(!cache.contains(&Conf::with_strategy(Strategy::NoCheck)));
        assert_eq!(cache.metrics().lookups, 0);
    }

    #[test]
    fn debug_reports_len() {
        let mut cache = DecoratorCache::new();
        cache.insert(Conf::DEFAULT, build(&Conf::DEFAULT));
        assert!(format!("{cache:?}").contains("len: 1"));
    }
}

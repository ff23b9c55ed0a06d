//! Decorator dispatch.
//!
//! [`Dispatcher`] is the public entry point. It owns the
//! [`ObjectInstrumenter`] and the [`DecoratorCache`] and offers two named
//! operations plus a dual-mode wrapper:
//!
//! ```text
//!   instrument(target, &conf) ──► instrumenter.instrument(target, conf)
//!                                 (cache untouched)
//!
//!   configure(&conf) ──► cache.lookup(conf) ──hit──► cached Instrumentor
//!                              │
//!                             miss
//!                              ▼
//!                     Instrumentor::new(conf) ──► cache.insert ──► Instrumentor
//!
//!   dispatch(mode, conf?) ──► validate conf ──► Mode::Decorate  → instrument
//!                                           └─► Mode::Configure → configure
//! ```
//!
//! ## Concurrency
//!
//! The cache sits behind a `parking_lot::RwLock`. Lookups take the read lock;
//! the instrumentor is built with no lock held and inserted under the write
//! lock. Two callers missing on the same conf may both build, but the cache
//! keeps the first insert and both receive that one.
//!
//! ## Example Usage
//!
//! ```
//! use std::convert::Infallible;
//! use std::sync::Arc;
//!
//! use decorkit::conf::Conf;
//! use decorkit::dispatch::{Dispatcher, Mode};
//! use decorkit::strategy::Strategy;
//! use decorkit::traits::ObjectInstrumenter;
//!
//! struct Suffix;
//!
//! impl ObjectInstrumenter for Suffix {
//!     type Target = String;
//!     type Error = Infallible;
//!
//!     fn instrument(&self, target: String, _conf: &Conf) -> Result<String, Infallible> {
//!         Ok(target + "'")
//!     }
//! }
//!
//! let dispatcher = Dispatcher::new(Suffix);
//!
//! let a = dispatcher.configure(&Conf::DEFAULT);
//! let b = dispatcher.configure(&Conf::with_strategy(Strategy::Constant));
//! assert!(Arc::ptr_eq(&a, &b));
//! assert_eq!(a.apply("f".to_string()).unwrap(), "f'");
//!
//! let err = dispatcher.dispatch(Mode::Configure, Some(&"not-a-config")).unwrap_err();
//! assert!(err.to_string().contains("not-a-config"));
//! ```

use std::fmt;
use std::sync::Arc;

use parking_lot::RwLock;
use tracing::{debug, trace, warn};

use crate::cache::DecoratorCache;
use crate::conf::Conf;
use crate::error::{ConfTypeError, DispatchError};
use crate::instrumentor::Instrumentor;
use crate::metrics::CacheMetrics;
use crate::traits::{ConfArg, ObjectInstrumenter};

/// What the caller wants from [`Dispatcher::dispatch`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Mode<T> {
    /// Instrument this target now, bypassing the cache.
    Decorate(T),
    /// Return the reusable instrumentor for the configuration.
    Configure,
}

/// Result of [`Dispatcher::dispatch`].
pub enum Dispatched<I>
where
    I: ObjectInstrumenter,
{
    /// Target instrumented in decoration mode.
    Instrumented(I::Target),
    /// Cached instrumentor returned in configuration mode.
    Instrumentor(Arc<Instrumentor<I>>),
}

impl<I> Dispatched<I>
where
    I: ObjectInstrumenter,
{
    pub fn into_instrumented(self) -> Option<I::Target> {
        match self {
            Dispatched::Instrumented(target) => Some(target),
            Dispatched::Instrumentor(_) => None,
        }
    }

    pub fn into_instrumentor(self) -> Option<Arc<Instrumentor<I>>> {
        match self {
            Dispatched::Instrumentor(instrumentor) => Some(instrumentor),
            Dispatched::Instrumented(_) => None,
        }
    }
}

// Targets are often closures, so only the variant is shown for them.
impl<I> fmt::Debug for Dispatched<I>
where
    I: ObjectInstrumenter,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Dispatched::Instrumented(_) => f.write_str("Instrumented(..)"),
            Dispatched::Instrumentor(instrumentor) => {
                f.debug_tuple("Instrumentor").field(instrumentor).finish()
            },
        }
    }
}

/// Entry point that instruments targets and memoizes instrumentors per
/// configuration.
pub struct Dispatcher<I> {
    instrumenter: Arc<I>,
    cache: RwLock<DecoratorCache<I>>,
}

impl<I> Dispatcher<I>
where
    I: ObjectInstrumenter,
{
    /// Creates a dispatcher with an empty cache.
    pub fn new(instrumenter: I) -> Self {
        Self::from_arc(Arc::new(instrumenter))
    }

    /// Creates a dispatcher sharing an existing instrumenter handle.
    pub fn from_arc(instrumenter: Arc<I>) -> Self {
        Self {
            instrumenter,
            cache: RwLock::new(DecoratorCache::new()),
        }
    }

    /// Instruments `target` under `conf` immediately (decoration mode).
    ///
    /// The cache is neither consulted nor populated. The instrumenter is
    /// always called, whatever the strategy; its error is returned unchanged.
    pub fn instrument(&self, target: I::Target, conf: &Conf) -> Result<I::Target, I::Error> {
        trace!(strategy = %conf.strategy(), "instrumenting target directly");
        self.instrumenter.instrument(target, conf)
    }

    /// Returns the instrumentor for `conf` (configuration mode), generating
    /// and caching it on first use.
    ///
    /// Every call with a conf equal to an earlier one returns the same `Arc`.
    pub fn configure(&self, conf: &Conf) -> Arc<Instrumentor<I>> {
        if let Some(cached) = self.cache.read().lookup(conf) {
            trace!(strategy = %conf.strategy(), "decorator cache hit");
            return cached;
        }

        let built = Arc::new(Instrumentor::new(
            conf.clone(),
            Arc::clone(&self.instrumenter),
        ));
        let cached = self.cache.write().insert(conf.clone(), Arc::clone(&built));

        // A racing caller may have inserted first; only the winner reports.
        if Arc::ptr_eq(&cached, &built) {
            debug!(
                strategy = %conf.strategy(),
                is_debug = conf.is_debug(),
                is_pep484_tower = conf.is_pep484_tower(),
                "generated instrumentor"
            );
            if conf.strategy().is_reserved() {
                warn!(
                    strategy = %conf.strategy(),
                    "sampling strategy is forwarded to the instrumenter as is"
                );
            }
        }
        cached
    }

    /// [`configure`](Self::configure) with [`Conf::DEFAULT`].
    pub fn configure_default(&self) -> Arc<Instrumentor<I>> {
        self.configure(&Conf::DEFAULT)
    }

    /// Dual-mode entry point.
    ///
    /// `conf` is validated first: anything other than a [`Conf`] fails with
    /// [`ConfTypeError`] regardless of `mode`. `None` selects
    /// [`Conf::DEFAULT`]. Then `Mode::Decorate` behaves like
    /// [`instrument`](Self::instrument) and `Mode::Configure` like
    /// [`configure`](Self::configure).
    pub fn dispatch(
        &self,
        mode: Mode<I::Target>,
        conf: Option<&dyn ConfArg>,
    ) -> Result<Dispatched<I>, DispatchError<I::Error>> {
        let conf = match conf {
            None => &Conf::DEFAULT,
            Some(arg) => arg
                .as_conf()
                .ok_or_else(|| ConfTypeError::from_value(arg))?,
        };

        match mode {
            Mode::Decorate(target) => self
                .instrument(target, conf)
                .map(Dispatched::Instrumented)
                .map_err(DispatchError::Instrument),
            Mode::Configure => Ok(Dispatched::Instrumentor(self.configure(conf))),
        }
    }
}

impl<I> Dispatcher<I> {
    /// Shared handle to the instrumenter.
    #[inline]
    pub fn instrumenter(&self) -> &Arc<I> {
        &self.instrumenter
    }

    /// Number of cached instrumentors.
    pub fn cache_len(&self) -> usize {
        self.cache.read().len()
    }

    /// Check if an instrumentor is cached for `conf`, without counting a lookup.
    pub fn is_cached(&self, conf: &Conf) -> bool {
        self.cache.read().contains(conf)
    }

    /// Snapshot of the cache counters.
    pub fn cache_metrics(&self) -> CacheMetrics {
        self.cache.read().metrics()
    }
}

impl<I> Default for Dispatcher<I>
where
    I: ObjectInstrumenter + Default,
{
    fn default() -> Self {
        Self::new(I::default())
    }
}

impl<I> fmt::Debug for Dispatcher<I> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Dispatcher")
            .field("cache", &*self.cache.read())
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use std::sync::atomic::{AtomicUsize, Ordering};

    use super::*;
    use crate::strategy::Strategy;

    #[derive(Debug, PartialEq, thiserror::Error)]
    #[error("no annotations on {0}")]
    struct NoAnnotations(&'static str);

    #[derive(Default)]
    struct Recorder {
        calls: AtomicUsize,
    }

    impl Recorder {
        fn calls(&self) -> usize {
            self.calls.load(Ordering::Relaxed)
        }
    }

    impl ObjectInstrumenter for Recorder {
        type Target = &'static str;
        type Error = NoAnnotations;

        fn instrument(
            &self,
            target: &'static str,
            _conf: &Conf,
        ) -> Result<&'static str, NoAnnotations> {
            self.calls.fetch_add(1, Ordering::Relaxed);
            if target.is_empty() {
                return Err(NoAnnotations(target));
            }
            Ok("checked")
        }
    }

    #[test]
    fn configure_caches_per_conf() {
        let dispatcher = Dispatcher::new(Recorder::default());
        let a = dispatcher.configure(&Conf::DEFAULT);
        let b = dispatcher.configure(&Conf::DEFAULT);
        let c = dispatcher.configure(&Conf::with_strategy(Strategy::NoCheck));

        assert!(Arc::ptr_eq(&a, &b));
        assert!(!Arc::ptr_eq(&a, &c));
        assert_eq!(dispatcher.cache_len(), 2);
        assert_eq!(
            dispatcher.cache_metrics(),
            CacheMetrics {
                lookups: 3,
                hits: 1,
                misses: 2,
                inserts: 2,
            }
        );
        assert_eq!(dispatcher.instrumenter().calls(), 0);
    }

    #[test]
    fn configure_default_uses_default_conf() {
        let dispatcher = Dispatcher::<Recorder>::default();
        let a = dispatcher.configure_default();
        assert_eq!(a.conf(), &Conf::DEFAULT);
        assert!(Arc::ptr_eq(&a, &dispatcher.configure(&Conf::default())));
    }

    #[test]
    fn instrument_bypasses_cache() {
        let dispatcher = Dispatcher::new(Recorder::default());
        assert_eq!(dispatcher.instrument("f", &Conf::DEFAULT), Ok("checked"));
        assert_eq!(dispatcher.cache_len(), 0);
        assert_eq!(dispatcher.cache_metrics(), CacheMetrics::default());
        assert_eq!(dispatcher.instrumenter().calls(), 1);
    }

    #[test]
    fn instrument_delegates_even_for_no_check() {
        let dispatcher = Dispatcher::new(Recorder::default());
        let conf = Conf::with_strategy(Strategy::NoCheck);
        assert_eq!(dispatcher.instrument("f", &conf), Ok("checked"));
        assert_eq!(dispatcher.instrumenter().calls(), 1);
    }

    #[test]
    fn dispatch_without_conf_uses_default() {
        let dispatcher = Dispatcher::new(Recorder::default());
        let inst = dispatcher
            .dispatch(Mode::Configure, None)
            .unwrap()
            .into_instrumentor()
            .unwrap();
        assert!(Arc::ptr_eq(&inst, &dispatcher.configure_default()));
    }

    #[test]
    fn dispatch_decorate_returns_target() {
        let dispatcher = Dispatcher::new(Recorder::default());
        let conf = Conf::DEFAULT;
        let out = dispatcher
            .dispatch(Mode::Decorate("f"), Some(&conf))
            .unwrap();
        assert!(matches!(out, Dispatched::Instrumented("checked")));
        assert!(!dispatcher.is_cached(&conf));
    }

    #[test]
    fn dispatch_rejects_non_conf_before_mode() {
        let dispatcher = Dispatcher::new(Recorder::default());
        for mode in [Mode::Configure, Mode::Decorate("f")] {
            let err = dispatcher.dispatch(mode, Some(&Strategy::NoCheck)).unwrap_err();
            assert_eq!(err.as_conf_type().map(ConfTypeError::repr), Some("NoCheck"));
        }
        assert_eq!(dispatcher.instrumenter().calls(), 0);
        assert_eq!(dispatcher.cache_metrics(), CacheMetrics::default());
    }

    #[test]
    fn dispatch_forwards_instrumenter_error() {
        let dispatcher = Dispatcher::new(Recorder::default());
        let err = dispatcher
            .dispatch(Mode::Decorate(""), None)
            .unwrap_err();
        assert_eq!(err.to_string(), "no annotations on ");
        assert_eq!(err.into_instrument(), Some(NoAnnotations("")));
    }

    #[test]
    fn debug_lists_cache() {
        let dispatcher = Dispatcher::new(Recorder::default());
        dispatcher.configure_default();
        let dbg = format!("{dispatcher:?}");
        assert!(dbg.contains("Dispatcher"));
        assert!(dbg.contains("len: 1"));
    }
}

//! Reusable instrumentors bound to one configuration.
//!
//! An [`Instrumentor`] is what configuration-mode dispatch hands back: an owned
//! copy of a [`Conf`] plus a shared handle to the
//! [`ObjectInstrumenter`]. Applying it to a target either returns the target
//! untouched ([`Strategy::NoCheck`]) or delegates to the instrumenter.
//!
//! ## Example Usage
//!
//! ```
//! use std::convert::Infallible;
//! use std::sync::Arc;
//!
//! use decorkit::conf::Conf;
//! use decorkit::instrumentor::Instrumentor;
//! use decorkit::strategy::Strategy;
//! use decorkit::traits::ObjectInstrumenter;
//!
//! struct Doubler;
//!
//! impl ObjectInstrumenter for Doubler {
//!     type Target = u64;
//!     type Error = Infallible;
//!
//!     fn instrument(&self, target: u64, _conf: &Conf) -> Result<u64, Infallible> {
//!         Ok(target * 2)
//!     }
//! }
//!
//! let checked = Instrumentor::new(Conf::DEFAULT, Arc::new(Doubler));
//! assert_eq!(checked.apply(21), Ok(42));
//!
//! let noop = Instrumentor::new(Conf::with_strategy(Strategy::NoCheck), Arc::new(Doubler));
//! assert_eq!(noop.apply(21), Ok(21));
//! ```

use std::fmt;
use std::sync::Arc;

use crate::conf::Conf;
use crate::strategy::Strategy;
use crate::traits::ObjectInstrumenter;

/// Instrumentor bound to a single [`Conf`].
pub struct Instrumentor<I> {
    conf: Conf,
    instrumenter: Arc<I>,
}

impl<I> Instrumentor<I>
where
    I: ObjectInstrumenter,
{
    /// Binds `conf` to `instrumenter`.
    pub fn new(conf: Conf, instrumenter: Arc<I>) -> Self {
        Self { conf, instrumenter }
    }

    /// Applies the bound configuration to `target`.
    ///
    /// Under [`Strategy::NoCheck`] the target is returned as is and the
    /// instrumenter is not called. Otherwise the instrumenter's result, or its
    /// error, is returned unchanged.
    pub fn apply(&self, target: I::Target) -> Result<I::Target, I::Error> {
        if self.is_noop() {
            return Ok(target);
        }
        self.instrumenter.instrument(target, &self.conf)
    }
}

impl<I> Instrumentor<I> {
    /// Configuration this instrumentor was built for.
    #[inline]
    pub fn conf(&self) -> &Conf {
        &self.conf
    }

    #[inline]
    pub fn strategy(&self) -> Strategy {
        self.conf.strategy()
    }

    /// Returns `true` if [`apply`](Self::apply) is the identity.
    #[inline]
    pub fn is_noop(&self) -> bool {
        self.conf.strategy().is_noop()
    }

    /// Shared handle to the instrumenter this instrumentor delegates to.
    #[inline]
    pub fn instrumenter(&self) -> &Arc<I> {
        &self.instrumenter
    }
}

impl<I> fmt::Debug for Instrumentor<I> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Instrumentor")
            .field("conf", &self.conf)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use std::sync::atomic::{AtomicUsize, Ordering};

    use super::*;

    #[derive(Debug, PartialEq, thiserror::Error)]
    #[error("cannot instrument {0}")]
    struct Rejected(i32);

    #[derive(Default)]
    struct Negate {
        calls: AtomicUsize,
    }

    impl ObjectInstrumenter for Negate {
        type Target = i32;
        type Error = Rejected;

        fn instrument(&self, target: i32, _conf: &Conf) -> Result<i32, Rejected> {
            self.calls.fetch_add(1, Ordering::Relaxed);
            if target == 0 {
                return Err(Rejected(target));
            }
            Ok(-target)
        }
    }

    #[test]
    fn noop_skips_instrumenter() {
        let inner = Arc::new(Negate::default());
        let noop = Instrumentor::new(Conf::with_strategy(Strategy::NoCheck), Arc::clone(&inner));
        assert!(noop.is_noop());
        assert_eq!(noop.apply(7), Ok(7));
        assert_eq!(noop.apply(0), Ok(0));
        assert_eq!(inner.calls.load(Ordering::Relaxed), 0);
    }

    #[test]
    fn checking_strategies_delegate() {
        let inner = Arc::new(Negate::default());
        for strategy in [
            Strategy::Constant,
            Strategy::LogSample,
            Strategy::LinearSample,
        ] {
            let inst = Instrumentor::new(Conf::with_strategy(strategy), Arc::clone(&inner));
            assert!(!inst.is_noop());
            assert_eq!(inst.strategy(), strategy);
            assert_eq!(inst.apply(5), Ok(-5));
        }
        assert_eq!(inner.calls.load(Ordering::Relaxed), 3);
    }

    #[test]
    fn instrumenter_error_is_returned_unchanged() {
        let inst = Instrumentor::new(Conf::DEFAULT, Arc::new(Negate::default()));
        assert_eq!(inst.apply(0), Err(Rejected(0)));
    }

    #[test]
    fn debug_shows_conf() {
        let inst = Instrumentor::new(Conf::DEFAULT, Arc::new(Negate::default()));
        let dbg = format!("{inst:?}");
        assert!(dbg.contains("Instrumentor"));
        assert!(dbg.contains("Constant"));
    }
}

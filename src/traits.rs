//! # Collaborator Traits
//!
//! This module defines the seams between the dispatch layer and the code it
//! drives.
//!
//! ```text
//!   caller ──► Dispatcher ──► DecoratorCache
//!                  │               │
//!                  │               ▼
//!                  │         Instrumentor ── apply(target)
//!                  │               │
//!                  ▼               ▼ (strategy != NoCheck)
//!          ┌──────────────────────────────────────────┐
//!          │        ObjectInstrumenter                │
//!          │                                          │
//!          │  instrument(target, &Conf) → Target      │
//!          └──────────────────────────────────────────┘
//! ```
//!
//! ## Trait Summary
//!
//! | Trait                | Purpose                                           |
//! |----------------------|---------------------------------------------------|
//! | `ObjectInstrumenter` | Wraps or augments a target under a [`Conf`]       |
//! | `ConfArg`            | Dynamically typed configuration slot for dispatch |
//!
//! The instrumenter is a black box: it analyses whatever annotations the
//! target carries, generates the checking code and returns the instrumented
//! object. Errors it raises reach the caller unchanged.

use std::any::Any;
use std::fmt::Debug;
use std::sync::Arc;

use crate::conf::Conf;

/// Performs the actual instrumentation of a target object.
///
/// # Example
///
/// ```
/// use std::convert::Infallible;
///
/// use decorkit::conf::Conf;
/// use decorkit::traits::ObjectInstrumenter;
///
/// /// Tags a label with the strategy it was instrumented under.
/// struct Labeler;
///
/// impl ObjectInstrumenter for Labeler {
///     type Target = String;
///     type Error = Infallible;
///
///     fn instrument(&self, target: String, conf: &Conf) -> Result<String, Infallible> {
///         Ok(format!("{target}@{}", conf.strategy()))
///     }
/// }
///
/// assert_eq!(Labeler.instrument("f".into(), &Conf::DEFAULT).unwrap(), "f@O1");
/// ```
pub trait ObjectInstrumenter {
    /// Kind of object this instrumenter accepts and returns.
    type Target;

    /// Failure raised while analysing or wrapping a target.
    type Error: std::error::Error + 'static;

    /// Instruments `target` according to `conf`.
    ///
    /// Implementations receive every strategy except
    /// [`NoCheck`](crate::strategy::Strategy::NoCheck) when called through a
    /// cached [`Instrumentor`](crate::instrumentor::Instrumentor), and every
    /// strategy when called through
    /// [`Dispatcher::instrument`](crate::dispatch::Dispatcher::instrument).
    fn instrument(&self, target: Self::Target, conf: &Conf) -> Result<Self::Target, Self::Error>;
}

impl<I> ObjectInstrumenter for &I
where
    I: ObjectInstrumenter + ?Sized,
{
    type Target = I::Target;
    type Error = I::Error;

    #[inline]
    fn instrument(&self, target: Self::Target, conf: &Conf) -> Result<Self::Target, Self::Error> {
        (**self).instrument(target, conf)
    }
}

impl<I> ObjectInstrumenter for Arc<I>
where
    I: ObjectInstrumenter + ?Sized,
{
    type Target = I::Target;
    type Error = I::Error;

    #[inline]
    fn instrument(&self, target: Self::Target, conf: &Conf) -> Result<Self::Target, Self::Error> {
        (**self).instrument(target, conf)
    }
}

/// A value offered as a configuration to
/// [`Dispatcher::dispatch`](crate::dispatch::Dispatcher::dispatch).
///
/// Implemented for every `Debug` type so callers holding loosely typed
/// settings can hand them over; only a [`Conf`] (directly or behind a
/// pointer) is accepted.
pub trait ConfArg: Debug {
    /// Erases the value for downcasting.
    fn as_any(&self) -> &dyn Any;

    /// Returns the value as a [`Conf`] when it is one, or when it is a
    /// `&'static Conf`, `Arc<Conf>` or `Box<Conf>` pointing at one.
    fn as_conf(&self) -> Option<&Conf> {
        let any = self.as_any();
        any.downcast_ref::<Conf>()
            .or_else(|| any.downcast_ref::<&'static Conf>().copied())
            .or_else(|| any.downcast_ref::<Arc<Conf>>().map(|conf| &**conf))
            .or_else(|| any.downcast_ref::<Box<Conf>>().map(|conf| &**conf))
    }
}

impl<T> ConfArg for T
where
    T: Any + Debug,
{
    #[inline]
    fn as_any(&self) -> &dyn Any {
        self
    }
}

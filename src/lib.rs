//! decorkit: configuration-keyed decorator dispatch.
//!
//! A [`Dispatcher`](dispatch::Dispatcher) turns a [`Conf`](conf::Conf) into a
//! reusable [`Instrumentor`](instrumentor::Instrumentor), generating at most
//! one per distinct configuration value, or instruments a single target
//! directly. The checking itself is delegated to an
//! [`ObjectInstrumenter`](traits::ObjectInstrumenter).
//!
//! ## Modules
//!
//! - [`strategy`]: checking strategies.
//! - [`conf`] / [`builder`]: immutable configuration and its builder.
//! - [`traits`]: the instrumenter seam and the dynamic configuration slot.
//! - [`instrumentor`]: instrumentors bound to one configuration.
//! - [`cache`] / [`metrics`]: the configuration-keyed cache and its counters.
//! - [`dispatch`]: the entry point.
//! - [`error`]: error types.

pub mod builder;
pub mod cache;
pub mod conf;
pub mod dispatch;
pub mod error;
pub mod instrumentor;
pub mod metrics;
pub mod prelude;
pub mod strategy;
pub mod traits;

pub use crate::builder::ConfBuilder;
pub use crate::cache::DecoratorCache;
pub use crate::conf::Conf;
pub use crate::dispatch::{Dispatched, Dispatcher, Mode};
pub use crate::error::{ConfTypeError, ConfigError, DispatchError};
pub use crate::instrumentor::Instrumentor;
pub use crate::metrics::CacheMetrics;
pub use crate::strategy::Strategy;
pub use crate::traits::{ConfArg, ObjectInstrumenter};

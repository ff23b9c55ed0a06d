//! Decorator configuration.
//!
//! A [`Conf`] is an immutable bundle of checking options. Equality and hashing
//! cover every field, so two confs built independently from the same options
//! are interchangeable keys in the
//! [`DecoratorCache`](crate::cache::DecoratorCache).
//!
//! Confs are built with [`ConfBuilder`](crate::builder::ConfBuilder), from a
//! [`Strategy`] alone, or deserialized:
//!
//! ```
//! use decorkit::conf::Conf;
//! use decorkit::strategy::Strategy;
//!
//! let a = Conf::with_strategy(Strategy::Constant);
//! assert_eq!(a, Conf::DEFAULT);
//! assert_eq!(a.strategy(), Strategy::Constant);
//! ```

use serde::{Deserialize, Serialize};

use crate::builder::ConfBuilder;
use crate::strategy::Strategy;

/// Immutable set of options applied when instrumenting an object.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Conf {
    strategy: Strategy,
    is_debug: bool,
    is_pep484_tower: bool,
}

impl Conf {
    /// Process-wide default configuration: constant-time checking, no debug
    /// output, no numeric-tower widening.
    pub const DEFAULT: Conf = Conf {
        strategy: Strategy::Constant,
        is_debug: false,
        is_pep484_tower: false,
    };

    pub(crate) const fn from_parts(
        strategy: Strategy,
        is_debug: bool,
        is_pep484_tower: bool,
    ) -> Self {
        Self {
            strategy,
            is_debug,
            is_pep484_tower,
        }
    }

    /// Default configuration with `strategy` substituted.
    pub const fn with_strategy(strategy: Strategy) -> Self {
        Self::from_parts(strategy, false, false)
    }

    /// Starts a builder seeded with [`Conf::DEFAULT`].
    pub fn builder() -> ConfBuilder {
        ConfBuilder::new()
    }

    /// Starts a builder seeded with this configuration's options.
    pub fn to_builder(&self) -> ConfBuilder {
        ConfBuilder::from_conf(self)
    }

    #[inline]
    pub fn strategy(&self) -> Strategy {
        self.strategy
    }

    /// Whether the instrumenter should emit diagnostics about the wrappers it
    /// generates.
    #[inline]
    pub fn is_debug(&self) -> bool {
        self.is_debug
    }

    /// Whether integer values satisfy float hints and float or integer values
    /// satisfy complex hints.
    #[inline]
    pub fn is_pep484_tower(&self) -> bool {
        self.is_pep484_tower
    }
}

impl Default for Conf {
    fn default() -> Self {
        Self::DEFAULT
    }
}

//! Builder for decorator configurations.
//!
//! Provides a chained API for assembling a [`Conf`] without exposing its
//! fields. Strategy names can be supplied as strings (e.g. read from a
//! settings file); a bad name is held until [`ConfBuilder::try_build`].
//!
//! ## Example
//!
//! ```rust
//! use decorkit::builder::ConfBuilder;
//! use decorkit::strategy::Strategy;
//!
//! let conf = ConfBuilder::new().strategy(Strategy::NoCheck).is_debug(true).build();
//! assert_eq!(conf.strategy(), Strategy::NoCheck);
//! assert!(conf.is_debug());
//!
//! let err = ConfBuilder::new().strategy_name("O(n!)").try_build().unwrap_err();
//! assert!(err.message().contains("O(n!)"));
//! ```

use crate::conf::Conf;
use crate::error::ConfigError;
use crate::strategy::Strategy;

/// Builder for [`Conf`] values.
#[derive(Debug, Clone)]
pub struct ConfBuilder {
    strategy: Strategy,
    is_debug: bool,
    is_pep484_tower: bool,
    error: Option<ConfigError>,
}

impl ConfBuilder {
    /// Create a builder seeded with [`Conf::DEFAULT`].
    pub fn new() -> Self {
        Self::from_conf(&Conf::DEFAULT)
    }

    /// Create a builder seeded with the options of an existing conf.
    pub fn from_conf(conf: &Conf) -> Self {
        Self {
            strategy: conf.strategy(),
            is_debug: conf.is_debug(),
            is_pep484_tower: conf.is_pep484_tower(),
            error: None,
        }
    }

    /// Set the checking strategy.
    pub fn strategy(mut self, strategy: Strategy) -> Self {
        self.strategy = strategy;
        self
    }

    /// Set the checking strategy by name.
    ///
    /// An unknown name leaves the strategy unchanged and is reported by
    /// [`try_build`](Self::try_build). Only the first bad name is kept.
    pub fn strategy_name(mut self, name: &str) -> Self {
        match name.parse() {
            Ok(strategy) => self.strategy = strategy,
            Err(err) => {
                self.error.get_or_insert(err);
            },
        }
        self
    }

    /// Enable or disable instrumenter diagnostics.
    pub fn is_debug(mut self, is_debug: bool) -> Self {
        self.is_debug = is_debug;
        self
    }

    /// Enable or disable implicit numeric-tower widening.
    pub fn is_pep484_tower(mut self, is_pep484_tower: bool) -> Self {
        self.is_pep484_tower = is_pep484_tower;
        self
    }

    /// Build the configuration, ignoring any deferred parse error.
    pub fn build(self) -> Conf {
        Conf::from_parts(self.strategy, self.is_debug, self.is_pep484_tower)
    }

    /// Build the configuration, failing on the first deferred parse error.
    pub fn try_build(self) -> Result<Conf, ConfigError> {
        match self.error {
            Some(err) => Err(err),
            None => Ok(Conf::from_parts(
                self.strategy,
                self.is_debug,
                self.is_pep484_tower,
            )),
        }
    }
}

impl Default for ConfBuilder {
    fn default() -> Self {
        Self::new()
    }
}

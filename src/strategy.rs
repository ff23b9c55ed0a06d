//! Checking strategies.
//!
//! A [`Strategy`] selects how much runtime checking an instrumented object
//! performs. Members are named after the asymptotic cost of the checks they
//! imply and are totally ordered by that cost:
//!
//! ```text
//!   NoCheck (O0) < Constant (O1) < LogSample (Ologn) < LinearSample (On)
//! ```
//!
//! Only [`Strategy::NoCheck`] is interpreted by this crate: dispatch reduces it
//! to the identity. Every other member is forwarded verbatim to the
//! [`ObjectInstrumenter`](crate::traits::ObjectInstrumenter), which owns the
//! meaning of the sampling strategies.
//!
//! ## Example Usage
//!
//! ```
//! use decorkit::strategy::Strategy;
//!
//! let s: Strategy = "Ologn".parse().unwrap();
//! assert_eq!(s, Strategy::LogSample);
//! assert!(Strategy::NoCheck < Strategy::Constant);
//! assert_eq!(Strategy::default(), Strategy::Constant);
//! ```

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

/// Kind of runtime checking applied to an instrumented object.
///
/// Discriminants are explicit; the compiler rejects a duplicate value, so two
/// members can never alias each other:
///
/// ```compile_fail,E0081
/// #[repr(u8)]
/// enum Aliased {
///     NoCheck = 0,
///     Constant = 0,
/// }
/// ```
///
/// Serialized names are snake_case; the big-O names are accepted as aliases.
#[repr(u8)]
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(rename_all = "snake_case")]
pub enum Strategy {
    /// Perform no checking. Instrumentors built for this strategy return their
    /// target untouched.
    #[serde(alias = "O0")]
    NoCheck = 0,
    /// Check a single randomly chosen item of each container. The default.
    #[default]
    #[serde(alias = "O1")]
    Constant = 1,
    /// Check `log(n)` items of each container. Reserved; the sampling scheme
    /// belongs to the instrumenter.
    #[serde(alias = "Ologn")]
    LogSample = 2,
    /// Check every item of each container. Reserved; the sampling scheme
    /// belongs to the instrumenter.
    #[serde(alias = "On")]
    LinearSample = 3,
}

impl Strategy {
    /// All strategies in ascending cost order.
    pub const ALL: [Strategy; 4] = [
        Strategy::NoCheck,
        Strategy::Constant,
        Strategy::LogSample,
        Strategy::LinearSample,
    ];

    /// Returns `true` for the strategy that disables checking entirely.
    #[inline]
    pub const fn is_noop(self) -> bool {
        matches!(self, Strategy::NoCheck)
    }

    /// Returns `true` for strategies that have no sampling algorithm behind
    /// them yet.
    #[inline]
    pub const fn is_reserved(self) -> bool {
        matches!(self, Strategy::LogSample | Strategy::LinearSample)
    }

    /// Big-O name of the strategy.
    pub const fn as_str(self) -> &'static str {
        match self {
            Strategy::NoCheck => "O0",
            Strategy::Constant => "O1",
            Strategy::LogSample => "Ologn",
            Strategy::LinearSample => "On",
        }
    }

    const fn variant_name(self) -> &'static str {
        match self {
            Strategy::NoCheck => "no_check",
            Strategy::Constant => "constant",
            Strategy::LogSample => "log_sample",
            Strategy::LinearSample => "linear_sample",
        }
    }
}

impl fmt::Display for Strategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Strategy {
    type Err = ConfigError;

    /// Accepts either the big-O name (`"O1"`) or the snake_case variant name
    /// (`"constant"`), ignoring ASCII case.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let name = s.trim();
        Strategy::ALL
            .into_iter()
            .find(|strategy| {
                name.eq_ignore_ascii_case(strategy.as_str())
                    || name.eq_ignore_ascii_case(strategy.variant_name())
            })
            .ok_or_else(|| ConfigError::new(format!("unknown checking strategy {name:?}")))
    }
}

//! Error types for the decorkit library.
//!
//! ## Key Components
//!
//! - [`ConfigError`]: Returned when configuration input is invalid (unknown
//!   strategy names, malformed serialized configuration).
//! - [`ConfTypeError`]: Returned by the dual-mode entry point when the value
//!   passed as a configuration is not a [`Conf`](crate::conf::Conf).
//! - [`DispatchError`]: Union of the above with the instrumenter's own error,
//!   which is forwarded untouched.
//!
//! ## Example Usage
//!
//! ```
//! use decorkit::error::ConfigError;
//! use decorkit::strategy::Strategy;
//!
//! let bad: Result<Strategy, ConfigError> = "O(n^2)".parse();
//! assert!(bad.unwrap_err().to_string().contains("O(n^2)"));
//! ```

// ---------------------------------------------------------------------------
// ConfigError
// ---------------------------------------------------------------------------

/// Error returned when configuration input is invalid.
///
/// Produced by [`Strategy::from_str`](crate::strategy::Strategy) and
/// [`ConfBuilder::try_build`](crate::builder::ConfBuilder::try_build). Carries
/// a human-readable description of which input failed.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{0}")]
pub struct ConfigError(String);

impl ConfigError {
    /// Creates a new `ConfigError` with the given description.
    #[inline]
    pub fn new(msg: impl Into<String>) -> Self {
        Self(msg.into())
    }

    /// Returns the error description.
    #[inline]
    pub fn message(&self) -> &str {
        &self.0
    }
}

// ---------------------------------------------------------------------------
// ConfTypeError
// ---------------------------------------------------------------------------

/// Error returned when a value that is not a [`Conf`](crate::conf::Conf) is
/// supplied where a configuration is expected.
///
/// Holds the `Debug` representation of the rejected value.
///
/// # Example
///
/// ```
/// use decorkit::error::ConfTypeError;
///
/// let err = ConfTypeError::from_value(&"not-a-config");
/// assert!(err.to_string().contains("not-a-config"));
/// ```
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{repr} not decorator configuration.")]
pub struct ConfTypeError {
    repr: String,
}

impl ConfTypeError {
    /// Builds the error from the offending value's `Debug` output.
    pub fn from_value<T>(value: &T) -> Self
    where
        T: std::fmt::Debug + ?Sized,
    {
        Self {
            repr: format!("{value:?}"),
        }
    }

    /// Printable representation of the rejected value.
    #[inline]
    pub fn repr(&self) -> &str {
        &self.repr
    }
}

// ---------------------------------------------------------------------------
// DispatchError
// ---------------------------------------------------------------------------

/// Error returned by [`Dispatcher::dispatch`](crate::dispatch::Dispatcher::dispatch).
///
/// `E` is the instrumenter's error type; it is carried transparently so its
/// message and source chain are exactly what the instrumenter produced.
#[derive(Debug, thiserror::Error)]
pub enum DispatchError<E>
where
    E: std::error::Error + 'static,
{
    #[error(transparent)]
    ConfType(#[from] ConfTypeError),
    #[error(transparent)]
    Instrument(E),
}

impl<E> DispatchError<E>
where
    E: std::error::Error + 'static,
{
    /// Returns the configuration type error, if that is what this is.
    pub fn as_conf_type(&self) -> Option<&ConfTypeError> {
        match self {
            DispatchError::ConfType(err) => Some(err),
            DispatchError::Instrument(_) => None,
        }
    }

    /// Unwraps the instrumenter's error, if that is what this is.
    pub fn into_instrument(self) -> Option<E> {
        match self {
            DispatchError::Instrument(err) => Some(err),
            DispatchError::ConfType(_) => None,
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

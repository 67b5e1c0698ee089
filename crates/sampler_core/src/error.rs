//! Error types for uniform sampling.

use thiserror::Error;

/// Errors raised by sampler construction and sampling calls.
///
/// Bounds are carried as their `Display` rendering so one error type covers
/// every supported numeric type.
///
/// # Examples
/// ```
/// use sampler_core::SamplerError;
///
/// let err = SamplerError::invalid_range(10, 1);
/// assert_eq!(format!("{}", err), "Invalid range: min 10 is greater than max 1");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SamplerError {
    /// Lower bound is greater than the upper bound.
    #[error("Invalid range: min {min} is greater than max {max}")]
    InvalidRange {
        /// Requested lower bound
        min: String,
        /// Requested upper bound
        max: String,
    },

    /// A floating-point bound is NaN or infinite.
    #[error("Non-finite bound: [{min}, {max})")]
    NonFiniteBound {
        /// Requested lower bound
        min: String,
        /// Requested upper bound
        max: String,
    },

    /// The span `max - min` is not representable in the bound type.
    #[error("Range overflow: span of [{min}, {max}) is not representable")]
    RangeOverflow {
        /// Requested lower bound
        min: String,
        /// Requested upper bound
        max: String,
    },

    /// The entropy source could not provide a seed.
    #[error("Entropy source unavailable: {0}")]
    EntropyUnavailable(String),

    /// The shared sampler was called from inside its own `Random::with` closure.
    #[error("Shared sampler is already borrowed by this thread")]
    SharedReentry,
}

impl SamplerError {
    /// Builds an [`SamplerError::InvalidRange`] from typed bounds.
    pub fn invalid_range<T: std::fmt::Display>(min: T, max: T) -> Self {
        SamplerError::InvalidRange {
            min: min.to_string(),
            max: max.to_string(),
        }
    }

    pub(crate) fn non_finite<T: std::fmt::Display>(min: T, max: T) -> Self {
        SamplerError::NonFiniteBound {
            min: min.to_string(),
            max: max.to_string(),
        }
    }

    pub(crate) fn overflow<T: std::fmt::Display>(min: T, max: T) -> Self {
        SamplerError::RangeOverflow {
            min: min.to_string(),
            max: max.to_string(),
        }
    }
}

/// Result alias for sampler operations.
pub type Result<T> = std::result::Result<T, SamplerError>;

//! # Ripple Error Types
//!
//! All errors that can occur in the height-field engine.

use thiserror::Error;

/// Errors that can occur in the ripple engine.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum RippleError {
    /// Grid dimension below the supported minimum.
    #[error("invalid dimension: {dimension} (must be at least {min})")]
    InvalidDimension {
        /// The requested dimension.
        dimension: usize,
        /// The smallest dimension accepted.
        min: usize,
    },

    /// Disturbance width outside `[1, dimension / 2]`.
    #[error("invalid peak width: {width} (must be in [1, {max}])")]
    InvalidPeakWidth {
        /// The requested width.
        width: usize,
        /// The largest width accepted for this field.
        max: usize,
    },

    /// A scheduler period that is not finite and strictly positive.
    #[error("invalid period `{name}`: {value} ms")]
    InvalidPeriod {
        /// Which period was rejected.
        name: &'static str,
        /// The rejected value in milliseconds.
        value: f64,
    },

    /// Invalid configuration file.
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),

    /// Configuration file could not be read.
    #[error("i/o error: {0}")]
    Io(String),
}

/// Result type for ripple operations.
pub type RippleResult<T> = Result<T, RippleError>;

//! Error types for pixel buffer operations.

use thiserror::Error;

/// Result type for pixel buffer operations.
pub type Result<T> = core::result::Result<T, Error>;

/// Errors that can occur while transforming pixel buffers.
///
/// Overflow and underflow are not errors: every operation saturates
/// at `0` and `channel_max`.
#[derive(Debug, Error, Clone, Copy, PartialEq)]
pub enum Error {
    /// A numeric parameter is outside of its valid domain.
    #[error("invalid parameter `{name}`: {value}")]
    InvalidParameter {
        /// Parameter name
        name: &'static str,
        /// Rejected value
        value: f64,
    },

    /// Two buffers that must match in length do not.
    #[error("shape mismatch: expected {expected} values, got {actual}")]
    ShapeMismatch {
        /// Expected length
        expected: usize,
        /// Actual length
        actual: usize,
    },

    /// A host supplied channel value does not fit into `[0, max]`.
    #[error("value {value} at index {index} is out of range [0, {max}]")]
    ValueOutOfRange {
        /// Position in the host buffer
        index: usize,
        /// Rejected value
        value: i64,
        /// Channel ceiling
        max: u8,
    },
}

impl Error {
    pub(crate) fn invalid(name: &'static str, value: impl Into<f64>) -> Self {
        Self::InvalidParameter {
            name,
            value: value.into(),
        }
    }

    pub(crate) const fn shape(expected: usize, actual: usize) -> Self {
        Self::ShapeMismatch { expected, actual }
    }
}

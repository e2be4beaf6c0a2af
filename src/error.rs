//! Error types for pose-math operations.
//!
//! Every fallible helper in this crate returns [`Result`]. Numeric edge cases
//! that have a well-defined answer (the `asin` clamp in Euler extraction, the
//! epsilon in mean-std normalization) are handled in place and never surface
//! here.

use thiserror::Error;

/// Main error type for pose-math operations.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum MathError {
    /// A shape parameter violates a precondition (e.g. odd `d_model`).
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    /// Degenerate geometric input.
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// A slice or array row has the wrong number of components.
    #[error("Shape mismatch: expected {expected} components, got {actual}")]
    ShapeMismatch { expected: usize, actual: usize },

    /// Reduction axis is not present in the array.
    #[error("Axis {axis} out of bounds for array with {ndim} dimensions")]
    AxisOutOfBounds { axis: usize, ndim: usize },

    /// Configuration validation failed.
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),
}

/// Result type alias for pose-math operations.
pub type Result<T> = std::result::Result<T, MathError>;

impl MathError {
    /// Create an invalid argument error.
    #[must_use]
    pub fn invalid_argument(msg: impl Into<String>) -> Self {
        Self::InvalidArgument(msg.into())
    }

    /// Create an invalid input error.
    #[must_use]
    pub fn invalid_input(msg: impl Into<String>) -> Self {
        Self::InvalidInput(msg.into())
    }

    /// Create a shape mismatch error.
    #[must_use]
    pub const fn shape_mismatch(expected: usize, actual: usize) -> Self {
        Self::ShapeMismatch { expected, actual }
    }

    /// Create an axis out of bounds error.
    #[must_use]
    pub const fn axis_out_of_bounds(axis: usize, ndim: usize) -> Self {
        Self::AxisOutOfBounds { axis, ndim }
    }

    /// Create an invalid configuration error.
    #[must_use]
    pub fn invalid_config(msg: impl Into<String>) -> Self {
        Self::InvalidConfig(msg.into())
    }
}

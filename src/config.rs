//! Configuration for the tunable constants of the pose-math helpers.
//!
//! Most callers never touch this: the plain entry points
//! ([`positional_encoding_1d`](crate::positional_encoding_1d),
//! [`ms_norm`](crate::ms_norm), ...) use [`MathConfig::default`]. The
//! `*_with_config` variants accept a custom configuration and validate it
//! before use.
//!
//! # Example
//!
//! ```
//! use mocap_math::MathConfig;
//!
//! let config = MathConfig::default()
//!     .with_positional_base(500.0)
//!     .with_norm_epsilon(1e-6);
//! assert!(config.validate().is_ok());
//! ```

use crate::error::{MathError, Result};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Default base of the sinusoidal positional encodings.
pub const DEFAULT_POSITIONAL_BASE: f64 = 10000.0;

/// Default additive epsilon in the mean-std normalization denominator.
pub const DEFAULT_NORM_EPSILON: f64 = 1e-5;

/// Default cross-product magnitude below which two directions count as parallel.
pub const DEFAULT_PARALLEL_EPSILON: f64 = 1e-12;

/// Numeric constants used by the helpers.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct MathConfig {
    /// Base of the geometric frequency progression in positional encodings.
    /// `div_term[k] = exp(-(2k) * ln(base) / d_model)`.
    pub positional_base: f64,

    /// Added to the standard deviation in [`ms_norm`](crate::ms_norm) so
    /// zero-variance lanes stay finite.
    pub norm_epsilon: f64,

    /// Threshold on `|from x to|` for
    /// [`rotation_between`](crate::rotation_between).
    pub parallel_epsilon: f64,
}

impl Default for MathConfig {
    fn default() -> Self {
        Self {
            positional_base: DEFAULT_POSITIONAL_BASE,
            norm_epsilon: DEFAULT_NORM_EPSILON,
            parallel_epsilon: DEFAULT_PARALLEL_EPSILON,
        }
    }
}

impl MathConfig {
    /// Create a new configuration with default values.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Validate the configuration.
    ///
    /// # Errors
    ///
    /// Returns [`MathError::InvalidConfig`] if any constant is out of range.
    pub fn validate(&self) -> Result<()> {
        if !self.positional_base.is_finite() || self.positional_base <= 1.0 {
            return Err(MathError::invalid_config(
                "positional_base must be finite and > 1",
            ));
        }
        if !self.norm_epsilon.is_finite() || self.norm_epsilon < 0.0 {
            return Err(MathError::invalid_config(
                "norm_epsilon must be finite and non-negative",
            ));
        }
        if !self.parallel_epsilon.is_finite() || self.parallel_epsilon < 0.0 {
            return Err(MathError::invalid_config(
                "parallel_epsilon must be finite and non-negative",
            ));
        }
        Ok(())
    }

    /// Set the positional encoding base.
    #[must_use]
    pub const fn with_positional_base(mut self, base: f64) -> Self {
        self.positional_base = base;
        self
    }

    /// Set the normalization epsilon.
    #[must_use]
    pub const fn with_norm_epsilon(mut self, eps: f64) -> Self {
        self.norm_epsilon = eps;
        self
    }

    /// Set the parallel-direction threshold.
    #[must_use]
    pub const fn with_parallel_epsilon(mut self, eps: f64) -> Self {
        self.parallel_epsilon = eps;
        self
    }
}

//! Motion-Capture Math Helpers
//!
//! Numeric building blocks for a pose-estimation pipeline: quaternion
//! algebra, Euler angle conversion, vector angles, sinusoidal positional
//! encodings and NaN-aware normalization.
//!
//! Every function is pure. Inputs are borrowed, outputs are freshly
//! allocated, and nothing is cached, so all of it can be called from any
//! number of threads at once.
//!
//! # Quick Start
//!
//! ```
//! use mocap_math::{euler_to_quaternion, quaternion_to_euler, rotate_vector};
//!
//! let q = euler_to_quaternion(&[0.1, 0.2, 0.3]);
//! let v = rotate_vector(&q, &[1.0, 0.0, 0.0]);
//! assert!((v.iter().map(|c| c * c).sum::<f64>() - 1.0).abs() < 1e-12);
//!
//! let angles = quaternion_to_euler(&q);
//! assert!((angles[2] - 0.3).abs() < 1e-12);
//! ```
//!
//! ```
//! use mocap_math::{ms_norm, positional_encoding_2d};
//! use ndarray::{array, Axis};
//!
//! let pe = positional_encoding_2d(16, 7, 9)?;
//! assert_eq!(pe.dim(), (16, 7, 9));
//!
//! let features = array![[1.0, f64::NAN], [3.0, 4.0]];
//! let normed = ms_norm(&features, Axis(0))?;
//! assert!(normed[[0, 1]].is_nan());
//! # Ok::<(), mocap_math::MathError>(())
//! ```
//!
//! # Modules
//!
//! | Module | Contents |
//! |--------|----------|
//! | [`math`] | quaternions, Euler conversion, vector geometry |
//! | [`positional`] | 1D / 2D sinusoidal encodings |
//! | [`normalization`] | `nan_mean`, `nan_std`, `ms_norm` |
//! | [`keypoints`] | bounding boxes around keypoint sets |

#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::similar_names)]
#![allow(clippy::cast_precision_loss)]
#![allow(clippy::many_single_char_names)]

pub mod config;
pub mod error;
pub mod keypoints;
pub mod math;
pub mod normalization;
pub mod positional;

// Re-exports for convenient access
pub use config::MathConfig;
pub use error::{MathError, Result};
pub use keypoints::{bounding_box, BoundingBox};
pub use math::{
    angle_degrees, conjugate, euler_rows_to_quaternions, euler_to_quaternion, multiply,
    quaternion_rows_to_euler, quaternion_to_euler, rotate_vector, rotation_between,
    rotation_between_with_config, Quaternion,
};
pub use normalization::{ms_norm, ms_norm_with_config, nan_mean, nan_std};
pub use positional::{
    positional_encoding_1d, positional_encoding_1d_with_config, positional_encoding_2d,
    positional_encoding_2d_with_config,
};

/// Library version.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

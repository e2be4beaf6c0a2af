//! Vector geometry: angles and the rotation carrying one direction onto another.

use tracing::warn;

use crate::config::MathConfig;
use crate::error::{MathError, Result};
use crate::math::quaternion::Quaternion;

/// Dot product of two 3D vectors.
#[must_use]
#[inline]
pub fn dot3(a: &[f64; 3], b: &[f64; 3]) -> f64 {
    a[0] * b[0] + a[1] * b[1] + a[2] * b[2]
}

/// Compute the norm of a 3D vector.
#[must_use]
#[inline]
pub fn norm3(v: &[f64; 3]) -> f64 {
    dot3(v, v).sqrt()
}

/// Cross product `a x b`.
#[must_use]
#[inline]
pub fn cross3(a: &[f64; 3], b: &[f64; 3]) -> [f64; 3] {
    [
        a[1] * b[2] - a[2] * b[1],
        a[2] * b[0] - a[0] * b[2],
        a[0] * b[1] - a[1] * b[0],
    ]
}

/// Normalize a 3D vector to unit length.
///
/// Vectors shorter than `1e-10` map to zero.
#[must_use]
pub fn normalize3(v: &[f64; 3]) -> [f64; 3] {
    let norm = norm3(v);
    if norm < 1e-10 {
        return [0.0, 0.0, 0.0];
    }
    [v[0] / norm, v[1] / norm, v[2] / norm]
}

/// Coarse degeneracy check shared by the angle helpers.
///
/// True when every component has the same magnitude in both vectors. That
/// catches identical and fully sign-flipped vectors, and also some
/// perpendicular pairs such as `[1, 1, 0]` / `[1, -1, 0]`. Scaled copies of
/// the same direction are not caught.
fn same_magnitudes(v1: &[f64], v2: &[f64]) -> bool {
    v1.iter().zip(v2).all(|(a, b)| a.abs() == b.abs())
}

/// Angle between two vectors in degrees: `degrees(acos(v1.v2 / (|v1||v2|)))`.
///
/// The cosine is not clamped and zero-length vectors are not guarded; both
/// can produce NaN.
///
/// # Errors
///
/// - [`MathError::ShapeMismatch`] if the lengths differ.
/// - [`MathError::InvalidInput`] if `|v1[i]| == |v2[i]|` for every `i`. This
///   is a coarse filter, not a parallel/anti-parallel detector.
///
/// # Example
///
/// ```
/// use mocap_math::angle_degrees;
///
/// let angle = angle_degrees(&[1.0, 0.0, 0.0], &[0.0, 1.0, 0.0])?;
/// assert_eq!(angle, 90.0);
/// assert!(angle_degrees(&[1.0, 2.0, 3.0], &[1.0, 2.0, 3.0]).is_err());
/// # Ok::<(), mocap_math::MathError>(())
/// ```
pub fn angle_degrees(v1: &[f64], v2: &[f64]) -> Result<f64> {
    if v1.len() != v2.len() {
        return Err(MathError::shape_mismatch(v1.len(), v2.len()));
    }
    if same_magnitudes(v1, v2) {
        warn!(?v1, ?v2, "rejecting vector pair with equal component magnitudes");
        return Err(MathError::invalid_input(
            "vectors cannot be perpendicular nor exactly the same",
        ));
    }

    let dot: f64 = v1.iter().zip(v2).map(|(a, b)| a * b).sum();
    let n1 = v1.iter().map(|a| a * a).sum::<f64>().sqrt();
    let n2 = v2.iter().map(|b| b * b).sum::<f64>().sqrt();
    Ok((dot / (n1 * n2)).acos().to_degrees())
}

/// Unit quaternion rotating the direction of `from` onto the direction of `to`.
///
/// # Errors
///
/// Returns [`MathError::InvalidInput`] when the normalized vectors fail the
/// coarse check of [`angle_degrees`] or are parallel/anti-parallel.
pub fn rotation_between(from: &[f64; 3], to: &[f64; 3]) -> Result<Quaternion> {
    rotation_between_with_config(from, to, &MathConfig::default())
}

/// [`rotation_between`] with a custom parallel threshold.
///
/// # Errors
///
/// As [`rotation_between`], plus [`MathError::InvalidConfig`].
pub fn rotation_between_with_config(
    from: &[f64; 3],
    to: &[f64; 3],
    config: &MathConfig,
) -> Result<Quaternion> {
    config.validate()?;

    let a = normalize3(from);
    let b = normalize3(to);
    if same_magnitudes(&a, &b) {
        warn!(?from, ?to, "rejecting rotation between equal-magnitude directions");
        return Err(MathError::invalid_input(
            "vectors cannot be perpendicular nor exactly the same",
        ));
    }

    let axis = cross3(&a, &b);
    if norm3(&axis) <= config.parallel_epsilon {
        warn!(?from, ?to, "no unique rotation axis between parallel directions");
        return Err(MathError::invalid_input(
            "vectors are parallel or anti-parallel; rotation axis is undefined",
        ));
    }

    let angle = dot3(&a, &b).clamp(-1.0, 1.0).acos();
    Quaternion::from_axis_angle(&axis, angle)
}

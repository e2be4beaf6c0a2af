//! Quaternion algebra for rotations.
//!
//! Quaternions are stored scalar-first as `(w, x, y, z)`. The primitives here
//! (conjugate, Hamilton product) work on any quaternion; only
//! [`rotate_vector`] assumes unit norm, and it leaves that to the caller.

use std::ops::Mul;

use crate::error::{MathError, Result};
use crate::math::vector::norm3;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// A quaternion `w + xi + yj + zk`.
///
/// Represents a rotation when it has unit norm. Unit norm is not enforced.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Quaternion {
    /// Real (scalar) part.
    pub w: f64,
    /// First imaginary component.
    pub x: f64,
    /// Second imaginary component.
    pub y: f64,
    /// Third imaginary component.
    pub z: f64,
}

impl Default for Quaternion {
    fn default() -> Self {
        Self::identity()
    }
}

impl Quaternion {
    /// Create a quaternion from its components.
    #[must_use]
    pub const fn new(w: f64, x: f64, y: f64, z: f64) -> Self {
        Self { w, x, y, z }
    }

    /// The identity rotation.
    #[must_use]
    pub const fn identity() -> Self {
        Self::new(1.0, 0.0, 0.0, 0.0)
    }

    /// Embed a 3-vector as a pure quaternion `(0, v)`.
    #[must_use]
    pub const fn pure(v: &[f64; 3]) -> Self {
        Self::new(0.0, v[0], v[1], v[2])
    }

    /// Build from a `[w, x, y, z]` array.
    #[must_use]
    pub const fn from_array(q: [f64; 4]) -> Self {
        Self::new(q[0], q[1], q[2], q[3])
    }

    /// Build from a dynamically sized row such as a tensor slice.
    ///
    /// # Errors
    ///
    /// Returns [`MathError::ShapeMismatch`] unless `q` has exactly 4 elements.
    pub fn from_slice(q: &[f64]) -> Result<Self> {
        match *q {
            [w, x, y, z] => Ok(Self::new(w, x, y, z)),
            _ => Err(MathError::shape_mismatch(4, q.len())),
        }
    }

    /// Components as `[w, x, y, z]`.
    #[must_use]
    pub const fn to_array(&self) -> [f64; 4] {
        [self.w, self.x, self.y, self.z]
    }

    /// Imaginary part `[x, y, z]`.
    #[must_use]
    pub const fn vector(&self) -> [f64; 3] {
        [self.x, self.y, self.z]
    }

    /// Quaternion from a rotation of `angle` radians about `axis`.
    ///
    /// The axis is normalized first.
    ///
    /// # Errors
    ///
    /// Returns [`MathError::InvalidInput`] if the axis has zero length.
    pub fn from_axis_angle(axis: &[f64; 3], angle: f64) -> Result<Self> {
        let n = norm3(axis);
        if n == 0.0 || !n.is_finite() {
            return Err(MathError::invalid_input(
                "rotation axis must have finite non-zero length",
            ));
        }
        let (s, c) = (angle * 0.5).sin_cos();
        Ok(Self::new(
            c,
            axis[0] / n * s,
            axis[1] / n * s,
            axis[2] / n * s,
        ))
    }

    /// Squared Euclidean norm.
    #[must_use]
    #[inline]
    pub fn norm_squared(&self) -> f64 {
        self.w * self.w + self.x * self.x + self.y * self.y + self.z * self.z
    }

    /// Euclidean norm.
    #[must_use]
    #[inline]
    pub fn norm(&self) -> f64 {
        self.norm_squared().sqrt()
    }

    /// Scale to unit norm.
    ///
    /// # Errors
    ///
    /// Returns [`MathError::InvalidInput`] if the norm is zero or not finite.
    pub fn normalize(&self) -> Result<Self> {
        let n = self.norm();
        if n == 0.0 || !n.is_finite() {
            return Err(MathError::invalid_input(
                "cannot normalize a quaternion with zero or non-finite norm",
            ));
        }
        Ok(Self::new(self.w / n, self.x / n, self.y / n, self.z / n))
    }

    /// Conjugate. See [`conjugate`].
    #[must_use]
    pub fn conjugate(&self) -> Self {
        conjugate(self)
    }

    /// Rotate `v` by this quaternion. See [`rotate_vector`].
    #[must_use]
    pub fn rotate(&self, v: &[f64; 3]) -> [f64; 3] {
        rotate_vector(self, v)
    }
}

/// Negate the imaginary part, keep the real part.
#[must_use]
#[inline]
pub fn conjugate(q: &Quaternion) -> Quaternion {
    Quaternion::new(q.w, -q.x, -q.y, -q.z)
}

/// Hamilton product `q1 * q2`.
///
/// Non-commutative: `multiply(a, b) != multiply(b, a)` in general.
#[must_use]
#[inline]
pub fn multiply(q1: &Quaternion, q2: &Quaternion) -> Quaternion {
    Quaternion::new(
        q1.w * q2.w - q1.x * q2.x - q1.y * q2.y - q1.z * q2.z,
        q1.w * q2.x + q1.x * q2.w + q1.y * q2.z - q1.z * q2.y,
        q1.w * q2.y + q1.y * q2.w + q1.z * q2.x - q1.x * q2.z,
        q1.w * q2.z + q1.z * q2.w + q1.x * q2.y - q1.y * q2.x,
    )
}

/// Rotate a 3-vector with the sandwich product `q * (0, v) * q*`.
///
/// `q` must be a unit quaternion for the result to be a rotation; it is not
/// normalized or checked here.
///
/// # Example
///
/// ```
/// use mocap_math::{rotate_vector, Quaternion};
/// use std::f64::consts::FRAC_PI_2;
///
/// // 90 degrees about z maps x onto y.
/// let q = Quaternion::from_axis_angle(&[0.0, 0.0, 1.0], FRAC_PI_2)?;
/// let v = rotate_vector(&q, &[1.0, 0.0, 0.0]);
/// assert!((v[0]).abs() < 1e-12 && (v[1] - 1.0).abs() < 1e-12);
/// # Ok::<(), mocap_math::MathError>(())
/// ```
#[must_use]
pub fn rotate_vector(q: &Quaternion, v: &[f64; 3]) -> [f64; 3] {
    multiply(&multiply(q, &Quaternion::pure(v)), &conjugate(q)).vector()
}

impl Mul for Quaternion {
    type Output = Self;

    fn mul(self, rhs: Self) -> Self {
        multiply(&self, &rhs)
    }
}

impl From<[f64; 4]> for Quaternion {
    fn from(q: [f64; 4]) -> Self {
        Self::from_array(q)
    }
}

impl From<Quaternion> for [f64; 4] {
    fn from(q: Quaternion) -> Self {
        q.to_array()
    }
}

impl From<nalgebra::Quaternion<f64>> for Quaternion {
    fn from(q: nalgebra::Quaternion<f64>) -> Self {
        Self::new(q.w, q.i, q.j, q.k)
    }
}

impl From<Quaternion> for nalgebra::Quaternion<f64> {
    fn from(q: Quaternion) -> Self {
        nalgebra::Quaternion::new(q.w, q.x, q.y, q.z)
    }
}

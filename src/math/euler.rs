//! Euler angle <-> quaternion conversion.
//!
//! Angles are `[phi, theta, psi]` in radians: roll about x, pitch about y,
//! yaw about z, composed in the aerospace (ZYX) order. The pair of functions
//! are inverses of each other for `theta` strictly inside `(-pi/2, pi/2)`.

use ndarray::{Array2, ArrayView2};
use tracing::{trace, warn};

use crate::error::{MathError, Result};
use crate::math::quaternion::Quaternion;

/// Convert Euler angles `[phi, theta, psi]` to a unit quaternion.
///
/// With `c*`/`s*` the cosine/sine of half of each angle:
///
/// ```text
/// w = cφ cθ cψ + sφ sθ sψ
/// x = sφ cθ cψ - cφ sθ sψ
/// y = cφ sθ cψ + sφ cθ sψ
/// z = cφ cθ sψ - sφ sθ cψ
/// ```
#[must_use]
pub fn euler_to_quaternion(angles: &[f64; 3]) -> Quaternion {
    let (sin_phi, cos_phi) = (angles[0] * 0.5).sin_cos();
    let (sin_theta, cos_theta) = (angles[1] * 0.5).sin_cos();
    let (sin_psi, cos_psi) = (angles[2] * 0.5).sin_cos();

    Quaternion::new(
        cos_phi * cos_theta * cos_psi + sin_phi * sin_theta * sin_psi,
        sin_phi * cos_theta * cos_psi - cos_phi * sin_theta * sin_psi,
        cos_phi * sin_theta * cos_psi + sin_phi * cos_theta * sin_psi,
        cos_phi * cos_theta * sin_psi - sin_phi * sin_theta * cos_psi,
    )
}

/// Convert a quaternion to Euler angles `[X, Y, Z]`.
///
/// The pitch argument `2(wy - zx)` is clamped to `[-1, 1]` before `asin`, so
/// rounding just past gimbal lock yields `±pi/2` instead of NaN. Output is
/// finite for every finite input.
#[must_use]
pub fn quaternion_to_euler(q: &Quaternion) -> [f64; 3] {
    let t0 = 2.0 * (q.w * q.x + q.y * q.z);
    let t1 = 1.0 - 2.0 * (q.x * q.x + q.y * q.y);
    let roll = t0.atan2(t1);

    let mut t2 = 2.0 * (q.w * q.y - q.z * q.x);
    if t2 > 1.0 || t2 < -1.0 {
        trace!(value = t2, "clamping pitch sine into [-1, 1]");
        t2 = t2.clamp(-1.0, 1.0);
    }
    let pitch = t2.asin();

    let t3 = 2.0 * (q.w * q.z + q.x * q.y);
    let t4 = 1.0 - 2.0 * (q.y * q.y + q.z * q.z);
    let yaw = t3.atan2(t4);

    [roll, pitch, yaw]
}

/// Convert each `(phi, theta, psi)` row to a `(w, x, y, z)` row.
///
/// # Errors
///
/// Returns [`MathError::ShapeMismatch`] unless `angles` has 3 columns.
pub fn euler_rows_to_quaternions(angles: ArrayView2<'_, f64>) -> Result<Array2<f64>> {
    if angles.ncols() != 3 {
        warn!(ncols = angles.ncols(), "euler rows must have 3 columns");
        return Err(MathError::shape_mismatch(3, angles.ncols()));
    }

    let mut out = Array2::zeros((angles.nrows(), 4));
    for (row, mut dst) in angles.rows().into_iter().zip(out.rows_mut()) {
        let q = euler_to_quaternion(&[row[0], row[1], row[2]]);
        dst.assign(&ndarray::aview1(&q.to_array()));
    }
    Ok(out)
}

/// Convert each `(w, x, y, z)` row to a `(X, Y, Z)` row.
///
/// # Errors
///
/// Returns [`MathError::ShapeMismatch`] unless `quaternions` has 4 columns.
pub fn quaternion_rows_to_euler(quaternions: ArrayView2<'_, f64>) -> Result<Array2<f64>> {
    if quaternions.ncols() != 4 {
        warn!(ncols = quaternions.ncols(), "quaternion rows must have 4 columns");
        return Err(MathError::shape_mismatch(4, quaternions.ncols()));
    }

    let mut out = Array2::zeros((quaternions.nrows(), 3));
    for (row, mut dst) in quaternions.rows().into_iter().zip(out.rows_mut()) {
        let q = Quaternion::new(row[0], row[1], row[2], row[3]);
        dst.assign(&ndarray::aview1(&quaternion_to_euler(&q)));
    }
    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use ndarray::array;
    use std::f64::consts::{FRAC_PI_2, PI};

    #[test]
    fn test_zero_angles_identity() {
        assert_eq!(euler_to_quaternion(&[0.0, 0.0, 0.0]), Quaternion::identity());
        assert_eq!(quaternion_to_euler(&Quaternion::identity()), [0.0, 0.0, 0.0]);
    }

    #[test]
    fn test_single_axis_yaw() {
        let q = euler_to_quaternion(&[0.0, 0.0, FRAC_PI_2]);
        assert_relative_eq!(q.w, (PI / 4.0).cos(), epsilon = 1e-12);
        assert_relative_eq!(q.z, (PI / 4.0).sin(), epsilon = 1e-12);
        assert_relative_eq!(q.x, 0.0);
        assert_relative_eq!(q.y, 0.0);
    }

    #[test]
    fn test_output_is_unit() {
        let q = euler_to_quaternion(&[0.4, -1.1, 2.7]);
        assert_relative_eq!(q.norm(), 1.0, epsilon = 1e-12);
    }

    #[test]
    fn test_round_trip() {
        let angles = [0.3, -0.7, 2.1];
        let back = quaternion_to_euler(&euler_to_quaternion(&angles));
        for i in 0..3 {
            assert_relative_eq!(back[i], angles[i], epsilon = 1e-10);
        }
    }

    #[test]
    fn test_pitch_clamped_above_one() {
        // 2 * (w * y) == 1.0000001
        let c = 0.500_000_05_f64.sqrt();
        let q = Quaternion::new(c, 0.0, c, 0.0);
        let angles = quaternion_to_euler(&q);
        assert!(angles.iter().all(|a| a.is_finite()));
        assert_relative_eq!(angles[1], FRAC_PI_2);
    }

    #[test]
    fn test_pitch_clamped_below_minus_one() {
        let c = 0.500_000_05_f64.sqrt();
        let q = Quaternion::new(c, 0.0, -c, 0.0);
        let angles = quaternion_to_euler(&q);
        assert_relative_eq!(angles[1], -FRAC_PI_2);
    }

    #[test]
    fn test_rows_conversion() {
        let angles = array![[0.0, 0.0, 0.0], [0.1, 0.2, 0.3]];
        let quats = euler_rows_to_quaternions(angles.view()).unwrap();
        assert_eq!(quats.dim(), (2, 4));
        assert_relative_eq!(quats[[0, 0]], 1.0);

        let back = quaternion_rows_to_euler(quats.view()).unwrap();
        assert_eq!(back.dim(), (2, 3));
        for j in 0..3 {
            assert_relative_eq!(back[[1, j]], angles[[1, j]], epsilon = 1e-10);
        }
    }

    #[test]
    fn test_rows_wrong_width() {
        let bad = Array2::<f64>::zeros((2, 2));
        assert_eq!(
            euler_rows_to_quaternions(bad.view()),
            Err(MathError::shape_mismatch(3, 2))
        );
        assert_eq!(
            quaternion_rows_to_euler(bad.view()),
            Err(MathError::shape_mismatch(4, 2))
        );
    }
}

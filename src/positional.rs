//! Sinusoidal positional encodings.
//!
//! Deterministic sin/cos patterns injected into sequence (1D) or feature-map
//! (2D) representations. Frequencies follow the geometric progression
//!
//! ```text
//! div_term[k] = exp(-(2k) * ln(base) / d)      k in [0, d / 2)
//! ```
//!
//! with `base = 10000` unless configured otherwise. Even channels carry the
//! sine, odd channels the cosine.
//!
//! Each call allocates a fresh array. Callers that reuse an encoding across
//! forward passes are expected to keep it themselves.

use ndarray::{s, Array1, Array2, Array3};
use tracing::warn;

use crate::config::MathConfig;
use crate::error::{MathError, Result};

/// Frequencies for an encoding of `d` channels (`d` even).
fn div_terms(d: usize, base: f64) -> Array1<f64> {
    let scale = -(base.ln() / d as f64);
    Array1::from_shape_fn(d / 2, |k| ((2 * k) as f64 * scale).exp())
}

/// 1D positional encoding of shape `(length, d_model)`.
///
/// # Errors
///
/// Returns [`MathError::InvalidArgument`] if `d_model` is odd.
///
/// # Example
///
/// ```
/// use mocap_math::positional_encoding_1d;
///
/// let pe = positional_encoding_1d(4, 2)?;
/// assert_eq!(pe.dim(), (2, 4));
/// assert_eq!(pe[[0, 1]], 1.0); // cos(0)
/// assert!(positional_encoding_1d(3, 2).is_err());
/// # Ok::<(), mocap_math::MathError>(())
/// ```
pub fn positional_encoding_1d(d_model: usize, length: usize) -> Result<Array2<f64>> {
    build_1d(d_model, length, MathConfig::default().positional_base)
}

/// [`positional_encoding_1d`] with the base taken from `config`.
///
/// # Errors
///
/// [`MathError::InvalidConfig`] for an invalid configuration, otherwise as
/// [`positional_encoding_1d`].
pub fn positional_encoding_1d_with_config(
    d_model: usize,
    length: usize,
    config: &MathConfig,
) -> Result<Array2<f64>> {
    config.validate()?;
    build_1d(d_model, length, config.positional_base)
}

fn build_1d(d_model: usize, length: usize, base: f64) -> Result<Array2<f64>> {
    if d_model % 2 != 0 {
        warn!(d_model, "1d positional encoding needs an even d_model");
        return Err(MathError::invalid_argument(format!(
            "Cannot use sin/cos positional encoding with odd dim (got dim={d_model})"
        )));
    }

    let div_term = div_terms(d_model, base);
    let mut pe = Array2::zeros((length, d_model));
    for (p, mut row) in pe.rows_mut().into_iter().enumerate() {
        let position = p as f64;
        for (k, &freq) in div_term.iter().enumerate() {
            let (sin, cos) = (position * freq).sin_cos();
            row[2 * k] = sin;
            row[2 * k + 1] = cos;
        }
    }
    Ok(pe)
}

/// 2D positional encoding of shape `(d_model, height, width)`.
///
/// The first `d_model / 2` channels encode the column (width) position and
/// are constant down each column; the last `d_model / 2` encode the row
/// (height) position and are constant along each row.
///
/// # Errors
///
/// Returns [`MathError::InvalidArgument`] unless `d_model` is a multiple of 4.
pub fn positional_encoding_2d(d_model: usize, height: usize, width: usize) -> Result<Array3<f64>> {
    build_2d(d_model, height, width, MathConfig::default().positional_base)
}

/// [`positional_encoding_2d`] with the base taken from `config`.
///
/// # Errors
///
/// [`MathError::InvalidConfig`] for an invalid configuration, otherwise as
/// [`positional_encoding_2d`].
pub fn positional_encoding_2d_with_config(
    d_model: usize,
    height: usize,
    width: usize,
    config: &MathConfig,
) -> Result<Array3<f64>> {
    config.validate()?;
    build_2d(d_model, height, width, config.positional_base)
}

fn build_2d(d_model: usize, height: usize, width: usize, base: f64) -> Result<Array3<f64>> {
    if d_model % 4 != 0 {
        warn!(d_model, "2d positional encoding needs d_model divisible by 4");
        return Err(MathError::invalid_argument(format!(
            "Cannot use sin/cos positional encoding with odd dimension (got dim={d_model})"
        )));
    }

    let half = d_model / 2;
    let div_term = div_terms(half, base);
    let mut pe = Array3::zeros((d_model, height, width));

    for (k, &freq) in div_term.iter().enumerate() {
        for x in 0..width {
            let (sin, cos) = (x as f64 * freq).sin_cos();
            pe.slice_mut(s![2 * k, .., x]).fill(sin);
            pe.slice_mut(s![2 * k + 1, .., x]).fill(cos);
        }
        for y in 0..height {
            let (sin, cos) = (y as f64 * freq).sin_cos();
            pe.slice_mut(s![half + 2 * k, y, ..]).fill(sin);
            pe.slice_mut(s![half + 2 * k + 1, y, ..]).fill(cos);
        }
    }
    Ok(pe)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_div_terms() {
        let d = div_terms(4, 10000.0);
        assert_eq!(d.len(), 2);
        assert_relative_eq!(d[0], 1.0);
        assert_relative_eq!(d[1], 0.01, epsilon = 1e-15);
    }

    #[test]
    fn test_1d_first_position_is_sin0_cos0() {
        let pe = positional_encoding_1d(8, 3).unwrap();
        for k in 0..4 {
            assert_eq!(pe[[0, 2 * k]], 0.0);
            assert_eq!(pe[[0, 2 * k + 1]], 1.0);
        }
    }

    #[test]
    fn test_1d_values() {
        let pe = positional_encoding_1d(4, 2).unwrap();
        assert_relative_eq!(pe[[1, 0]], 1.0_f64.sin());
        assert_relative_eq!(pe[[1, 1]], 1.0_f64.cos());
        assert_relative_eq!(pe[[1, 2]], 0.01_f64.sin(), epsilon = 1e-15);
        assert_relative_eq!(pe[[1, 3]], 0.01_f64.cos(), epsilon = 1e-15);
    }

    #[test]
    fn test_1d_odd_rejected() {
        assert!(matches!(
            positional_encoding_1d(3, 2),
            Err(MathError::InvalidArgument(_))
        ));
    }

    #[test]
    fn test_1d_empty_length() {
        let pe = positional_encoding_1d(4, 0).unwrap();
        assert_eq!(pe.dim(), (0, 4));
    }

    #[test]
    fn test_1d_custom_base() {
        let config = MathConfig::default().with_positional_base(100.0);
        let pe = positional_encoding_1d_with_config(4, 2, &config).unwrap();
        // div_term[1] = 100^(-2/4) = 0.1
        assert_relative_eq!(pe[[1, 2]], 0.1_f64.sin(), epsilon = 1e-15);

        let bad = MathConfig::default().with_positional_base(0.5);
        assert!(matches!(
            positional_encoding_1d_with_config(4, 2, &bad),
            Err(MathError::InvalidConfig(_))
        ));
    }

    #[test]
    fn test_2d_shape_and_rejection() {
        assert_eq!(positional_encoding_2d(8, 2, 2).unwrap().dim(), (8, 2, 2));
        assert!(matches!(
            positional_encoding_2d(6, 2, 2),
            Err(MathError::InvalidArgument(_))
        ));
    }

    #[test]
    fn test_2d_layout() {
        let (height, width) = (3, 5);
        let pe = positional_encoding_2d(8, height, width).unwrap();
        let pe_w = positional_encoding_1d(4, width).unwrap();
        let pe_h = positional_encoding_1d(4, height).unwrap();

        for c in 0..4 {
            for y in 0..height {
                for x in 0..width {
                    assert_relative_eq!(pe[[c, y, x]], pe_w[[x, c]]);
                    assert_relative_eq!(pe[[4 + c, y, x]], pe_h[[y, c]]);
                }
            }
        }
    }
}

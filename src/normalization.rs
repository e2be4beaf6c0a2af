//! NaN-aware statistics and mean-std normalization.
//!
//! Missing values are encoded as NaN. Reductions skip them: a lane's mean is
//! taken over its non-NaN entries, and its standard deviation is the square
//! root of the mean of the non-NaN squared deviations from that mean (two
//! passes, population variance). A lane with no valid entries reduces to
//! NaN, never to zero.

use ndarray::{Array, ArrayBase, ArrayD, ArrayView1, Axis, Data, Dimension, RemoveAxis};
use tracing::{debug, warn};

use crate::config::MathConfig;
use crate::error::{MathError, Result};

fn check_axis(axis: Axis, ndim: usize) -> Result<()> {
    if axis.index() >= ndim {
        warn!(axis = axis.index(), ndim, "reduction axis out of bounds");
        return Err(MathError::axis_out_of_bounds(axis.index(), ndim));
    }
    Ok(())
}

/// Mean of the non-NaN values, or NaN if there are none.
fn mean_ignoring_nan<I>(values: I) -> f64
where
    I: IntoIterator<Item = f64>,
{
    let (sum, count) = values
        .into_iter()
        .filter(|v| !v.is_nan())
        .fold((0.0, 0_usize), |(sum, count), v| (sum + v, count + 1));
    if count == 0 {
        f64::NAN
    } else {
        sum / count as f64
    }
}

/// `(mean, std)` of one lane.
fn lane_stats(lane: ArrayView1<'_, f64>) -> (f64, f64) {
    let mean = mean_ignoring_nan(lane.iter().copied());
    let variance = mean_ignoring_nan(lane.iter().map(|&v| (v - mean) * (v - mean)));
    (mean, variance.sqrt())
}

fn reduce_lanes<S, D, F>(
    x: &ArrayBase<S, D>,
    axis: Axis,
    keepdim: bool,
    reduce: F,
) -> Result<ArrayD<f64>>
where
    S: Data<Elem = f64>,
    D: Dimension + RemoveAxis,
    F: FnMut(ArrayView1<'_, f64>) -> f64,
{
    check_axis(axis, x.ndim())?;
    let reduced = x.map_axis(axis, reduce).into_dyn();
    Ok(if keepdim {
        reduced.insert_axis(axis)
    } else {
        reduced
    })
}

/// Mean along `axis`, ignoring NaN entries.
///
/// With `keepdim` the reduced axis is kept with length 1.
///
/// # Errors
///
/// Returns [`MathError::AxisOutOfBounds`] if `axis` is not an axis of `x`.
pub fn nan_mean<S, D>(x: &ArrayBase<S, D>, axis: Axis, keepdim: bool) -> Result<ArrayD<f64>>
where
    S: Data<Elem = f64>,
    D: Dimension + RemoveAxis,
{
    reduce_lanes(x, axis, keepdim, |lane| mean_ignoring_nan(lane.iter().copied()))
}

/// Standard deviation along `axis`, ignoring NaN entries.
///
/// # Errors
///
/// Returns [`MathError::AxisOutOfBounds`] if `axis` is not an axis of `x`.
///
/// # Example
///
/// ```
/// use mocap_math::nan_std;
/// use ndarray::{array, Axis};
///
/// let x = array![[1.0, f64::NAN, 3.0], [2.0, 2.0, f64::NAN]];
/// let s = nan_std(&x, Axis(1), false)?;
/// assert_eq!(s.shape(), &[2]);
/// assert_eq!(s[[0]], 1.0);
/// assert_eq!(s[[1]], 0.0);
/// # Ok::<(), mocap_math::MathError>(())
/// ```
pub fn nan_std<S, D>(x: &ArrayBase<S, D>, axis: Axis, keepdim: bool) -> Result<ArrayD<f64>>
where
    S: Data<Elem = f64>,
    D: Dimension + RemoveAxis,
{
    reduce_lanes(x, axis, keepdim, |lane| lane_stats(lane).1)
}

/// Mean-std normalization along `axis`: `(x - nan_mean) / (nan_std + 1e-5)`.
///
/// The output has the shape of `x`. NaN entries stay NaN. Lanes with zero
/// spread map their valid entries to zero instead of dividing by zero.
///
/// # Errors
///
/// Returns [`MathError::AxisOutOfBounds`] if `axis` is not an axis of `x`.
pub fn ms_norm<S, D>(x: &ArrayBase<S, D>, axis: Axis) -> Result<Array<f64, D>>
where
    S: Data<Elem = f64>,
    D: Dimension,
{
    normalize_lanes(x, axis, MathConfig::default().norm_epsilon)
}

/// [`ms_norm`] with the epsilon taken from `config`.
///
/// # Errors
///
/// [`MathError::InvalidConfig`] for an invalid configuration, otherwise as
/// [`ms_norm`].
pub fn ms_norm_with_config<S, D>(
    x: &ArrayBase<S, D>,
    axis: Axis,
    config: &MathConfig,
) -> Result<Array<f64, D>>
where
    S: Data<Elem = f64>,
    D: Dimension,
{
    config.validate()?;
    normalize_lanes(x, axis, config.norm_epsilon)
}

fn normalize_lanes<S, D>(x: &ArrayBase<S, D>, axis: Axis, eps: f64) -> Result<Array<f64, D>>
where
    S: Data<Elem = f64>,
    D: Dimension,
{
    check_axis(axis, x.ndim())?;

    let mut out = x.to_owned();
    let mut empty_lanes = 0_usize;
    for mut lane in out.lanes_mut(axis) {
        let (mean, std) = lane_stats(lane.view());
        if mean.is_nan() {
            empty_lanes += 1;
        }
        let denom = std + eps;
        lane.mapv_inplace(|v| (v - mean) / denom);
    }
    if empty_lanes > 0 {
        debug!(empty_lanes, axis = axis.index(), "ms_norm found lanes without valid values");
    }
    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use ndarray::{array, Array1, Array3};

    const NAN: f64 = f64::NAN;

    #[test]
    fn test_nan_mean_skips_nan() {
        let x = array![1.0, NAN, 3.0];
        let m = nan_mean(&x, Axis(0), false).unwrap();
        assert_eq!(m.ndim(), 0);
        assert_eq!(m.first().copied(), Some(2.0));
    }

    #[test]
    fn test_nan_std_two_pass() {
        let x = array![2.0, 4.0, NAN, 4.0, 4.0, 5.0, 5.0, 7.0, 9.0];
        let s = nan_std(&x, Axis(0), false).unwrap();
        assert_relative_eq!(s.first().copied().unwrap(), 2.0, epsilon = 1e-12);
    }

    #[test]
    fn test_all_nan_lane_is_nan() {
        let x = array![[NAN, NAN], [1.0, 3.0]];
        let s = nan_std(&x, Axis(1), false).unwrap();
        assert!(s[[0]].is_nan());
        assert_relative_eq!(s[[1]], 1.0);
    }

    #[test]
    fn test_keepdim() {
        let x = Array3::<f64>::ones((2, 3, 4));
        assert_eq!(nan_std(&x, Axis(1), true).unwrap().shape(), &[2, 1, 4]);
        assert_eq!(nan_std(&x, Axis(1), false).unwrap().shape(), &[2, 4]);
        assert_eq!(nan_mean(&x, Axis(2), true).unwrap().shape(), &[2, 3, 1]);
    }

    #[test]
    fn test_axis_out_of_bounds() {
        let x = array![[1.0, 2.0]];
        assert_eq!(
            nan_std(&x, Axis(2), false),
            Err(MathError::axis_out_of_bounds(2, 2))
        );
        assert!(ms_norm(&x, Axis(5)).is_err());
    }

    #[test]
    fn test_ms_norm_columns() {
        let x = array![[1.0, 10.0], [3.0, 10.0]];
        let y = ms_norm(&x, Axis(0)).unwrap();
        assert_eq!(y.dim(), (2, 2));
        // Column 0: mean 2, std 1.
        assert_relative_eq!(y[[0, 0]], -1.0 / (1.0 + 1e-5), epsilon = 1e-12);
        assert_relative_eq!(y[[1, 0]], 1.0 / (1.0 + 1e-5), epsilon = 1e-12);
        // Column 1: zero spread.
        assert_eq!(y[[0, 1]], 0.0);
        assert_eq!(y[[1, 1]], 0.0);
    }

    #[test]
    fn test_ms_norm_rows_non_square() {
        let x = array![[0.0, 2.0, 4.0], [1.0, 1.0, 1.0]];
        let y = ms_norm(&x, Axis(1)).unwrap();
        let std = (8.0_f64 / 3.0).sqrt();
        assert_relative_eq!(y[[0, 2]], 2.0 / (std + 1e-5), epsilon = 1e-12);
        assert_eq!(y.row(1).to_vec(), vec![0.0, 0.0, 0.0]);
    }

    #[test]
    fn test_ms_norm_keeps_nan() {
        let x = Array1::from(vec![2.0, NAN, 2.0]);
        let y = ms_norm(&x, Axis(0)).unwrap();
        assert_eq!(y[0], 0.0);
        assert!(y[1].is_nan());
        assert_eq!(y[2], 0.0);
    }

    #[test]
    fn test_ms_norm_custom_epsilon() {
        let x = array![0.0, 2.0];
        let config = MathConfig::default().with_norm_epsilon(1.0);
        let y = ms_norm_with_config(&x, Axis(0), &config).unwrap();
        assert_relative_eq!(y[0], -0.5);
        assert_relative_eq!(y[1], 0.5);
    }
}

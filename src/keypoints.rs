//! Bounding boxes around 2D keypoint sets.

use ndarray::ArrayView2;
use tracing::warn;

use crate::error::{MathError, Result};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Axis-aligned box in image coordinates.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct BoundingBox {
    /// Minimum `u` (column) coordinate.
    pub u: f64,
    /// Minimum `v` (row) coordinate.
    pub v: f64,
    /// Extent along `u`.
    pub width: f64,
    /// Extent along `v`.
    pub height: f64,
}

impl BoundingBox {
    /// Components as `[u, v, width, height]`.
    #[must_use]
    pub const fn to_array(&self) -> [f64; 4] {
        [self.u, self.v, self.width, self.height]
    }

    /// Whether `(u, v)` lies inside the box (edges included).
    #[must_use]
    pub fn contains(&self, u: f64, v: f64) -> bool {
        u >= self.u && u <= self.u + self.width && v >= self.v && v <= self.v + self.height
    }
}

/// Tightest box around the keypoints in `keypoints`.
///
/// Rows are keypoints; the first two columns are read as `(u, v)` and any
/// further columns (confidence, depth, ...) are ignored. Rows with NaN in `u`
/// or `v` are skipped as missing.
///
/// # Errors
///
/// - [`MathError::ShapeMismatch`] if there are fewer than 2 columns.
/// - [`MathError::InvalidInput`] if no row has both coordinates.
pub fn bounding_box(keypoints: ArrayView2<'_, f64>) -> Result<BoundingBox> {
    if keypoints.ncols() < 2 {
        return Err(MathError::shape_mismatch(2, keypoints.ncols()));
    }

    let mut min = [f64::INFINITY; 2];
    let mut max = [f64::NEG_INFINITY; 2];
    let mut valid = 0_usize;

    for row in keypoints.rows() {
        let (u, v) = (row[0], row[1]);
        if u.is_nan() || v.is_nan() {
            continue;
        }
        min = [min[0].min(u), min[1].min(v)];
        max = [max[0].max(u), max[1].max(v)];
        valid += 1;
    }

    if valid == 0 {
        warn!(rows = keypoints.nrows(), "no visible keypoints for bounding box");
        return Err(MathError::invalid_input("all keypoints are missing"));
    }

    Ok(BoundingBox {
        u: min[0],
        v: min[1],
        width: max[0] - min[0],
        height: max[1] - min[1],
    })
}

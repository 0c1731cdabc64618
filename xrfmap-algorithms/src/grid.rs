//! Grid sizing, reshaping and rotation.
//!
//! The fast axis always spans the columns of the reshaped grid, so pixel `i`
//! lands at `(i / cols, i % cols)`. When the scan was collected column-first
//! the grid is then rotated one quarter turn counter-clockwise to restore the
//! conventional viewing orientation; the rotation direction is fixed for
//! every channel of a run.

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use ndarray::{s, Array2, Array3, ArrayView2, Axis};
use xrfmap_core::{Error, Result};

/// Final reconstructed grid extent.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct GridShape {
    /// Slow-axis extent after any cut.
    pub rows: usize,
    /// Fast-axis extent.
    pub cols: usize,
}

impl GridShape {
    /// Number of pixels the grid holds.
    #[must_use]
    pub fn len(&self) -> usize {
        self.rows * self.cols
    }

    /// True when the grid holds no pixels.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Computes the final grid extent from the resolved axis steps and the
/// number of valid pixels.
///
/// A truncated acquisition is cut to whole trailing rows along the slow axis:
/// the column count never changes, and a partial last row is dropped together
/// with any beam-dump pixels.
#[must_use]
pub fn compute_grid(fast_steps: usize, slow_steps: usize, valid_count: usize) -> GridShape {
    if fast_steps == 0 {
        return GridShape { rows: 0, cols: 0 };
    }
    if valid_count >= fast_steps * slow_steps {
        GridShape {
            rows: slow_steps,
            cols: fast_steps,
        }
    } else {
        GridShape {
            rows: valid_count / fast_steps,
            cols: fast_steps,
        }
    }
}

/// Reshapes one scalar channel into the final grid.
///
/// The sequence is truncated to the first `rows * cols` values and laid out
/// row-major, preserving acquisition order.
///
/// # Errors
/// Returns [`Error::MismatchedLength`] if the channel is shorter than the
/// grid.
pub fn reshape_scalar(
    values: &[f64],
    name: &str,
    shape: GridShape,
    rotate: bool,
) -> Result<Array2<f64>> {
    let total = shape.len();
    if values.len() < total {
        return Err(Error::MismatchedLength {
            name: name.to_string(),
            expected: total,
            actual: values.len(),
        });
    }

    let grid = Array2::from_shape_vec((shape.rows, shape.cols), values[..total].to_vec())
        .map_err(|_| Error::MismatchedLength {
            name: name.to_string(),
            expected: total,
            actual: values.len(),
        })?;

    Ok(if rotate { rot90_ccw2(grid) } else { grid })
}

/// Reshapes one vector channel into the final grid, keeping the per-pixel
/// record as the trailing dimension.
///
/// # Errors
/// Returns [`Error::MismatchedLength`] if fewer records than grid pixels are
/// present.
pub fn reshape_vector(
    records: ArrayView2<'_, f64>,
    name: &str,
    shape: GridShape,
    rotate: bool,
) -> Result<Array3<f64>> {
    let total = shape.len();
    if records.nrows() < total {
        return Err(Error::MismatchedLength {
            name: name.to_string(),
            expected: total,
            actual: records.nrows(),
        });
    }

    let record_len = records.ncols();
    let grid = records
        .slice(s![..total, ..])
        .to_owned()
        .into_shape_with_order((shape.rows, shape.cols, record_len))
        .map_err(|_| Error::MismatchedLength {
            name: name.to_string(),
            expected: total,
            actual: records.nrows(),
        })?;

    Ok(if rotate { rot90_ccw3(grid) } else { grid })
}

/// Quarter-turn counter-clockwise rotation: `out[i, j] = in[j, cols - 1 - i]`.
fn rot90_ccw2(grid: Array2<f64>) -> Array2<f64> {
    let mut rotated = grid;
    rotated.swap_axes(0, 1);
    rotated.invert_axis(Axis(0));
    rotated
}

/// Same rotation on the two leading axes; the record axis is untouched.
fn rot90_ccw3(grid: Array3<f64>) -> Array3<f64> {
    let mut rotated = grid;
    rotated.swap_axes(0, 1);
    rotated.invert_axis(Axis(0));
    rotated
}

//! Scan-direction resolution.
//!
//! A raster map is normally collected row-first: the horizontal stage (axis
//! `b`) advances on every pixel while the vertical stage (axis `a`) advances
//! once per row. Some acquisitions run column-first instead; their grids must
//! be rotated after reshaping so downstream viewers see the expected
//! orientation.

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use xrfmap_core::{Error, Result};

/// Which motor advances between consecutive pixels.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum ScanOrder {
    /// Axis `b` advances every pixel; the raster is already row-first.
    RowFirst,
    /// Axis `a` advances every pixel; the raster was collected column-first
    /// and the final grids need a quarter-turn rotation.
    ColumnFirst,
}

impl ScanOrder {
    /// True when the reshaped grids must be rotated into canonical
    /// orientation.
    #[must_use]
    pub fn needs_rotation(self) -> bool {
        matches!(self, ScanOrder::ColumnFirst)
    }

    /// Picks `(fast, slow)` out of the two axis extents.
    #[must_use]
    pub fn fast_slow(self, shape_a: usize, shape_b: usize) -> (usize, usize) {
        match self {
            ScanOrder::RowFirst => (shape_b, shape_a),
            ScanOrder::ColumnFirst => (shape_a, shape_b),
        }
    }
}

/// Decides which axis moved first by comparing the first two pixels.
///
/// Exactly one axis must differ between pixel 0 and pixel 1; the other must
/// hold still. Raw values are compared exactly: a motor that is commanded to
/// hold reports an identical readback.
///
/// # Errors
/// Returns [`Error::AmbiguousOrientation`] when both axes move (a diagonal
/// line scan), neither moves (static positioners), or fewer than two pixels
/// exist.
pub fn resolve(axis_a: &[f64], axis_b: &[f64]) -> Result<ScanOrder> {
    if axis_a.len() < 2 || axis_b.len() < 2 {
        return Err(Error::AmbiguousOrientation(
            "fewer than two pixels; this does not look like a map".to_string(),
        ));
    }

    let a_moves = axis_a[1] != axis_a[0];
    let b_moves = axis_b[1] != axis_b[0];
    match (a_moves, b_moves) {
        (false, true) => Ok(ScanOrder::RowFirst),
        (true, false) => Ok(ScanOrder::ColumnFirst),
        (true, true) => Err(Error::AmbiguousOrientation(
            "both axes moved between the first two pixels; is this a diagonal line scan?"
                .to_string(),
        )),
        (false, false) => Err(Error::AmbiguousOrientation(
            "neither axis moved between the first two pixels".to_string(),
        )),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_row_first_scan() {
        let axis_a = [5.0, 5.0, 5.0, 6.0, 6.0, 6.0];
        let axis_b = [0.0, 1.0, 2.0, 0.0, 1.0, 2.0];
        let order = resolve(&axis_a, &axis_b).unwrap();
        assert_eq!(order, ScanOrder::RowFirst);
        assert!(!order.needs_rotation());
        assert_eq!(order.fast_slow(2, 3), (3, 2));
    }

    #[test]
    fn test_column_first_scan() {
        let axis_a = [5.0, 6.0, 7.0, 5.0, 6.0, 7.0];
        let axis_b = [0.0, 0.0, 0.0, 1.0, 1.0, 1.0];
        let order = resolve(&axis_a, &axis_b).unwrap();
        assert_eq!(order, ScanOrder::ColumnFirst);
        assert!(order.needs_rotation());
        assert_eq!(order.fast_slow(3, 2), (3, 2));
    }

    #[test]
    fn test_diagonal_scan_is_ambiguous() {
        let err = resolve(&[0.0, 1.0], &[0.0, 1.0]).unwrap_err();
        assert!(matches!(err, Error::AmbiguousOrientation(_)));
    }

    #[test]
    fn test_static_positioners_are_ambiguous() {
        let err = resolve(&[4.0, 4.0], &[2.0, 2.0]).unwrap_err();
        assert!(matches!(err, Error::AmbiguousOrientation(_)));
    }

    #[test]
    fn test_single_pixel_is_ambiguous() {
        let err = resolve(&[4.0], &[2.0]).unwrap_err();
        assert!(matches!(err, Error::AmbiguousOrientation(_)));
    }
}

//! Axis step inference from raw motor positions.

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use xrfmap_core::{Error, Result};

/// Step size and discrete extent inferred for one motor axis.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct AxisProfile {
    /// Physical step between adjacent grid lines; `None` for a degenerate
    /// axis (fewer than two distinct positions).
    pub step: Option<f64>,
    /// Number of discrete grid positions along the axis.
    pub shape: usize,
}

impl AxisProfile {
    /// True when the axis holds a single position (or none at all).
    #[must_use]
    pub fn is_degenerate(&self) -> bool {
        self.step.is_none()
    }
}

/// Infers the discrete extent of one axis from its raw position sequence.
///
/// Positions are rounded to `precision` decimal digits before the distinct
/// values are collected; the step is the smallest gap between consecutive
/// distinct values, so duplicate and noisy readings collapse onto the same
/// grid line. Each raw position then maps to the grid index
/// `round((value - min) / step)` and the shape is the largest index plus one.
///
/// # Errors
/// Returns [`Error::DegenerateAxis`] if more than one distinct position
/// exists but the step still resolves to a non-positive or non-finite value.
pub fn count_steps(positions: &[f64], precision: u32) -> Result<AxisProfile> {
    let scale = 10f64.powi(i32::try_from(precision).unwrap_or(i32::MAX));
    let mut distinct: Vec<f64> = positions.iter().map(|v| (v * scale).round()).collect();
    distinct.sort_by(f64::total_cmp);
    distinct.dedup();

    if distinct.len() < 2 {
        return Ok(AxisProfile {
            step: None,
            shape: distinct.len(),
        });
    }

    let min_gap = distinct
        .windows(2)
        .map(|pair| pair[1] - pair[0])
        .fold(f64::INFINITY, f64::min);
    let step = min_gap / scale;
    if !step.is_finite() || step <= 0.0 {
        return Err(Error::DegenerateAxis {
            distinct: distinct.len(),
        });
    }

    let min = positions.iter().copied().fold(f64::INFINITY, f64::min);
    let mut max_index = 0usize;
    for &value in positions {
        let index = ((value - min) / step).round().max(0.0);
        #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
        let index = index as usize;
        max_index = max_index.max(index);
    }

    Ok(AxisProfile {
        step: Some(step),
        shape: max_index + 1,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_regular_raster_axis() {
        // Slow axis of a 2 x 3 raster: repeats each value three times.
        let positions = [5.0, 5.0, 5.0, 6.0, 6.0, 6.0];
        let profile = count_steps(&positions, 5).unwrap();
        assert_relative_eq!(profile.step.unwrap(), 1.0);
        assert_eq!(profile.shape, 2);
    }

    #[test]
    fn test_fast_axis_with_repeats() {
        let positions = [0.0, 0.5, 1.0, 0.0, 0.5, 1.0];
        let profile = count_steps(&positions, 5).unwrap();
        assert_relative_eq!(profile.step.unwrap(), 0.5);
        assert_eq!(profile.shape, 3);
    }

    #[test]
    fn test_encoder_noise_collapses_onto_grid_lines() {
        // Readback jitter well below the rounding precision.
        let positions = [10.000_001, 10.099_999, 10.200_002, 10.300_001];
        let profile = count_steps(&positions, 3).unwrap();
        assert_relative_eq!(profile.step.unwrap(), 0.1, max_relative = 1e-9);
        assert_eq!(profile.shape, 4);
    }

    #[test]
    fn test_degenerate_axis() {
        let profile = count_steps(&[7.5, 7.5, 7.5], 5).unwrap();
        assert!(profile.is_degenerate());
        assert_eq!(profile.shape, 1);
    }

    #[test]
    fn test_empty_axis() {
        let profile = count_steps(&[], 5).unwrap();
        assert!(profile.is_degenerate());
        assert_eq!(profile.shape, 0);
    }

    #[test]
    fn test_precision_conflict_is_an_error() {
        // Positions distinct at full precision but with a scale that
        // overflows to infinity; the step must never silently reach zero.
        let err = count_steps(&[0.0, 1.0], 400).unwrap_err();
        assert!(matches!(err, Error::DegenerateAxis { distinct: 2 }));
    }

    #[test]
    fn test_unordered_positions() {
        // Snake-ish ordering still yields the same grid extent.
        let positions = [2.0, 1.0, 0.0, 0.0, 1.0, 2.0];
        let profile = count_steps(&positions, 5).unwrap();
        assert_eq!(profile.shape, 3);
    }
}

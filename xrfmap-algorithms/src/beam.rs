//! Beam-monitor integrity checking.

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use xrfmap_core::{Error, Result};

/// Outcome of the trailing beam-dump scan.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct BeamCheck {
    /// Pixels acquired with beam present, counted from the start.
    pub valid_count: usize,
    /// Trailing pixels with the monitor below threshold.
    pub trailing_low: usize,
    /// True when trailing pixels must be discarded for beam loss.
    pub beam_lost: bool,
}

/// Checks the beam monitor for a trailing beam dump.
///
/// Only a contiguous run of low readings at the end of the acquisition counts
/// as a loss; an isolated low pixel in the interior is left alone. This keeps
/// the set of dropped pixels predictable for downstream tools.
///
/// # Errors
/// Returns [`Error::NoValidPixels`] when no pixel survives the check.
pub fn check(monitor: &[f64], threshold: f64) -> Result<BeamCheck> {
    if monitor.is_empty() {
        return Err(Error::NoValidPixels);
    }

    if monitor.iter().all(|&value| value >= threshold) {
        return Ok(BeamCheck {
            valid_count: monitor.len(),
            trailing_low: 0,
            beam_lost: false,
        });
    }

    let trailing_low = monitor
        .iter()
        .rev()
        .take_while(|&&value| value < threshold || value.is_nan())
        .count();
    let valid_count = monitor.len() - trailing_low;
    if valid_count == 0 {
        return Err(Error::NoValidPixels);
    }

    Ok(BeamCheck {
        valid_count,
        trailing_low,
        beam_lost: trailing_low > 0,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_no_beam_loss() {
        let monitor = [1.0; 8];
        let check = check(&monitor, 0.5).unwrap();
        assert_eq!(check.valid_count, 8);
        assert_eq!(check.trailing_low, 0);
        assert!(!check.beam_lost);
    }

    #[test]
    fn test_trailing_beam_dump() {
        let monitor = [1.0, 1.0, 1.0, 1.0, 1.0, 1.0, 1.0, 0.1, 0.0, 0.0, 0.0, 0.0];
        let check = check(&monitor, 0.5).unwrap();
        assert_eq!(check.valid_count, 7);
        assert_eq!(check.trailing_low, 5);
        assert!(check.beam_lost);
    }

    #[test]
    fn test_interior_dip_is_ignored() {
        // Trailing-only policy: a dip in the middle of the scan is kept.
        let monitor = [1.0, 1.0, 0.0, 1.0, 1.0, 1.0];
        let check = check(&monitor, 0.5).unwrap();
        assert_eq!(check.valid_count, 6);
        assert!(!check.beam_lost);
    }

    #[test]
    fn test_threshold_is_inclusive() {
        let monitor = [0.5, 0.5, 0.5];
        let check = check(&monitor, 0.5).unwrap();
        assert_eq!(check.valid_count, 3);
        assert!(!check.beam_lost);
    }

    #[test]
    fn test_nan_counts_as_no_beam() {
        let monitor = [1.0, 1.0, f64::NAN];
        let check = check(&monitor, 0.5).unwrap();
        assert_eq!(check.valid_count, 2);
        assert!(check.beam_lost);
    }

    #[test]
    fn test_all_low_is_an_error() {
        let err = check(&[0.0, 0.0, 0.0], 0.5).unwrap_err();
        assert!(matches!(err, Error::NoValidPixels));
    }

    #[test]
    fn test_empty_monitor_is_an_error() {
        let err = check(&[], 0.5).unwrap_err();
        assert!(matches!(err, Error::NoValidPixels));
    }
}

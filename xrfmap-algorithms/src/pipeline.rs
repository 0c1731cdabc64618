//! Per-run reconstruction pipeline.

use std::collections::BTreeMap;

use ndarray::{Array2, Array3};

use xrfmap_core::{CutReason, Provenance, ReconstructionConfig, Result, RunData};

use crate::grid::{self, GridShape};
use crate::{axis, beam, orientation};

/// A fully reconstructed run: every channel reshaped to one grid.
#[derive(Debug, Clone)]
pub struct ReconstructedMap {
    /// Verbatim name of the source run group.
    pub run: String,
    /// Final grid extent (after any rotation).
    pub shape: GridShape,
    /// What the reconstruction did, for the output's free-text note.
    pub provenance: Provenance,
    /// Reshaped scalar channels, in name order.
    pub scalars: BTreeMap<String, Array2<f64>>,
    /// Reshaped vector channels, in name order.
    pub vectors: BTreeMap<String, Array3<f64>>,
    /// Positioner snapshots, copied verbatim.
    pub positioners: BTreeMap<String, Vec<f64>>,
}

/// Reconstructs one run into canonical-orientation grids.
///
/// The steps, in order: infer each axis's discrete extent, resolve the scan
/// direction from the first two pixels, trim trailing beam-dump pixels via
/// the monitor channel, size the grid, and reshape every channel with the
/// same extent and rotation decision so channels stay spatially aligned.
///
/// The input run is never mutated; grids are freshly allocated.
///
/// # Errors
/// Returns the first failure among: a missing required channel, a degenerate
/// axis step, an undecidable scan direction, a monitor that leaves no valid
/// pixels, or a channel shorter than the final grid.
pub fn reconstruct_run(run: &RunData, config: &ReconstructionConfig) -> Result<ReconstructedMap> {
    let axis_a = run.require_scalar(&config.axis_a)?;
    let axis_b = run.require_scalar(&config.axis_b)?;
    let monitor = run.require_scalar(&config.beam_monitor)?;

    let profile_a = axis::count_steps(axis_a, config.position_precision)?;
    let profile_b = axis::count_steps(axis_b, config.position_precision)?;
    let order = orientation::resolve(axis_a, axis_b)?;
    let (fast_steps, slow_steps) = order.fast_slow(profile_a.shape, profile_b.shape);

    let beam = beam::check(monitor, config.beam_threshold)?;
    let shape = grid::compute_grid(fast_steps, slow_steps, beam.valid_count);
    let rotate = order.needs_rotation();

    let mut scalars = BTreeMap::new();
    for (name, values) in run.scalars() {
        let reshaped = grid::reshape_scalar(values, name, shape, rotate)?;
        scalars.insert(name.to_string(), reshaped);
    }

    let mut vectors = BTreeMap::new();
    for (name, records) in run.vectors() {
        let reshaped = grid::reshape_vector(records.view(), name, shape, rotate)?;
        vectors.insert(name.to_string(), reshaped);
    }

    let positioners = run
        .positioners()
        .map(|(name, values)| (name.to_string(), values.to_vec()))
        .collect();

    let nominal = fast_steps * slow_steps;
    let cut = if shape.len() < nominal {
        Some(if beam.beam_lost {
            CutReason::BeamDump
        } else {
            CutReason::IncompleteAcquisition
        })
    } else {
        None
    };

    let provenance = Provenance {
        run: run.name().raw().to_string(),
        nominal_rows: slow_steps,
        nominal_cols: fast_steps,
        rows: shape.rows,
        cols: shape.cols,
        pixel_count: run.pixel_count(),
        valid_pixels: beam.valid_count,
        rotated: rotate,
        cut,
    };

    // The stored extent reflects the grids as written, i.e. after rotation.
    let final_shape = if rotate {
        GridShape {
            rows: shape.cols,
            cols: shape.rows,
        }
    } else {
        shape
    };

    Ok(ReconstructedMap {
        run: run.name().raw().to_string(),
        shape: final_shape,
        provenance,
        scalars,
        vectors,
        positioners,
    })
}

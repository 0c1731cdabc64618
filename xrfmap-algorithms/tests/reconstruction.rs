//! End-to-end properties of the reconstruction engine.
#![allow(
    clippy::cast_precision_loss,
    clippy::cast_possible_truncation,
    clippy::cast_sign_loss
)]

use ndarray::Array2;
use xrfmap_algorithms::{reconstruct_run, GridShape};
use xrfmap_core::{ReconstructionConfig, RunData};

fn raster_run(rows: usize, cols: usize, column_first: bool) -> RunData {
    let pixels = rows * cols;
    let mut axis_a = Vec::with_capacity(pixels);
    let mut axis_b = Vec::with_capacity(pixels);
    for slow in 0..rows {
        for fast in 0..cols {
            if column_first {
                axis_a.push(fast as f64);
                axis_b.push(slow as f64);
            } else {
                axis_a.push(slow as f64);
                axis_b.push(fast as f64);
            }
        }
    }

    let mut run = RunData::new("Run20240102 120000 sample");
    run.insert_scalar("X", axis_a).unwrap();
    run.insert_scalar("Y", axis_b).unwrap();
    run.insert_scalar("BMS-T-Average", vec![1.0; pixels]).unwrap();
    run.insert_scalar("counts", (0..pixels).map(|i| i as f64).collect())
        .unwrap();
    run
}

fn config() -> ReconstructionConfig {
    ReconstructionConfig::default().with_beam_threshold(0.5)
}

#[test]
fn no_loss_grid_matches_nominal_extent() {
    let run = raster_run(4, 5, false);
    let map = reconstruct_run(&run, &config()).unwrap();
    assert_eq!(map.shape, GridShape { rows: 4, cols: 5 });
    assert_eq!(map.shape.len(), run.pixel_count());
}

#[test]
fn row_first_reconstruction_is_a_plain_reshape() {
    // Idempotence: a run already in canonical order is not rotated and the
    // grid equals a direct truncate-and-reshape of the raw sequence.
    let run = raster_run(3, 4, false);
    let map = reconstruct_run(&run, &config()).unwrap();
    assert!(!map.provenance.rotated);

    let expected =
        Array2::from_shape_vec((3, 4), (0..12).map(|i| i as f64).collect()).unwrap();
    assert_eq!(map.scalars["counts"], expected);
}

#[test]
fn flattening_reproduces_acquisition_order() {
    // Round-trip: row-major flattening of an unrotated grid yields the first
    // rows*cols pixels in their original order.
    let run = raster_run(4, 3, false);
    let map = reconstruct_run(&run, &config()).unwrap();
    let flat: Vec<f64> = map.scalars["counts"].iter().copied().collect();
    let expected: Vec<f64> = (0..12).map(|i| i as f64).collect();
    assert_eq!(flat, expected);
}

#[test]
fn column_first_grid_is_rotated_once() {
    let run = raster_run(3, 4, true);
    let map = reconstruct_run(&run, &config()).unwrap();
    assert!(map.provenance.rotated);
    assert_eq!(map.shape, GridShape { rows: 4, cols: 3 });

    // Quarter-turn counter-clockwise of the (3, 4) acquisition grid:
    // out[i, j] = in[j, 3 - i] with in[r, c] = r * 4 + c.
    let counts = &map.scalars["counts"];
    for i in 0..4 {
        for j in 0..3 {
            assert_eq!(counts[[i, j]], (j * 4 + (3 - i)) as f64);
        }
    }
}

#[test]
fn truncated_run_drops_partial_row_and_dump_pixels() {
    let mut run = RunData::new("Run20240102 120000 truncated");
    let source = raster_run(4, 3, false);
    for (name, values) in source.scalars() {
        let values = if name == "BMS-T-Average" {
            vec![1.0, 1.0, 1.0, 1.0, 1.0, 1.0, 1.0, 0.0, 0.0, 0.0, 0.0, 0.0]
        } else {
            values.to_vec()
        };
        run.insert_scalar(name, values).unwrap();
    }

    let map = reconstruct_run(&run, &config()).unwrap();
    assert_eq!(map.shape, GridShape { rows: 2, cols: 3 });
    let counts = &map.scalars["counts"];
    for dropped in [6.0, 7.0, 8.0, 9.0, 10.0, 11.0] {
        assert!(counts.iter().all(|&v| (v - dropped).abs() > f64::EPSILON));
    }
}

#[test]
fn every_channel_shares_extent_and_rotation() {
    let mut run = raster_run(3, 4, true);
    let records = Array2::from_shape_fn((12, 6), |(pixel, bin)| (pixel * 100 + bin) as f64);
    run.insert_vector("SDD1-Spectrum", records).unwrap();

    let map = reconstruct_run(&run, &config()).unwrap();
    let counts = &map.scalars["counts"];
    let spectra = &map.vectors["SDD1-Spectrum"];
    assert_eq!(spectra.dim(), (4, 3, 6));

    // Cross-channel alignment: the record at (r, c) belongs to the same
    // acquisition-order pixel as the scalar at (r, c).
    for ((r, c), &value) in counts.indexed_iter() {
        let pixel = value as usize;
        for bin in 0..6 {
            assert_eq!(spectra[[r, c, bin]], (pixel * 100 + bin) as f64);
        }
    }
}

//! xrfmap-algorithms: The map reconstruction engine.
//!
//! This crate turns the 1D, time-ordered pixel stream of a raster scan back
//! into a 2D spatial map: axis-step inference, beam-dump detection,
//! scan-direction resolution, and the crop/reshape/rotate transform applied
//! uniformly to every channel. [`pipeline::reconstruct_run`] combines the
//! pieces for one run.
//!

pub mod axis;
pub mod beam;
pub mod grid;
pub mod orientation;
pub mod pipeline;

pub use axis::AxisProfile;
pub use beam::BeamCheck;
pub use grid::GridShape;
pub use orientation::ScanOrder;
pub use pipeline::{reconstruct_run, ReconstructedMap};

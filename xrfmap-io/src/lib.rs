//! xrfmap-io: HDF5 I/O for XRF scan runs and reconstructed maps.
//!
//! This crate owns the container boundary: reading raw runs out of beamline
//! acquisition files, writing reconstructed maps to new files (never
//! overwriting an existing one), and the per-file orchestration that keeps
//! one failing run from aborting its siblings.
//!

mod error;
pub mod layout;
pub mod process;
mod reader;
mod writer;

pub use error::{Error, Result};
pub use layout::Layout;
pub use process::{reshape_file, FileReport, RunOutcome, RunReport};
pub use reader::RunFile;
pub use writer::{write_map, WriteOptions};

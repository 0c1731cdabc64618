//! xrfmap-core: Core types for XRF map reconstruction.
//!
//! This crate provides the foundational types shared by the reconstruction
//! engine and the I/O layer: the run data model, explicit reconstruction
//! parameters, provenance records, and the error taxonomy.
//!

pub mod config;
pub mod error;
pub mod provenance;
pub mod run;

pub use config::ReconstructionConfig;
pub use error::{Error, Result};
pub use provenance::{CutReason, Provenance};
pub use run::{RunData, RunName, RunTimestamp};

//! I/O error types.

use std::path::PathBuf;

use thiserror::Error;

/// Result type for I/O operations.
pub type Result<T> = std::result::Result<T, Error>;

/// I/O error types.
#[derive(Error, Debug)]
pub enum Error {
    /// File I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// HDF5 library error.
    #[error("HDF5 error: {0}")]
    Hdf5(#[from] hdf5::Error),

    /// Invalid file format.
    #[error("invalid file format: {0}")]
    InvalidFormat(String),

    /// The output artifact already exists; it is never overwritten.
    #[error("output file already exists: {}", .0.display())]
    OutputExists(PathBuf),

    /// Core library error.
    #[error("core error: {0}")]
    Core(#[from] xrfmap_core::Error),
}

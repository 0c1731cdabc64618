//! Error types for xrfmap-core.

use thiserror::Error;

/// Result type alias for reconstruction operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Core error types for map reconstruction.
#[derive(Error, Debug)]
pub enum Error {
    /// An axis step resolved to zero despite multiple distinct positions.
    #[error("degenerate axis: {distinct} distinct positions but no resolvable step")]
    DegenerateAxis {
        /// Number of distinct rounded positions on the axis.
        distinct: usize,
    },

    /// The scan direction cannot be decided from the first two pixels.
    #[error("ambiguous scan orientation: {0}")]
    AmbiguousOrientation(String),

    /// The beam-monitor check leaves zero usable pixels.
    #[error("no valid pixels left after beam-monitor check")]
    NoValidPixels,

    /// A required channel is absent from the run.
    #[error("required channel not found: {name}")]
    MissingChannel {
        /// Name of the missing channel.
        name: String,
    },

    /// A channel's length disagrees with the run's pixel count or the grid.
    #[error("channel {name} holds {actual} records, expected {expected}")]
    MismatchedLength {
        /// Name of the offending channel.
        name: String,
        /// Required number of per-pixel records.
        expected: usize,
        /// Number of records actually present.
        actual: usize,
    },
}

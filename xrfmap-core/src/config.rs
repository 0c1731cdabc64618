//! Reconstruction configuration.

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Explicit parameters for map reconstruction.
///
/// Every tolerance lives here rather than in module-level constants, so each
/// call site states the precision and beam threshold it runs with.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct ReconstructionConfig {
    /// Decimal digits kept when rounding motor positions for step inference.
    pub position_precision: u32,
    /// Beam-monitor values below this count as "no beam".
    pub beam_threshold: f64,
    /// Name of the first motor axis channel (vertical stage).
    pub axis_a: String,
    /// Name of the second motor axis channel (horizontal stage).
    pub axis_b: String,
    /// Name of the incident-beam monitor channel.
    pub beam_monitor: String,
}

impl Default for ReconstructionConfig {
    fn default() -> Self {
        Self {
            position_precision: 5,
            beam_threshold: 1e-4,
            axis_a: "X".to_string(),
            axis_b: "Y".to_string(),
            beam_monitor: "BMS-T-Average".to_string(),
        }
    }
}

impl ReconstructionConfig {
    /// Creates a configuration with default values.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the position rounding precision (decimal digits).
    #[must_use]
    pub fn with_position_precision(mut self, digits: u32) -> Self {
        self.position_precision = digits;
        self
    }

    /// Sets the beam-monitor threshold.
    #[must_use]
    pub fn with_beam_threshold(mut self, threshold: f64) -> Self {
        self.beam_threshold = threshold;
        self
    }

    /// Sets the two motor axis channel names.
    #[must_use]
    pub fn with_axes(mut self, axis_a: impl Into<String>, axis_b: impl Into<String>) -> Self {
        self.axis_a = axis_a.into();
        self.axis_b = axis_b.into();
        self
    }

    /// Sets the beam-monitor channel name.
    #[must_use]
    pub fn with_beam_monitor(mut self, name: impl Into<String>) -> Self {
        self.beam_monitor = name.into();
        self
    }
}

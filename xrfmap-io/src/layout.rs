//! Dataset layout inside input and output artifacts.

/// Group paths used when reading runs and writing maps.
///
/// Defaults match the beamline acquisition layout: per-pixel channels live
/// under `Measurement`, reconstructed output groups vector ("detector")
/// channels apart from scalar ("motor position") channels.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Layout {
    /// Scalar channels (one value per pixel) inside a run group.
    pub scalar_group: String,
    /// Vector channels (one record per pixel) inside a run group.
    pub vector_group: String,
    /// Positioner snapshot values inside a run group.
    pub positioner_group: String,
    /// Output group for reshaped vector channels.
    pub out_vector_group: String,
    /// Output group for reshaped scalar channels.
    pub out_scalar_group: String,
    /// Output group for the positioner snapshot passthrough.
    pub out_positioner_group: String,
    /// Root-level free-text provenance dataset in the output.
    pub comments_dataset: String,
}

impl Default for Layout {
    fn default() -> Self {
        Self {
            scalar_group: "Measurement/TransientScalarData".to_string(),
            vector_group: "Measurement/TransientVectorData".to_string(),
            positioner_group: "Measurement/Positioners".to_string(),
            out_vector_group: "Detector_data".to_string(),
            out_scalar_group: "Motor_positions".to_string(),
            out_positioner_group: "Starting_positions".to_string(),
            comments_dataset: "Comments".to_string(),
        }
    }
}

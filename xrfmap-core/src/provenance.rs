//! Provenance records for reconstructed maps.
//!
//! Every output artifact carries a free-text note stating what the
//! reconstruction did to the raw stream: whether pixels were cut and why,
//! whether the grid was rotated, and the final extent.

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Why trailing pixels were discarded.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum CutReason {
    /// The beam monitor dropped below threshold for the trailing pixels.
    BeamDump,
    /// The acquisition stopped before the raster completed (manual stop).
    IncompleteAcquisition,
}

/// What the reconstruction did to one run.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Provenance {
    /// Verbatim name of the source run group.
    pub run: String,
    /// Nominal slow-axis extent before any cut.
    pub nominal_rows: usize,
    /// Nominal fast-axis extent.
    pub nominal_cols: usize,
    /// Final row count.
    pub rows: usize,
    /// Final column count.
    pub cols: usize,
    /// Pixels present in the raw stream.
    pub pixel_count: usize,
    /// Pixels that passed the beam-monitor check.
    pub valid_pixels: usize,
    /// True when the grid was rotated to restore row-first orientation.
    pub rotated: bool,
    /// Why pixels were cut, if any were.
    pub cut: Option<CutReason>,
}

impl Provenance {
    /// True when trailing pixels were discarded.
    #[must_use]
    pub fn was_cut(&self) -> bool {
        self.cut.is_some()
    }

    /// Renders the free-text note stored in the output artifact.
    #[must_use]
    pub fn render(&self) -> String {
        let mut text = format!(
            "This file has been generated by xrfmap {}.\n",
            env!("CARGO_PKG_VERSION")
        );
        text.push_str(&format!("Source run: '{}'.\n", self.run));
        match self.cut {
            Some(CutReason::BeamDump) => {
                text.push_str("Beam dump detected. The original map was cut until the last completed row.\n");
            }
            Some(CutReason::IncompleteAcquisition) => {
                text.push_str("Incomplete acquisition found. The original map was cut to have a rectangular shape.\n");
            }
            None => {
                text.push_str("This map was not cut. Only reshaping has been done.\n");
            }
        }
        if self.rotated {
            text.push_str("This map has been rotated.\n");
        }
        text.push_str(&format!(
            "Final shape: {} rows x {} columns ({} valid pixels out of {}).\n",
            self.rows, self.cols, self.valid_pixels, self.pixel_count
        ));
        text
    }
}

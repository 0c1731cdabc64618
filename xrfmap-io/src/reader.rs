//! HDF5 run reading.

use std::path::Path;

use hdf5::{File, Group};
use log::warn;

use xrfmap_core::RunData;

use crate::{Error, Layout, Result};

/// Read-only view of one acquisition artifact.
///
/// Every root group of the file is one run; runs are listed in sorted name
/// order, matching the container order the rest of the tooling assumes.
pub struct RunFile {
    file: File,
    layout: Layout,
}

impl RunFile {
    /// Opens an acquisition file read-only.
    ///
    /// # Errors
    /// Returns an error if the file cannot be opened as HDF5.
    pub fn open<P: AsRef<Path>>(path: P, layout: Layout) -> Result<Self> {
        let file = File::open(path)?;
        Ok(Self { file, layout })
    }

    /// Names of the run groups, sorted.
    ///
    /// # Errors
    /// Returns an error if the root group cannot be listed.
    pub fn run_names(&self) -> Result<Vec<String>> {
        let mut names = self.file.member_names()?;
        names.sort();
        Ok(names)
    }

    /// Reads one run's raw channel sequences.
    ///
    /// Scalar datasets must be 1-D and vector datasets 2-D; anything else in
    /// those groups is reported and skipped. The vector and positioner groups
    /// are optional.
    ///
    /// # Errors
    /// Returns an error if the run lacks a scalar data group, if a channel
    /// length disagrees with the run's pixel count, or on HDF5 failures.
    pub fn read_run(&self, name: &str) -> Result<RunData> {
        let group = self.file.group(name)?;
        let mut run = RunData::new(name);

        let scalars = group.group(&self.layout.scalar_group).map_err(|_| {
            Error::InvalidFormat(format!(
                "run '{name}' has no scalar data group '{}'",
                self.layout.scalar_group
            ))
        })?;
        for channel in sorted_members(&scalars)? {
            let dataset = scalars.dataset(&channel)?;
            if dataset.ndim() != 1 {
                warn!("run '{name}': scalar channel '{channel}' is not 1-D, skipped");
                continue;
            }
            let values = dataset.read_raw::<f64>()?;
            run.insert_scalar(channel, values)?;
        }

        if let Ok(vectors) = group.group(&self.layout.vector_group) {
            for channel in sorted_members(&vectors)? {
                let dataset = vectors.dataset(&channel)?;
                if dataset.ndim() != 2 {
                    warn!("run '{name}': vector channel '{channel}' is not 2-D, skipped");
                    continue;
                }
                let records = dataset.read_2d::<f64>()?;
                run.insert_vector(channel, records)?;
            }
        }

        if let Ok(positioners) = group.group(&self.layout.positioner_group) {
            for channel in sorted_members(&positioners)? {
                let dataset = positioners.dataset(&channel)?;
                let values = dataset.read_raw::<f64>()?;
                run.insert_positioner(channel, values);
            }
        }

        Ok(run)
    }
}

fn sorted_members(group: &Group) -> Result<Vec<String>> {
    let mut names = group.member_names()?;
    names.sort();
    Ok(names)
}

//! HDF5 map writing.

use std::path::Path;
use std::str::FromStr;

use hdf5::types::VarLenUnicode;
use hdf5::File;
use ndarray::ArrayView1;

use xrfmap_algorithms::ReconstructedMap;

use crate::{Error, Layout, Result};

/// Dataset write options for reconstructed maps.
#[derive(Clone, Debug)]
pub struct WriteOptions {
    /// Deflate level for vector datasets, `None` to disable.
    pub compression: Option<u8>,
    /// Byte-shuffle filter for vector datasets.
    pub shuffle: bool,
}

impl Default for WriteOptions {
    fn default() -> Self {
        Self {
            compression: Some(4),
            shuffle: true,
        }
    }
}

/// Writes one reconstructed map to a new HDF5 file.
///
/// The target must not exist: reconstruction produces each output artifact
/// exactly once and never overwrites.
///
/// # Errors
/// Returns [`Error::OutputExists`] if the target is already present, or an
/// HDF5 error if any dataset cannot be written.
pub fn write_map<P: AsRef<Path>>(
    path: P,
    map: &ReconstructedMap,
    layout: &Layout,
    options: &WriteOptions,
) -> Result<()> {
    let path = path.as_ref();
    if path.exists() {
        return Err(Error::OutputExists(path.to_path_buf()));
    }
    let file = File::create_excl(path)?;

    write_str_dataset(&file, &layout.comments_dataset, &map.provenance.render())?;

    let run_group = file.create_group(&map.run)?;

    let detector = run_group.create_group(&layout.out_vector_group)?;
    for (name, grid) in &map.vectors {
        let mut builder = detector.new_dataset::<f64>().shape(grid.dim());
        if let Some(level) = options.compression {
            builder = builder.deflate(level);
        }
        if options.shuffle {
            builder = builder.shuffle();
        }
        let dataset = builder.create(name.as_str())?;
        // Rotated grids carry inverted strides; HDF5 wants standard layout.
        let data = grid.as_standard_layout();
        dataset.write(data.view())?;
    }

    let motors = run_group.create_group(&layout.out_scalar_group)?;
    for (name, grid) in &map.scalars {
        let dataset = motors
            .new_dataset::<f64>()
            .shape(grid.dim())
            .create(name.as_str())?;
        let data = grid.as_standard_layout();
        dataset.write(data.view())?;
    }

    let starting = run_group.create_group(&layout.out_positioner_group)?;
    for (name, values) in &map.positioners {
        let dataset = starting
            .new_dataset::<f64>()
            .shape((values.len(),))
            .create(name.as_str())?;
        dataset.write(ArrayView1::from(values.as_slice()))?;
    }

    Ok(())
}

fn write_str_dataset(file: &File, name: &str, text: &str) -> Result<()> {
    let value = VarLenUnicode::from_str(text)
        .map_err(|e| Error::InvalidFormat(format!("invalid utf-8 comment: {e}")))?;
    file.new_dataset::<VarLenUnicode>()
        .create(name)?
        .write_scalar(&value)?;
    Ok(())
}

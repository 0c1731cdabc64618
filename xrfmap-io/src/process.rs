//! Per-file orchestration: read, reconstruct, write, isolate failures.

use std::path::{Path, PathBuf};

use log::{info, warn};

use xrfmap_algorithms::pipeline;
use xrfmap_core::ReconstructionConfig;

use crate::{reader::RunFile, writer, Layout, Result, WriteOptions};

/// Outcome for one run within an artifact.
#[derive(Debug, Clone)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub enum RunOutcome {
    /// Reconstructed and written.
    Written(PathBuf),
    /// The output was already present and was left untouched.
    SkippedExisting(PathBuf),
    /// Reconstruction or writing failed; sibling runs still processed.
    Failed(String),
}

/// Outcome of one run, with its identifier.
#[derive(Debug, Clone)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct RunReport {
    /// Verbatim run group name.
    pub run: String,
    /// What happened to the run.
    pub outcome: RunOutcome,
}

/// Report for one processed artifact.
#[derive(Debug, Clone, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct FileReport {
    /// Per-run outcomes, in container order.
    pub runs: Vec<RunReport>,
}

impl FileReport {
    /// Number of maps written.
    #[must_use]
    pub fn written(&self) -> usize {
        self.runs
            .iter()
            .filter(|r| matches!(r.outcome, RunOutcome::Written(_)))
            .count()
    }

    /// Number of runs skipped because their output already existed.
    #[must_use]
    pub fn skipped(&self) -> usize {
        self.runs
            .iter()
            .filter(|r| matches!(r.outcome, RunOutcome::SkippedExisting(_)))
            .count()
    }

    /// Number of runs that failed.
    #[must_use]
    pub fn failed(&self) -> usize {
        self.runs
            .iter()
            .filter(|r| matches!(r.outcome, RunOutcome::Failed(_)))
            .count()
    }
}

/// Processes every run in `input`, writing one reconstructed file per run
/// into `output_dir`.
///
/// Runs are handled in container order. A failing run is recorded in the
/// report (and logged) without affecting its siblings; an output file that
/// already exists is left untouched.
///
/// # Errors
/// Returns an error only when the input artifact itself cannot be opened or
/// listed.
pub fn reshape_file(
    input: &Path,
    output_dir: &Path,
    layout: &Layout,
    config: &ReconstructionConfig,
    options: &WriteOptions,
) -> Result<FileReport> {
    let file = RunFile::open(input, layout.clone())?;
    let names = file.run_names()?;

    let mut report = FileReport::default();
    for name in names {
        let outcome = match reshape_run(&file, &name, output_dir, layout, options, config) {
            Ok(outcome) => outcome,
            Err(err) => {
                warn!("{}: run '{name}' skipped: {err}", input.display());
                RunOutcome::Failed(err.to_string())
            }
        };
        report.runs.push(RunReport { run: name, outcome });
    }
    Ok(report)
}

fn reshape_run(
    file: &RunFile,
    name: &str,
    output_dir: &Path,
    layout: &Layout,
    options: &WriteOptions,
    config: &ReconstructionConfig,
) -> Result<RunOutcome> {
    let run = file.read_run(name)?;
    let map = pipeline::reconstruct_run(&run, config)?;

    let mut stem = run.name().output_stem();
    if map.provenance.rotated {
        stem.push_str("_rot");
    }
    if map.provenance.was_cut() {
        stem.push_str("_cut");
    }
    let path = output_dir.join(format!("{stem}.h5"));

    if path.exists() {
        info!("{} already exists, not overwriting", path.display());
        return Ok(RunOutcome::SkippedExisting(path));
    }

    writer::write_map(&path, &map, layout, options)?;
    info!(
        "run '{name}' -> {} ({} rows x {} cols)",
        path.display(),
        map.shape.rows,
        map.shape.cols
    );
    Ok(RunOutcome::Written(path))
}

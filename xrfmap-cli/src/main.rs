//!
//! Batch driver for XRF map reconstruction: scans for acquisition files,
//! reshapes every run, and never overwrites an existing output.

use std::fs;
use std::path::{Path, PathBuf};

use clap::{Parser, Subcommand};
use log::error;
use thiserror::Error;

use xrfmap_algorithms::{axis, orientation};
use xrfmap_core::ReconstructionConfig;
use xrfmap_io::{reshape_file, Layout, RunFile, RunOutcome, WriteOptions};

/// Result type for CLI operations.
type Result<T> = std::result::Result<T, CliError>;

/// CLI error types.
#[derive(Error, Debug)]
enum CliError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("I/O error: {0}")]
    XrfmapIo(#[from] xrfmap_io::Error),
}

/// Reconstructs 2D XRF maps from raw beamline scan files.
#[derive(Parser)]
#[command(name = "xrfmap")]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Cut, reshape and rotate every run found in the given files
    Process {
        /// Input HDF5 file(s) or directories to scan for *.h5
        #[arg(required = true)]
        input: Vec<PathBuf>,

        /// Output directory (created if absent)
        #[arg(short, long, default_value = "cut-reshaped")]
        output_dir: PathBuf,

        /// Decimal digits used when rounding motor positions
        #[arg(long, default_value = "5")]
        precision: u32,

        /// Beam-monitor threshold below which a pixel counts as "no beam"
        #[arg(long, default_value = "1e-4")]
        threshold: f64,

        /// Name of the first motor axis channel
        #[arg(long, default_value = "X")]
        axis_a: String,

        /// Name of the second motor axis channel
        #[arg(long, default_value = "Y")]
        axis_b: String,

        /// Name of the beam-monitor channel
        #[arg(long, default_value = "BMS-T-Average")]
        monitor: String,

        /// Disable gzip compression of vector datasets
        #[arg(long)]
        no_compression: bool,

        /// Print the batch summary as JSON
        #[arg(long)]
        json: bool,
    },

    /// Show runs, channels and inferred geometry of one file
    Info {
        /// Input HDF5 file
        input: PathBuf,

        /// Decimal digits used when rounding motor positions
        #[arg(long, default_value = "5")]
        precision: u32,

        /// Name of the first motor axis channel
        #[arg(long, default_value = "X")]
        axis_a: String,

        /// Name of the second motor axis channel
        #[arg(long, default_value = "Y")]
        axis_b: String,
    },
}

fn main() -> Result<()> {
    env_logger::init();
    let cli = Cli::parse();

    match cli.command {
        Commands::Process {
            input,
            output_dir,
            precision,
            threshold,
            axis_a,
            axis_b,
            monitor,
            no_compression,
            json,
        } => {
            let config = ReconstructionConfig::new()
                .with_position_precision(precision)
                .with_beam_threshold(threshold)
                .with_axes(axis_a, axis_b)
                .with_beam_monitor(monitor);
            let options = WriteOptions {
                compression: if no_compression { None } else { Some(4) },
                ..WriteOptions::default()
            };

            let files = collect_inputs(&input)?;
            if files.is_empty() {
                println!("No HDF5 files found; nothing to do.");
                return Ok(());
            }
            println!("Found {} file(s) to reshape.", files.len());

            fs::create_dir_all(&output_dir)?;

            let layout = Layout::default();
            let mut written = 0usize;
            let mut skipped = 0usize;
            let mut failed_runs = 0usize;
            let mut failed_files = 0usize;

            for (index, file) in files.iter().enumerate() {
                println!(
                    "[{}/{}] {}",
                    index + 1,
                    files.len(),
                    file.display()
                );
                match reshape_file(file, &output_dir, &layout, &config, &options) {
                    Ok(report) => {
                        for run in &report.runs {
                            match &run.outcome {
                                RunOutcome::Written(path) => {
                                    println!("  run '{}' -> {}", run.run, path.display());
                                }
                                RunOutcome::SkippedExisting(path) => {
                                    println!(
                                        "  run '{}' skipped, {} already exists",
                                        run.run,
                                        path.display()
                                    );
                                }
                                RunOutcome::Failed(cause) => {
                                    println!("  run '{}' failed: {cause}", run.run);
                                }
                            }
                        }
                        written += report.written();
                        skipped += report.skipped();
                        failed_runs += report.failed();
                    }
                    Err(err) => {
                        // One unreadable file must not stop the batch.
                        error!("{}: {err}", file.display());
                        println!("  failed: {err}");
                        failed_files += 1;
                    }
                }
            }

            if json {
                let summary = serde_json::json!({
                    "files": files.len(),
                    "maps_written": written,
                    "runs_skipped": skipped,
                    "runs_failed": failed_runs,
                    "files_failed": failed_files,
                });
                println!("{summary}");
            } else {
                println!(
                    "Done: {written} map(s) written, {skipped} skipped, \
                     {failed_runs} run(s) failed, {failed_files} file(s) unreadable."
                );
            }
        }

        Commands::Info {
            input,
            precision,
            axis_a,
            axis_b,
        } => {
            let file = RunFile::open(&input, Layout::default())?;
            let names = file.run_names()?;
            println!("File: {}", input.display());
            println!("Runs: {}", names.len());

            for name in names {
                println!("Run: {name}");
                match file.read_run(&name) {
                    Ok(run) => {
                        println!("  pixels: {}", run.pixel_count());
                        println!(
                            "  channels: {} scalar, {} vector",
                            run.scalars().count(),
                            run.vectors().count()
                        );
                        describe_geometry(&run, &axis_a, &axis_b, precision);
                    }
                    Err(err) => println!("  unreadable: {err}"),
                }
            }
        }
    }

    Ok(())
}

fn describe_geometry(run: &xrfmap_core::RunData, axis_a: &str, axis_b: &str, precision: u32) {
    let (Some(a), Some(b)) = (run.scalar(axis_a), run.scalar(axis_b)) else {
        println!("  geometry: motor axes not found");
        return;
    };

    match (
        axis::count_steps(a, precision),
        axis::count_steps(b, precision),
        orientation::resolve(a, b),
    ) {
        (Ok(profile_a), Ok(profile_b), Ok(order)) => {
            let (fast, slow) = order.fast_slow(profile_a.shape, profile_b.shape);
            println!(
                "  geometry: {slow} x {fast} ({}), rotation {}",
                match order {
                    orientation::ScanOrder::RowFirst => "row-first",
                    orientation::ScanOrder::ColumnFirst => "column-first",
                },
                if order.needs_rotation() { "required" } else { "not required" }
            );
        }
        (_, _, Err(err)) | (Err(err), _, _) | (_, Err(err), _) => {
            println!("  geometry: {err}");
        }
    }
}

fn collect_inputs(inputs: &[PathBuf]) -> Result<Vec<PathBuf>> {
    let mut files = Vec::new();
    for input in inputs {
        if input.is_dir() {
            let mut found: Vec<PathBuf> = fs::read_dir(input)?
                .filter_map(std::result::Result::ok)
                .map(|entry| entry.path())
                .filter(|path| is_hdf5(path))
                .collect();
            found.sort();
            files.extend(found);
        } else {
            files.push(input.clone());
        }
    }
    Ok(files)
}

fn is_hdf5(path: &Path) -> bool {
    path.is_file()
        && path
            .extension()
            .and_then(|ext| ext.to_str())
            .is_some_and(|ext| ext.eq_ignore_ascii_case("h5"))
}

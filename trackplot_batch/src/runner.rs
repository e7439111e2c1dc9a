//! Batch runner - renders every discovered track file to an image.
//!
//! Files are processed strictly in sorted order. Each file is one unit of
//! failure: a load, render or write error is logged, recorded in the
//! [`BatchSummary`] and the run moves on. Only an unusable output directory
//! aborts the run.

use crate::config::BatchConfig;
use crate::discover::discover_tracks;
use serde::Serialize;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::{debug, error, info};
use trackplot_core::{render, Figure, FigureWriter, LegendPlacement, TrackResult, TrackTable};

/// Grid line opacity on every figure.
const GRID_ALPHA: f64 = 0.3;

/// Errors that abort a whole batch.
#[derive(Debug, Error)]
pub enum BatchError {
    /// The output directory could not be created
    #[error("Cannot create output directory {path}: {source}")]
    OutputDir {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl BatchError {
    /// Creates an output directory error.
    pub fn output_dir(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::OutputDir {
            path: path.into(),
            source,
        }
    }
}

/// One file that could not be plotted.
#[derive(Debug, Clone, Serialize)]
pub struct FileFailure {
    pub path: PathBuf,
    pub message: String,
}

/// Outcome of a batch run.
#[derive(Debug, Clone, Serialize)]
pub struct BatchSummary {
    /// Track files discovered
    pub total: usize,
    
    /// Images written
    pub succeeded: usize,
    
    /// Files skipped because of an error
    pub failures: Vec<FileFailure>,
    
    /// Where the images went
    pub output_dir: PathBuf,
}

impl BatchSummary {
    fn new(output_dir: &Path) -> Self {
        Self {
            total: 0,
            succeeded: 0,
            failures: Vec::new(),
            output_dir: output_dir.to_path_buf(),
        }
    }
}

/// Output name for file `index` (1-based): `0007_track.png`.
pub fn output_file_name(index: usize, source: &Path, extension: &str) -> String {
    let stem = source
        .file_stem()
        .map(|s| s.to_string_lossy())
        .unwrap_or_default();
    format!("{:04}_{}.{}", index, stem, extension)
}

/// Drives one run over a directory tree.
pub struct BatchRunner<W: FigureWriter> {
    config: BatchConfig,
    writer: W,
}

impl<W: FigureWriter> BatchRunner<W> {
    pub fn new(config: BatchConfig, writer: W) -> Self {
        Self { config, writer }
    }
    
    /// Plots every track file under the root directory.
    pub fn run(&self) -> Result<BatchSummary, BatchError> {
        let output_dir = &self.config.output_dir;
        std::fs::create_dir_all(output_dir)
            .map_err(|e| BatchError::output_dir(output_dir, e))?;
        
        let mut summary = BatchSummary::new(output_dir);
        
        let files = discover_tracks(&self.config.root_dir, &self.config.extension);
        if files.is_empty() {
            info!(
                "No {} files found in {}",
                self.config.extension.to_uppercase(),
                self.config.root_dir.display()
            );
            return Ok(summary);
        }
        
        let total = files.len();
        summary.total = total;
        info!("Found {} track files. Saving plots to '{}/'...", total, output_dir.display());
        
        for (i, path) in files.iter().enumerate() {
            let index = i + 1;
            match self.plot_file(path, index, total) {
                Ok(output) => {
                    summary.succeeded += 1;
                    if self.config.reports_progress(index, total) {
                        let name = output.file_name().unwrap_or_default().to_string_lossy();
                        info!("[{}/{}] Saved: {}", index, total, name);
                    }
                }
                Err(e) => {
                    error!("Error loading {}: {}", path.display(), e);
                    summary.failures.push(FileFailure {
                        path: path.clone(),
                        message: e.to_string(),
                    });
                }
            }
        }
        
        info!(
            "Finished! {}/{} plots saved to '{}/' directory.",
            summary.succeeded,
            total,
            output_dir.display()
        );
        Ok(summary)
    }
    
    /// Loads, renders and writes one file. The figure is dropped before returning.
    fn plot_file(&self, path: &Path, index: usize, total: usize) -> TrackResult<PathBuf> {
        let table = TrackTable::from_path(path)?;
        let name = path
            .file_name()
            .map(|s| s.to_string_lossy().into_owned())
            .unwrap_or_default();
        
        let mut figure = Figure::new(self.config.figure_size);
        let schema = render(&mut figure, &table, &name)?;
        debug!("{} ({}/{}): {}", name, index, total, schema);
        
        figure.set_axis_labels("X (m)", "Y (m)");
        figure.set_title(format!("{}\n({}/{})", name, index, total));
        figure.set_grid(GRID_ALPHA);
        figure.set_equal_aspect(true);
        figure.set_legend(LegendPlacement::Best);
        
        let output = self
            .config
            .output_dir
            .join(output_file_name(index, path, self.writer.extension()));
        self.writer.write(&figure, &output)?;
        
        Ok(output)
    }
}

//! Batch run configuration.

use std::path::PathBuf;
use trackplot_core::FigureSize;

/// Settings for one batch run.
#[derive(Debug, Clone)]
pub struct BatchConfig {
    /// Directory searched recursively for track files
    pub root_dir: PathBuf,
    
    /// Directory receiving one image per track
    pub output_dir: PathBuf,
    
    /// Track file extension, without the dot
    pub extension: String,
    
    /// Size and resolution of every figure
    pub figure_size: FigureSize,
    
    /// Log a progress line every N files (0 = final file only)
    pub progress_every: usize,
}

impl Default for BatchConfig {
    fn default() -> Self {
        Self {
            root_dir: PathBuf::from("selected_tracks"),
            output_dir: PathBuf::from("plots"),
            extension: "csv".to_string(),
            figure_size: FigureSize::default(),
            progress_every: 50,
        }
    }
}

impl BatchConfig {
    /// Create a new config with default settings.
    pub fn new() -> Self {
        Self::default()
    }
    
    /// Set the input root directory.
    pub fn root_dir(mut self, path: impl Into<PathBuf>) -> Self {
        self.root_dir = path.into();
        self
    }
    
    /// Set the output directory.
    pub fn output_dir(mut self, path: impl Into<PathBuf>) -> Self {
        self.output_dir = path.into();
        self
    }
    
    /// Set the track file extension.
    pub fn extension(mut self, extension: impl Into<String>) -> Self {
        self.extension = extension.into();
        self
    }
    
    /// Set figure size and resolution.
    pub fn figure_size(mut self, size: FigureSize) -> Self {
        self.figure_size = size;
        self
    }
    
    /// Set the progress reporting interval.
    pub fn progress_every(mut self, n: usize) -> Self {
        self.progress_every = n;
        self
    }
    
    /// True if file `index` (1-based) of `total` should be reported.
    pub fn reports_progress(&self, index: usize, total: usize) -> bool {
        index == total || (self.progress_every > 0 && index % self.progress_every == 0)
    }
}

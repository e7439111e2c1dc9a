//! TrackPlot batch driver.
//!
//! Walks a directory tree of track files and writes one figure per file:
//!
//! ```text
//! selected_tracks/**/*.csv ──► TrackTable ──► render ──► Figure ──► plots/0001_<stem>.png
//! ```
//!
//! # Usage
//!
//! ```ignore
//! use trackplot_batch::{BatchConfig, BatchRunner};
//! use trackplot_core::PngWriter;
//!
//! let config = BatchConfig::new().root_dir("selected_tracks").output_dir("plots");
//! let summary = BatchRunner::new(config, PngWriter).run()?;
//! ```

mod config;
mod discover;
mod runner;

pub use config::BatchConfig;
pub use discover::discover_tracks;
pub use runner::{output_file_name, BatchError, BatchRunner, BatchSummary, FileFailure};

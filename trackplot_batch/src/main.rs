//! TrackPlot batch CLI
//!
//! Plots every track file under a directory. With no flags it reads
//! `selected_tracks/` and writes `plots/`.

use anyhow::Result;
use clap::{Parser, ValueEnum};
use std::path::PathBuf;
use tracing::{info, Level};
use tracing_subscriber::FmtSubscriber;
use trackplot_batch::{BatchConfig, BatchRunner, BatchSummary};
use trackplot_core::{FigureWriter, JsonWriter, PngWriter};

/// Output format for the per-track figures.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum OutputFormat {
    /// Raster image (150 dpi)
    Png,
    /// JSON scene description
    Json,
}

/// Render every robot/participant track file to an image
#[derive(Parser, Debug)]
#[command(name = "plot-tracks")]
#[command(about = "Plot each track file individually with robot and participant trajectories", long_about = None)]
struct Args {
    /// Root directory searched recursively for track files
    #[arg(short, long, default_value = "selected_tracks")]
    root: PathBuf,
    
    /// Directory receiving the plots (created if absent)
    #[arg(short, long, default_value = "plots")]
    output: PathBuf,
    
    /// Figure output format
    #[arg(short, long, value_enum, default_value_t = OutputFormat::Png)]
    format: OutputFormat,
    
    /// Log a progress line every N files
    #[arg(long, default_value = "50")]
    progress_every: usize,
    
    /// Verbose output
    #[arg(short, long)]
    verbose: bool,
    
    /// Print the run summary as JSON
    #[arg(long)]
    json: bool,
}

fn run<W: FigureWriter>(config: BatchConfig, writer: W) -> Result<BatchSummary> {
    Ok(BatchRunner::new(config, writer).run()?)
}

fn main() -> Result<()> {
    let args = Args::parse();
    
    // Initialize logging
    let level = if args.verbose { Level::DEBUG } else { Level::INFO };
    let subscriber = FmtSubscriber::builder()
        .with_max_level(level)
        .finish();
    tracing::subscriber::set_global_default(subscriber)
        .expect("Failed to set tracing subscriber");
    
    info!("Plotting each track individually with robot and participant trajectories...");
    
    let config = BatchConfig::new()
        .root_dir(args.root)
        .output_dir(args.output)
        .progress_every(args.progress_every);
    
    let summary = match args.format {
        OutputFormat::Png => run(config, PngWriter)?,
        OutputFormat::Json => run(config, JsonWriter)?,
    };
    
    if args.json {
        println!("{}", serde_json::to_string_pretty(&summary)?);
    }
    
    // Per-file failures were already logged; they do not change the exit status.
    Ok(())
}

//! Error types for track loading, rendering and figure output.

use std::path::PathBuf;
use thiserror::Error;

/// Errors that can occur while turning one track file into a figure.
#[derive(Debug, Error)]
pub enum TrackError {
    /// File could not be opened, read or written
    #[error("I/O error on {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    
    /// Malformed CSV (ragged rows, bad UTF-8, missing header)
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),
    
    /// A required column is absent from the header
    #[error("Missing column: {0}")]
    MissingColumn(String),
    
    /// The header names the same column twice
    #[error("Duplicate column: {0}")]
    DuplicateColumn(String),
    
    /// A cell that should hold a coordinate is not a number
    #[error("Invalid number {value:?} in column {column} at row {row}")]
    InvalidNumber {
        column: String,
        row: usize,
        value: String,
    },
    
    /// The table has a header but no data rows
    #[error("Track has no samples")]
    EmptyTrack,
    
    /// Drawing or image encoding failed
    #[error("Render error: {0}")]
    Render(String),
    
    /// Scene serialization failed
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl TrackError {
    /// Creates an I/O error tagged with the offending path.
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }
    
    /// Creates a missing-column error.
    pub fn missing_column(name: impl Into<String>) -> Self {
        Self::MissingColumn(name.into())
    }
    
    /// Creates a render error from any displayable backend failure.
    pub fn render(err: impl std::fmt::Display) -> Self {
        Self::Render(err.to_string())
    }
}

/// Result alias for track operations.
pub type TrackResult<T> = Result<T, TrackError>;

use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum SplitError {
    #[error("Input PDF not found: {}", .0.display())]
    InputNotFound(PathBuf),

    #[error("Failed to read {}: {source}", .path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to open PDF {}: {source}", .path.display())]
    Load {
        path: PathBuf,
        #[source]
        source: lopdf::Error,
    },

    #[error("PDF has no pages: {}", .0.display())]
    EmptyDocument(PathBuf),

    #[error("Invalid heading pattern: {0}")]
    InvalidPattern(#[from] regex::Error),

    #[error("Invalid chapter markers: {reason}")]
    InvalidMarkers { reason: String },

    #[error("Failed to create output directory {}: {source}", .path.display())]
    OutputDir {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to write {}: {source}", .path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl SplitError {
    /// Write errors are reported per chapter; everything else aborts the run.
    pub fn is_fatal(&self) -> bool {
        !matches!(self, SplitError::Write { .. })
    }
}

pub type Result<T> = std::result::Result<T, SplitError>;

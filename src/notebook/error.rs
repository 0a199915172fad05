// ABOUTME: Error types for notebook document operations
// ABOUTME: Defines specific error types for loading, parsing, and serializing notebooks

use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum NotebookError {
    #[error("Notebook file not found: {0}")]
    NotFound(PathBuf),

    #[error("Failed to parse notebook '{path}': {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("Invalid notebook structure in '{path}': {reason}")]
    InvalidFormat { path: PathBuf, reason: String },

    #[error("JSON error: {0}")]
    JsonError(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, NotebookError>;

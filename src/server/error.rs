// ABOUTME: Error types for server discovery and launch operations
// ABOUTME: Defines specific error types for registry queries, URL building, and process launch

use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ServerError {
    #[error("Target notebook file not found: {path}")]
    TargetNotFound {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid server URL: {0}")]
    InvalidUrl(#[from] url::ParseError),

    #[error("Invalid server record: {0}")]
    InvalidRecord(String),

    #[error("Failed to launch process: {0}")]
    LaunchError(String),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, ServerError>;

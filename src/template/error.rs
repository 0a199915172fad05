// ABOUTME: Error types for template instantiation operations
// ABOUTME: Defines specific error types for creating notebooks from templates

use std::path::PathBuf;
use thiserror::Error;

use crate::notebook::NotebookError;

#[derive(Error, Debug)]
pub enum TemplateError {
    #[error("Target notebook file already exists: {0}")]
    TargetExists(PathBuf),

    #[error("Notebook error: {0}")]
    NotebookError(#[from] NotebookError),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, TemplateError>;

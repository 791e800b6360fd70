//! Partial error types

use std::path::PathBuf;
use thiserror::Error;

/// Errors that can occur while extracting, locating or inlining a partial
#[derive(Debug, Error)]
pub enum PartialError {
    #[error("Unsupported file type: {extension}")]
    UnsupportedFileType { extension: String },

    #[error("Please select a region")]
    EmptySelection,

    #[error("File already exists: {path}")]
    FileAlreadyExists { path: PathBuf },

    #[error("Partial not found")]
    PartialNotFound,

    #[error("Invalid partial name '{reference}': {reason}")]
    InvalidReference { reference: String, reason: String },

    #[error("Invalid include template '{template}': expected exactly one {{name}} placeholder")]
    InvalidTemplate { template: String },

    #[error("Buffer has no file on disk")]
    NoCurrentFile,

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl PartialError {
    pub(crate) fn invalid_reference(reference: &str, reason: impl Into<String>) -> Self {
        Self::InvalidReference {
            reference: reference.to_string(),
            reason: reason.into(),
        }
    }
}

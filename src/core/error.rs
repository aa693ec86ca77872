use std::path::PathBuf;

use thiserror::Error;

use crate::core::model::SourceKind;

/// Document-level failures. Table-level rejections are never errors.
#[derive(Debug, Error)]
pub enum ExtractError {
    #[error("File not found: {}", .0.display())]
    NotFound(PathBuf),

    #[error("Failed to open {format}: {reason}")]
    Open { format: SourceKind, reason: String },

    #[error("Invalid page numbers: {0:?}")]
    InvalidPages(String),

    #[error("Unsupported document format: {}", .0.display())]
    UnsupportedFormat(PathBuf),

    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl ExtractError {
    pub fn open(format: SourceKind, reason: impl ToString) -> Self {
        Self::Open {
            format,
            reason: reason.to_string(),
        }
    }
}

pub type Result<T> = std::result::Result<T, ExtractError>;

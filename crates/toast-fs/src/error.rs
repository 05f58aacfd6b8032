//! Error types for toast-fs

use std::path::PathBuf;

/// Result type for toast-fs operations
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur in toast-fs operations
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("I/O error at {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid path {path}: {message}")]
    InvalidPath { path: PathBuf, message: String },

    #[error("No free backup name for {path} after {attempts} attempts")]
    BackupNamesExhausted { path: PathBuf, attempts: u32 },
}

impl Error {
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }

    pub fn invalid_path(path: impl Into<PathBuf>, message: impl Into<String>) -> Self {
        Self::InvalidPath {
            path: path.into(),
            message: message.into(),
        }
    }
}

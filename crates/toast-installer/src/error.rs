//! Error types for toast-installer

use std::path::PathBuf;

/// Result type for toast-installer operations
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur while installing or uninstalling
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// One or more fatal dependency checks failed
    #[error("Dependency check failed: {}", .failed.join(", "))]
    DependencyFailed { failed: Vec<String> },

    /// The user's home directory could not be determined
    #[error("Could not determine the home directory")]
    HomeNotFound,

    /// Unknown hook category name
    #[error("Unknown hook category '{name}'. Valid categories: {valid}")]
    UnknownCategory { name: String, valid: String },

    /// An install request named no hook categories
    #[error("No hook categories selected")]
    NoHooksSelected,

    /// Manifest could not be read or written
    #[error("Manifest error at {path}: {message}")]
    Manifest { path: PathBuf, message: String },

    // Transparent wrappers for underlying crate errors
    /// Filesystem error from toast-fs
    #[error(transparent)]
    Fs(#[from] toast_fs::Error),

    /// Settings error from toast-settings
    #[error(transparent)]
    Settings(#[from] toast_settings::Error),

    /// JSON serialization error
    #[error(transparent)]
    Json(#[from] serde_json::Error),
}

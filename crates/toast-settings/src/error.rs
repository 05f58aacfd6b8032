//! Error types for toast-settings

use std::path::{Path, PathBuf};

use crate::jsonc::ParseError;

/// Result type for toast-settings operations
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur in toast-settings operations
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// The document is not valid JSON once comments are stripped
    #[error("{}", describe_parse_errors(.path.as_deref(), .errors))]
    Parse {
        path: Option<PathBuf>,
        errors: Vec<ParseError>,
    },

    /// Well-formed JSON with the wrong shape
    #[error("Invalid settings structure: {message}")]
    Validation { message: String },

    #[error(transparent)]
    Fs(#[from] toast_fs::Error),

    #[error(transparent)]
    Json(#[from] serde_json::Error),
}

impl Error {
    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation {
            message: message.into(),
        }
    }

    /// Attach the file path to a parse error produced from in-memory text.
    pub fn with_path(self, path: &Path) -> Self {
        match self {
            Self::Parse { errors, .. } => Self::Parse {
                path: Some(path.to_path_buf()),
                errors,
            },
            other => other,
        }
    }
}

fn describe_parse_errors(path: Option<&Path>, errors: &[ParseError]) -> String {
    let location = path
        .map(|p| format!(" {}", p.display()))
        .unwrap_or_default();
    match errors {
        [] => format!("Failed to parse settings{location}"),
        [only] => format!("Failed to parse settings{location}: {only}"),
        [first, rest @ ..] => format!(
            "Failed to parse settings{location}: {first} (and {} more)",
            rest.len()
        ),
    }
}

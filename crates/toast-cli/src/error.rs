//! Error types for toast-cli

use std::path::PathBuf;

use toast_installer::FailureKind;

/// Result type for CLI operations
pub type Result<T> = std::result::Result<T, CliError>;

/// Process exit codes.
pub mod exit_code {
    pub const FAILURE: i32 = 1;
    pub const DEPENDENCIES: i32 = 2;
    pub const USAGE: i32 = 3;
    pub const ABORTED: i32 = 130;
}

/// Errors that can occur in CLI operations
#[derive(Debug, thiserror::Error)]
pub enum CliError {
    /// Error from toast-installer
    #[error(transparent)]
    Installer(#[from] toast_installer::Error),

    /// Error from toast-settings
    #[error(transparent)]
    Settings(#[from] toast_settings::Error),

    /// Error from toast-fs
    #[error(transparent)]
    Fs(#[from] toast_fs::Error),

    /// Standard I/O error
    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Json(#[from] serde_json::Error),

    /// Interactive prompt error
    #[error("Interactive prompt error: {0}")]
    Dialoguer(#[from] dialoguer::Error),

    /// The user config file could not be read or parsed
    #[error("Invalid config file {path}: {message}")]
    Config { path: PathBuf, message: String },

    /// An install or uninstall reported failure
    #[error("{message}")]
    Failed { kind: FailureKind, message: String },

    /// The user declined a confirmation prompt
    #[error("Aborted")]
    Aborted,

    /// User-facing error with a message
    #[error("{message}")]
    User { message: String },
}

impl CliError {
    /// Create a new user error with the given message
    pub fn user(message: impl Into<String>) -> Self {
        Self::User {
            message: message.into(),
        }
    }

    pub fn exit_code(&self) -> i32 {
        match self {
            Self::Failed {
                kind: FailureKind::Dependencies,
                ..
            }
            | Self::Installer(toast_installer::Error::DependencyFailed { .. }) => {
                exit_code::DEPENDENCIES
            }
            Self::Config { .. }
            | Self::User { .. }
            | Self::Installer(toast_installer::Error::UnknownCategory { .. }) => exit_code::USAGE,
            Self::Aborted => exit_code::ABORTED,
            _ => exit_code::FAILURE,
        }
    }
}

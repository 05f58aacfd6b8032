//! Install orchestration for wsl-toast
//!
//! Composes path resolution, runtime file placement, the settings engine
//! and manifest bookkeeping into `install` and `uninstall` operations that
//! always report a structured [`InstallationResult`].

pub mod category;
pub mod config;
pub mod deps;
pub mod error;
pub mod installer;
pub mod manifest;
pub mod paths;
pub mod runtime;

pub use category::HookCategory;
pub use config::InstallConfig;
pub use deps::{DependencyCheck, DependencyChecker, StaticChecker, SystemChecker};
pub use error::{Error, Result};
pub use installer::{FailureKind, InstallStatus, InstallationResult, Installer};
pub use manifest::{InstallManifest, MANIFEST_FILENAME};
pub use paths::{InstallPaths, LocalSettings, Scope};
pub use runtime::{RUNTIME_FILES, RuntimeFile, SCRIPT_NAME};

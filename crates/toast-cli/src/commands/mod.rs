//! Command implementations for toast-cli

pub mod completions;
pub mod doctor;
pub mod install;
pub mod status;
pub mod uninstall;

mod output;

pub use completions::run_completions;
pub use doctor::run_doctor;
pub use install::run_install;
pub use status::run_status;
pub use uninstall::run_uninstall;

use toast_installer::{InstallPaths, InstallationResult, Installer};
use tracing::warn;

use crate::cli::TargetArgs;
use crate::error::{CliError, Result};

/// Settings backups kept after a backed-up write.
const BACKUPS_TO_KEEP: usize = 5;

/// Installer rooted at the real home and `--project` (or the current directory).
fn installer_for(target: &TargetArgs) -> Result<Installer> {
    let paths = match &target.project {
        Some(project) if !project.is_dir() => {
            return Err(CliError::user(format!(
                "Project directory does not exist: {}",
                project.display()
            )));
        }
        Some(project) => InstallPaths::with_project(project)?,
        None => InstallPaths::from_env()?,
    };
    Ok(Installer::new(paths))
}

/// Trim old settings backups once a new one exists. Failures only warn.
fn prune_old_backups(result: &InstallationResult) {
    if !result.success || result.backup_path.is_none() {
        return;
    }
    if let Err(e) = toast_fs::prune_backups(&result.settings_path, BACKUPS_TO_KEEP) {
        warn!(error = %e, "could not prune old settings backups");
    }
}

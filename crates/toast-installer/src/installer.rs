//! Install and uninstall orchestration
//!
//! Both operations always hand back an [`InstallationResult`]. Errors are
//! folded into a failure result with a [`FailureKind`] so the caller can pick
//! an exit code without matching on library error types. Partial side effects
//! of a failed install are left in place; running install again converges.

use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use serde::Serialize;
use toast_settings::{
    ConfigDocument, MergeOptions, hook_commands, merge_hook_commands, preview_file, read_settings,
    remove_hook_commands_where, transform_file,
};
use tracing::{debug, info, warn};

use crate::category::HookCategory;
use crate::config::InstallConfig;
use crate::deps::{DependencyCheck, DependencyChecker, SystemChecker};
use crate::error::{Error, Result};
use crate::manifest::InstallManifest;
use crate::paths::{InstallPaths, LocalSettings, Scope};
use crate::runtime::{runtime_file_names, write_runtime_files};

/// Broad class of a failed operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum FailureKind {
    /// A fatal dependency check did not pass.
    Dependencies,
    /// The settings file is malformed or has an unexpected shape.
    Settings,
    /// Reading or writing the filesystem failed.
    Filesystem,
}

impl FailureKind {
    fn of(error: &Error) -> Self {
        match error {
            Error::DependencyFailed { .. } => FailureKind::Dependencies,
            Error::Settings(toast_settings::Error::Fs(_)) => FailureKind::Filesystem,
            Error::Settings(_)
            | Error::Json(_)
            | Error::UnknownCategory { .. }
            | Error::NoHooksSelected => FailureKind::Settings,
            Error::Fs(_) | Error::Manifest { .. } | Error::HomeNotFound => {
                FailureKind::Filesystem
            }
        }
    }
}

/// What an install or uninstall did, or would do in a dry run.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct InstallationResult {
    pub success: bool,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub failure: Option<FailureKind>,
    pub dry_run: bool,
    pub settings_path: PathBuf,
    pub install_dir: PathBuf,
    /// Settings keys of the categories installed or removed.
    pub hooks: Vec<String>,
    /// Command strings added or removed.
    pub commands: Vec<String>,
    /// Runtime files written or removed, relative to `install_dir`.
    pub files: Vec<String>,
    pub settings_changed: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub backup_path: Option<PathBuf>,
    /// Unified diff of the settings file, dry runs only.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub diff: Option<String>,
    pub checks: Vec<DependencyCheck>,
    pub notes: Vec<String>,
}

impl InstallationResult {
    fn new(dry_run: bool, settings_path: PathBuf, install_dir: PathBuf) -> Self {
        Self {
            success: false,
            message: String::new(),
            failure: None,
            dry_run,
            settings_path,
            install_dir,
            hooks: Vec::new(),
            commands: Vec::new(),
            files: Vec::new(),
            settings_changed: false,
            backup_path: None,
            diff: None,
            checks: Vec::new(),
            notes: Vec::new(),
        }
    }

    fn into_failure(mut self, error: &Error) -> Self {
        self.success = false;
        self.failure = Some(FailureKind::of(error));
        self.message = error.to_string();
        self
    }
}

/// Current state of an install location.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct InstallStatus {
    pub scope: Scope,
    pub settings_path: PathBuf,
    pub settings_exists: bool,
    pub install_dir: PathBuf,
    pub script_installed: bool,
    /// Categories holding at least one command pointing at the script.
    pub installed_hooks: Vec<String>,
    pub commands: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub manifest: Option<InstallManifest>,
}

impl InstallStatus {
    pub fn is_installed(&self) -> bool {
        !self.installed_hooks.is_empty()
    }
}

/// Performs installs against a fixed home and project.
#[derive(Debug, Clone)]
pub struct Installer<C = SystemChecker> {
    paths: InstallPaths,
    checker: C,
}

impl Installer<SystemChecker> {
    pub fn new(paths: InstallPaths) -> Self {
        Self::with_checker(paths, SystemChecker)
    }
}

impl<C: DependencyChecker> Installer<C> {
    pub fn with_checker(paths: InstallPaths, checker: C) -> Self {
        Self { paths, checker }
    }

    pub fn paths(&self) -> &InstallPaths {
        &self.paths
    }

    /// Command string for `category` at `scope`.
    ///
    /// The script path is not quoted. A home or project path containing
    /// whitespace yields a command the hook runner splits at that space, so
    /// such locations are unsupported.
    pub fn hook_command(&self, scope: Scope, category: HookCategory) -> String {
        format!(
            "{} {}",
            self.paths.script_path(scope).display(),
            category.flag()
        )
    }

    pub fn run_dependency_checks(&self) -> Vec<DependencyCheck> {
        self.checker.check()
    }

    pub fn install(&self, config: &InstallConfig) -> InstallationResult {
        let mut result = self.new_result(config);
        match self.try_install(config, &mut result) {
            Ok(()) => {
                result.success = true;
                result
            }
            Err(e) => {
                warn!(error = %e, "install failed");
                result.into_failure(&e)
            }
        }
    }

    pub fn uninstall(&self, config: &InstallConfig) -> InstallationResult {
        let mut result = self.new_result(config);
        match self.try_uninstall(config, &mut result) {
            Ok(()) => {
                result.success = true;
                result
            }
            Err(e) => {
                warn!(error = %e, "uninstall failed");
                result.into_failure(&e)
            }
        }
    }

    pub fn status(&self, scope: Scope, local_settings: LocalSettings) -> Result<InstallStatus> {
        let settings_path = self.paths.settings_path(scope, local_settings);
        let install_dir = self.paths.install_dir(scope);
        let script = self.paths.script_path(scope);
        let script_str = script.display().to_string();

        let doc = read_settings(&settings_path)?;
        let settings_exists = doc.is_some();
        let ours: Vec<(String, String)> = doc
            .map(|doc| hook_commands(&doc))
            .unwrap_or_default()
            .into_iter()
            .filter(|(_, command)| is_own_command(command, &script_str))
            .collect();

        let mut installed_hooks: Vec<String> = Vec::new();
        for (category, _) in &ours {
            if !installed_hooks.contains(category) {
                installed_hooks.push(category.clone());
            }
        }

        Ok(InstallStatus {
            scope,
            settings_path,
            settings_exists,
            script_installed: script.is_file(),
            manifest: InstallManifest::load_best_effort(&install_dir),
            install_dir,
            installed_hooks,
            commands: ours.into_iter().map(|(_, command)| command).collect(),
        })
    }

    fn new_result(&self, config: &InstallConfig) -> InstallationResult {
        InstallationResult::new(
            config.dry_run,
            self.paths.settings_path(config.scope, config.local_settings),
            self.paths.install_dir(config.scope),
        )
    }

    fn try_install(&self, config: &InstallConfig, result: &mut InstallationResult) -> Result<()> {
        let selected = config.selected_hooks();
        if selected.is_empty() {
            return Err(Error::NoHooksSelected);
        }
        let script = self.paths.script_path(config.scope).display().to_string();
        let desired: Vec<(HookCategory, String)> = selected
            .iter()
            .map(|&category| (category, self.hook_command(config.scope, category)))
            .collect();

        result.hooks = selected.iter().map(|c| c.settings_key().to_string()).collect();
        result.commands = desired.iter().map(|(_, command)| command.clone()).collect();
        result.files = runtime_file_names();

        let previous = InstallManifest::load_best_effort(&result.install_dir);
        if let Some(manifest) = &previous {
            result.notes.extend(manifest.version_change_note());
        }

        let mut stale = Vec::new();
        let apply = |doc: &ConfigDocument| {
            let (doc, removed) = replace_own_commands(doc, &script, &desired);
            stale = removed;
            Ok(doc)
        };

        if config.dry_run {
            let preview = preview_file(&result.settings_path, apply)?;
            result.settings_changed = preview.result.changed;
            result.diff = Some(preview.diff);
            note_stale(result, &stale, true);
            self.gate_dependencies(config, result)?;
            result.message = format!(
                "Dry run: would install {} hook(s) into {}",
                desired.len(),
                result.settings_path.display()
            );
            return Ok(());
        }

        self.gate_dependencies(config, result)?;

        toast_fs::create_private_dir(&result.install_dir, 0o700)?;
        result.files = write_runtime_files(&result.install_dir)?;

        let options = MergeOptions::default().with_backup(config.create_backup);
        let outcome = transform_file(&result.settings_path, &options, apply)?;
        result.settings_changed = outcome.changed;
        result.backup_path = outcome.backup_path;
        note_stale(result, &stale, false);
        if !outcome.changed {
            result.notes.push("Settings already up to date".to_string());
        }

        InstallManifest::new(config, result.files.clone())?.save(&result.install_dir)?;

        info!(
            settings = %result.settings_path.display(),
            hooks = ?result.hooks,
            changed = result.settings_changed,
            "install complete"
        );
        result.message = format!(
            "Installed {} hook(s) into {}",
            desired.len(),
            result.settings_path.display()
        );
        Ok(())
    }

    fn try_uninstall(&self, config: &InstallConfig, result: &mut InstallationResult) -> Result<()> {
        let script = self.paths.script_path(config.scope).display().to_string();

        let manifest = InstallManifest::load_best_effort(&result.install_dir);
        match &manifest {
            Some(m) => result.files = m.files.clone(),
            None => result
                .notes
                .push("No install manifest found; matching hooks by script path".to_string()),
        }

        let mut removed = Vec::new();
        let apply = |doc: &ConfigDocument| {
            let (doc, r) = remove_hook_commands_where(doc, |_, command| {
                is_own_command(command, &script)
            });
            removed = r;
            Ok(doc)
        };

        if config.dry_run {
            let preview = preview_file(&result.settings_path, apply)?;
            result.settings_changed = preview.result.changed;
            result.diff = Some(preview.diff);
        } else {
            let options = MergeOptions::default().with_backup(config.create_backup);
            let outcome = transform_file(&result.settings_path, &options, apply)?;
            result.settings_changed = outcome.changed;
            result.backup_path = outcome.backup_path;
            match self.other_local_reference(config, &script) {
                Some(reason) => result.notes.push(format!(
                    "Kept {}: {reason}",
                    result.install_dir.display()
                )),
                None => remove_install_dir(&result.install_dir)?,
            }
        }

        for (category, command) in removed {
            if !result.hooks.contains(&category) {
                result.hooks.push(category);
            }
            result.commands.push(command);
        }
        if let Some(m) = &manifest {
            let absent: Vec<&str> = m
                .categories()
                .into_iter()
                .map(HookCategory::settings_key)
                .filter(|key| !result.hooks.iter().any(|h| h == key))
                .collect();
            if !absent.is_empty() {
                result.notes.push(format!(
                    "Already absent from settings: {}",
                    absent.join(", ")
                ));
            }
        }

        let verb = if config.dry_run { "Dry run: would remove" } else { "Removed" };
        result.message = format!(
            "{verb} {} hook command(s) from {}",
            result.commands.len(),
            result.settings_path.display()
        );
        info!(
            settings = %result.settings_path.display(),
            removed = result.commands.len(),
            dry_run = config.dry_run,
            "uninstall complete"
        );
        Ok(())
    }

    /// Why the shared local install dir must stay, if it must.
    ///
    /// The other local settings variant keeps it alive while it runs the
    /// script, or while it cannot be read to tell.
    fn other_local_reference(&self, config: &InstallConfig, script: &str) -> Option<String> {
        if config.scope != Scope::Local {
            return None;
        }
        let other = match config.local_settings {
            LocalSettings::Tracked => LocalSettings::Untracked,
            LocalSettings::Untracked => LocalSettings::Tracked,
        };
        let path = self.paths.settings_path(Scope::Local, other);
        match read_settings(&path) {
            Ok(Some(doc)) => hook_commands(&doc)
                .iter()
                .any(|(_, command)| is_own_command(command, script))
                .then(|| format!("still used by {}", path.display())),
            Ok(None) => None,
            Err(e) => {
                warn!(path = %path.display(), error = %e, "cannot tell whether the install dir is still used");
                Some(format!("could not read {}: {e}", path.display()))
            }
        }
    }

    /// Record checks on `result` and refuse to continue past a fatal one.
    fn gate_dependencies(&self, config: &InstallConfig, result: &mut InstallationResult) -> Result<()> {
        if config.skip_dependency_check {
            result.notes.push("Dependency checks skipped".to_string());
            return Ok(());
        }
        result.checks = self.checker.check();
        let failed: Vec<String> = result
            .checks
            .iter()
            .filter(|c| c.is_blocking())
            .map(|c| c.name.clone())
            .collect();
        if failed.is_empty() {
            Ok(())
        } else {
            Err(Error::DependencyFailed { failed })
        }
    }
}

/// Whether `command` invokes the script at `script`.
fn is_own_command(command: &str, script: &str) -> bool {
    command
        .strip_prefix(script)
        .is_some_and(|rest| rest.is_empty() || rest.starts_with(char::is_whitespace))
}

/// Drop own commands that are not in `desired`, then merge `desired` in.
///
/// Returns the removed `(category, command)` pairs alongside the document.
fn replace_own_commands(
    doc: &ConfigDocument,
    script: &str,
    desired: &[(HookCategory, String)],
) -> (ConfigDocument, Vec<(String, String)>) {
    let (pruned, removed) = remove_hook_commands_where(doc, |category, command| {
        is_own_command(command, script)
            && !desired
                .iter()
                .any(|(c, wanted)| c.settings_key() == category && wanted == command)
    });
    let merged = merge_hook_commands(
        &pruned,
        desired
            .iter()
            .map(|(category, command)| (category.settings_key(), command.as_str())),
    );
    (merged, removed)
}

fn note_stale(result: &mut InstallationResult, stale: &[(String, String)], dry_run: bool) {
    if stale.is_empty() {
        return;
    }
    let mut categories: Vec<&str> = stale.iter().map(|(c, _)| c.as_str()).collect();
    categories.dedup();
    let verb = if dry_run { "Would remove" } else { "Removed" };
    result.notes.push(format!(
        "{verb} hooks no longer selected: {}",
        categories.join(", ")
    ));
}

fn remove_install_dir(dir: &Path) -> Result<()> {
    match std::fs::remove_dir_all(dir) {
        Ok(()) => {
            debug!(dir = %dir.display(), "install directory removed");
            Ok(())
        }
        Err(e) if e.kind() == ErrorKind::NotFound => Ok(()),
        Err(e) => Err(toast_fs::Error::io(dir, e).into()),
    }
}

//! Where settings and runtime files live for each install scope

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::runtime::SCRIPT_NAME;

const CLAUDE_DIR: &str = ".claude";
const HOOKS_DIR: &str = "hooks";
const INSTALL_DIR_NAME: &str = "wsl-toast";

/// Install for the user or for one project.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Scope {
    #[default]
    Global,
    Local,
}

/// Which settings file a local install targets.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LocalSettings {
    /// `settings.json`, usually committed.
    Tracked,
    /// `settings.local.json`, usually git-ignored.
    #[default]
    Untracked,
}

/// Home and project roots everything else is derived from.
///
/// Both are absolute so the hook command strings written into settings
/// work regardless of the directory the hook runs from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InstallPaths {
    home: PathBuf,
    project: PathBuf,
}

impl InstallPaths {
    pub fn new(home: impl AsRef<Path>, project: impl AsRef<Path>) -> Result<Self> {
        Ok(Self {
            home: absolutize(home.as_ref())?,
            project: absolutize(project.as_ref())?,
        })
    }

    /// Real home directory and the current working directory.
    pub fn from_env() -> Result<Self> {
        let home = dirs::home_dir().ok_or(Error::HomeNotFound)?;
        let project = std::env::current_dir().map_err(|e| toast_fs::Error::io(".", e))?;
        Self::new(home, project)
    }

    /// Real home directory with an explicit project.
    pub fn with_project(project: impl AsRef<Path>) -> Result<Self> {
        let home = dirs::home_dir().ok_or(Error::HomeNotFound)?;
        Self::new(home, project)
    }

    pub fn home(&self) -> &Path {
        &self.home
    }

    pub fn project(&self) -> &Path {
        &self.project
    }

    fn claude_dir(&self, scope: Scope) -> PathBuf {
        match scope {
            Scope::Global => self.home.join(CLAUDE_DIR),
            Scope::Local => self.project.join(CLAUDE_DIR),
        }
    }

    /// Settings file edited for `scope`.
    ///
    /// Global installs always use `settings.json`; `local_settings` only
    /// matters for local scope.
    pub fn settings_path(&self, scope: Scope, local_settings: LocalSettings) -> PathBuf {
        let file = match (scope, local_settings) {
            (Scope::Global, _) | (Scope::Local, LocalSettings::Tracked) => "settings.json",
            (Scope::Local, LocalSettings::Untracked) => "settings.local.json",
        };
        self.claude_dir(scope).join(file)
    }

    /// Directory holding the runtime files and the manifest.
    pub fn install_dir(&self, scope: Scope) -> PathBuf {
        self.claude_dir(scope).join(HOOKS_DIR).join(INSTALL_DIR_NAME)
    }

    /// Absolute path of the installed notification script.
    pub fn script_path(&self, scope: Scope) -> PathBuf {
        self.install_dir(scope).join(SCRIPT_NAME)
    }
}

/// Existing paths are canonicalized, others made absolute lexically.
fn absolutize(path: &Path) -> Result<PathBuf> {
    if path.exists() {
        return dunce::canonicalize(path).map_err(|e| toast_fs::Error::io(path, e).into());
    }
    std::path::absolute(path).map_err(|e| toast_fs::Error::io(path, e).into())
}

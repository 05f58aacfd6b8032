//! User defaults from `~/.config/wsl-toast/config.toml`
//!
//! ```toml
//! [install]
//! scope = "global"
//! hooks = ["notification", "stop"]
//! local_settings = "untracked"
//! backup = true
//! ```
//!
//! Every key is optional and command-line flags win over the file.

use std::path::{Path, PathBuf};

use serde::Deserialize;
use toast_installer::{HookCategory, InstallConfig, LocalSettings, Scope};
use tracing::debug;

use crate::cli::TargetArgs;
use crate::error::{CliError, Result};

const CONFIG_DIR: &str = "wsl-toast";
const CONFIG_FILE: &str = "config.toml";

#[derive(Debug, Default, Clone, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct UserConfig {
    #[serde(default)]
    pub install: InstallDefaults,
}

#[derive(Debug, Default, Clone, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct InstallDefaults {
    pub scope: Option<Scope>,
    /// Category names, in any form [`HookCategory`] parses.
    pub hooks: Option<Vec<String>>,
    pub local_settings: Option<LocalSettings>,
    pub backup: Option<bool>,
}

impl UserConfig {
    /// Load the config file.
    ///
    /// An explicit path must exist; the default location may be absent.
    pub fn load(explicit: Option<&Path>) -> Result<Self> {
        let path = match explicit {
            Some(path) => path.to_path_buf(),
            None => match default_path() {
                Some(path) if path.is_file() => path,
                _ => return Ok(Self::default()),
            },
        };
        debug!(path = %path.display(), "loading user config");

        let text = std::fs::read_to_string(&path).map_err(|e| CliError::Config {
            path: path.clone(),
            message: e.to_string(),
        })?;
        Self::parse(&text).map_err(|message| CliError::Config { path, message })
    }

    fn parse(text: &str) -> std::result::Result<Self, String> {
        let config: UserConfig = toml::from_str(text).map_err(|e| e.message().to_string())?;
        if let Some(hooks) = &config.install.hooks {
            if hooks.is_empty() {
                return Err("install.hooks must name at least one hook category".to_string());
            }
            for name in hooks {
                name.parse::<HookCategory>().map_err(|e| e.to_string())?;
            }
        }
        Ok(config)
    }

    /// Combine file defaults with command-line target flags.
    pub fn install_config(&self, target: &TargetArgs, hooks: &[HookCategory]) -> InstallConfig {
        let defaults = &self.install;
        let mut config = InstallConfig::default();

        if let Some(scope) = target.scope {
            config.scope = scope.into();
        } else if let Some(scope) = defaults.scope {
            config.scope = scope;
        }

        if target.tracked {
            config.local_settings = LocalSettings::Tracked;
        } else if let Some(local) = defaults.local_settings {
            config.local_settings = local;
        }

        if !hooks.is_empty() {
            config.hooks = hooks.to_vec();
        } else if let Some(names) = &defaults.hooks {
            // Validated in parse()
            config.hooks = names.iter().filter_map(|n| n.parse().ok()).collect();
        }

        if let Some(backup) = defaults.backup {
            config.create_backup = backup;
        }
        config
    }

    /// Whether the file chose the hook list.
    pub fn has_hooks(&self) -> bool {
        self.install.hooks.is_some()
    }
}

fn default_path() -> Option<PathBuf> {
    Some(dirs::config_dir()?.join(CONFIG_DIR).join(CONFIG_FILE))
}

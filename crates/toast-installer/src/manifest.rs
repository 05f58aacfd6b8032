//! Record of a completed installation
//!
//! Stored as `install-manifest.json` inside the install directory. Uninstall
//! reads it best-effort: a missing or broken manifest never blocks removal,
//! because settings entries are found by script path anyway.

use std::cmp::Ordering;
use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::category::HookCategory;
use crate::config::InstallConfig;
use crate::error::{Error, Result};

/// Canonical manifest filename.
pub const MANIFEST_FILENAME: &str = "install-manifest.json";

/// Version of this build, written into new manifests.
pub const CURRENT_VERSION: &str = env!("CARGO_PKG_VERSION");

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InstallManifest {
    pub version: String,
    /// Install selections. Kept as raw JSON so manifests from other
    /// versions still load.
    pub config: serde_json::Value,
    /// Installed filenames, relative to the install directory.
    pub files: Vec<String>,
    /// Settings keys of the installed categories.
    pub hooks_installed: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub installed_at: Option<DateTime<Utc>>,
}

impl InstallManifest {
    pub fn new(config: &InstallConfig, files: Vec<String>) -> Result<Self> {
        Ok(Self {
            version: CURRENT_VERSION.to_string(),
            config: serde_json::to_value(config)?,
            files,
            hooks_installed: config
                .selected_hooks()
                .iter()
                .map(|c| c.settings_key().to_string())
                .collect(),
            installed_at: Some(Utc::now()),
        })
    }

    pub fn path_in(install_dir: &Path) -> PathBuf {
        install_dir.join(MANIFEST_FILENAME)
    }

    /// Load the manifest in `install_dir`. `Ok(None)` if there is none.
    pub fn load(install_dir: &Path) -> Result<Option<Self>> {
        let path = Self::path_in(install_dir);
        let Some(text) = toast_fs::read_optional(&path)? else {
            return Ok(None);
        };
        serde_json::from_str(&text)
            .map(Some)
            .map_err(|e| Error::Manifest {
                path,
                message: e.to_string(),
            })
    }

    /// Like [`load`](Self::load), but any failure is logged and treated as
    /// no manifest.
    pub fn load_best_effort(install_dir: &Path) -> Option<Self> {
        match Self::load(install_dir) {
            Ok(manifest) => manifest,
            Err(e) => {
                warn!(error = %e, "ignoring unreadable install manifest");
                None
            }
        }
    }

    pub fn save(&self, install_dir: &Path) -> Result<()> {
        let path = Self::path_in(install_dir);
        let mut text = serde_json::to_string_pretty(self)?;
        text.push('\n');
        toast_fs::write_atomic_with_mode(&path, text.as_bytes(), Some(0o600))?;
        debug!(path = %path.display(), "manifest saved");
        Ok(())
    }

    /// Installed categories this build recognizes.
    pub fn categories(&self) -> Vec<HookCategory> {
        self.hooks_installed
            .iter()
            .filter_map(|key| HookCategory::from_settings_key(key))
            .collect()
    }

    /// Human-readable note when this build's version differs from the
    /// manifest's. `None` for the same version or an unparsable one.
    pub fn version_change_note(&self) -> Option<String> {
        let previous = match semver::Version::parse(&self.version) {
            Ok(v) => v,
            Err(e) => {
                debug!(version = %self.version, error = %e, "manifest version is not semver");
                return None;
            }
        };
        let current = semver::Version::parse(CURRENT_VERSION).ok()?;
        match previous.cmp(&current) {
            Ordering::Less => Some(format!("Upgrading from {previous} to {current}")),
            Ordering::Greater => Some(format!("Downgrading from {previous} to {current}")),
            Ordering::Equal => None,
        }
    }
}

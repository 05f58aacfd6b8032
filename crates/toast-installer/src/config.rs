//! Install request parameters

use serde::{Deserialize, Serialize};

use crate::category::HookCategory;
use crate::paths::{LocalSettings, Scope};

/// What to install and how.
///
/// The persisted subset (scope, hooks, local settings, backup) is what the
/// manifest records; the run-time switches are skipped on serialization.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InstallConfig {
    #[serde(default)]
    pub scope: Scope,
    #[serde(default = "HookCategory::defaults")]
    pub hooks: Vec<HookCategory>,
    #[serde(default)]
    pub local_settings: LocalSettings,
    #[serde(default = "default_true")]
    pub create_backup: bool,
    /// Compute and report only.
    #[serde(skip)]
    pub dry_run: bool,
    #[serde(skip)]
    pub skip_dependency_check: bool,
}

fn default_true() -> bool {
    true
}

impl Default for InstallConfig {
    fn default() -> Self {
        Self {
            scope: Scope::default(),
            hooks: HookCategory::defaults(),
            local_settings: LocalSettings::default(),
            create_backup: true,
            dry_run: false,
            skip_dependency_check: false,
        }
    }
}

impl InstallConfig {
    /// Selected categories, deduplicated, in canonical order.
    pub fn selected_hooks(&self) -> Vec<HookCategory> {
        let mut hooks = self.hooks.clone();
        hooks.sort();
        hooks.dedup();
        hooks
    }
}

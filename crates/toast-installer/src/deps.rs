//! Environment checks that gate installation
//!
//! Notifications need a WSL kernel, `powershell.exe` reachable through
//! interop, and the BurntToast module on the Windows side. Checks are run
//! fresh each time; nothing is cached.

use std::path::{Path, PathBuf};
use std::process::{Command, Stdio};

use serde::Serialize;
use tracing::debug;

const POWERSHELL: &str = "powershell.exe";
const PROC_VERSION: &str = "/proc/version";

/// Outcome of a single check.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DependencyCheck {
    pub name: String,
    pub passed: bool,
    /// A failed fatal check blocks installation.
    pub fatal: bool,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub remedy: Option<String>,
}

impl DependencyCheck {
    pub fn pass(name: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            passed: true,
            fatal: false,
            message: message.into(),
            remedy: None,
        }
    }

    pub fn fail(
        name: impl Into<String>,
        fatal: bool,
        message: impl Into<String>,
        remedy: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            passed: false,
            fatal,
            message: message.into(),
            remedy: Some(remedy.into()),
        }
    }

    pub fn is_blocking(&self) -> bool {
        self.fatal && !self.passed
    }
}

/// Source of dependency checks for the installer.
pub trait DependencyChecker {
    fn check(&self) -> Vec<DependencyCheck>;
}

/// Fixed results, for callers that probe elsewhere and for tests.
#[derive(Debug, Clone, Default)]
pub struct StaticChecker(pub Vec<DependencyCheck>);

impl DependencyChecker for StaticChecker {
    fn check(&self) -> Vec<DependencyCheck> {
        self.0.clone()
    }
}

/// Probes the running system.
#[derive(Debug, Clone, Default)]
pub struct SystemChecker;

impl DependencyChecker for SystemChecker {
    fn check(&self) -> Vec<DependencyCheck> {
        let powershell = find_on_path(POWERSHELL);
        vec![
            check_wsl(Path::new(PROC_VERSION)),
            check_powershell(powershell.as_deref()),
            check_burnt_toast(powershell.as_deref()),
            check_wslpath(),
        ]
    }
}

fn check_wsl(proc_version: &Path) -> DependencyCheck {
    const NAME: &str = "wsl";
    match std::fs::read_to_string(proc_version) {
        Ok(text) if text.to_lowercase().contains("microsoft") => {
            DependencyCheck::pass(NAME, "Running under WSL")
        }
        Ok(_) => DependencyCheck::fail(
            NAME,
            true,
            "Not running under WSL",
            "Run wsl-toast from inside a WSL distribution",
        ),
        Err(e) => DependencyCheck::fail(
            NAME,
            true,
            format!("Could not read {}: {e}", proc_version.display()),
            "Run wsl-toast from inside a WSL distribution",
        ),
    }
}

fn check_powershell(found: Option<&Path>) -> DependencyCheck {
    const NAME: &str = "powershell";
    match found {
        Some(path) => DependencyCheck::pass(NAME, format!("Found {}", path.display())),
        None => DependencyCheck::fail(
            NAME,
            true,
            format!("{POWERSHELL} not found on PATH"),
            "Enable Windows interop and make sure the Windows PATH is appended in /etc/wsl.conf",
        ),
    }
}

fn check_burnt_toast(powershell: Option<&Path>) -> DependencyCheck {
    const NAME: &str = "burnttoast";
    const REMEDY: &str =
        "Install it from Windows PowerShell: Install-Module -Name BurntToast -Scope CurrentUser";

    let Some(powershell) = powershell else {
        return DependencyCheck::fail(NAME, true, "Skipped: PowerShell unavailable", REMEDY);
    };

    let output = Command::new(powershell)
        .args([
            "-NoProfile",
            "-Command",
            "Get-Module -ListAvailable BurntToast",
        ])
        .stdin(Stdio::null())
        .output();

    match output {
        Ok(out) if out.status.success() && !out.stdout.trim_ascii().is_empty() => {
            DependencyCheck::pass(NAME, "BurntToast module is available")
        }
        Ok(out) => {
            debug!(status = %out.status, "BurntToast probe found nothing");
            DependencyCheck::fail(NAME, true, "BurntToast module not found", REMEDY)
        }
        Err(e) => DependencyCheck::fail(
            NAME,
            true,
            format!("Could not run {POWERSHELL}: {e}"),
            REMEDY,
        ),
    }
}

fn check_wslpath() -> DependencyCheck {
    const NAME: &str = "wslpath";
    match find_on_path(NAME) {
        Some(path) => DependencyCheck::pass(NAME, format!("Found {}", path.display())),
        None => DependencyCheck::fail(
            NAME,
            false,
            "wslpath not found; script paths are passed to Windows unconverted",
            "wslpath ships with WSL; check that /usr/bin is on PATH",
        ),
    }
}

/// First executable named `tool` in `PATH`.
fn find_on_path(tool: &str) -> Option<PathBuf> {
    let path_var = std::env::var_os("PATH")?;
    std::env::split_paths(&path_var)
        .map(|dir| dir.join(tool))
        .find(|candidate| candidate.is_file())
}

//! [`TestEnv`]: scratch home and project directories.
//!
//! Installer and CLI tests point their home at [`TestEnv::home`] so nothing
//! ever touches the real `~/.claude`.

use std::fs;
use std::path::{Path, PathBuf};

use tempfile::TempDir;

/// A temporary directory holding `home/` and `project/` subdirectories.
pub struct TestEnv {
    temp_dir: TempDir,
}

impl Default for TestEnv {
    fn default() -> Self {
        Self::new()
    }
}

impl TestEnv {
    /// Create the temp directory with empty `home/` and `project/`.
    pub fn new() -> Self {
        let temp_dir = TempDir::new().unwrap();
        fs::create_dir(temp_dir.path().join("home")).unwrap();
        fs::create_dir(temp_dir.path().join("project")).unwrap();
        Self { temp_dir }
    }

    pub fn root(&self) -> &Path {
        self.temp_dir.path()
    }

    pub fn home(&self) -> PathBuf {
        self.root().join("home")
    }

    pub fn project(&self) -> PathBuf {
        self.root().join("project")
    }

    /// `~/.claude/settings.json` under the fake home.
    pub fn global_settings(&self) -> PathBuf {
        self.home().join(".claude/settings.json")
    }

    /// Project settings file, tracked or untracked variant.
    pub fn local_settings(&self, tracked: bool) -> PathBuf {
        let name = if tracked {
            "settings.json"
        } else {
            "settings.local.json"
        };
        self.project().join(".claude").join(name)
    }

    pub fn global_install_dir(&self) -> PathBuf {
        self.home().join(".claude/hooks/wsl-toast")
    }

    pub fn local_install_dir(&self) -> PathBuf {
        self.project().join(".claude/hooks/wsl-toast")
    }

    /// Write `content` to `path`, creating parent directories.
    ///
    /// # Panics
    /// Panics if the filesystem operations fail.
    pub fn write(&self, path: &Path, content: &str) {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)
                .unwrap_or_else(|e| panic!("TestEnv::write: failed to create {parent:?}: {e}"));
        }
        fs::write(path, content)
            .unwrap_or_else(|e| panic!("TestEnv::write: failed to write {path:?}: {e}"));
    }

    /// Parse `path` as strict JSON.
    ///
    /// # Panics
    /// Panics if the file cannot be read or is not valid JSON.
    pub fn read_json(&self, path: &Path) -> serde_json::Value {
        let text = fs::read_to_string(path)
            .unwrap_or_else(|e| panic!("Could not read file {}: {e}", path.display()));
        serde_json::from_str(&text)
            .unwrap_or_else(|e| panic!("File {} is not valid JSON: {e}", path.display()))
    }

    /// Sorted names of the entries in `dir`. Empty if `dir` is missing.
    pub fn entries(&self, dir: &Path) -> Vec<String> {
        let Ok(read) = fs::read_dir(dir) else {
            return Vec::new();
        };
        let mut names: Vec<String> = read
            .map(|e| e.unwrap().file_name().to_string_lossy().into_owned())
            .collect();
        names.sort();
        names
    }

    /// Assert that `path` exists.
    ///
    /// # Panics
    /// Panics with a descriptive message if the path does not exist.
    pub fn assert_exists(&self, path: &Path) {
        assert!(path.exists(), "Expected path to exist: {}", path.display());
    }

    /// Assert that `path` does **not** exist.
    ///
    /// # Panics
    /// Panics with a descriptive message if the path exists.
    pub fn assert_not_exists(&self, path: &Path) {
        assert!(
            !path.exists(),
            "Expected path NOT to exist: {}",
            path.display()
        );
    }
}

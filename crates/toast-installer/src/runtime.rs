//! Files copied into the install directory
//!
//! Their bytes are compiled in so the binary is the only thing users need.

use std::path::Path;

use tracing::debug;

use crate::error::Result;

/// Name of the script the hook commands point at.
pub const SCRIPT_NAME: &str = "notify.sh";

/// One embedded file and the permissions it is installed with.
#[derive(Debug, Clone, Copy)]
pub struct RuntimeFile {
    pub name: &'static str,
    pub contents: &'static str,
    pub mode: u32,
}

pub const RUNTIME_FILES: &[RuntimeFile] = &[
    RuntimeFile {
        name: SCRIPT_NAME,
        contents: include_str!("../assets/notify.sh"),
        mode: 0o700,
    },
    RuntimeFile {
        name: "toast.ps1",
        contents: include_str!("../assets/toast.ps1"),
        mode: 0o600,
    },
];

/// Names of all runtime files, in install order.
pub fn runtime_file_names() -> Vec<String> {
    RUNTIME_FILES.iter().map(|f| f.name.to_string()).collect()
}

/// Write every runtime file into `dir`, replacing older copies atomically.
pub fn write_runtime_files(dir: &Path) -> Result<Vec<String>> {
    let mut written = Vec::with_capacity(RUNTIME_FILES.len());
    for file in RUNTIME_FILES {
        let path = dir.join(file.name);
        toast_fs::write_atomic_with_mode(&path, file.contents.as_bytes(), Some(file.mode))?;
        debug!(path = %path.display(), mode = format!("{:o}", file.mode), "runtime file written");
        written.push(file.name.to_string());
    }
    Ok(written)
}

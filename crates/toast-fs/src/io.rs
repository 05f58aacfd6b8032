//! Atomic I/O operations
//!
//! Every write goes to a sibling temp file, is flushed to stable storage,
//! then renamed over the target. Readers see either the old or the new
//! content, never a partial write. There is no locking: when two processes
//! race on the same target, the last rename wins.
//!
//! A symlinked target is resolved first so the rename replaces the file the
//! link points at and the link itself survives. An existing target's
//! permissions carry over to the replacement unless a mode is given.

use std::fs::{self, File, OpenOptions};
use std::io::{ErrorKind, Write};
use std::path::{Path, PathBuf};

use tracing::{debug, warn};

use crate::{Error, Result};

const MAX_SYMLINK_HOPS: usize = 40;

/// Read a UTF-8 file, returning `None` when it does not exist.
///
/// Any other failure (permissions, invalid UTF-8, I/O) is an error.
pub fn read_optional(path: &Path) -> Result<Option<String>> {
    match fs::read_to_string(path) {
        Ok(content) => Ok(Some(content)),
        Err(e) if e.kind() == ErrorKind::NotFound => {
            debug!(path = %path.display(), "file absent, treating as empty");
            Ok(None)
        }
        Err(e) => Err(Error::io(path, e)),
    }
}

/// Temp file path used when atomically writing `path`.
///
/// Lives in the same directory so the final rename never crosses a
/// filesystem boundary. Scoped by process id so two concurrent processes
/// never write into each other's temp file; an interrupted run leaves at
/// most one orphan per pid, which the next write from that pid replaces.
pub fn temp_path_for(path: &Path) -> Result<PathBuf> {
    let file_name = path
        .file_name()
        .ok_or_else(|| Error::invalid_path(path, "path has no file name"))?;
    let temp_name = format!(
        ".{}.{}.tmp",
        file_name.to_string_lossy(),
        std::process::id()
    );
    Ok(path.with_file_name(temp_name))
}

/// Write content atomically to a file.
///
/// Creates the parent directory if needed.
pub fn write_atomic(path: &Path, content: &[u8]) -> Result<()> {
    write_atomic_with_mode(path, content, None)
}

/// Follow symlinks at `path` to the file a write should land on.
///
/// A dangling link resolves to its (missing) destination, so the first write
/// creates the file behind the link. A non-link path is returned unchanged.
pub fn resolve_symlinks(path: &Path) -> Result<PathBuf> {
    let mut current = path.to_path_buf();
    for _ in 0..MAX_SYMLINK_HOPS {
        match fs::symlink_metadata(&current) {
            Ok(meta) if meta.file_type().is_symlink() => {
                let link = fs::read_link(&current).map_err(|e| Error::io(&current, e))?;
                current = match current.parent() {
                    Some(parent) => parent.join(link),
                    None => link,
                };
            }
            Ok(_) => return Ok(current),
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(current),
            Err(e) => return Err(Error::io(&current, e)),
        }
    }
    Err(Error::invalid_path(path, "too many levels of symbolic links"))
}

/// Write content atomically, applying Unix permission bits to the result.
///
/// With `mode` unset, an existing target keeps its permissions. `mode` is
/// ignored on non-Unix platforms.
pub fn write_atomic_with_mode(path: &Path, content: &[u8], mode: Option<u32>) -> Result<()> {
    let resolved = resolve_symlinks(path)?;
    if resolved != path {
        debug!(link = %path.display(), target_path = %resolved.display(), "writing through symlink");
    }
    let path = resolved.as_path();

    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent).map_err(|e| Error::io(parent, e))?;
    }

    let temp_path = temp_path_for(path)?;
    debug!(target_path = %path.display(), temp = %temp_path.display(), "writing temp file");

    if let Err(err) = write_and_rename(&temp_path, path, content, mode) {
        // Cleanup must never mask the original failure
        if let Err(cleanup) = fs::remove_file(&temp_path)
            && cleanup.kind() != ErrorKind::NotFound
        {
            warn!(
                temp = %temp_path.display(),
                error = %cleanup,
                "failed to remove temp file after write error"
            );
        }
        return Err(err);
    }

    Ok(())
}

fn write_and_rename(temp_path: &Path, path: &Path, content: &[u8], mode: Option<u32>) -> Result<()> {
    let mut temp_file = OpenOptions::new()
        .write(true)
        .create(true)
        .truncate(true)
        .open(temp_path)
        .map_err(|e| Error::io(temp_path, e))?;

    temp_file
        .write_all(content)
        .map_err(|e| Error::io(temp_path, e))?;

    match mode {
        Some(mode) => set_mode(&temp_file, temp_path, mode)?,
        None => match fs::metadata(path) {
            Ok(meta) => temp_file
                .set_permissions(meta.permissions())
                .map_err(|e| Error::io(temp_path, e))?,
            Err(e) if e.kind() == ErrorKind::NotFound => {}
            Err(e) => return Err(Error::io(path, e)),
        },
    }

    // Flush to disk before the rename, otherwise a crash could leave the
    // renamed file empty
    temp_file.sync_all().map_err(|e| Error::io(temp_path, e))?;
    drop(temp_file);

    fs::rename(temp_path, path).map_err(|e| Error::io(path, e))?;
    Ok(())
}

#[cfg(unix)]
fn set_mode(file: &File, path: &Path, mode: u32) -> Result<()> {
    use std::os::unix::fs::PermissionsExt;
    file.set_permissions(fs::Permissions::from_mode(mode))
        .map_err(|e| Error::io(path, e))
}

#[cfg(not(unix))]
fn set_mode(_file: &File, _path: &Path, _mode: u32) -> Result<()> {
    Ok(())
}

/// Create a directory (and parents), restricting the leaf to `mode` on Unix.
pub fn create_private_dir(path: &Path, mode: u32) -> Result<()> {
    fs::create_dir_all(path).map_err(|e| Error::io(path, e))?;
    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;
        fs::set_permissions(path, fs::Permissions::from_mode(mode))
            .map_err(|e| Error::io(path, e))?;
    }
    #[cfg(not(unix))]
    let _ = mode;
    Ok(())
}

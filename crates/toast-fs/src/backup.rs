//! Timestamped backups of files about to be overwritten
//!
//! Backups sit next to the original as `<file>.backup.<timestamp>`, where the
//! timestamp is UTC with microsecond resolution so names sort chronologically.
//! A same-microsecond collision gets a zero-padded `-NNN` counter suffix.
//! Backups carry the original's permission bits.

use std::fs::{self, OpenOptions};
use std::io::{ErrorKind, Write};
use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};
use tracing::{debug, info, warn};

use crate::{Error, Result};

const BACKUP_MARKER: &str = ".backup.";
const TIMESTAMP_FORMAT: &str = "%Y%m%dT%H%M%S%.6fZ";
const MAX_COLLISIONS: u32 = 1000;

/// Backup path for `path` at `when`, before collision handling.
pub fn backup_path_for(path: &Path, when: DateTime<Utc>) -> Result<PathBuf> {
    let file_name = path
        .file_name()
        .ok_or_else(|| Error::invalid_path(path, "path has no file name"))?;
    let name = format!(
        "{}{}{}",
        file_name.to_string_lossy(),
        BACKUP_MARKER,
        when.format(TIMESTAMP_FORMAT)
    );
    Ok(path.with_file_name(name))
}

/// Copy `path` to a fresh backup file.
///
/// Returns `Ok(None)` when there is nothing to back up. The backup name is
/// claimed with `create_new`, so concurrent callers never share a file.
pub fn create_backup(path: &Path) -> Result<Option<PathBuf>> {
    create_backup_at(path, Utc::now())
}

/// [`create_backup`] with the timestamp fixed to `when`.
pub fn create_backup_at(path: &Path, when: DateTime<Utc>) -> Result<Option<PathBuf>> {
    let bytes = match fs::read(path) {
        Ok(bytes) => bytes,
        Err(e) if e.kind() == ErrorKind::NotFound => return Ok(None),
        Err(e) => return Err(Error::io(path, e)),
    };
    let permissions = fs::metadata(path)
        .map_err(|e| Error::io(path, e))?
        .permissions();

    let base = backup_path_for(path, when)?;
    for attempt in 0..MAX_COLLISIONS {
        let candidate = if attempt == 0 {
            base.clone()
        } else {
            let mut name = base.as_os_str().to_os_string();
            name.push(format!("-{attempt:03}"));
            PathBuf::from(name)
        };

        let mut file = match OpenOptions::new()
            .write(true)
            .create_new(true)
            .open(&candidate)
        {
            Ok(file) => file,
            Err(e) if e.kind() == ErrorKind::AlreadyExists => continue,
            Err(e) => return Err(Error::io(&candidate, e)),
        };

        let written = file
            .set_permissions(permissions.clone())
            .and_then(|()| file.write_all(&bytes))
            .and_then(|()| file.sync_all());
        if let Err(e) = written {
            drop(file);
            if let Err(cleanup) = fs::remove_file(&candidate) {
                warn!(
                    backup = %candidate.display(),
                    error = %cleanup,
                    "failed to remove partial backup"
                );
            }
            return Err(Error::io(&candidate, e));
        }

        info!(backup = %candidate.display(), "created backup");
        return Ok(Some(candidate));
    }

    Err(Error::BackupNamesExhausted {
        path: path.to_path_buf(),
        attempts: MAX_COLLISIONS,
    })
}

/// Existing backups of `path`, oldest first.
pub fn list_backups(path: &Path) -> Result<Vec<PathBuf>> {
    let Some(file_name) = path.file_name() else {
        return Err(Error::invalid_path(path, "path has no file name"));
    };
    let prefix = format!("{}{}", file_name.to_string_lossy(), BACKUP_MARKER);
    let dir = match path.parent() {
        Some(p) if !p.as_os_str().is_empty() => p,
        _ => Path::new("."),
    };

    let entries = match fs::read_dir(dir) {
        Ok(entries) => entries,
        Err(e) if e.kind() == ErrorKind::NotFound => return Ok(Vec::new()),
        Err(e) => return Err(Error::io(dir, e)),
    };

    let mut backups = Vec::new();
    for entry in entries {
        let entry = entry.map_err(|e| Error::io(dir, e))?;
        let name = entry.file_name();
        if name.to_string_lossy().starts_with(&prefix) {
            backups.push(entry.path());
        }
    }
    backups.sort();
    Ok(backups)
}

/// Delete all but the newest `keep` backups of `path`.
///
/// Returns the removed paths.
pub fn prune_backups(path: &Path, keep: usize) -> Result<Vec<PathBuf>> {
    let backups = list_backups(path)?;
    let excess = backups.len().saturating_sub(keep);
    let mut removed = Vec::with_capacity(excess);

    for old in backups.into_iter().take(excess) {
        fs::remove_file(&old).map_err(|e| Error::io(&old, e))?;
        debug!(backup = %old.display(), "pruned backup");
        removed.push(old);
    }

    Ok(removed)
}

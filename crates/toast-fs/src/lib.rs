//! Filesystem primitives for wsl-toast
//!
//! Provides the atomic write-to-temp-then-rename protocol used for every
//! settings and runtime-file write, plus timestamped backups.

pub mod backup;
pub mod error;
pub mod io;

pub use backup::{backup_path_for, create_backup, create_backup_at, list_backups, prune_backups};
pub use error::{Error, Result};
pub use io::{
    create_private_dir, read_optional, resolve_symlinks, temp_path_for, write_atomic, write_atomic_with_mode,
};

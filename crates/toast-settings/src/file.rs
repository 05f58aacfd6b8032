//! Read-modify-write of settings files
//!
//! [`transform_file`] is the single path through which a settings file is
//! mutated: read (absent means `{}`), parse and validate, compute the new
//! document, compare canonical serializations, optionally back up, then
//! write atomically. An unchanged document means no filesystem writes at all,
//! so a file that only differs by comments or formatting is left as is.

use std::path::{Path, PathBuf};

use similar::TextDiff;
use tracing::{debug, info};

use crate::ConfigDocument;
use crate::error::Result;
use crate::jsonc::parse_settings;
use crate::merge::{MergeOptions, merge};

/// Outcome of a merge or transform.
#[derive(Debug, Clone, PartialEq)]
pub struct MergeResult {
    pub merged: ConfigDocument,
    /// True iff the canonical serialization changed; governs the write.
    pub changed: bool,
    pub backup_path: Option<PathBuf>,
    /// Whether the file existed before the operation.
    pub existed: bool,
}

/// A computed but unwritten transform.
#[derive(Debug, Clone, PartialEq)]
pub struct Preview {
    pub result: MergeResult,
    /// Unified diff between the file as it is and as it would be written.
    pub diff: String,
}

/// Canonical text form: two-space indentation, insertion key order,
/// trailing newline.
pub fn to_canonical_string(doc: &ConfigDocument) -> Result<String> {
    let mut text = serde_json::to_string_pretty(doc)?;
    text.push('\n');
    Ok(text)
}

/// Read and validate a settings file. `Ok(None)` if it does not exist.
pub fn read_settings(path: &Path) -> Result<Option<ConfigDocument>> {
    Ok(load(path)?.map(|(doc, _)| doc))
}

/// Deep-merge `updates` into the file at `path`.
pub fn merge_file(
    path: &Path,
    updates: &ConfigDocument,
    options: &MergeOptions,
) -> Result<MergeResult> {
    transform_file(path, options, |current| Ok(merge(current, updates, options)))
}

/// Apply `f` to the current document and persist the result if it changed.
///
/// Only `options.create_backup` is consulted here. A malformed existing file
/// is an error and is never overwritten.
pub fn transform_file<F>(path: &Path, options: &MergeOptions, f: F) -> Result<MergeResult>
where
    F: FnOnce(&ConfigDocument) -> Result<ConfigDocument>,
{
    let plan = plan(path, f)?;
    if !plan.result.changed {
        debug!(path = %path.display(), "settings unchanged, skipping write");
        return Ok(plan.result);
    }

    let mut result = plan.result;
    if options.create_backup && result.existed {
        result.backup_path = toast_fs::create_backup(path)?;
    }

    toast_fs::write_atomic(path, plan.new_text.as_bytes())?;
    info!(path = %path.display(), "settings written");
    Ok(result)
}

/// Compute what [`transform_file`] would do, without touching the disk.
pub fn preview_file<F>(path: &Path, f: F) -> Result<Preview>
where
    F: FnOnce(&ConfigDocument) -> Result<ConfigDocument>,
{
    let plan = plan(path, f)?;
    let diff = if plan.result.changed {
        let old_label = path.display().to_string();
        let new_label = format!("{old_label} (new)");
        TextDiff::from_lines(plan.original_text.as_str(), plan.new_text.as_str())
            .unified_diff()
            .context_radius(3)
            .header(&old_label, &new_label)
            .to_string()
    } else {
        String::new()
    };
    Ok(Preview {
        result: plan.result,
        diff,
    })
}

struct Plan {
    result: MergeResult,
    original_text: String,
    new_text: String,
}

fn plan<F>(path: &Path, f: F) -> Result<Plan>
where
    F: FnOnce(&ConfigDocument) -> Result<ConfigDocument>,
{
    let (current, original_text) = match load(path)? {
        Some((doc, text)) => (Some(doc), text),
        None => (None, String::new()),
    };
    let existed = current.is_some();
    let current = current.unwrap_or_default();

    let merged = f(&current)?;
    let current_text = to_canonical_string(&current)?;
    let new_text = to_canonical_string(&merged)?;
    let changed = current_text != new_text;

    Ok(Plan {
        result: MergeResult {
            merged,
            changed,
            backup_path: None,
            existed,
        },
        original_text,
        new_text,
    })
}

/// Parsed document and raw text of an existing file.
///
/// A file holding only whitespace counts as an empty document.
fn load(path: &Path) -> Result<Option<(ConfigDocument, String)>> {
    let Some(text) = toast_fs::read_optional(path)? else {
        return Ok(None);
    };
    if text.trim().is_empty() {
        debug!(path = %path.display(), "settings file is blank");
        return Ok(Some((ConfigDocument::new(), text)));
    }
    let doc = parse_settings(&text).map_err(|e| e.with_path(path))?;
    Ok(Some((doc, text)))
}

//! Hook command management
//!
//! A settings document keeps hook commands under `hooks.<category>` as an
//! array. Adding goes through [`merge`] so that installing twice yields the
//! same document as installing once. Removal deletes emptied categories and
//! an emptied `hooks` object so uninstalls leave no scaffolding behind.

use serde_json::{Map, Value};

use crate::ConfigDocument;
use crate::merge::{MergeOptions, merge};

/// Top-level key holding the hook categories.
pub const HOOKS_KEY: &str = "hooks";

/// Ensure each `(category, command)` pair is present exactly once.
///
/// New commands are appended after existing entries. Other categories and
/// other entries are left as they are, including pre-existing duplicates.
/// No pairs means no change: an empty `hooks` object is never added.
pub fn merge_hook_commands<I, C, S>(existing: &ConfigDocument, hook_commands: I) -> ConfigDocument
where
    I: IntoIterator<Item = (C, S)>,
    C: Into<String>,
    S: Into<String>,
{
    let mut categories = Map::new();
    for (category, command) in hook_commands {
        let entry = categories
            .entry(category.into())
            .or_insert_with(|| Value::Array(Vec::new()));
        if let Value::Array(commands) = entry {
            let command = Value::String(command.into());
            if !commands.contains(&command) {
                commands.push(command);
            }
        }
    }

    if categories.is_empty() {
        return existing.clone();
    }

    let mut update = ConfigDocument::new();
    update.insert(HOOKS_KEY.to_string(), Value::Object(categories));
    merge(existing, &update, &MergeOptions::default())
}

/// Whether `category` contains exactly `command`.
///
/// A missing `hooks` object or category is simply `false`.
pub fn has_hook_command(doc: &ConfigDocument, category: &str, command: &str) -> bool {
    category_entries(doc, category)
        .is_some_and(|entries| entries.iter().any(|e| e.as_str() == Some(command)))
}

/// Remove the first exact match of `command` from `category`.
pub fn remove_hook_command(doc: &ConfigDocument, category: &str, command: &str) -> ConfigDocument {
    let mut result = doc.clone();
    let Some(categories) = result.get_mut(HOOKS_KEY).and_then(Value::as_object_mut) else {
        return result;
    };

    if let Some(entries) = categories.get_mut(category).and_then(Value::as_array_mut)
        && let Some(idx) = entries.iter().position(|e| e.as_str() == Some(command))
    {
        entries.remove(idx);
    }

    prune_empty(&mut result, &[category]);
    result
}

/// Remove every string entry, in any category, for which `matches` holds.
///
/// Returns the new document and the removed `(category, command)` pairs.
/// Categories emptied by the removal are deleted, as is an emptied `hooks`.
pub fn remove_hook_commands_where<F>(
    doc: &ConfigDocument,
    mut matches: F,
) -> (ConfigDocument, Vec<(String, String)>)
where
    F: FnMut(&str, &str) -> bool,
{
    let mut result = doc.clone();
    let mut removed = Vec::new();
    let mut touched = Vec::new();

    if let Some(categories) = result.get_mut(HOOKS_KEY).and_then(Value::as_object_mut) {
        for (category, entries) in categories.iter_mut() {
            let Some(entries) = entries.as_array_mut() else {
                continue;
            };
            let before = entries.len();
            entries.retain(|entry| match entry.as_str() {
                Some(command) if matches(category, command) => {
                    removed.push((category.clone(), command.to_string()));
                    false
                }
                _ => true,
            });
            if entries.len() != before {
                touched.push(category.clone());
            }
        }
    }

    let touched: Vec<&str> = touched.iter().map(String::as_str).collect();
    prune_empty(&mut result, &touched);
    (result, removed)
}

/// All string commands, as `(category, command)` pairs in document order.
pub fn hook_commands(doc: &ConfigDocument) -> Vec<(String, String)> {
    let Some(categories) = doc.get(HOOKS_KEY).and_then(Value::as_object) else {
        return Vec::new();
    };
    categories
        .iter()
        .filter_map(|(category, entries)| Some((category, entries.as_array()?)))
        .flat_map(|(category, entries)| {
            entries
                .iter()
                .filter_map(Value::as_str)
                .map(move |command| (category.clone(), command.to_string()))
        })
        .collect()
}

fn category_entries<'a>(doc: &'a ConfigDocument, category: &str) -> Option<&'a Vec<Value>> {
    doc.get(HOOKS_KEY)?.as_object()?.get(category)?.as_array()
}

/// Drop the listed categories if their arrays are empty, then drop `hooks`
/// if it became empty.
fn prune_empty(doc: &mut ConfigDocument, categories: &[&str]) {
    let Some(hooks) = doc.get_mut(HOOKS_KEY).and_then(Value::as_object_mut) else {
        return;
    };
    for category in categories {
        if hooks
            .get(*category)
            .and_then(Value::as_array)
            .is_some_and(Vec::is_empty)
        {
            hooks.shift_remove(*category);
        }
    }
    if hooks.is_empty() {
        doc.shift_remove(HOOKS_KEY);
    }
}

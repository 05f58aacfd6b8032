//! Deep merge of settings documents
//!
//! Objects merge key by key, arrays concatenate, and for everything else the
//! update wins. Keys absent from the update are never removed, which is what
//! makes repeated installs converge instead of drifting.

use serde_json::Value;

use crate::ConfigDocument;

/// Merge and write switches.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MergeOptions {
    /// Skip update array elements already present in the result.
    pub deduplicate_arrays: bool,
    /// Append update array elements after base elements. When false the
    /// new elements are placed *before* the base elements.
    pub preserve_order: bool,
    /// Copy the pre-merge file to a timestamped backup before writing.
    /// Only consulted by the file layer.
    pub create_backup: bool,
}

impl Default for MergeOptions {
    fn default() -> Self {
        Self {
            deduplicate_arrays: true,
            preserve_order: true,
            create_backup: false,
        }
    }
}

impl MergeOptions {
    pub fn with_backup(mut self, create_backup: bool) -> Self {
        self.create_backup = create_backup;
        self
    }
}

/// Merge `update` into `base`, returning a new document.
///
/// Base key order is kept; keys new in `update` are appended in update order.
pub fn merge(
    base: &ConfigDocument,
    update: &ConfigDocument,
    options: &MergeOptions,
) -> ConfigDocument {
    let mut merged = base.clone();
    for (key, update_value) in update {
        let value = match merged.get(key) {
            Some(base_value) => merge_value(base_value, update_value, options),
            None => update_value.clone(),
        };
        merged.insert(key.clone(), value);
    }
    merged
}

fn merge_value(base: &Value, update: &Value, options: &MergeOptions) -> Value {
    match (base, update) {
        (Value::Object(b), Value::Object(u)) => Value::Object(merge(b, u, options)),
        (Value::Array(b), Value::Array(u)) => Value::Array(merge_arrays(b, u, options)),
        _ => update.clone(),
    }
}

fn merge_arrays(base: &[Value], update: &[Value], options: &MergeOptions) -> Vec<Value> {
    let mut added: Vec<Value> = Vec::new();
    for element in update {
        if element.is_null() {
            continue;
        }
        if options.deduplicate_arrays && (base.contains(element) || added.contains(element)) {
            continue;
        }
        added.push(element.clone());
    }

    if options.preserve_order {
        base.iter().cloned().chain(added).collect()
    } else {
        added.into_iter().chain(base.iter().cloned()).collect()
    }
}

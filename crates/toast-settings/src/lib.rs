//! Settings engine for wsl-toast
//!
//! Reads a JSON settings file that may carry `//` and `/* */` comments,
//! merges hook command entries into it and writes it back atomically.
//!
//! # Layers
//!
//! - [`jsonc`] - comment-tolerant parsing with line/column-accurate errors
//! - [`merge`] - pure deep merge of two documents
//! - [`file`] - read, merge, compare, back up and atomically persist
//! - [`hooks`] - add, detect and remove command strings per hook category

pub mod error;
pub mod file;
pub mod hooks;
pub mod jsonc;
pub mod merge;

pub use error::{Error, Result};
pub use file::{
    MergeResult, Preview, merge_file, preview_file, read_settings, to_canonical_string,
    transform_file,
};
pub use hooks::{
    HOOKS_KEY, has_hook_command, hook_commands, merge_hook_commands, remove_hook_command,
    remove_hook_commands_where,
};
pub use jsonc::{ParseError, ParseErrorKind, ParseOptions, ParseOutcome, parse, parse_settings};
pub use merge::{MergeOptions, merge};

/// A parsed settings document: an insertion-ordered JSON object.
pub type ConfigDocument = serde_json::Map<String, serde_json::Value>;

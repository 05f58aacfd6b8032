//! Comment-tolerant JSON parsing
//!
//! Settings files are JSON that users sometimes annotate with `//` line
//! comments and `/* */` block comments. Comments are removed by a small
//! state machine that tracks string literals, so `"http://x"` and
//! `"/* not a comment */"` survive untouched. Newlines inside removed
//! comments are kept, and a segment map translates positions in the
//! stripped text back to the original, so reported line/column values
//! always point into the file the user wrote.

use std::fmt;

use serde_json::Value;

use crate::ConfigDocument;
use crate::error::{Error, Result};
use crate::hooks::HOOKS_KEY;

/// What went wrong while parsing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParseErrorKind {
    /// A `/*` with no matching `*/` before end of input
    UnterminatedComment,
    /// The comment-stripped text is not valid JSON
    Syntax,
}

impl fmt::Display for ParseErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::UnterminatedComment => write!(f, "Unterminated multi-line comment"),
            Self::Syntax => write!(f, "JSON syntax error"),
        }
    }
}

/// A located parse failure.
///
/// `line` and `column` are 1-based, `column` counts characters.
/// `offset` is the 0-based byte offset into the original text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseError {
    pub kind: ParseErrorKind,
    pub message: String,
    pub line: usize,
    pub column: usize,
    pub offset: usize,
}

impl fmt::Display for ParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} at line {}, column {}",
            self.message, self.line, self.column
        )
    }
}

impl std::error::Error for ParseError {}

/// Parser switches.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ParseOptions {
    /// Scan for comments at all. When false, any comment surfaces as a
    /// JSON syntax error.
    pub allow_comments: bool,
    /// Remove detected comments. When false, comments are still scanned
    /// (an unterminated block is reported) but left in place.
    pub strip_comments: bool,
}

impl Default for ParseOptions {
    fn default() -> Self {
        Self {
            allow_comments: true,
            strip_comments: true,
        }
    }
}

/// Best-effort parse result. `data` is empty whenever parsing failed.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ParseOutcome {
    pub data: ConfigDocument,
    pub errors: Vec<ParseError>,
}

impl ParseOutcome {
    pub fn is_ok(&self) -> bool {
        self.errors.is_empty()
    }
}

/// Parse JSONC text. Never fails; callers must inspect `errors`.
///
/// A top-level value that is valid JSON but not an object yields empty
/// `data` and no error here; [`parse_settings`] rejects it.
pub fn parse(text: &str, options: &ParseOptions) -> ParseOutcome {
    let stripped = if options.allow_comments {
        strip_comments(text, options.strip_comments)
    } else {
        Stripped::verbatim(text)
    };

    let mut errors = stripped.errors.clone();
    let data = match serde_json::from_str::<Value>(&stripped.text) {
        Ok(Value::Object(map)) if errors.is_empty() => map,
        Ok(_) => ConfigDocument::new(),
        Err(e) => {
            errors.push(stripped.syntax_error(text, &e));
            ConfigDocument::new()
        }
    };

    ParseOutcome { data, errors }
}

/// Parse and validate a settings document, failing on any problem.
pub fn parse_settings(text: &str) -> Result<ConfigDocument> {
    let stripped = strip_comments(text, true);
    if !stripped.errors.is_empty() {
        return Err(Error::Parse {
            path: None,
            errors: stripped.errors,
        });
    }

    let value: Value = serde_json::from_str(&stripped.text).map_err(|e| Error::Parse {
        path: None,
        errors: vec![stripped.syntax_error(text, &e)],
    })?;

    validate_settings(value)
}

/// Check the shape the hook manager relies on.
///
/// The root must be an object; `hooks`, when present, must be an object
/// whose values are arrays.
pub fn validate_settings(value: Value) -> Result<ConfigDocument> {
    let root = match value {
        Value::Object(root) => root,
        other => {
            return Err(Error::validation(format!(
                "top level must be an object, found {}",
                type_name(&other)
            )));
        }
    };

    if let Some(hooks) = root.get(HOOKS_KEY) {
        let Some(categories) = hooks.as_object() else {
            return Err(Error::validation(format!(
                "\"{HOOKS_KEY}\" must be an object, found {}",
                type_name(hooks)
            )));
        };
        for (category, entries) in categories {
            if !entries.is_array() {
                return Err(Error::validation(format!(
                    "\"{HOOKS_KEY}.{category}\" must be an array, found {}",
                    type_name(entries)
                )));
            }
        }
    }

    Ok(root)
}

fn type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

/// Comment-stripped text plus the data needed to map positions back.
#[derive(Debug)]
struct Stripped {
    text: String,
    errors: Vec<ParseError>,
    /// `(stripped_offset, original_offset)` pairs, ascending. Each marks a
    /// point from which the two texts advance byte for byte.
    segments: Vec<(usize, usize)>,
}

impl Stripped {
    fn verbatim(text: &str) -> Self {
        Self {
            text: text.to_string(),
            errors: Vec::new(),
            segments: vec![(0, 0)],
        }
    }

    fn original_offset(&self, stripped_offset: usize) -> usize {
        let idx = self
            .segments
            .partition_point(|&(out, _)| out <= stripped_offset)
            .saturating_sub(1);
        let (out, orig) = self.segments.get(idx).copied().unwrap_or((0, 0));
        orig + (stripped_offset - out)
    }

    fn syntax_error(&self, original: &str, err: &serde_json::Error) -> ParseError {
        let stripped_offset = offset_of(&self.text, err.line(), err.column());
        let offset = floor_char_boundary(original, self.original_offset(stripped_offset));
        let (line, column) = line_column(original, offset);
        ParseError {
            kind: ParseErrorKind::Syntax,
            message: format!("{}: {}", ParseErrorKind::Syntax, strip_position(err)),
            line,
            column,
            offset,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ScanState {
    Normal,
    InString { escaped: bool },
    LineComment,
    BlockComment { start: usize },
}

fn strip_comments(text: &str, remove: bool) -> Stripped {
    let mut out = String::with_capacity(text.len());
    let mut segments = vec![(0, 0)];
    let mut errors = Vec::new();
    let mut state = ScanState::Normal;
    let mut chars = text.char_indices().peekable();

    while let Some((idx, c)) = chars.next() {
        match state {
            ScanState::Normal => match (c, chars.peek().map(|&(_, next)| next)) {
                ('"', _) => {
                    out.push(c);
                    state = ScanState::InString { escaped: false };
                }
                ('/', Some('/')) => {
                    chars.next();
                    if !remove {
                        out.push_str("//");
                    }
                    state = ScanState::LineComment;
                }
                ('/', Some('*')) => {
                    chars.next();
                    if !remove {
                        out.push_str("/*");
                    }
                    state = ScanState::BlockComment { start: idx };
                }
                _ => out.push(c),
            },
            ScanState::InString { escaped } => {
                out.push(c);
                state = match c {
                    _ if escaped => ScanState::InString { escaped: false },
                    '\\' => ScanState::InString { escaped: true },
                    '"' => ScanState::Normal,
                    _ => state,
                };
            }
            ScanState::LineComment => {
                if c == '\n' {
                    if remove {
                        segments.push((out.len(), idx));
                    }
                    out.push(c);
                    state = ScanState::Normal;
                } else if !remove {
                    out.push(c);
                }
            }
            ScanState::BlockComment { .. } => {
                if c == '*' && matches!(chars.peek(), Some(&(_, '/'))) {
                    chars.next();
                    if remove {
                        segments.push((out.len(), idx + 2));
                    } else {
                        out.push_str("*/");
                    }
                    state = ScanState::Normal;
                } else if c == '\n' {
                    if remove {
                        segments.push((out.len(), idx));
                    }
                    out.push(c);
                } else if !remove {
                    out.push(c);
                }
            }
        }
    }

    if let ScanState::BlockComment { start } = state {
        let (line, column) = line_column(text, start);
        errors.push(ParseError {
            kind: ParseErrorKind::UnterminatedComment,
            message: ParseErrorKind::UnterminatedComment.to_string(),
            line,
            column,
            offset: start,
        });
    }

    Stripped {
        text: out,
        errors,
        segments,
    }
}

/// 1-based line and character column of a byte offset.
fn line_column(text: &str, offset: usize) -> (usize, usize) {
    let before = &text[..offset.min(text.len())];
    let line = before.matches('\n').count() + 1;
    let line_start = before.rfind('\n').map_or(0, |i| i + 1);
    let column = before[line_start..].chars().count() + 1;
    (line, column)
}

/// Byte offset of a serde_json (line, column) position.
///
/// serde_json columns are 1-based byte counts within the line, and 0 when
/// it failed before consuming anything on that line.
fn offset_of(text: &str, line: usize, column: usize) -> usize {
    let line_start = if line <= 1 {
        0
    } else {
        text.match_indices('\n')
            .nth(line - 2)
            .map_or(text.len(), |(i, _)| i + 1)
    };
    let line_end = text[line_start..]
        .find('\n')
        .map_or(text.len(), |i| line_start + i);
    floor_char_boundary(text, (line_start + column.saturating_sub(1)).min(line_end))
}

fn floor_char_boundary(text: &str, mut offset: usize) -> usize {
    offset = offset.min(text.len());
    while !text.is_char_boundary(offset) {
        offset -= 1;
    }
    offset
}

/// serde_json's message without its trailing " at line X column Y".
fn strip_position(err: &serde_json::Error) -> String {
    let full = err.to_string();
    match full.rfind(" at line ") {
        Some(idx) => full[..idx].to_string(),
        None => full,
    }
}

//! Settings file contents for tests.

/// Hand-edited settings with both comment styles, a URL and a string that
/// looks like a comment.
pub const COMMENTED_SETTINGS: &str = r#"{
  // personal preferences
  "model": "opus",
  "apiBase": "http://example.com/v1", /* trailing */
  "motto": "/* not a comment */",
  "hooks": {
    // another tool's hook
    "stop": ["other-tool --done"]
  }
}
"#;

/// Missing the closing bracket of the array.
pub const MALFORMED_SETTINGS: &str = r#"{ "hooks": { "notification": ["x" } "#;

/// Well-formed JSON with the wrong shape under `hooks`.
pub const WRONG_SHAPE_SETTINGS: &str = r#"{ "hooks": ["not", "an", "object"] }"#;

//! Settings engine scenarios on real files.

use pretty_assertions::assert_eq;
use serde_json::{Value, json};
use tempfile::TempDir;
use toast_settings::{
    ConfigDocument, Error, MergeOptions, ParseOptions, merge_file, merge_hook_commands, parse,
    remove_hook_command, transform_file,
};
use toast_test_utils::fixtures::{COMMENTED_SETTINGS, MALFORMED_SETTINGS, WRONG_SHAPE_SETTINGS};

fn doc(value: Value) -> ConfigDocument {
    match value {
        Value::Object(map) => map,
        other => panic!("expected object, got {other}"),
    }
}

#[test]
fn test_fresh_install_scenario() {
    let temp = TempDir::new().unwrap();
    let path = temp.path().join(".claude/settings.json");

    let update = doc(json!({"hooks": {"notification": ["script --notification-hook"]}}));
    let result = merge_file(&path, &update, &MergeOptions::default()).unwrap();

    assert!(result.changed);
    assert!(!result.existed);
    let written: Value = serde_json::from_str(&std::fs::read_to_string(&path).unwrap()).unwrap();
    assert_eq!(
        written,
        json!({"hooks": {"notification": ["script --notification-hook"]}})
    );
}

#[test]
fn test_malformed_file_scenario() {
    let temp = TempDir::new().unwrap();
    let path = temp.path().join("settings.json");
    std::fs::write(&path, MALFORMED_SETTINGS).unwrap();

    let update = doc(json!({"hooks": {"stop": ["s"]}}));
    let err = merge_file(&path, &update, &MergeOptions::default().with_backup(true)).unwrap_err();

    assert!(matches!(err, Error::Parse { .. }));
    assert_eq!(std::fs::read_to_string(&path).unwrap(), MALFORMED_SETTINGS);
    // Nothing but the original file
    assert_eq!(std::fs::read_dir(temp.path()).unwrap().count(), 1);
}

#[test]
fn test_wrong_shape_is_validation_error() {
    let temp = TempDir::new().unwrap();
    let path = temp.path().join("settings.json");
    std::fs::write(&path, WRONG_SHAPE_SETTINGS).unwrap();

    let err = merge_file(&path, &ConfigDocument::new(), &MergeOptions::default()).unwrap_err();
    assert!(matches!(err, Error::Validation { .. }));
    assert!(err.to_string().starts_with("Invalid settings structure"));
}

#[test]
fn test_unterminated_comment_scenario() {
    let outcome = parse(r#"{"a": 1, /* unterminated"#, &ParseOptions::default());
    assert!(
        outcome
            .errors
            .iter()
            .any(|e| e.message.contains("Unterminated multi-line comment"))
    );
    assert_eq!(outcome.data, ConfigDocument::new());
}

#[test]
fn test_comments_only_change_is_not_a_write() {
    let temp = TempDir::new().unwrap();
    let path = temp.path().join("settings.json");
    std::fs::write(&path, COMMENTED_SETTINGS).unwrap();

    // Adding something already present changes no data, so the comments survive
    let update = doc(json!({"hooks": {"stop": ["other-tool --done"]}, "model": "opus"}));
    let result = merge_file(&path, &update, &MergeOptions::default().with_backup(true)).unwrap();

    assert!(!result.changed);
    assert_eq!(result.backup_path, None);
    assert_eq!(std::fs::read_to_string(&path).unwrap(), COMMENTED_SETTINGS);
}

#[test]
fn test_add_then_remove_through_files() {
    let temp = TempDir::new().unwrap();
    let path = temp.path().join("settings.json");
    std::fs::write(&path, COMMENTED_SETTINGS).unwrap();
    let options = MergeOptions::default();

    let added = transform_file(&path, &options, |d| {
        Ok(merge_hook_commands(d, [("notification", "n --notification-hook")]))
    })
    .unwrap();
    assert!(added.changed);

    let removed = transform_file(&path, &options, |d| {
        Ok(remove_hook_command(d, "notification", "n --notification-hook"))
    })
    .unwrap();
    assert!(removed.changed);

    let data: Value = serde_json::from_str(&std::fs::read_to_string(&path).unwrap()).unwrap();
    assert_eq!(
        data,
        json!({
            "model": "opus",
            "apiBase": "http://example.com/v1",
            "motto": "/* not a comment */",
            "hooks": {"stop": ["other-tool --done"]}
        })
    );
}

#[test]
fn test_rapid_backups_never_collide() {
    let temp = TempDir::new().unwrap();
    let path = temp.path().join("settings.json");
    std::fs::write(&path, "{}").unwrap();
    let options = MergeOptions::default().with_backup(true);

    let mut backups = Vec::new();
    for i in 0..10 {
        let update = doc(json!({ "counter": i }));
        let result = merge_file(&path, &update, &options).unwrap();
        backups.push(result.backup_path.unwrap());
    }

    let listed = toast_fs::list_backups(&path).unwrap();
    assert_eq!(listed.len(), 10);
    let mut sorted = backups.clone();
    sorted.sort();
    assert_eq!(listed, sorted);
    // The newest backup holds the state before the last write
    assert_eq!(
        std::fs::read_to_string(listed.last().unwrap()).unwrap(),
        "{\n  \"counter\": 8\n}\n"
    );
}

//! CLI end-to-end tests that invoke the compiled `wsl-toast` binary.
//!
//! Every test points `HOME` at a scratch directory and passes `--skip-deps`
//! unless it is exercising the dependency gate itself.

use assert_cmd::Command;
use predicates::prelude::*;
use serde_json::Value;
use toast_test_utils::TestEnv;
use toast_test_utils::fixtures::MALFORMED_SETTINGS;

/// Get a Command for the wsl-toast binary, isolated to `env`
fn toast_cmd(env: &TestEnv) -> Command {
    let mut cmd = Command::new(assert_cmd::cargo::cargo_bin!("wsl-toast"));
    cmd.env("HOME", env.home())
        .env_remove("XDG_CONFIG_HOME")
        .env_remove("WSL_TOAST_CONFIG")
        .env_remove("RUST_LOG")
        .current_dir(env.project());
    cmd
}

fn stdout_json(output: &std::process::Output) -> Value {
    serde_json::from_slice(&output.stdout).expect("stdout should be JSON")
}

// ============================================================================
// Help and Version Tests
// ============================================================================

#[test]
fn test_help_lists_commands() {
    let env = TestEnv::new();
    toast_cmd(&env)
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("install").and(predicate::str::contains("doctor")));
}

#[test]
fn test_version_output() {
    let env = TestEnv::new();
    toast_cmd(&env)
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains("wsl-toast"));
}

#[test]
fn test_no_command_shows_help_hint() {
    let env = TestEnv::new();
    toast_cmd(&env)
        .assert()
        .success()
        .stdout(predicate::str::contains("wsl-toast --help"));
}

#[test]
fn test_unknown_hook_is_usage_error() {
    let env = TestEnv::new();
    toast_cmd(&env)
        .args(["install", "--hooks", "bogus", "--yes"])
        .assert()
        .code(3)
        .stderr(predicate::str::contains("bogus"));
    env.assert_not_exists(&env.home().join(".claude"));
}

// ============================================================================
// Install
// ============================================================================

#[test]
fn test_install_global() {
    let env = TestEnv::new();
    toast_cmd(&env)
        .args(["install", "--skip-deps", "--yes"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Installed 2 hook(s)"));

    let settings = env.read_json(&env.global_settings());
    let notification = settings["hooks"]["notification"][0].as_str().unwrap();
    assert!(notification.ends_with("/.claude/hooks/wsl-toast/notify.sh --notification-hook"));
    assert!(settings["hooks"]["stop"][0].as_str().unwrap().ends_with("--stop-hook"));
    env.assert_exists(&env.global_install_dir().join("notify.sh"));
}

#[test]
fn test_install_json_output() {
    let env = TestEnv::new();
    let output = toast_cmd(&env)
        .args(["install", "--skip-deps", "--json", "--hooks", "subagent-stop"])
        .output()
        .unwrap();
    assert!(output.status.success());

    let result = stdout_json(&output);
    assert_eq!(result["success"], Value::Bool(true));
    assert_eq!(result["hooks"], serde_json::json!(["subagentStop"]));
    assert_eq!(result["settingsChanged"], Value::Bool(true));
}

#[test]
fn test_install_dry_run_writes_nothing() {
    let env = TestEnv::new();
    toast_cmd(&env)
        .args(["install", "--skip-deps", "--dry-run"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Would install into"))
        .stdout(predicate::str::contains("\"notification\""));
    env.assert_not_exists(&env.home().join(".claude"));
}

#[test]
fn test_install_fails_without_powershell() {
    let env = TestEnv::new();
    let empty_path = env.root().join("empty-bin");
    std::fs::create_dir(&empty_path).unwrap();

    toast_cmd(&env)
        .env("PATH", &empty_path)
        .args(["install", "--yes"])
        .assert()
        .code(2)
        .stderr(predicate::str::contains("Dependency check failed"))
        .stderr(predicate::str::contains("powershell"));
    env.assert_not_exists(&env.global_settings());
}

#[test]
fn test_install_refuses_malformed_settings() {
    let env = TestEnv::new();
    env.write(&env.global_settings(), MALFORMED_SETTINGS);

    toast_cmd(&env)
        .args(["install", "--skip-deps", "--yes"])
        .assert()
        .code(1)
        .stderr(predicate::str::contains("Failed to parse settings"));
    assert_eq!(
        std::fs::read_to_string(env.global_settings()).unwrap(),
        MALFORMED_SETTINGS
    );
}

#[test]
fn test_install_local_from_config_file() {
    let env = TestEnv::new();
    let config = env.root().join("config.toml");
    env.write(
        &config,
        "[install]\nscope = \"local\"\nhooks = [\"post-tool-use\"]\nlocal_settings = \"tracked\"\n",
    );

    toast_cmd(&env)
        .env("WSL_TOAST_CONFIG", &config)
        .args(["install", "--skip-deps", "--yes"])
        .assert()
        .success();

    let settings = env.read_json(&env.local_settings(true));
    assert!(
        settings["hooks"]["postToolUse"][0]
            .as_str()
            .unwrap()
            .ends_with("--post-tool-use-hook")
    );
    env.assert_not_exists(&env.global_settings());
}

#[test]
fn test_invalid_config_file_is_usage_error() {
    let env = TestEnv::new();
    let config = env.root().join("config.toml");
    env.write(&config, "[install]\nscope = 42\n");

    toast_cmd(&env)
        .args(["--config"])
        .arg(&config)
        .args(["install", "--skip-deps", "--yes"])
        .assert()
        .code(3)
        .stderr(predicate::str::contains("Invalid config file"));
}

#[test]
fn test_empty_hook_list_in_config_is_usage_error() {
    let env = TestEnv::new();
    let config = env.root().join("config.toml");
    env.write(&config, "[install]\nhooks = []\n");

    toast_cmd(&env)
        .args(["--config"])
        .arg(&config)
        .args(["install", "--skip-deps", "--yes"])
        .assert()
        .code(3)
        .stderr(predicate::str::contains("at least one hook category"));

    env.assert_not_exists(&env.global_settings());
}

#[test]
fn test_missing_project_dir_is_usage_error() {
    let env = TestEnv::new();
    toast_cmd(&env)
        .args(["install", "--skip-deps", "--yes", "--scope", "local", "--project"])
        .arg(env.root().join("nope"))
        .assert()
        .code(3)
        .stderr(predicate::str::contains("Project directory does not exist"));
}

#[test]
fn test_backups_are_pruned() {
    let env = TestEnv::new();
    env.write(&env.global_settings(), "{\"model\": \"opus\"}\n");

    for _ in 0..4 {
        toast_cmd(&env)
            .args(["install", "--skip-deps", "--yes"])
            .assert()
            .success();
        toast_cmd(&env).args(["uninstall", "--yes"]).assert().success();
    }

    let backups: Vec<String> = env
        .entries(&env.home().join(".claude"))
        .into_iter()
        .filter(|name| name.starts_with("settings.json.backup."))
        .collect();
    assert_eq!(backups.len(), 5, "{backups:?}");
}

// ============================================================================
// Uninstall and Status
// ============================================================================

#[test]
fn test_uninstall_after_install() {
    let env = TestEnv::new();
    env.write(&env.global_settings(), "{\"model\": \"opus\"}\n");
    toast_cmd(&env)
        .args(["install", "--skip-deps", "--yes", "--no-backup"])
        .assert()
        .success();

    toast_cmd(&env)
        .args(["uninstall", "--yes"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Removed 2 hook command(s)"));

    assert_eq!(
        env.read_json(&env.global_settings()),
        serde_json::json!({"model": "opus"})
    );
    env.assert_not_exists(&env.global_install_dir());
}

#[test]
fn test_uninstall_when_nothing_installed() {
    let env = TestEnv::new();
    toast_cmd(&env)
        .args(["uninstall", "--yes"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Removed 0 hook command(s)"));
    env.assert_not_exists(&env.global_settings());
}

#[test]
fn test_status_json() {
    let env = TestEnv::new();
    let before = toast_cmd(&env).args(["status", "--json"]).output().unwrap();
    assert!(before.status.success());
    assert_eq!(stdout_json(&before)["installedHooks"], serde_json::json!([]));

    toast_cmd(&env)
        .args(["install", "--skip-deps", "--yes", "--hooks", "stop"])
        .assert()
        .success();

    let after = toast_cmd(&env).args(["status", "--json"]).output().unwrap();
    let status = stdout_json(&after);
    assert_eq!(status["installedHooks"], serde_json::json!(["stop"]));
    assert_eq!(status["scriptInstalled"], Value::Bool(true));
    assert_eq!(status["manifest"]["hooksInstalled"], serde_json::json!(["stop"]));
}

#[test]
fn test_status_human() {
    let env = TestEnv::new();
    toast_cmd(&env)
        .arg("status")
        .assert()
        .success()
        .stdout(predicate::str::contains("wsl-toast install"));
}

// ============================================================================
// Doctor and Completions
// ============================================================================

#[test]
fn test_doctor_without_powershell() {
    let env = TestEnv::new();
    let empty_path = env.root().join("empty-bin");
    std::fs::create_dir(&empty_path).unwrap();

    let output = toast_cmd(&env)
        .env("PATH", &empty_path)
        .args(["doctor", "--json"])
        .output()
        .unwrap();
    assert_eq!(output.status.code(), Some(2));

    let checks = stdout_json(&output);
    let powershell = checks
        .as_array()
        .unwrap()
        .iter()
        .find(|c| c["name"] == "powershell")
        .unwrap();
    assert_eq!(powershell["passed"], Value::Bool(false));
    assert_eq!(powershell["fatal"], Value::Bool(true));
}

#[test]
fn test_completions_bash() {
    let env = TestEnv::new();
    toast_cmd(&env)
        .args(["completions", "bash"])
        .assert()
        .success()
        .stdout(predicate::str::contains("wsl-toast"));
}

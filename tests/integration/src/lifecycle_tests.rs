//! Install / reinstall / upgrade / uninstall lifecycles across crates.
//!
//! Each test drives the installer the way the CLI does and then inspects the
//! settings file through the settings engine and plain JSON.

use pretty_assertions::assert_eq;
use serde_json::json;
use toast_installer::{
    DependencyCheck, HookCategory, InstallConfig, InstallManifest, InstallPaths, Installer,
    LocalSettings, MANIFEST_FILENAME, Scope, StaticChecker,
};
use toast_settings::{hook_commands, read_settings};
use toast_test_utils::TestEnv;
use toast_test_utils::fixtures::COMMENTED_SETTINGS;

// =============================================================================
// Test Infrastructure
// =============================================================================

fn installer(env: &TestEnv) -> Installer<StaticChecker> {
    let paths = InstallPaths::new(env.home(), env.project()).unwrap();
    Installer::with_checker(paths, StaticChecker(vec![DependencyCheck::pass("wsl", "ok")]))
}

fn local(hooks: &[HookCategory], local_settings: LocalSettings) -> InstallConfig {
    InstallConfig {
        scope: Scope::Local,
        hooks: hooks.to_vec(),
        local_settings,
        ..Default::default()
    }
}

// =============================================================================
// Lifecycles
// =============================================================================

#[test]
fn test_full_lifecycle_on_commented_settings() {
    let env = TestEnv::new();
    env.write(&env.global_settings(), COMMENTED_SETTINGS);
    let original = read_settings(&env.global_settings()).unwrap().unwrap();
    let installer = installer(&env);

    // Install rewrites canonically; the backup keeps the comments
    let first = installer.install(&InstallConfig::default());
    assert!(first.success, "{}", first.message);
    let backup = first.backup_path.clone().unwrap();
    assert_eq!(std::fs::read_to_string(&backup).unwrap(), COMMENTED_SETTINGS);
    let installed = std::fs::read_to_string(env.global_settings()).unwrap();
    assert!(!installed.contains("// personal"));

    // Reinstall is a no-op
    let second = installer.install(&InstallConfig::default());
    assert!(second.success);
    assert!(!second.settings_changed);
    assert_eq!(
        std::fs::read_to_string(env.global_settings()).unwrap(),
        installed
    );

    // Uninstall restores the original data minus nothing
    let removed = installer.uninstall(&InstallConfig::default());
    assert!(removed.success, "{}", removed.message);
    let after = read_settings(&env.global_settings()).unwrap().unwrap();
    assert_eq!(after, original);
    env.assert_not_exists(&env.global_install_dir());
}

#[test]
fn test_upgrade_replaces_old_command_format() {
    let env = TestEnv::new();
    let installer = installer(&env);
    let script = installer.paths().script_path(Scope::Global);

    // Simulate an older release: different flag spelling and version
    env.write(
        &env.global_settings(),
        &json!({
            "hooks": {
                "stop": [format!("{} --stop", script.display()), "third-party"]
            }
        })
        .to_string(),
    );
    env.write(
        &env.global_install_dir().join(MANIFEST_FILENAME),
        r#"{"version":"0.0.1","config":{},"files":["notify.sh"],"hooksInstalled":["stop"]}"#,
    );

    let result = installer.install(&InstallConfig {
        hooks: vec![HookCategory::Stop],
        ..Default::default()
    });

    assert!(result.success, "{}", result.message);
    assert!(
        result
            .notes
            .iter()
            .any(|n| n.starts_with("Upgrading from 0.0.1"))
    );
    assert_eq!(
        env.read_json(&env.global_settings()),
        json!({
            "hooks": {
                "stop": [
                    "third-party",
                    installer.hook_command(Scope::Global, HookCategory::Stop)
                ]
            }
        })
    );
    let manifest = InstallManifest::load(&env.global_install_dir())
        .unwrap()
        .unwrap();
    assert_ne!(manifest.version, "0.0.1");
    assert!(manifest.installed_at.is_some());
}

#[test]
fn test_global_and_local_installs_are_independent() {
    let env = TestEnv::new();
    let installer = installer(&env);

    assert!(installer.install(&InstallConfig::default()).success);
    assert!(
        installer
            .install(&local(&[HookCategory::PreToolUse], LocalSettings::Untracked))
            .success
    );

    let removed = installer.uninstall(&local(&[], LocalSettings::Untracked));
    assert!(removed.success, "{}", removed.message);
    assert_eq!(removed.hooks, vec!["preToolUse"]);

    // Global install untouched
    let global = read_settings(&env.global_settings()).unwrap().unwrap();
    assert_eq!(hook_commands(&global).len(), 2);
    env.assert_exists(&env.global_install_dir().join("notify.sh"));
    env.assert_not_exists(&env.local_install_dir());
    assert_eq!(env.read_json(&env.local_settings(false)), json!({}));
}

#[test]
fn test_tracked_and_untracked_local_files() {
    let env = TestEnv::new();
    let installer = installer(&env);

    let tracked = installer.install(&local(&[HookCategory::Stop], LocalSettings::Tracked));
    assert!(tracked.success, "{}", tracked.message);
    env.assert_exists(&env.local_settings(true));
    env.assert_not_exists(&env.local_settings(false));

    // Uninstalling the untracked variant leaves the tracked install working
    let untracked = installer.uninstall(&local(&[], LocalSettings::Untracked));
    assert!(untracked.success);
    assert!(untracked.commands.is_empty());
    assert!(untracked.notes.iter().any(|n| n.starts_with("Kept ")));
    env.assert_not_exists(&env.local_settings(false));
    env.assert_exists(&env.local_install_dir().join("notify.sh"));
    assert_eq!(
        hook_commands(&read_settings(&env.local_settings(true)).unwrap().unwrap()).len(),
        1
    );
}

#[test]
fn test_uninstall_after_install_dir_deleted_by_hand() {
    let env = TestEnv::new();
    let installer = installer(&env);
    assert!(
        installer
            .install(&InstallConfig {
                hooks: HookCategory::ALL.to_vec(),
                ..Default::default()
            })
            .success
    );
    std::fs::remove_dir_all(env.global_install_dir()).unwrap();

    let status = installer
        .status(Scope::Global, LocalSettings::Untracked)
        .unwrap();
    assert!(status.is_installed());
    assert!(!status.script_installed);

    let result = installer.uninstall(&InstallConfig::default());
    assert!(result.success, "{}", result.message);
    assert_eq!(result.commands.len(), 5);
    assert_eq!(env.read_json(&env.global_settings()), json!({}));
}

#[test]
fn test_interrupted_write_leftover_is_replaced() {
    let env = TestEnv::new();
    env.write(&env.global_settings(), "{\"model\": \"opus\"}");
    let orphan = toast_fs::temp_path_for(&env.global_settings()).unwrap();
    env.write(&orphan, "{ half written");

    let result = installer(&env).install(&InstallConfig::default());

    assert!(result.success, "{}", result.message);
    env.assert_not_exists(&orphan);
    assert_eq!(env.read_json(&env.global_settings())["model"], json!("opus"));
}

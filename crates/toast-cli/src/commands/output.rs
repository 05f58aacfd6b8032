//! Human and JSON rendering of installer results

use colored::Colorize;
use toast_installer::{DependencyCheck, FailureKind, InstallationResult};

use crate::error::{CliError, Result};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    Install,
    Uninstall,
}

/// Print `result` and turn a failed one into the matching error.
pub fn finish(result: &InstallationResult, action: Action, json: bool) -> Result<()> {
    if json {
        println!("{}", serde_json::to_string_pretty(result)?);
    } else {
        print_result(result, action);
    }

    if result.success {
        Ok(())
    } else {
        Err(CliError::Failed {
            kind: result.failure.unwrap_or(FailureKind::Filesystem),
            message: result.message.clone(),
        })
    }
}

pub fn print_result(result: &InstallationResult, action: Action) {
    let (title, marker) = match (action, result.dry_run) {
        (Action::Install, false) => ("Installing into", "+".green()),
        (Action::Install, true) => ("Would install into", "+".green()),
        (Action::Uninstall, false) => ("Removing from", "-".red()),
        (Action::Uninstall, true) => ("Would remove from", "-".red()),
    };
    println!(
        "{} {} {}",
        "=>".blue().bold(),
        title,
        result.settings_path.display().to_string().cyan()
    );

    for command in &result.commands {
        println!("  {} {}", marker, command);
    }
    if !result.files.is_empty() {
        println!(
            "  {}: {} in {}",
            "files".dimmed(),
            result.files.join(", "),
            result.install_dir.display()
        );
    }
    if let Some(backup) = &result.backup_path {
        println!("  {}: {}", "backup".dimmed(), backup.display());
    }
    if let Some(diff) = result.diff.as_deref().filter(|d| !d.is_empty()) {
        println!();
        print_diff(diff);
    }
    if result.checks.iter().any(|c| !c.passed) {
        println!();
        print_checks(&result.checks);
    }
    for note in &result.notes {
        println!("  {}: {}", "note".yellow(), note);
    }

    if result.success {
        println!("{} {}", "✓".green().bold(), result.message);
    }
}

pub fn print_checks(checks: &[DependencyCheck]) {
    for check in checks {
        let mark = match (check.passed, check.fatal) {
            (true, _) => "✓".green(),
            (false, true) => "✗".red().bold(),
            (false, false) => "!".yellow().bold(),
        };
        println!("  {} {:<12} {}", mark, check.name, check.message);
        if !check.passed
            && let Some(remedy) = &check.remedy
        {
            println!("    {} {}", "fix:".dimmed(), remedy);
        }
    }
}

fn print_diff(diff: &str) {
    for line in diff.lines() {
        if line.starts_with("+++") || line.starts_with("---") {
            println!("{}", line.bold());
        } else if line.starts_with('+') {
            println!("{}", line.green());
        } else if line.starts_with('-') {
            println!("{}", line.red());
        } else if line.starts_with("@@") {
            println!("{}", line.cyan());
        } else {
            println!("{line}");
        }
    }
}

//! Status command implementation

use colored::Colorize;

use super::installer_for;
use crate::cli::TargetArgs;
use crate::config::UserConfig;
use crate::error::Result;

/// Run the status command
pub fn run_status(target: &TargetArgs, user: &UserConfig, json: bool) -> Result<()> {
    let installer = installer_for(target)?;
    let config = user.install_config(target, &[]);
    let status = installer.status(config.scope, config.local_settings)?;

    if json {
        println!("{}", serde_json::to_string_pretty(&status)?);
        return Ok(());
    }

    println!("{}", "wsl-toast Status".bold());
    println!();
    println!("{}:  {}", "Settings".dimmed(), status.settings_path.display());
    println!("{}:   {}", "Install".dimmed(), status.install_dir.display());
    if let Some(manifest) = &status.manifest {
        let when = manifest
            .installed_at
            .map(|t| t.format(" on %Y-%m-%d %H:%M UTC").to_string())
            .unwrap_or_default();
        println!("{}:   {}{}", "Version".dimmed(), manifest.version.cyan(), when);
    }
    println!();

    println!("{}:", "Hooks".bold());
    if !status.is_installed() {
        println!(
            "  {} (use {} to add)",
            "None".dimmed(),
            "wsl-toast install".cyan()
        );
    } else {
        for command in &status.commands {
            println!("  {} {}", "+".green(), command);
        }
    }

    if status.is_installed() && !status.script_installed {
        println!();
        println!(
            "{} hooks point at a missing script; run {} to repair",
            "warning:".yellow().bold(),
            "wsl-toast install".cyan()
        );
    }
    Ok(())
}

//! wsl-toast CLI
//!
//! Installs hook commands into Claude Code settings so hook events raise
//! Windows toast notifications from inside WSL.

mod cli;
mod commands;
mod config;
mod error;
mod interactive;
mod logging;

use clap::Parser;
use clap::error::ErrorKind;
use colored::Colorize;

use cli::{Cli, Commands};
use config::UserConfig;
use error::{Result, exit_code};

fn main() {
    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(e) => match e.kind() {
            ErrorKind::DisplayHelp | ErrorKind::DisplayVersion => e.exit(),
            _ => {
                let _ = e.print();
                std::process::exit(exit_code::USAGE);
            }
        },
    };

    if let Err(e) = logging::init(cli.verbose) {
        eprintln!("{}: could not initialize logging: {}", "warning".yellow().bold(), e);
    }

    if let Err(e) = run(cli) {
        eprintln!("{}: {}", "error".red().bold(), e);
        std::process::exit(e.exit_code());
    }
}

fn run(cli: Cli) -> Result<()> {
    let Some(command) = cli.command else {
        // No command provided - show help hint
        println!(
            "{} Windows toast notifications for Claude Code hooks",
            "wsl-toast".green().bold()
        );
        println!();
        println!("Run {} for available commands.", "wsl-toast --help".cyan());
        return Ok(());
    };

    match command {
        Commands::Install(args) => {
            let user = UserConfig::load(cli.config.as_deref())?;
            commands::run_install(&args, &user)
        }
        Commands::Uninstall(args) => {
            let user = UserConfig::load(cli.config.as_deref())?;
            commands::run_uninstall(&args, &user)
        }
        Commands::Status { target, json } => {
            let user = UserConfig::load(cli.config.as_deref())?;
            commands::run_status(&target, &user, json)
        }
        Commands::Doctor { json } => commands::run_doctor(json),
        Commands::Completions { shell } => {
            commands::run_completions(shell);
            Ok(())
        }
    }
}


//! CLI argument parsing using clap derive

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};
use clap_complete::Shell;
use toast_installer::{HookCategory, Scope};

/// wsl-toast - Windows toast notifications for Claude Code hooks under WSL
#[derive(Parser, Debug)]
#[command(name = "wsl-toast")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// User defaults file [default: ~/.config/wsl-toast/config.toml]
    #[arg(long, global = true, env = "WSL_TOAST_CONFIG", value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// The command to run
    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// Available commands
#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum Commands {
    /// Install the notification hooks
    ///
    /// Examples:
    ///   wsl-toast install                         # notification + stop, global
    ///   wsl-toast install --hooks stop,pre-tool-use
    ///   wsl-toast install --scope local --tracked # commit-able project settings
    Install(InstallArgs),

    /// Remove the notification hooks and runtime files
    Uninstall(UninstallArgs),

    /// Show which hooks are installed
    Status {
        #[command(flatten)]
        target: TargetArgs,

        /// Output as JSON for scripting
        #[arg(long)]
        json: bool,
    },

    /// Check that WSL, PowerShell and BurntToast are available
    Doctor {
        /// Output as JSON for scripting
        #[arg(long)]
        json: bool,
    },

    /// Generate shell completions
    ///
    /// Outputs completion script for your shell.
    ///
    /// Examples:
    ///   wsl-toast completions bash > ~/.local/share/bash-completion/completions/wsl-toast
    ///   wsl-toast completions zsh > ~/.zfunc/_wsl-toast
    Completions {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: Shell,
    },
}

/// Which settings file and install directory to act on
#[derive(Args, Debug, Clone, Default, PartialEq, Eq)]
pub struct TargetArgs {
    /// Install for the user (global) or for one project (local)
    #[arg(long, value_enum)]
    pub scope: Option<ScopeArg>,

    /// Local scope: edit settings.json instead of settings.local.json
    #[arg(long)]
    pub tracked: bool,

    /// Project directory for local scope [default: current directory]
    #[arg(long, value_name = "DIR")]
    pub project: Option<PathBuf>,
}

#[derive(Args, Debug, Clone, Default, PartialEq, Eq)]
pub struct InstallArgs {
    #[command(flatten)]
    pub target: TargetArgs,

    /// Hook categories to install, comma separated
    #[arg(long, value_delimiter = ',', value_name = "HOOKS")]
    pub hooks: Vec<HookCategory>,

    /// Show what would change without writing anything
    #[arg(long)]
    pub dry_run: bool,

    /// Do not back up the settings file before changing it
    #[arg(long)]
    pub no_backup: bool,

    /// Install even if dependency checks fail
    #[arg(long)]
    pub skip_deps: bool,

    /// Do not ask for confirmation
    #[arg(short, long)]
    pub yes: bool,

    /// Output as JSON for scripting
    #[arg(long)]
    pub json: bool,
}

#[derive(Args, Debug, Clone, Default, PartialEq, Eq)]
pub struct UninstallArgs {
    #[command(flatten)]
    pub target: TargetArgs,

    /// Show what would change without writing anything
    #[arg(long)]
    pub dry_run: bool,

    /// Do not ask for confirmation
    #[arg(short, long)]
    pub yes: bool,

    /// Output as JSON for scripting
    #[arg(long)]
    pub json: bool,
}

#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScopeArg {
    Global,
    Local,
}

impl From<ScopeArg> for Scope {
    fn from(arg: ScopeArg) -> Self {
        match arg {
            ScopeArg::Global => Scope::Global,
            ScopeArg::Local => Scope::Local,
        }
    }
}

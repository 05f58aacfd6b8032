//! Uninstall command implementation

use toast_installer::InstallConfig;

use super::output::{self, Action};
use super::{installer_for, prune_old_backups};
use crate::cli::UninstallArgs;
use crate::config::UserConfig;
use crate::error::Result;
use crate::interactive;

/// Run the uninstall command
pub fn run_uninstall(args: &UninstallArgs, user: &UserConfig) -> Result<()> {
    let installer = installer_for(&args.target)?;

    let mut config = user.install_config(&args.target, &[]);
    config.dry_run = args.dry_run;

    if !args.dry_run && interactive::should_prompt(args.yes || args.json) {
        let preview = installer.uninstall(&InstallConfig {
            dry_run: true,
            ..config.clone()
        });
        if !preview.success {
            return output::finish(&preview, Action::Uninstall, false);
        }
        output::print_result(&preview, Action::Uninstall);
        println!();
        interactive::confirm_or_abort("Remove wsl-toast?")?;
    }

    let result = installer.uninstall(&config);
    prune_old_backups(&result);
    output::finish(&result, Action::Uninstall, args.json)
}

//! Install command implementation

use toast_installer::InstallConfig;

use super::output::{self, Action};
use super::{installer_for, prune_old_backups};
use crate::cli::InstallArgs;
use crate::config::UserConfig;
use crate::error::Result;
use crate::interactive;

/// Run the install command
pub fn run_install(args: &InstallArgs, user: &UserConfig) -> Result<()> {
    let installer = installer_for(&args.target)?;

    let mut config = user.install_config(&args.target, &args.hooks);
    config.dry_run = args.dry_run;
    config.skip_dependency_check = args.skip_deps;
    if args.no_backup {
        config.create_backup = false;
    }

    if !args.dry_run && interactive::should_prompt(args.yes || args.json) {
        if args.hooks.is_empty() && !user.has_hooks() {
            config.hooks = interactive::select_hooks(&config.hooks)?;
        }

        let preview = installer.install(&InstallConfig {
            dry_run: true,
            ..config.clone()
        });
        if !preview.success {
            return output::finish(&preview, Action::Install, false);
        }
        output::print_result(&preview, Action::Install);
        println!();
        interactive::confirm_or_abort("Apply these changes?")?;
    }

    let result = installer.install(&config);
    prune_old_backups(&result);
    output::finish(&result, Action::Install, args.json)
}

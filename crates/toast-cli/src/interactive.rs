//! Interactive prompts for CLI commands
//!
//! Uses dialoguer for terminal-based confirmation and selection.

use std::io::IsTerminal;

use dialoguer::{Confirm, MultiSelect};
use toast_installer::HookCategory;

use crate::error::{CliError, Result};

/// Prompt only on a terminal and only without `--yes`.
pub fn should_prompt(yes: bool) -> bool {
    !yes && std::io::stdin().is_terminal() && std::io::stderr().is_terminal()
}

/// Ask `prompt`; a "no" becomes [`CliError::Aborted`].
pub fn confirm_or_abort(prompt: &str) -> Result<()> {
    let proceed = Confirm::new()
        .with_prompt(prompt)
        .default(true)
        .interact()?;
    if proceed {
        Ok(())
    } else {
        Err(CliError::Aborted)
    }
}

/// Let the user toggle categories, starting from `preselected`.
pub fn select_hooks(preselected: &[HookCategory]) -> Result<Vec<HookCategory>> {
    let items: Vec<String> = HookCategory::ALL
        .iter()
        .map(|c| format!("{:<14} {}", c.settings_key(), c.flag()))
        .collect();
    let defaults: Vec<bool> = HookCategory::ALL
        .iter()
        .map(|c| preselected.contains(c))
        .collect();

    let chosen = MultiSelect::new()
        .with_prompt("Hooks to install (space to toggle, enter to confirm)")
        .items(&items)
        .defaults(&defaults)
        .interact()?;

    if chosen.is_empty() {
        return Err(CliError::user("No hooks selected"));
    }
    Ok(chosen.into_iter().map(|i| HookCategory::ALL[i]).collect())
}

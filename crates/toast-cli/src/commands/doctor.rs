//! Doctor command implementation

use colored::Colorize;
use toast_installer::{DependencyChecker, FailureKind, SystemChecker};

use super::output::print_checks;
use crate::error::{CliError, Result};

/// Run the doctor command
pub fn run_doctor(json: bool) -> Result<()> {
    let checks = SystemChecker.check();

    if json {
        println!("{}", serde_json::to_string_pretty(&checks)?);
    } else {
        println!("{} Dependency checks", "=>".blue().bold());
        print_checks(&checks);
    }

    let blocking = checks.iter().filter(|c| c.is_blocking()).count();
    if blocking == 0 {
        if !json {
            println!("{} Ready to install", "✓".green().bold());
        }
        Ok(())
    } else {
        Err(CliError::Failed {
            kind: FailureKind::Dependencies,
            message: format!("{blocking} required dependency check(s) failed"),
        })
    }
}

//! Status command handler.
//!
//! Shows what a location's bookkeeping file records and whether the
//! registration it points at still exists.

use greconf_core::{RegistrationScope, RegistrationStatus};

use crate::bootstrap::CliContext;
use crate::commands::TargetArgs;
use crate::error::CliError;

/// Execute the status command.
pub fn execute(ctx: &CliContext, target: &TargetArgs) -> Result<(), CliError> {
    let location = target.location()?;
    let scope = target.scope();
    let status = ctx.manager.status(scope, &location)?;
    println!("{}", describe(scope, &status));
    Ok(())
}

fn describe(scope: RegistrationScope, status: &RegistrationStatus) -> String {
    match status {
        RegistrationStatus::NotRegistered => format!("{scope}: not registered"),
        RegistrationStatus::Registered { key, conf_path } => {
            format!("{scope}: registered as {key} ({})", conf_path.display())
        }
        RegistrationStatus::Stale { key } => {
            format!("{scope}: stale registration {key} (configuration file is missing)")
        }
    }
}

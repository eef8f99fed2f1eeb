//! Register command handler.

use crate::bootstrap::CliContext;
use crate::commands::TargetArgs;
use crate::error::CliError;

/// Execute the register command.
///
/// Prints nothing on success; the chosen key is logged at info level.
///
/// # Errors
///
/// Returns [`CliError::Warning`] when the location is already registered,
/// and a classified error for anything that stopped the registration.
pub fn execute(ctx: &CliContext, target: &TargetArgs) -> Result<(), CliError> {
    let location = target.location()?;
    let registration = ctx.manager.register(target.scope(), &location)?;
    tracing::debug!(
        key = %registration.key,
        reginfo = %registration.reginfo_path.display(),
        "registration recorded"
    );
    Ok(())
}

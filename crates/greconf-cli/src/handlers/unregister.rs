//! Unregister command handler.

use crate::bootstrap::CliContext;
use crate::commands::TargetArgs;
use crate::error::CliError;

/// Execute the unregister command.
///
/// Unregistration is best-effort: whatever the registry state, it removes
/// what it can and reports nothing. Only an unresolvable default location
/// is an error.
pub fn execute(ctx: &CliContext, target: &TargetArgs) -> Result<(), CliError> {
    let location = target.location()?;
    ctx.manager.unregister(target.scope(), &location);
    Ok(())
}

//! Paths command handler.
//!
//! Displays all resolved paths for diagnostics and debugging. This is the
//! tool to reach for when a registration lands somewhere unexpected.

use crate::bootstrap::CliContext;
use crate::commands::location_or_default;
use crate::error::CliError;
use greconf_core::ResolvedPaths;
use std::path::PathBuf;

/// Execute the paths command.
///
/// Resolves and displays every path register/unregister would touch for
/// `location`, in `key = value` format.
pub fn execute(ctx: &CliContext, location: Option<&PathBuf>) -> Result<(), CliError> {
    let location = location_or_default(location)?;
    let paths = ResolvedPaths::resolve(ctx.manager.config(), &location)?;
    println!("{paths}");
    Ok(())
}

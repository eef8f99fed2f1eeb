//! Command handlers that delegate to the registry manager.
//!
//! Handlers follow the canonical pattern:
//! - Signature: `pub fn execute(ctx: &CliContext, ...) -> Result<(), CliError>`
//! - Thin wrappers that:
//!   1. Resolve CLI-specific input (scope flag, default location)
//!   2. Call `RegistryManager` methods
//!   3. Format output for the terminal
//!
//! Handlers should NOT touch registry files directly.

pub mod list;
pub mod paths;
pub mod register;
pub mod status;
pub mod unregister;

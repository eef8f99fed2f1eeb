//! Main commands enum and shared command arguments.

use std::path::PathBuf;

use clap::{Args, Subcommand};
use greconf_core::RegistrationScope;

use crate::error::CliError;

/// Available commands.
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Register a runtime location so other programs can find it
    Register {
        #[command(flatten)]
        target: TargetArgs,
    },

    /// Remove a previous registration of a runtime location
    Unregister {
        #[command(flatten)]
        target: TargetArgs,
    },

    /// Show what a runtime location has registered
    Status {
        #[command(flatten)]
        target: TargetArgs,
    },

    /// List registered runtimes
    List {
        /// List the system-wide registry instead of the user's
        #[arg(long)]
        global: bool,
        /// Print JSON instead of a table
        #[arg(long)]
        json: bool,
    },

    /// Show resolved registry paths for a location
    Paths {
        /// Installation directory (defaults to the directory of this executable)
        location: Option<PathBuf>,
    },
}

/// Scope and location shared by the per-location commands.
#[derive(Args, Debug, Clone)]
pub struct TargetArgs {
    /// Use the system-wide registry instead of the user's
    #[arg(long)]
    pub global: bool,

    /// Installation directory (defaults to the directory of this executable)
    pub location: Option<PathBuf>,
}

impl TargetArgs {
    pub fn scope(&self) -> RegistrationScope {
        scope_from_flag(self.global)
    }

    /// The given location, or the directory containing the running executable.
    pub fn location(&self) -> Result<PathBuf, CliError> {
        location_or_default(self.location.as_ref())
    }
}

pub fn scope_from_flag(global: bool) -> RegistrationScope {
    if global {
        RegistrationScope::Global
    } else {
        RegistrationScope::User
    }
}

pub fn location_or_default(location: Option<&PathBuf>) -> Result<PathBuf, CliError> {
    if let Some(location) = location {
        return Ok(location.clone());
    }

    let exe = std::env::current_exe()?;
    exe.parent().map(PathBuf::from).ok_or_else(|| {
        CliError::Arguments(format!(
            "cannot determine the directory of {}",
            exe.display()
        ))
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::Cli;
    use clap::Parser;

    #[test]
    fn register_defaults_to_user_scope() {
        let cli = Cli::parse_from(["greconf", "register", "/opt/runtime-1"]);
        let Some(Commands::Register { target }) = cli.command else {
            panic!("expected register");
        };
        assert_eq!(target.scope(), RegistrationScope::User);
        assert_eq!(target.location().unwrap(), PathBuf::from("/opt/runtime-1"));
    }

    #[test]
    fn global_flag_selects_global_scope() {
        let cli = Cli::parse_from(["greconf", "unregister", "--global", "/opt/runtime-1"]);
        let Some(Commands::Unregister { target }) = cli.command else {
            panic!("expected unregister");
        };
        assert_eq!(target.scope(), RegistrationScope::Global);
    }

    #[test]
    fn location_defaults_to_executable_dir() {
        let target = TargetArgs {
            global: false,
            location: None,
        };
        let exe = std::env::current_exe().unwrap();
        assert_eq!(target.location().unwrap(), exe.parent().unwrap());
    }
}

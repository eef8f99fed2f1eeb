//! Main CLI parser and top-level argument handling.
//!
//! This module defines the root CLI structure with global options.

use std::path::PathBuf;

use clap::Parser;

use crate::commands::Commands;

/// Command-line interface for the runtime registry.
///
/// This is the top-level parser that handles global options and dispatches
/// to subcommands.
#[derive(Parser)]
#[command(name = "greconf")]
#[command(about = "Register runtime locations in the gre.d registry")]
#[command(version = greconf_build_info::LONG_VERSION)]
pub struct Cli {
    /// Enable verbose/debug output
    #[arg(short = 'v', long = "verbose", global = true)]
    pub verbose: bool,

    /// Build identifier used to name new registrations
    #[arg(long = "build-id", env = "GRECONF_BUILD_ID", global = true)]
    pub build_id: Option<String>,

    /// System-wide registry directory
    #[arg(long = "global-root", env = "GRECONF_GLOBAL_ROOT", global = true)]
    pub global_root: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

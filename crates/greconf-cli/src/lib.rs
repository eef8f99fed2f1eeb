//! Command-line adapter for the `gre.d` runtime registry.
//!
//! Parses arguments, composes a [`greconf_core::RegistryManager`] from
//! flags and environment, and maps library errors to exit codes.

#![deny(unsafe_code)]
#![deny(unused_crate_dependencies)]

#[cfg(test)]
use tempfile as _;

// Used by the binary only
use dotenvy as _;
use tracing_subscriber as _;

pub mod bootstrap;
pub mod commands;
pub mod error;
pub mod handlers;
pub mod parser;
pub mod presentation;

// Re-export primary types for convenient access
pub use bootstrap::{CliConfig, CliContext, bootstrap};
pub use commands::{Commands, TargetArgs};
pub use error::CliError;
pub use parser::Cli;

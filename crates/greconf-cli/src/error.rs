//! CLI-specific error types and mappings.
//!
//! This module provides the error type for the CLI adapter and mappings
//! from library errors to exit codes and user-facing messages.

use greconf_core::{ConfigError, PathError, RegistryError};
use thiserror::Error;

/// CLI-specific error type.
#[derive(Debug, Error)]
pub enum CliError {
    /// Nothing went wrong, but nothing was done either.
    #[error("{0}")]
    Warning(String),

    /// Unclassified failure.
    #[error("{0}")]
    Core(String),

    /// Argument error (unusable location, etc.).
    #[error("Invalid arguments: {0}")]
    Arguments(String),

    /// IO error (file not found, permission denied, etc.).
    #[error("IO error: {0}")]
    Io(String),

    /// Configuration error (including a missing home directory).
    #[error("Configuration error: {0}")]
    Config(String),

    /// A registry directory or file could not be created.
    #[error("{0}")]
    CantCreate(String),
}

impl CliError {
    /// Map error to appropriate exit code.
    ///
    /// Exit codes follow Unix conventions:
    /// - 0: Success
    /// - 1: General error
    /// - 2: Misuse of shell command (invalid arguments)
    /// - 64-78: Reserved for specific error categories (see sysexits.h)
    pub fn exit_code(&self) -> i32 {
        match self {
            CliError::Warning(_) | CliError::Core(_) => 1,
            CliError::Arguments(_) => 2, // EX_USAGE
            CliError::CantCreate(_) => 73, // EX_CANTCREAT
            CliError::Io(_) => 74,       // EX_IOERR
            CliError::Config(_) => 78,   // EX_CONFIG
        }
    }

    /// Prefix used when printing the error to stderr.
    pub fn severity(&self) -> &'static str {
        match self {
            CliError::Warning(_) => "Warning",
            _ => "Error",
        }
    }
}

impl From<RegistryError> for CliError {
    fn from(err: RegistryError) -> Self {
        match err {
            RegistryError::Path(path_err) => path_err.into(),
            RegistryError::Bookkeeping { .. } | RegistryError::ReadDir { .. } => {
                CliError::Io(err.to_string())
            }
            RegistryError::AlreadyRegistered { conf_path, .. } => CliError::Warning(format!(
                "Configuration file '{}' already exists.\nNo action was performed.",
                conf_path.display()
            )),
            RegistryError::DirectoryCreate { source, .. } => CliError::CantCreate(source.to_string()),
            RegistryError::NamespaceExhausted { .. } => CliError::CantCreate(err.to_string()),
        }
    }
}

impl From<PathError> for CliError {
    fn from(err: PathError) -> Self {
        match err {
            PathError::NoHomeDir => CliError::Config(err.to_string()),
            PathError::CreateFailed { .. } => CliError::CantCreate(err.to_string()),
            PathError::NotAccessible { .. } => CliError::Io(err.to_string()),
            _ => CliError::Arguments(err.to_string()),
        }
    }
}

impl From<ConfigError> for CliError {
    fn from(err: ConfigError) -> Self {
        CliError::Config(err.to_string())
    }
}

impl From<std::io::Error> for CliError {
    fn from(err: std::io::Error) -> Self {
        CliError::Io(err.to_string())
    }
}

impl From<anyhow::Error> for CliError {
    fn from(err: anyhow::Error) -> Self {
        match err.downcast::<RegistryError>() {
            Ok(registry_err) => registry_err.into(),
            Err(err) => CliError::Core(format!("{err:#}")),
        }
    }
}

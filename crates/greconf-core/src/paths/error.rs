//! Path-related error types.
//!
//! Provides semantic errors for path operations without exposing
//! implementation details or adapter-specific concerns.

use std::path::PathBuf;
use thiserror::Error;

/// Errors that can occur during path resolution and directory operations.
#[derive(Debug, Error)]
pub enum PathError {
    /// `HOME` is unset or empty.
    #[error("Cannot determine home directory (HOME is unset or empty)")]
    NoHomeDir,

    /// A path was expected to be a directory but was not.
    #[error("{0} exists but is not a directory")]
    NotADirectory(PathBuf),

    /// An existing directory cannot be listed or searched.
    #[error("cannot access '{}': {reason}", path.display())]
    NotAccessible { path: PathBuf, reason: String },

    /// Failed to create a directory.
    #[error("could not create '{}': {reason}", path.display())]
    CreateFailed { path: PathBuf, reason: String },

    /// An empty path was provided.
    #[error("Path cannot be empty")]
    EmptyPath,

    /// The path cannot be written into a text config file.
    #[error("Path {0} is not valid UTF-8")]
    NonUtf8(PathBuf),

    /// Failed to get the current working directory.
    #[error("Cannot determine current directory: {0}")]
    CurrentDirError(String),
}

//! Path utilities for registry roots and installation locations.
//!
//! This module provides the canonical path resolution for greconf:
//! - System-wide and per-user registry roots
//! - Installation location normalization and comparison
//! - Registry directory creation
//!
//! # Design
//!
//! - Returns `PathBuf` and `PathError` for clear error handling
//! - No interactive/terminal I/O - adapters handle user prompts separately

mod ensure;
mod error;
mod platform;
mod resolver;

#[cfg(test)]
pub(crate) mod test_utils;

// Error type
pub use error::PathError;

// Roots and locations
pub use platform::{
    DEFAULT_GLOBAL_ROOT, DEFAULT_USER_DIR_NAME, absolute_location, home_dir, same_location,
    user_root,
};

// Directory operations
pub use ensure::{REGISTRY_DIR_MODE, ensure_directory};

// Pure resolver for testing and CLI
pub use resolver::ResolvedPaths;

//! Registry error types.

use std::path::PathBuf;

use thiserror::Error;

use crate::paths::PathError;

/// Reasons a registration attempt or registry query can fail.
///
/// Unregistration never reports errors; it simply stops early.
#[derive(Debug, Error)]
pub enum RegistryError {
    /// Root or location could not be resolved (e.g. no `HOME` for the user scope).
    #[error(transparent)]
    Path(#[from] PathError),

    /// The bookkeeping file could not be opened, read or written.
    #[error("Bookkeeping file {} is not usable: {source}", path.display())]
    Bookkeeping {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The location's recorded config file still exists.
    #[error(
        "Configuration file '{}' already exists. No action was performed.",
        conf_path.display()
    )]
    AlreadyRegistered { key: String, conf_path: PathBuf },

    /// The registry root directory could not be created.
    #[error("could not create '{}'", path.display())]
    DirectoryCreate {
        path: PathBuf,
        #[source]
        source: PathError,
    },

    /// Every candidate config file name was taken or unwritable.
    #[error("No free configuration file name for build {build_id} after {attempts} attempts")]
    NamespaceExhausted { build_id: String, attempts: usize },

    /// The registry root exists but could not be listed.
    #[error("Failed to list {}: {source}", path.display())]
    ReadDir {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

//! Pure path resolver for testing and CLI introspection.
//!
//! Captures every path a registration of one location would touch, so the
//! `greconf paths` command and tests can show them without side effects.

use std::path::{Path, PathBuf};

use super::{PathError, absolute_location};
use crate::config::RegistryConfig;
use crate::scope::RegistrationScope;

/// All resolved paths for one installation location.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedPaths {
    /// Build identifier used for new config files.
    pub build_id: String,
    /// System-wide registry directory.
    pub global_root: PathBuf,
    /// Per-user registry directory, `None` when `HOME` is unavailable.
    pub user_root: Option<PathBuf>,
    /// Absolute installation location.
    pub location: PathBuf,
    /// Bookkeeping file for global registrations.
    pub global_reginfo: PathBuf,
    /// Bookkeeping file for per-user registrations.
    pub user_reginfo: PathBuf,
}

impl ResolvedPaths {
    /// Resolve every path for `location` under `config`.
    ///
    /// A missing home directory is not an error here; it shows up as an
    /// unavailable user root.
    pub fn resolve(config: &RegistryConfig, location: &Path) -> Result<Self, PathError> {
        let location = absolute_location(location)?;
        let user_root = match config.root_dir(RegistrationScope::User) {
            Ok(root) => Some(root),
            Err(PathError::NoHomeDir) => None,
            Err(e) => return Err(e),
        };

        Ok(Self {
            build_id: config.build_id.clone(),
            global_root: config.global_root.clone(),
            user_root,
            global_reginfo: RegistrationScope::Global.reginfo_path(&location),
            user_reginfo: RegistrationScope::User.reginfo_path(&location),
            location,
        })
    }
}

impl std::fmt::Display for ResolvedPaths {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "build_id = {}", self.build_id)?;
        writeln!(f, "global_root = {}", self.global_root.display())?;
        match &self.user_root {
            Some(root) => writeln!(f, "user_root = {}", root.display())?,
            None => writeln!(f, "user_root = <unavailable: HOME is not set>")?,
        }
        writeln!(f, "location = {}", self.location.display())?;
        writeln!(f, "global_reginfo = {}", self.global_reginfo.display())?;
        write!(f, "user_reginfo = {}", self.user_reginfo.display())
    }
}

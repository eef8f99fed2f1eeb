//! Registry configuration and validation.
//!
//! Defaults come from the compiled-in build identifier and the conventional
//! `/etc/gre.d` / `~/.gre.d` locations. `from_env` layers environment
//! overrides on top; adapters may layer CLI flags on top of that.

use std::env;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::paths::{DEFAULT_GLOBAL_ROOT, DEFAULT_USER_DIR_NAME, PathError, user_root};
use crate::scope::RegistrationScope;

/// Environment variable overriding the build identifier.
pub const ENV_BUILD_ID: &str = "GRECONF_BUILD_ID";

/// Environment variable overriding the system-wide registry directory.
pub const ENV_GLOBAL_ROOT: &str = "GRECONF_GLOBAL_ROOT";

/// Default tool name written into config file headers.
pub const DEFAULT_GENERATOR: &str = "greconf";

/// Settings the registry manager works with.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct RegistryConfig {
    /// Build identifier used as section name and primary key.
    pub build_id: String,

    /// System-wide registry directory.
    pub global_root: PathBuf,

    /// Directory name under `$HOME` for the per-user registry.
    pub user_dir_name: String,

    /// Tool name mentioned in the config file header comment.
    pub generator: String,
}

impl Default for RegistryConfig {
    fn default() -> Self {
        Self {
            build_id: greconf_build_info::BUILD_ID.to_string(),
            global_root: PathBuf::from(DEFAULT_GLOBAL_ROOT),
            user_dir_name: DEFAULT_USER_DIR_NAME.to_string(),
            generator: DEFAULT_GENERATOR.to_string(),
        }
    }
}

impl RegistryConfig {
    /// Defaults with `GRECONF_BUILD_ID` / `GRECONF_GLOBAL_ROOT` applied.
    ///
    /// Empty values are ignored. The result is validated.
    pub fn from_env() -> Result<Self, ConfigError> {
        let mut config = Self::default();

        if let Ok(build_id) = env::var(ENV_BUILD_ID) {
            if !build_id.trim().is_empty() {
                config.build_id = build_id.trim().to_string();
            }
        }

        if let Some(root) = env::var_os(ENV_GLOBAL_ROOT) {
            if !root.is_empty() {
                config.global_root = PathBuf::from(root);
            }
        }

        config.validate()?;
        Ok(config)
    }

    #[must_use]
    pub fn with_build_id(mut self, build_id: impl Into<String>) -> Self {
        self.build_id = build_id.into();
        self
    }

    #[must_use]
    pub fn with_global_root(mut self, root: impl Into<PathBuf>) -> Self {
        self.global_root = root.into();
        self
    }

    #[must_use]
    pub fn with_user_dir_name(mut self, name: impl Into<String>) -> Self {
        self.user_dir_name = name.into();
        self
    }

    #[must_use]
    pub fn with_generator(mut self, generator: impl Into<String>) -> Self {
        self.generator = generator.into();
        self
    }

    /// Registry directory for `scope`.
    ///
    /// Fails with [`PathError::NoHomeDir`] for the user scope when `HOME` is
    /// unset or empty.
    pub fn root_dir(&self, scope: RegistrationScope) -> Result<PathBuf, PathError> {
        match scope {
            RegistrationScope::Global => Ok(self.global_root.clone()),
            RegistrationScope::User => user_root(&self.user_dir_name),
        }
    }

    /// Validate configuration values.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !is_valid_key(&self.build_id) {
            return Err(ConfigError::InvalidBuildId(self.build_id.clone()));
        }

        if !self.global_root.is_absolute() {
            return Err(ConfigError::RelativeGlobalRoot(self.global_root.clone()));
        }

        let dir = Path::new(&self.user_dir_name);
        if self.user_dir_name.is_empty() || dir.components().count() != 1 || dir.is_absolute() {
            return Err(ConfigError::InvalidUserDirName(self.user_dir_name.clone()));
        }

        if self.generator.trim().is_empty() || self.generator.contains('\n') {
            return Err(ConfigError::InvalidGenerator);
        }

        Ok(())
    }
}

/// Returns true if `key` can name a `<key>.conf` file directly inside the
/// registry root.
pub fn is_valid_key(key: &str) -> bool {
    !key.is_empty()
        && key != "."
        && key != ".."
        && !key.contains(['/', '\\', '\0', '\n', '\r', '[', ']'])
}

/// Configuration validation error.
#[derive(Debug, Clone, thiserror::Error)]
pub enum ConfigError {
    #[error("Build identifier '{0}' cannot be used as a config file name")]
    InvalidBuildId(String),

    #[error("Global registry root must be absolute, got {}", .0.display())]
    RelativeGlobalRoot(PathBuf),

    #[error("User registry directory must be a single relative name, got '{0}'")]
    InvalidUserDirName(String),

    #[error("Generator name must be a non-empty single line")]
    InvalidGenerator,
}

//! CLI bootstrap - the composition root.
//!
//! Layers configuration (defaults, then `.env`/environment/flags as already
//! merged by clap) and builds the registry manager every handler uses.

use std::path::PathBuf;

use greconf_core::{RegistryConfig, RegistryManager};

use crate::error::CliError;
use crate::parser::Cli;

/// Bootstrap configuration for the CLI.
#[derive(Debug, Clone, Default)]
pub struct CliConfig {
    /// Build identifier override.
    pub build_id: Option<String>,
    /// System-wide registry directory override.
    pub global_root: Option<PathBuf>,
}

impl CliConfig {
    /// Take the overrides from parsed global options.
    pub fn from_cli(cli: &Cli) -> Self {
        Self {
            build_id: cli.build_id.clone(),
            global_root: cli.global_root.clone(),
        }
    }

    /// Apply the overrides on top of the compiled-in defaults.
    pub fn registry_config(&self) -> RegistryConfig {
        let mut config = RegistryConfig::default();
        if let Some(build_id) = self.build_id.as_deref().map(str::trim) {
            if !build_id.is_empty() {
                config = config.with_build_id(build_id);
            }
        }
        if let Some(root) = &self.global_root {
            if !root.as_os_str().is_empty() {
                config = config.with_global_root(root);
            }
        }
        config
    }
}

/// Fully composed context for CLI commands.
#[derive(Debug)]
pub struct CliContext {
    /// Registry manager configured for this invocation.
    pub manager: RegistryManager,
}

/// Build the CLI context from configuration.
pub fn bootstrap(config: &CliConfig) -> Result<CliContext, CliError> {
    let registry = config.registry_config();
    tracing::debug!(
        build_id = %registry.build_id,
        global_root = %registry.global_root.display(),
        "bootstrapping registry manager"
    );

    Ok(CliContext {
        manager: RegistryManager::new(registry)?,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn overrides_apply_on_defaults() {
        let config = CliConfig {
            build_id: Some("20230101120000".to_string()),
            global_root: Some(PathBuf::from("/srv/gre.d")),
        };
        let registry = config.registry_config();
        assert_eq!(registry.build_id, "20230101120000");
        assert_eq!(registry.global_root, PathBuf::from("/srv/gre.d"));
    }

    #[test]
    fn blank_overrides_are_ignored() {
        let config = CliConfig {
            build_id: Some("  ".to_string()),
            global_root: Some(PathBuf::new()),
        };
        assert_eq!(config.registry_config(), RegistryConfig::default());
    }

    #[test]
    fn invalid_override_is_a_config_error() {
        let config = CliConfig {
            build_id: Some("a/b".to_string()),
            global_root: None,
        };
        let err = bootstrap(&config).unwrap_err();
        assert_eq!(err.exit_code(), 78);
    }
}

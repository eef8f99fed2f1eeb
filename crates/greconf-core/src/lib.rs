//! Registry of installed runtime locations.
//!
//! A runtime registers its installation directory by dropping a small INI
//! file into `/etc/gre.d` (global) or `~/.gre.d` (user); other programs scan
//! those directories to discover it. The key chosen for that file is
//! remembered in the installation directory so the entry can be removed
//! again later.
//!
//! ```no_run
//! use std::path::Path;
//! use greconf_core::{RegistrationScope, RegistryManager};
//!
//! let manager = RegistryManager::from_env()?;
//! let registration = manager.register(RegistrationScope::User, Path::new("/opt/runtime-1"))?;
//! println!("registered as {}", registration.key);
//! manager.unregister(RegistrationScope::User, Path::new("/opt/runtime-1"));
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```
#![deny(unused_crate_dependencies)]

pub mod config;
pub mod ini;
pub mod paths;
pub mod registry;
pub mod scope;

pub use config::{ConfigError, RegistryConfig, is_valid_key};
pub use ini::{IniDocument, IniError};
pub use paths::{PathError, ResolvedPaths};
pub use registry::{
    Registration, RegistrationStatus, RegistryEntry, RegistryError, RegistryManager,
    UNIQ_LOOP_LIMIT,
};
pub use scope::{ParseScopeError, RegistrationScope};

//! Registration scope: system-wide or per-user.

use std::fmt;
use std::path::{Path, PathBuf};
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Bookkeeping file name for system-wide registrations.
pub const GLOBAL_REGINFO: &str = "global.reginfo";

/// Bookkeeping file name for per-user registrations.
pub const USER_REGINFO: &str = "user.reginfo";

/// Where a runtime location is registered.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RegistrationScope {
    /// The fixed system directory (`/etc/gre.d` by default).
    Global,
    /// `<home>/.gre.d` of the invoking user.
    #[default]
    User,
}

impl RegistrationScope {
    /// Returns both scopes, global first.
    pub const fn all() -> [Self; 2] {
        [Self::Global, Self::User]
    }

    /// File name of the bookkeeping file recording this scope's key.
    pub const fn reginfo_name(self) -> &'static str {
        match self {
            Self::Global => GLOBAL_REGINFO,
            Self::User => USER_REGINFO,
        }
    }

    /// Bookkeeping file path inside an installation directory.
    pub fn reginfo_path(self, location: &Path) -> PathBuf {
        location.join(self.reginfo_name())
    }
}

impl fmt::Display for RegistrationScope {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Global => write!(f, "global"),
            Self::User => write!(f, "user"),
        }
    }
}

/// Error returned when parsing an unknown scope name.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown registration scope '{0}' (expected 'global' or 'user')")]
pub struct ParseScopeError(String);

impl FromStr for RegistrationScope {
    type Err = ParseScopeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "global" => Ok(Self::Global),
            "user" => Ok(Self::User),
            other => Err(ParseScopeError(other.to_string())),
        }
    }
}

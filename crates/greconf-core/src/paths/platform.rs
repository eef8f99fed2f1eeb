//! Platform-specific path detection and resolution.
//!
//! Home directory lookup, installation-location normalization and the
//! filesystem-level location comparison used before deleting config files.

use std::env;
use std::fs;
use std::path::{Component, Path, PathBuf};

use super::error::PathError;

/// Default system-wide registry directory.
pub const DEFAULT_GLOBAL_ROOT: &str = "/etc/gre.d";

/// Default per-user registry directory name under `$HOME`.
pub const DEFAULT_USER_DIR_NAME: &str = ".gre.d";

/// Returns the invoking user's home directory from `HOME`.
///
/// Unlike the usual platform lookups this never falls back to the password
/// database: a missing or empty `HOME` means there is no user registry.
pub fn home_dir() -> Result<PathBuf, PathError> {
    match env::var_os("HOME") {
        Some(home) if !home.is_empty() => Ok(PathBuf::from(home)),
        _ => Err(PathError::NoHomeDir),
    }
}

/// Returns `<home>/<dir_name>`, the per-user registry root.
pub fn user_root(dir_name: &str) -> Result<PathBuf, PathError> {
    Ok(home_dir()?.join(dir_name))
}

/// Make an installation location absolute without touching the filesystem.
///
/// Relative locations are resolved against the current directory. The
/// result must be valid UTF-8 since it is written verbatim as `GRE_PATH`.
pub fn absolute_location(location: &Path) -> Result<PathBuf, PathError> {
    if location.as_os_str().is_empty() {
        return Err(PathError::EmptyPath);
    }

    let absolute = if location.is_absolute() {
        location.to_path_buf()
    } else {
        env::current_dir()
            .map(|cwd| cwd.join(location))
            .map_err(|e| PathError::CurrentDirError(e.to_string()))?
    };

    if absolute.to_str().is_none() {
        return Err(PathError::NonUtf8(absolute));
    }

    Ok(absolute)
}

/// Returns true when both paths name the same filesystem location.
///
/// Existing paths are compared after canonicalization, so symlinks and
/// `..` segments resolve. If either side no longer exists the comparison
/// falls back to lexically normalized absolute paths.
pub fn same_location(a: &Path, b: &Path) -> bool {
    if let (Ok(ca), Ok(cb)) = (fs::canonicalize(a), fs::canonicalize(b)) {
        return ca == cb;
    }

    match (lexical_absolute(a), lexical_absolute(b)) {
        (Some(la), Some(lb)) => la == lb,
        _ => false,
    }
}

/// Collapse `.` and `..` components without resolving symlinks.
fn lexical_absolute(path: &Path) -> Option<PathBuf> {
    let absolute = absolute_location(path).ok()?;
    let mut normalized = PathBuf::new();

    for component in absolute.components() {
        match component {
            Component::CurDir => {}
            Component::ParentDir => {
                normalized.pop();
            }
            other => normalized.push(other.as_os_str()),
        }
    }

    Some(normalized)
}

//! Registry directory creation.

use std::fs::{self, DirBuilder};
use std::path::Path;

use super::error::PathError;

/// Permission bits for newly created registry directories.
pub const REGISTRY_DIR_MODE: u32 = 0o775;

/// Ensure `path` is a directory this process can list and search.
///
/// A missing directory is created (with parents) using [`REGISTRY_DIR_MODE`].
/// An existing one must be a directory whose entries can be read and looked
/// up; otherwise every config file creation inside it would fail anyway.
pub fn ensure_directory(path: &Path) -> Result<(), PathError> {
    if path.exists() {
        if !path.is_dir() {
            return Err(PathError::NotADirectory(path.to_path_buf()));
        }
        return check_accessible(path);
    }

    let mut builder = DirBuilder::new();
    builder.recursive(true);

    #[cfg(unix)]
    {
        use std::os::unix::fs::DirBuilderExt;
        builder.mode(REGISTRY_DIR_MODE);
    }

    builder.create(path).map_err(|e| PathError::CreateFailed {
        path: path.to_path_buf(),
        reason: e.to_string(),
    })
}

fn check_accessible(path: &Path) -> Result<(), PathError> {
    let not_accessible = |e: std::io::Error| PathError::NotAccessible {
        path: path.to_path_buf(),
        reason: e.to_string(),
    };

    // Listing needs read permission, resolving an entry needs search permission.
    fs::read_dir(path).map_err(not_accessible)?;
    fs::metadata(path.join(".")).map_err(not_accessible)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn creates_missing_directory_tree() {
        let tmp = tempfile::tempdir().unwrap();
        let root = tmp.path().join("home").join(".gre.d");

        ensure_directory(&root).unwrap();
        assert!(root.is_dir());

        // Second call is a no-op.
        ensure_directory(&root).unwrap();
    }

    #[test]
    fn file_in_the_way_is_rejected() {
        let tmp = tempfile::tempdir().unwrap();
        let root = tmp.path().join("gre.d");
        std::fs::write(&root, "not a dir").unwrap();

        let err = ensure_directory(&root).unwrap_err();
        assert!(matches!(err, PathError::NotADirectory(_)));
    }

    #[test]
    fn create_failure_names_the_path() {
        let tmp = tempfile::tempdir().unwrap();
        let blocker = tmp.path().join("blocker");
        std::fs::write(&blocker, "file").unwrap();
        let root = blocker.join("gre.d");

        let err = ensure_directory(&root).unwrap_err();
        assert!(err.to_string().contains("could not create"));
        assert!(err.to_string().contains("gre.d"));
    }

    #[cfg(unix)]
    #[test]
    fn unlistable_directory_is_rejected() {
        use std::os::unix::fs::PermissionsExt;

        let tmp = tempfile::tempdir().unwrap();
        let root = tmp.path().join("gre.d");
        std::fs::create_dir(&root).unwrap();
        std::fs::set_permissions(&root, std::fs::Permissions::from_mode(0o000)).unwrap();

        // Privileged users bypass permission bits; nothing to check then.
        let privileged = std::fs::read_dir(&root).is_ok();
        let result = ensure_directory(&root);
        std::fs::set_permissions(&root, std::fs::Permissions::from_mode(0o755)).unwrap();
        if privileged {
            return;
        }

        let err = result.unwrap_err();
        assert!(matches!(err, PathError::NotAccessible { ref path, .. } if path == &root));
        assert!(err.to_string().contains("gre.d"));
    }

    #[cfg(unix)]
    #[test]
    fn created_directory_mode_is_bounded() {
        use std::os::unix::fs::PermissionsExt;

        let tmp = tempfile::tempdir().unwrap();
        let root = tmp.path().join("gre.d");
        ensure_directory(&root).unwrap();

        // The process umask may strip bits, but never adds any.
        let mode = std::fs::metadata(&root).unwrap().permissions().mode();
        assert_eq!(mode & !REGISTRY_DIR_MODE & 0o777, 0);
    }
}

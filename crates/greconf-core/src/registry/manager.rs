//! Registration and unregistration of runtime locations.

use std::fs;
use std::io;
use std::iter;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use super::bookkeeping::BookkeepingFile;
use super::conf_file::{
    CONF_EXTENSION, GRE_PATH_KEY, conf_path, create_conf_file, read_gre_path, render_conf,
};
use super::error::RegistryError;
use crate::config::{ConfigError, RegistryConfig, is_valid_key};
use crate::ini::IniDocument;
use crate::paths::{PathError, absolute_location, ensure_directory, same_location};
use crate::scope::RegistrationScope;

/// Number of `<buildid>_<i>` suffixes tried after the bare build identifier.
pub const UNIQ_LOOP_LIMIT: usize = 1000;

/// Outcome of a successful registration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Registration {
    pub scope: RegistrationScope,
    /// Key chosen for this location, also the config file stem.
    pub key: String,
    pub conf_path: PathBuf,
    pub reginfo_path: PathBuf,
}

/// A config file found in a registry directory.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RegistryEntry {
    pub key: String,
    pub build_id: String,
    pub gre_path: PathBuf,
    pub conf_path: PathBuf,
}

/// What a location's bookkeeping file says about it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "state", rename_all = "snake_case")]
pub enum RegistrationStatus {
    /// No bookkeeping file, or an empty one.
    NotRegistered,
    /// The recorded config file exists.
    Registered { key: String, conf_path: PathBuf },
    /// A key is recorded but its config file is gone (or the key is unusable).
    Stale { key: String },
}

/// Registers runtime locations in the global or per-user registry.
///
/// Holds no state besides its configuration; every call re-reads the disk.
#[derive(Debug, Clone)]
pub struct RegistryManager {
    config: RegistryConfig,
}

impl RegistryManager {
    /// Create a manager after validating `config`.
    pub fn new(config: RegistryConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self { config })
    }

    /// Create a manager from defaults plus environment overrides.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::new(RegistryConfig::from_env()?)
    }

    pub fn config(&self) -> &RegistryConfig {
        &self.config
    }

    /// Register `location` in the registry for `scope`.
    ///
    /// Records the chosen key in `<location>/<scope>.reginfo`. Fails without
    /// touching anything if the key already recorded there still has a
    /// config file.
    pub fn register(
        &self,
        scope: RegistrationScope,
        location: &Path,
    ) -> Result<Registration, RegistryError> {
        let root = self.config.root_dir(scope)?;
        let location = absolute_location(location)?;
        let gre_path = location
            .to_str()
            .ok_or_else(|| PathError::NonUtf8(location.clone()))?;

        let reginfo_path = scope.reginfo_path(&location);
        let bookkeeping_err = |source: io::Error| RegistryError::Bookkeeping {
            path: reginfo_path.clone(),
            source,
        };

        let mut reginfo = BookkeepingFile::open_rw(&reginfo_path).map_err(bookkeeping_err)?;
        let stored = reginfo.read_key().map_err(bookkeeping_err)?;

        if !stored.is_empty() {
            if is_valid_key(&stored) {
                let existing = conf_path(&root, &stored);
                if existing.exists() {
                    tracing::debug!(
                        conf = %existing.display(),
                        "configuration file already exists, no action was performed"
                    );
                    return Err(RegistryError::AlreadyRegistered {
                        key: stored,
                        conf_path: existing,
                    });
                }
            }

            tracing::debug!(key = %stored, reginfo = %reginfo_path.display(), "discarding stale bookkeeping");
            reginfo = reginfo.reopen_truncated().map_err(bookkeeping_err)?;
        }

        ensure_directory(&root).map_err(|source| {
            tracing::debug!(root = %root.display(), error = %source, "could not create registry directory");
            RegistryError::DirectoryCreate {
                path: root.clone(),
                source,
            }
        })?;

        let contents = render_conf(&self.config.generator, &self.config.build_id, gre_path);

        for key in candidate_keys(&self.config.build_id) {
            let conf = conf_path(&root, &key);
            if !create_conf_file(&conf, &contents) {
                continue;
            }

            if let Err(source) = reginfo.write_key(&key) {
                // An unrecorded config file could never be unregistered.
                if let Err(e) = fs::remove_file(&conf) {
                    tracing::warn!(conf = %conf.display(), error = %e, "failed to remove unrecorded config file");
                }
                return Err(bookkeeping_err(source));
            }

            tracing::info!(%scope, key = %key, conf = %conf.display(), location = %gre_path, "registered");
            return Ok(Registration {
                scope,
                key,
                conf_path: conf,
                reginfo_path: reginfo.path().to_path_buf(),
            });
        }

        Err(RegistryError::NamespaceExhausted {
            build_id: self.config.build_id.clone(),
            attempts: UNIQ_LOOP_LIMIT + 1,
        })
    }

    /// Undo a previous [`register`](Self::register) of `location`.
    ///
    /// Best-effort: the bookkeeping file is always removed once read, and
    /// the config file is removed only if its `GRE_PATH` is still this
    /// location. Any failure silently ends the operation.
    pub fn unregister(&self, scope: RegistrationScope, location: &Path) {
        let root = match self.config.root_dir(scope) {
            Ok(root) => root,
            Err(e) => {
                tracing::debug!(%scope, error = %e, "no registry root, nothing to unregister");
                return;
            }
        };

        let location = match absolute_location(location) {
            Ok(location) => location,
            Err(e) => {
                tracing::debug!(error = %e, "unusable location, nothing to unregister");
                return;
            }
        };

        let reginfo_path = scope.reginfo_path(&location);
        let stored = match BookkeepingFile::open_read(&reginfo_path) {
            Ok(mut file) => file.read_key(),
            Err(e) => {
                tracing::debug!(reginfo = %reginfo_path.display(), error = %e, "no bookkeeping file");
                return;
            }
        };

        if let Err(e) = fs::remove_file(&reginfo_path) {
            tracing::debug!(reginfo = %reginfo_path.display(), error = %e, "failed to remove bookkeeping file");
        }

        let key = match stored {
            Ok(key) if is_valid_key(&key) => key,
            Ok(key) => {
                tracing::debug!(key = %key, "no usable key recorded");
                return;
            }
            Err(e) => {
                tracing::debug!(error = %e, "failed to read bookkeeping file");
                return;
            }
        };

        let conf = conf_path(&root, &key);
        let registered = match read_gre_path(&conf, &self.config.build_id) {
            Ok(Some(path)) => path,
            Ok(None) => {
                tracing::debug!(conf = %conf.display(), "config file has no {GRE_PATH_KEY} for this build");
                return;
            }
            Err(e) => {
                tracing::debug!(error = %e, "config file unreadable");
                return;
            }
        };

        if !same_location(&registered, &location) {
            tracing::debug!(
                conf = %conf.display(),
                registered = %registered.display(),
                "config file points at another location, leaving it"
            );
            return;
        }

        match fs::remove_file(&conf) {
            Ok(()) => tracing::info!(%scope, key = %key, conf = %conf.display(), "unregistered"),
            Err(e) => tracing::debug!(conf = %conf.display(), error = %e, "failed to remove config file"),
        }
    }

    /// Report what the bookkeeping file of `location` records, read-only.
    pub fn status(
        &self,
        scope: RegistrationScope,
        location: &Path,
    ) -> Result<RegistrationStatus, RegistryError> {
        let root = self.config.root_dir(scope)?;
        let location = absolute_location(location)?;
        let reginfo_path = scope.reginfo_path(&location);

        let mut file = match BookkeepingFile::open_read(&reginfo_path) {
            Ok(file) => file,
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                return Ok(RegistrationStatus::NotRegistered);
            }
            Err(source) => {
                return Err(RegistryError::Bookkeeping {
                    path: reginfo_path,
                    source,
                });
            }
        };

        let key = file
            .read_key()
            .map_err(|source| RegistryError::Bookkeeping {
                path: reginfo_path.clone(),
                source,
            })?;

        if key.is_empty() {
            return Ok(RegistrationStatus::NotRegistered);
        }
        if !is_valid_key(&key) {
            return Ok(RegistrationStatus::Stale { key });
        }

        let conf = conf_path(&root, &key);
        if conf.exists() {
            Ok(RegistrationStatus::Registered {
                key,
                conf_path: conf,
            })
        } else {
            Ok(RegistrationStatus::Stale { key })
        }
    }

    /// List every registered runtime in the registry for `scope`.
    ///
    /// A missing registry directory yields an empty list. Files that cannot
    /// be parsed are skipped.
    pub fn entries(&self, scope: RegistrationScope) -> Result<Vec<RegistryEntry>, RegistryError> {
        let root = self.config.root_dir(scope)?;

        let dir = match fs::read_dir(&root) {
            Ok(dir) => dir,
            Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(Vec::new()),
            Err(source) => return Err(RegistryError::ReadDir { path: root, source }),
        };

        let mut entries = Vec::new();
        for dir_entry in dir.flatten() {
            let path = dir_entry.path();
            if path.extension().and_then(|ext| ext.to_str()) != Some(CONF_EXTENSION) {
                continue;
            }
            let Some(key) = path.file_stem().and_then(|stem| stem.to_str()) else {
                continue;
            };

            let doc = match IniDocument::load(&path) {
                Ok(doc) => doc,
                Err(e) => {
                    tracing::warn!(conf = %path.display(), error = %e, "skipping unreadable config file");
                    continue;
                }
            };

            for section in doc.sections() {
                if let Some(gre_path) = doc.get(section, GRE_PATH_KEY) {
                    entries.push(RegistryEntry {
                        key: key.to_string(),
                        build_id: section.to_string(),
                        gre_path: PathBuf::from(gre_path),
                        conf_path: path.clone(),
                    });
                }
            }
        }

        entries.sort_by(|a, b| a.key.cmp(&b.key).then_with(|| a.build_id.cmp(&b.build_id)));
        Ok(entries)
    }
}

/// The bare build identifier, then `<build_id>_0` .. `<build_id>_999`.
fn candidate_keys(build_id: &str) -> impl Iterator<Item = String> + '_ {
    iter::once(build_id.to_string())
        .chain((0..UNIQ_LOOP_LIMIT).map(move |i| format!("{build_id}_{i}")))
}

#[cfg(test)]
mod tests {
    use super::*;

    const BUILD_ID: &str = "20230101120000";

    fn manager(global_root: &Path) -> RegistryManager {
        RegistryManager::new(
            RegistryConfig::default()
                .with_build_id(BUILD_ID)
                .with_global_root(global_root),
        )
        .unwrap()
    }

    #[test]
    fn candidate_keys_order() {
        let keys: Vec<String> = candidate_keys("b").collect();
        assert_eq!(keys.len(), UNIQ_LOOP_LIMIT + 1);
        assert_eq!(keys[0], "b");
        assert_eq!(keys[1], "b_0");
        assert_eq!(keys[2], "b_1");
        assert_eq!(keys.last().map(String::as_str), Some("b_999"));
    }

    #[test]
    fn new_rejects_invalid_config() {
        let config = RegistryConfig::default().with_build_id("a/b");
        assert!(RegistryManager::new(config).is_err());
    }

    #[test]
    fn register_writes_conf_and_reginfo() {
        let tmp = tempfile::tempdir().unwrap();
        let root = tmp.path().join("gre.d");
        let location = tmp.path().join("runtime");
        fs::create_dir_all(&location).unwrap();

        let registration = manager(&root)
            .register(RegistrationScope::Global, &location)
            .unwrap();

        assert_eq!(registration.key, BUILD_ID);
        assert_eq!(registration.conf_path, root.join("20230101120000.conf"));
        assert_eq!(registration.reginfo_path, location.join("global.reginfo"));
        assert_eq!(fs::read_to_string(location.join("global.reginfo")).unwrap(), BUILD_ID);
        assert_eq!(
            read_gre_path(&registration.conf_path, BUILD_ID).unwrap(),
            Some(location.clone())
        );
    }

    #[test]
    fn stale_bookkeeping_is_replaced() {
        let tmp = tempfile::tempdir().unwrap();
        let root = tmp.path().join("gre.d");
        let location = tmp.path().join("runtime");
        fs::create_dir_all(&location).unwrap();
        fs::write(location.join("global.reginfo"), "19990101000000_42").unwrap();

        let registration = manager(&root)
            .register(RegistrationScope::Global, &location)
            .unwrap();

        assert_eq!(registration.key, BUILD_ID);
        assert_eq!(fs::read_to_string(location.join("global.reginfo")).unwrap(), BUILD_ID);
    }

    #[test]
    fn tampered_bookkeeping_is_treated_as_stale() {
        let tmp = tempfile::tempdir().unwrap();
        let root = tmp.path().join("gre.d");
        let location = tmp.path().join("runtime");
        fs::create_dir_all(&location).unwrap();
        fs::write(location.join("global.reginfo"), "../../outside").unwrap();

        let registration = manager(&root)
            .register(RegistrationScope::Global, &location)
            .unwrap();
        assert_eq!(registration.key, BUILD_ID);
    }

    #[test]
    fn register_fails_when_root_cannot_be_created() {
        let tmp = tempfile::tempdir().unwrap();
        let blocker = tmp.path().join("blocker");
        fs::write(&blocker, "file").unwrap();
        let location = tmp.path().join("runtime");
        fs::create_dir_all(&location).unwrap();

        let err = manager(&blocker.join("gre.d"))
            .register(RegistrationScope::Global, &location)
            .unwrap_err();
        assert!(matches!(err, RegistryError::DirectoryCreate { .. }));
        assert!(err.to_string().contains("could not create"));
    }

    #[cfg(unix)]
    #[test]
    fn register_rejects_unlistable_root_up_front() {
        use std::os::unix::fs::PermissionsExt;

        let tmp = tempfile::tempdir().unwrap();
        let root = tmp.path().join("gre.d");
        let location = tmp.path().join("runtime");
        fs::create_dir_all(&root).unwrap();
        fs::create_dir_all(&location).unwrap();
        fs::set_permissions(&root, fs::Permissions::from_mode(0o000)).unwrap();

        let privileged = fs::read_dir(&root).is_ok();
        let result = manager(&root).register(RegistrationScope::Global, &location);
        fs::set_permissions(&root, fs::Permissions::from_mode(0o755)).unwrap();
        if privileged {
            return;
        }

        let err = result.unwrap_err();
        assert!(matches!(
            err,
            RegistryError::DirectoryCreate {
                source: PathError::NotAccessible { .. },
                ..
            }
        ));
    }

    #[test]
    fn register_fails_without_location_directory() {
        let tmp = tempfile::tempdir().unwrap();
        let err = manager(&tmp.path().join("gre.d"))
            .register(RegistrationScope::Global, &tmp.path().join("missing"))
            .unwrap_err();
        assert!(matches!(err, RegistryError::Bookkeeping { .. }));
    }

    #[test]
    fn unregister_ignores_invalid_key() {
        let tmp = tempfile::tempdir().unwrap();
        let root = tmp.path().join("gre.d");
        let location = tmp.path().join("runtime");
        fs::create_dir_all(&root).unwrap();
        fs::create_dir_all(&location).unwrap();

        // A crafted key must not reach outside the registry root.
        let victim = tmp.path().join("victim.conf");
        fs::write(
            &victim,
            render_conf("greconf", BUILD_ID, location.to_str().unwrap()),
        )
        .unwrap();
        fs::write(location.join("global.reginfo"), "../victim").unwrap();

        manager(&root).unregister(RegistrationScope::Global, &location);

        assert!(victim.exists());
        assert!(!location.join("global.reginfo").exists());
    }

    #[test]
    fn unregister_keeps_conf_without_matching_section() {
        let tmp = tempfile::tempdir().unwrap();
        let root = tmp.path().join("gre.d");
        let location = tmp.path().join("runtime");
        fs::create_dir_all(&root).unwrap();
        fs::create_dir_all(&location).unwrap();

        let conf = root.join("19990101000000.conf");
        fs::write(
            &conf,
            render_conf("greconf", "19990101000000", location.to_str().unwrap()),
        )
        .unwrap();
        fs::write(location.join("global.reginfo"), "19990101000000").unwrap();

        manager(&root).unregister(RegistrationScope::Global, &location);

        assert!(conf.exists());
        assert!(!location.join("global.reginfo").exists());
    }

    #[test]
    fn status_transitions() {
        let tmp = tempfile::tempdir().unwrap();
        let root = tmp.path().join("gre.d");
        let location = tmp.path().join("runtime");
        fs::create_dir_all(&location).unwrap();
        let manager = manager(&root);

        assert_eq!(
            manager.status(RegistrationScope::Global, &location).unwrap(),
            RegistrationStatus::NotRegistered
        );

        let registration = manager.register(RegistrationScope::Global, &location).unwrap();
        assert_eq!(
            manager.status(RegistrationScope::Global, &location).unwrap(),
            RegistrationStatus::Registered {
                key: BUILD_ID.to_string(),
                conf_path: registration.conf_path.clone(),
            }
        );

        fs::remove_file(&registration.conf_path).unwrap();
        assert_eq!(
            manager.status(RegistrationScope::Global, &location).unwrap(),
            RegistrationStatus::Stale {
                key: BUILD_ID.to_string()
            }
        );
    }

    #[test]
    fn entries_lists_registrations_sorted() {
        let tmp = tempfile::tempdir().unwrap();
        let root = tmp.path().join("gre.d");
        let manager = manager(&root);

        assert!(manager.entries(RegistrationScope::Global).unwrap().is_empty());

        let first = tmp.path().join("runtime-1");
        let second = tmp.path().join("runtime-2");
        fs::create_dir_all(&first).unwrap();
        fs::create_dir_all(&second).unwrap();
        manager.register(RegistrationScope::Global, &first).unwrap();
        manager.register(RegistrationScope::Global, &second).unwrap();
        fs::write(root.join("notes.txt"), "ignored").unwrap();
        fs::write(root.join("broken.conf"), [0xff, 0xfe]).unwrap();

        let entries = manager.entries(RegistrationScope::Global).unwrap();
        assert_eq!(entries.len(), 2);
        assert_eq!(entries[0].key, BUILD_ID);
        assert_eq!(entries[0].gre_path, first);
        assert_eq!(entries[1].key, "20230101120000_0");
        assert_eq!(entries[1].build_id, BUILD_ID);
        assert_eq!(entries[1].gre_path, second);
    }

    #[test]
    fn status_serializes_with_state_tag() {
        let json = serde_json::to_string(&RegistrationStatus::Stale {
            key: "k".to_string(),
        })
        .unwrap();
        assert_eq!(json, r#"{"state":"stale","key":"k"}"#);
    }
}

//! Registry config files: `<root>/<key>.conf`.

use std::fs::{self, File, OpenOptions};
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use crate::ini::{IniDocument, IniError};

/// File extension of registry config files.
pub const CONF_EXTENSION: &str = "conf";

/// The single key read back from a config file.
pub const GRE_PATH_KEY: &str = "GRE_PATH";

/// Permission bits for config files.
pub const CONF_FILE_MODE: u32 = 0o664;

/// Path of the config file for `key` inside `root`.
pub fn conf_path(root: &Path, key: &str) -> PathBuf {
    root.join(format!("{key}.{CONF_EXTENSION}"))
}

/// Text of a config file mapping `section` to `gre_path`.
pub fn render_conf(generator: &str, section: &str, gre_path: &str) -> String {
    format!(
        "# Registration file generated by {generator}. Do not edit.\n\n\
         [{section}]\n\
         {GRE_PATH_KEY}={gre_path}\n"
    )
}

/// Create `path` with `contents`, refusing to touch an existing file.
///
/// Returns `false` when the file already exists, cannot be opened, or a
/// write fails. A partially written file is removed before returning.
pub fn create_conf_file(path: &Path, contents: &str) -> bool {
    create_with(path, |file| {
        file.write_all(contents.as_bytes())?;
        file.sync_all()
    })
}

fn create_with(path: &Path, write: impl FnOnce(&mut File) -> io::Result<()>) -> bool {
    let mut options = OpenOptions::new();
    options.write(true).create_new(true);

    #[cfg(unix)]
    {
        use std::os::unix::fs::OpenOptionsExt;
        options.mode(CONF_FILE_MODE);
    }

    let mut file = match options.open(path) {
        Ok(file) => file,
        Err(e) => {
            tracing::debug!(path = %path.display(), error = %e, "config file not created");
            return false;
        }
    };

    let written = write(&mut file);
    drop(file);

    if let Err(e) = written {
        tracing::warn!(path = %path.display(), error = %e, "failed to write config file, removing it");
        if let Err(e) = fs::remove_file(path) {
            tracing::warn!(path = %path.display(), error = %e, "failed to remove partial config file");
        }
        return false;
    }

    true
}

/// Read `GRE_PATH` from `section` of the config file at `path`.
///
/// `Ok(None)` means the file parsed but carries no such entry.
pub fn read_gre_path(path: &Path, section: &str) -> Result<Option<PathBuf>, IniError> {
    let doc = IniDocument::load(path)?;
    Ok(doc.get(section, GRE_PATH_KEY).map(PathBuf::from))
}

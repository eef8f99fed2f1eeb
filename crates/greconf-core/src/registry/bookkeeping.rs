//! The per-location bookkeeping file (`global.reginfo` / `user.reginfo`).
//!
//! Holds the raw bytes of the key last registered for an installation
//! directory, with no delimiter. The handle is closed when dropped.

use std::fs::{File, OpenOptions};
use std::io::{self, Read, Write};
use std::path::{Path, PathBuf};

/// Upper bound on the number of key bytes read back.
pub const MAX_KEY_LEN: u64 = 4096;

/// Permission bits for bookkeeping files.
pub const REGINFO_FILE_MODE: u32 = 0o664;

/// An open bookkeeping file.
#[derive(Debug)]
pub struct BookkeepingFile {
    path: PathBuf,
    file: File,
}

impl BookkeepingFile {
    /// Open for reading and writing, creating the file if it is missing.
    pub fn open_rw(path: &Path) -> io::Result<Self> {
        let mut options = OpenOptions::new();
        options.read(true).write(true).create(true);
        Self::open_with(path, &options)
    }

    /// Open an existing file read-only.
    pub fn open_read(path: &Path) -> io::Result<Self> {
        let mut options = OpenOptions::new();
        options.read(true);
        Self::open_with(path, &options)
    }

    fn open_with(path: &Path, options: &OpenOptions) -> io::Result<Self> {
        let mut options = options.clone();

        #[cfg(unix)]
        {
            use std::os::unix::fs::OpenOptionsExt;
            options.mode(REGINFO_FILE_MODE);
        }

        let file = options.open(path)?;
        Ok(Self {
            path: path.to_path_buf(),
            file,
        })
    }

    /// Close this handle and reopen the file truncated for writing.
    pub fn reopen_truncated(self) -> io::Result<Self> {
        let Self { path, file } = self;
        drop(file);

        let mut options = OpenOptions::new();
        options.write(true).create(true).truncate(true);
        Self::open_with(&path, &options)
    }

    /// Read the stored key, at most [`MAX_KEY_LEN`] bytes.
    ///
    /// Returns an empty string for an empty file.
    pub fn read_key(&mut self) -> io::Result<String> {
        let mut buf = Vec::new();
        (&mut self.file).take(MAX_KEY_LEN).read_to_end(&mut buf)?;
        Ok(String::from_utf8_lossy(&buf).into_owned())
    }

    /// Write `key` at the current position and flush it to disk.
    pub fn write_key(&mut self, key: &str) -> io::Result<()> {
        self.file.write_all(key.as_bytes())?;
        self.file.sync_all()
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

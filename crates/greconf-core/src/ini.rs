//! Minimal INI reader for registry config files.
//!
//! Supports `[section]` headers, `key=value` pairs and `#`/`;` comment
//! lines. Lines that are neither are ignored, as are pairs that appear
//! before the first section header. Duplicate keys keep the last value.

use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

use thiserror::Error;

/// Errors raised while loading an INI file.
#[derive(Debug, Error)]
pub enum IniError {
    #[error("Failed to read {}: {source}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("{} is not valid UTF-8", path.display())]
    Encoding { path: PathBuf },
}

/// Parsed INI document.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct IniDocument {
    sections: BTreeMap<String, BTreeMap<String, String>>,
}

impl IniDocument {
    /// Read and parse the file at `path`.
    pub fn load(path: &Path) -> Result<Self, IniError> {
        let bytes = fs::read(path).map_err(|source| IniError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        let text = String::from_utf8(bytes).map_err(|_| IniError::Encoding {
            path: path.to_path_buf(),
        })?;
        Ok(Self::parse(&text))
    }

    /// Parse INI text. Never fails; unrecognized lines are skipped.
    pub fn parse(text: &str) -> Self {
        let mut sections: BTreeMap<String, BTreeMap<String, String>> = BTreeMap::new();
        let mut current: Option<String> = None;

        for line in text.lines() {
            let line = line.trim();
            if line.is_empty() || line.starts_with('#') || line.starts_with(';') {
                continue;
            }

            if let Some(rest) = line.strip_prefix('[') {
                current = rest.split_once(']').map(|(name, _)| name.trim().to_string());
                if let Some(name) = &current {
                    sections.entry(name.clone()).or_default();
                }
                continue;
            }

            let Some(section) = &current else {
                continue;
            };

            if let Some((key, value)) = line.split_once('=') {
                sections
                    .entry(section.clone())
                    .or_default()
                    .insert(key.trim().to_string(), value.trim().to_string());
            }
        }

        Self { sections }
    }

    /// Look up `key` in `section`.
    pub fn get(&self, section: &str, key: &str) -> Option<&str> {
        self.sections
            .get(section)
            .and_then(|entries| entries.get(key))
            .map(String::as_str)
    }

    /// Section names in sorted order.
    pub fn sections(&self) -> impl Iterator<Item = &str> {
        self.sections.keys().map(String::as_str)
    }
}

// src/session.rs
// Scratch persistence for the caller (autosave/restore of last input)

use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};

/// Key for the last submitted source code.
pub const KEY_LAST_CODE: &str = "syntaxshift_code";
/// Key for the last chosen source language.
pub const KEY_LAST_LANGUAGE: &str = "syntaxshift_language";

/// Simple key-value scratch store consumed by the controller's caller.
/// The controller itself never reads or writes it.
pub trait ScratchStore {
    fn get(&self, key: &str) -> Option<String>;
    fn set(&mut self, key: &str, value: &str) -> Result<()>;
}

/// JSON-file backed store under the user state directory.
pub struct FileScratchStore {
    path: PathBuf,
    entries: BTreeMap<String, String>,
}

impl FileScratchStore {
    pub fn open(path: impl Into<PathBuf>) -> Result<Self> {
        let path = path.into();
        let entries = match fs::read_to_string(&path) {
            Ok(raw) => serde_json::from_str(&raw)
                .with_context(|| format!("corrupt scratch file at {}", path.display()))?,
            Err(_) => BTreeMap::new(),
        };
        Ok(Self { path, entries })
    }

    /// Default location: `<state dir>/syntax-shift/scratch.json`.
    pub fn default_path() -> Option<PathBuf> {
        dirs::state_dir()
            .or_else(dirs::data_dir)
            .map(|dir| dir.join("syntax-shift").join("scratch.json"))
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn persist(&self) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)
                .with_context(|| format!("creating {}", parent.display()))?;
        }
        let raw = serde_json::to_string_pretty(&self.entries)?;
        fs::write(&self.path, raw)
            .with_context(|| format!("writing {}", self.path.display()))
    }
}

impl ScratchStore for FileScratchStore {
    fn get(&self, key: &str) -> Option<String> {
        self.entries.get(key).cloned()
    }

    fn set(&mut self, key: &str, value: &str) -> Result<()> {
        self.entries.insert(key.to_string(), value.to_string());
        self.persist()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn round_trips_the_fixed_keys() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("scratch.json");

        let mut store = FileScratchStore::open(&path).unwrap();
        store.set(KEY_LAST_CODE, "print(1)").unwrap();
        store.set(KEY_LAST_LANGUAGE, "python").unwrap();

        let reopened = FileScratchStore::open(&path).unwrap();
        assert_eq!(reopened.get(KEY_LAST_CODE).as_deref(), Some("print(1)"));
        assert_eq!(reopened.get(KEY_LAST_LANGUAGE).as_deref(), Some("python"));
    }

    #[test]
    fn missing_file_starts_empty() {
        let dir = tempfile::tempdir().unwrap();
        let store = FileScratchStore::open(dir.path().join("nope.json")).unwrap();
        assert!(store.get(KEY_LAST_CODE).is_none());
    }

    #[test]
    fn corrupt_file_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("scratch.json");
        fs::write(&path, "not json").unwrap();
        assert!(FileScratchStore::open(&path).is_err());
    }
}

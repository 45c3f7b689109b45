//! INI-file backed selection store.
//!
//! Persists the last chosen country, dataset, and route set under a
//! `[selection]` section in the user's config directory. Unreadable files
//! start over empty; failed writes are logged and ignored, the in-memory
//! selection stays authoritative.

use std::path::{Path, PathBuf};

use ini::Ini;
use tracing::warn;

use super::SelectionStore;

const SECTION: &str = "selection";

/// Durable [`SelectionStore`] backed by an INI file.
#[derive(Debug)]
pub struct IniSelectionStore {
    path: PathBuf,
    ini: Ini,
}

impl IniSelectionStore {
    /// Open a store at the given path.
    ///
    /// A missing or corrupt file is treated as empty.
    pub fn open(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        let ini = match Ini::load_from_file(&path) {
            Ok(ini) => ini,
            Err(e) => {
                if path.exists() {
                    warn!(path = %path.display(), error = %e, "Selection file unreadable, starting empty");
                }
                Ini::new()
            }
        };
        Self { path, ini }
    }

    /// The conventional store location: `<config dir>/transitwatch/selection.ini`.
    pub fn default_path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join("transitwatch").join("selection.ini"))
    }

    /// The file this store reads and writes.
    pub fn path(&self) -> &Path {
        &self.path
    }

    fn save(&self) {
        if let Some(parent) = self.path.parent() {
            if let Err(e) = std::fs::create_dir_all(parent) {
                warn!(path = %parent.display(), error = %e, "Failed to create config directory");
                return;
            }
        }
        if let Err(e) = self.ini.write_to_file(&self.path) {
            warn!(path = %self.path.display(), error = %e, "Failed to persist selection");
        }
    }
}

impl SelectionStore for IniSelectionStore {
    fn get(&self, key: &str) -> Option<String> {
        self.ini
            .section(Some(SECTION))
            .and_then(|section| section.get(key))
            .map(|value| value.to_string())
    }

    fn set(&mut self, key: &str, value: &str) {
        self.ini.with_section(Some(SECTION)).set(key, value);
        self.save();
    }

    fn remove(&mut self, key: &str) {
        if let Some(section) = self.ini.section_mut(Some(SECTION)) {
            section.remove(key);
        }
        self.save();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_round_trip_through_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("selection.ini");

        let mut store = IniSelectionStore::open(&path);
        store.set("country", "Italy");
        store.set("routes", "2,9,10");

        // Reopen from disk.
        let store = IniSelectionStore::open(&path);
        assert_eq!(store.get("country").as_deref(), Some("Italy"));
        assert_eq!(store.get("routes").as_deref(), Some("2,9,10"));
        assert!(store.get("dataset").is_none());
    }

    #[test]
    fn test_remove_persists() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("selection.ini");

        let mut store = IniSelectionStore::open(&path);
        store.set("dataset", "roma");
        store.remove("dataset");

        let store = IniSelectionStore::open(&path);
        assert!(store.get("dataset").is_none());
    }

    #[test]
    fn test_corrupt_file_starts_empty() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("selection.ini");
        std::fs::write(&path, "\u{0}\u{1}not an ini [[[").unwrap();

        let store = IniSelectionStore::open(&path);
        assert!(store.get("country").is_none());
    }

    #[test]
    fn test_missing_parent_directory_created_on_write() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("selection.ini");

        let mut store = IniSelectionStore::open(&path);
        store.set("country", "France");

        let store = IniSelectionStore::open(&path);
        assert_eq!(store.get("country").as_deref(), Some("France"));
    }
}

//! File-backed key-value store.
//!
//! The file holds a JSON object mapping slot names to their string values,
//! e.g. `{ "wigCart": "[...]" }`. A missing file is an empty store. Writes go
//! to a sibling temp file first and are renamed into place.

use std::collections::BTreeMap;
use std::fs;
use std::io::ErrorKind;
use std::path::PathBuf;

use teees_core::{KeyValueStore, StorageError};

/// Key-value store persisted as one JSON file.
#[derive(Debug, Clone)]
pub struct JsonFileStore {
    path: PathBuf,
}

impl JsonFileStore {
    #[must_use]
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    fn read_all(&self) -> Result<BTreeMap<String, String>, StorageError> {
        match fs::read_to_string(&self.path) {
            Ok(contents) if contents.trim().is_empty() => Ok(BTreeMap::new()),
            Ok(contents) => serde_json::from_str(&contents).map_err(|e| {
                StorageError::Backend(format!("{} is not a slot file: {e}", self.path.display()))
            }),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(BTreeMap::new()),
            Err(e) => Err(e.into()),
        }
    }

    fn write_all(&self, entries: &BTreeMap<String, String>) -> Result<(), StorageError> {
        let json = serde_json::to_string_pretty(entries)
            .map_err(|e| StorageError::Backend(e.to_string()))?;

        let mut tmp = self.path.clone().into_os_string();
        tmp.push(".tmp");
        let tmp = PathBuf::from(tmp);

        fs::write(&tmp, json)?;
        fs::rename(&tmp, &self.path)?;
        Ok(())
    }
}

impl KeyValueStore for JsonFileStore {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        Ok(self.read_all()?.remove(key))
    }

    fn set(&mut self, key: &str, value: String) -> Result<(), StorageError> {
        // An unreadable file is replaced rather than blocking every write
        let mut entries = self.read_all().unwrap_or_default();
        entries.insert(key.to_string(), value);
        self.write_all(&entries)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use teees_core::CART_SLOT_KEY;

    use super::*;

    #[test]
    fn test_missing_file_is_empty() {
        let dir = tempfile::tempdir().unwrap();
        let store = JsonFileStore::new(dir.path().join("cart.json"));
        assert_eq!(store.get(CART_SLOT_KEY).unwrap(), None);
    }

    #[test]
    fn test_set_then_get_survives_reopen() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("cart.json");

        let mut store = JsonFileStore::new(&path);
        store.set(CART_SLOT_KEY, "[]".to_string()).unwrap();
        store.set("other", "x".to_string()).unwrap();

        let reopened = JsonFileStore::new(&path);
        assert_eq!(reopened.get(CART_SLOT_KEY).unwrap().as_deref(), Some("[]"));
        assert_eq!(reopened.get("other").unwrap().as_deref(), Some("x"));
        assert!(!dir.path().join("cart.json.tmp").exists());
    }

    #[test]
    fn test_garbage_file_read_errors_but_write_recovers() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("cart.json");
        fs::write(&path, "definitely not json").unwrap();

        let mut store = JsonFileStore::new(&path);
        assert!(store.get(CART_SLOT_KEY).is_err());

        store.set(CART_SLOT_KEY, "[]".to_string()).unwrap();
        assert_eq!(store.get(CART_SLOT_KEY).unwrap().as_deref(), Some("[]"));
    }
}

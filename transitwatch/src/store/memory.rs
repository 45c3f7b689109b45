//! In-memory selection store.

use std::collections::HashMap;

use super::SelectionStore;

/// Volatile [`SelectionStore`] backed by a map.
///
/// Useful in tests and in hosts that do not want on-disk persistence.
#[derive(Debug, Default)]
pub struct MemorySelectionStore {
    values: HashMap<String, String>,
}

impl MemorySelectionStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }
}

impl SelectionStore for MemorySelectionStore {
    fn get(&self, key: &str) -> Option<String> {
        self.values.get(key).cloned()
    }

    fn set(&mut self, key: &str, value: &str) {
        self.values.insert(key.to_string(), value.to_string());
    }

    fn remove(&mut self, key: &str) {
        self.values.remove(key);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_set_get_remove() {
        let mut store = MemorySelectionStore::new();
        assert!(store.get("country").is_none());

        store.set("country", "Italy");
        assert_eq!(store.get("country").as_deref(), Some("Italy"));

        store.remove("country");
        assert!(store.get("country").is_none());
    }

    #[test]
    fn test_set_overwrites() {
        let mut store = MemorySelectionStore::new();
        store.set("dataset", "roma");
        store.set("dataset", "milano");
        assert_eq!(store.get("dataset").as_deref(), Some("milano"));
    }
}

//! Local persistent key-value storage.
//!
//! The browser-storage analog: a flat map of string keys to string values,
//! persisted as a single JSON object. Reads never fail - an absent or
//! unparsable file is treated as an empty store - and writes are best-effort,
//! matching the infallible surface the original code relied on.

use std::collections::BTreeMap;
use std::path::PathBuf;
use std::sync::{PoisonError, RwLock};

/// Storage keys owned by the cart store.
///
/// All four are cleared together after a completed checkout.
pub mod keys {
    /// JSON array of cart items.
    pub const CART: &str = "cart";

    /// Latest predicted price, stored as a numeric string.
    pub const PREDICTED_PRICE: &str = "predictedPrice";

    /// Product name cached for the follow-up "add predicted offer" action.
    pub const PREDICTED_PRODUCT_NAME: &str = "predictedProductName";

    /// Product category cached for the purchase record.
    pub const PREDICTED_PRODUCT_CATEGORY: &str = "predictedProductCategory";
}

/// File-backed string key-value store.
pub struct LocalStore {
    path: Option<PathBuf>,
    data: RwLock<BTreeMap<String, String>>,
}

impl LocalStore {
    /// Open a store backed by the given file.
    ///
    /// A missing or corrupt file yields an empty store; corruption is logged
    /// and the next write replaces the file.
    #[must_use]
    pub fn open(path: PathBuf) -> Self {
        let data = match std::fs::read_to_string(&path) {
            Ok(contents) => match serde_json::from_str(&contents) {
                Ok(map) => map,
                Err(e) => {
                    tracing::warn!(path = %path.display(), error = %e, "Unparsable storage file, starting empty");
                    BTreeMap::new()
                }
            },
            Err(_) => BTreeMap::new(),
        };

        Self {
            path: Some(path),
            data: RwLock::new(data),
        }
    }

    /// Open a store with no backing file. Used by tests.
    #[must_use]
    pub fn in_memory() -> Self {
        Self {
            path: None,
            data: RwLock::new(BTreeMap::new()),
        }
    }

    /// Read the value stored under `key`.
    #[must_use]
    pub fn get(&self, key: &str) -> Option<String> {
        self.data
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .get(key)
            .cloned()
    }

    /// Store `value` under `key`, replacing any prior value.
    pub fn set(&self, key: &str, value: &str) {
        let mut guard = self.data.write().unwrap_or_else(PoisonError::into_inner);
        guard.insert(key.to_string(), value.to_string());
        self.persist(&guard);
    }

    /// Remove `key` if present.
    pub fn remove(&self, key: &str) {
        let mut guard = self.data.write().unwrap_or_else(PoisonError::into_inner);
        if guard.remove(key).is_some() {
            self.persist(&guard);
        }
    }

    /// Write the whole map to the backing file, if any.
    ///
    /// Failures are logged and swallowed; the in-memory view stays current.
    fn persist(&self, data: &BTreeMap<String, String>) {
        let Some(path) = &self.path else {
            return;
        };
        match serde_json::to_string_pretty(data) {
            Ok(serialized) => {
                if let Err(e) = std::fs::write(path, serialized) {
                    tracing::error!(path = %path.display(), error = %e, "Failed to persist storage");
                }
            }
            Err(e) => {
                tracing::error!(error = %e, "Failed to serialize storage");
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn set_get_remove_roundtrip() {
        let store = LocalStore::in_memory();
        assert_eq!(store.get("cart"), None);

        store.set("cart", "[]");
        assert_eq!(store.get("cart").as_deref(), Some("[]"));

        store.remove("cart");
        assert_eq!(store.get("cart"), None);
    }

    #[test]
    fn values_survive_reopen() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("store.json");

        let store = LocalStore::open(path.clone());
        store.set(keys::PREDICTED_PRICE, "1349.10");
        drop(store);

        let reopened = LocalStore::open(path);
        assert_eq!(
            reopened.get(keys::PREDICTED_PRICE).as_deref(),
            Some("1349.10")
        );
    }

    #[test]
    fn corrupt_file_reads_as_empty() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("store.json");
        std::fs::write(&path, "not json {{{").unwrap();

        let store = LocalStore::open(path);
        assert_eq!(store.get(keys::CART), None);
    }

    #[test]
    fn missing_file_reads_as_empty() {
        let dir = tempfile::tempdir().unwrap();
        let store = LocalStore::open(dir.path().join("absent.json"));
        assert_eq!(store.get(keys::CART), None);
    }

    #[test]
    fn failed_write_keeps_the_in_memory_value() {
        let dir = tempfile::tempdir().unwrap();
        // Parent directory does not exist, so every persist fails.
        let store = LocalStore::open(dir.path().join("missing").join("store.json"));

        store.set(keys::CART, "[]");
        assert_eq!(store.get(keys::CART).as_deref(), Some("[]"));

        store.remove(keys::CART);
        assert_eq!(store.get(keys::CART), None);
    }

    #[test]
    fn removing_absent_key_is_a_noop() {
        let store = LocalStore::in_memory();
        store.remove("nothing");
        assert_eq!(store.get("nothing"), None);
    }
}

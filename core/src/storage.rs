use alloc::collections::BTreeMap;
use alloc::string::{String, ToString};
use serde::Serialize;
use serde::de::DeserializeOwned;

use crate::*;

/// String blob storage addressed by key, e.g. the browser's local storage.
pub trait KeyValueStore {
    fn read(&self, key: &str) -> Option<String>;
    fn write(&mut self, key: &str, value: String) -> Result<()>;
}

/// Types persisted as a single JSON value under a fixed key.
pub trait StorageKey {
    const KEY: &'static str;
}

pub trait StoredOrDefault: Sized {
    /// Reads the value from `store`, falling back to the default when it is missing or does not parse.
    fn stored_or_default<S: KeyValueStore + ?Sized>(store: &S) -> Self;
}

impl<T: StorageKey + DeserializeOwned + Default> StoredOrDefault for T {
    fn stored_or_default<S: KeyValueStore + ?Sized>(store: &S) -> Self {
        let Some(raw) = store.read(T::KEY) else {
            return T::default();
        };
        serde_json::from_str(&raw).unwrap_or_else(|err| {
            log::warn!("Discarding malformed value under {}: {}", T::KEY, err);
            T::default()
        })
    }
}

pub trait StoreSave {
    fn save_to<S: KeyValueStore + ?Sized>(&self, store: &mut S) -> Result<()>;
}

impl<T: StorageKey + Serialize> StoreSave for T {
    fn save_to<S: KeyValueStore + ?Sized>(&self, store: &mut S) -> Result<()> {
        let raw =
            serde_json::to_string(self).map_err(|err| GameError::StorageError(err.to_string()))?;
        store.write(T::KEY, raw)
    }
}

/// Process-local store, used natively and in tests.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct MemoryStore {
    entries: BTreeMap<String, String>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_entry(mut self, key: &str, value: &str) -> Self {
        self.entries.insert(key.to_string(), value.to_string());
        self
    }
}

impl KeyValueStore for MemoryStore {
    fn read(&self, key: &str) -> Option<String> {
        self.entries.get(key).cloned()
    }

    fn write(&mut self, key: &str, value: String) -> Result<()> {
        self.entries.insert(key.to_string(), value);
        Ok(())
    }
}

use gloo::storage::{LocalStorage, Storage};
use minegrid_core::{GameError, KeyValueStore, Result};

/// [`KeyValueStore`] backed by the browser's `localStorage`.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct LocalStore;

impl KeyValueStore for LocalStore {
    fn read(&self, key: &str) -> Option<String> {
        match LocalStorage::raw().get_item(key) {
            Ok(value) => value,
            Err(err) => {
                log::error!("Could not read {} from local storage: {:?}", key, err);
                None
            }
        }
    }

    fn write(&mut self, key: &str, value: String) -> Result<()> {
        LocalStorage::raw()
            .set_item(key, &value)
            .map_err(|err| GameError::StorageError(format!("{:?}", err)))
    }
}

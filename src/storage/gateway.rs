//! Persistence Gateway
//!
//! Typed load/save on top of a [`KeyValueStore`]. Loads fail open to the
//! type's default; saves never fail, they log and report `false`.

use serde::de::DeserializeOwned;
use serde::Serialize;

use super::traits::KeyValueStore;

pub struct PersistenceGateway {
    backend: Box<dyn KeyValueStore>,
}

impl PersistenceGateway {
    pub fn new(backend: impl KeyValueStore + 'static) -> Self {
        Self {
            backend: Box::new(backend),
        }
    }

    /// Parsed value under `key`, or `T::default()` if absent or corrupt
    pub fn load<T: DeserializeOwned + Default>(&self, key: &str) -> T {
        self.load_optional(key).unwrap_or_default()
    }

    /// Parsed value under `key`; absent, `null` and corrupt values are `None`
    pub fn load_optional<T: DeserializeOwned>(&self, key: &str) -> Option<T> {
        let raw = self.load_raw(key)?;
        match serde_json::from_str::<Option<T>>(&raw) {
            Ok(value) => value,
            Err(e) => {
                log::warn!("Discarding corrupt value under '{}': {}", key, e);
                None
            }
        }
    }

    /// Raw string under `key`
    pub fn load_raw(&self, key: &str) -> Option<String> {
        match self.backend.get(key) {
            Ok(value) => value,
            Err(e) => {
                log::warn!("Failed to read '{}': {}", key, e);
                None
            }
        }
    }

    /// Serialize and write `value` under `key`
    pub fn save<T: Serialize + ?Sized>(&mut self, key: &str, value: &T) -> bool {
        match serde_json::to_string(value) {
            Ok(json) => self.save_raw(key, &json),
            Err(e) => {
                log::warn!("Failed to serialize '{}': {}", key, e);
                false
            }
        }
    }

    pub fn save_raw(&mut self, key: &str, value: &str) -> bool {
        match self.backend.set(key, value) {
            Ok(()) => true,
            Err(e) => {
                log::warn!("Failed to write '{}': {}", key, e);
                false
            }
        }
    }

    pub fn remove(&mut self, key: &str) -> bool {
        match self.backend.remove(key) {
            Ok(()) => true,
            Err(e) => {
                log::warn!("Failed to remove '{}': {}", key, e);
                false
            }
        }
    }

    /// Wipe every key
    pub fn clear(&mut self) -> bool {
        match self.backend.clear() {
            Ok(()) => true,
            Err(e) => {
                log::warn!("Failed to clear storage: {}", e);
                false
            }
        }
    }
}

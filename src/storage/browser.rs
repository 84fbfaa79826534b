//! Browser localStorage backend (wasm32 only)

use wasm_bindgen::JsValue;

use super::traits::KeyValueStore;
use crate::domain::{DomainError, DomainResult};

pub struct BrowserStorage {
    storage: web_sys::Storage,
}

impl BrowserStorage {
    /// Open the window's localStorage
    pub fn open() -> DomainResult<Self> {
        let window = web_sys::window()
            .ok_or_else(|| DomainError::Internal("no window".to_string()))?;
        let storage = window
            .local_storage()
            .map_err(js_error)?
            .ok_or_else(|| DomainError::Internal("localStorage unavailable".to_string()))?;
        Ok(Self { storage })
    }
}

fn js_error(err: JsValue) -> DomainError {
    DomainError::Internal(format!("{:?}", err))
}

impl KeyValueStore for BrowserStorage {
    fn get(&self, key: &str) -> DomainResult<Option<String>> {
        self.storage.get_item(key).map_err(js_error)
    }

    fn set(&mut self, key: &str, value: &str) -> DomainResult<()> {
        self.storage.set_item(key, value).map_err(js_error)
    }

    fn remove(&mut self, key: &str) -> DomainResult<()> {
        self.storage.remove_item(key).map_err(js_error)
    }

    fn clear(&mut self) -> DomainResult<()> {
        self.storage.clear().map_err(js_error)
    }
}

//! `localStorage` / `sessionStorage` as key-value backends.

use pc_storage::{KvBackend, StorageError};
use wasm_bindgen::JsValue;

pub struct BrowserStorage {
    storage: web_sys::Storage,
}

impl BrowserStorage {
    pub fn local() -> Result<Self, StorageError> {
        let storage = window()?
            .local_storage()
            .map_err(js_error)?
            .ok_or_else(|| StorageError::Unavailable("localStorage".to_owned()))?;
        Ok(Self { storage })
    }

    pub fn session() -> Result<Self, StorageError> {
        let storage = window()?
            .session_storage()
            .map_err(js_error)?
            .ok_or_else(|| StorageError::Unavailable("sessionStorage".to_owned()))?;
        Ok(Self { storage })
    }
}

impl KvBackend for BrowserStorage {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        self.storage.get_item(key).map_err(js_error)
    }

    fn set(&self, key: &str, value: &str) -> Result<(), StorageError> {
        self.storage.set_item(key, value).map_err(js_error)
    }

    fn remove(&self, key: &str) -> Result<(), StorageError> {
        self.storage.remove_item(key).map_err(js_error)
    }
}

fn window() -> Result<web_sys::Window, StorageError> {
    web_sys::window().ok_or_else(|| StorageError::Unavailable("window".to_owned()))
}

fn js_error(err: JsValue) -> StorageError {
    StorageError::Backend(format!("{:?}", err))
}

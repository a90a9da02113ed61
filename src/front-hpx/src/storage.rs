use core_hpx::{Error, KeyValueStore};
use wasm_bindgen::prelude::*;
use web_sys::{Storage, Window, console};

use crate::js_error_message;

/// `window.localStorage` as a [`KeyValueStore`].
pub struct LocalStore {
    storage: Storage,
}

impl LocalStore {
    pub fn from_window(window: &Window) -> Result<Self, JsValue> {
        let storage = window
            .local_storage()?
            .ok_or_else(|| JsValue::from_str("localStorage is unavailable"))?;
        Ok(Self { storage })
    }
}

impl KeyValueStore for LocalStore {
    fn get(&self, key: &str) -> Option<String> {
        self.storage.get_item(key).ok().flatten()
    }

    fn set(&self, key: &str, value: &str) -> Result<(), Error> {
        self.storage.set_item(key, value).map_err(|e| {
            let message = js_error_message(&e);
            console::error_1(&format!("Failed to persist '{}' to localStorage: {}", key, message).into());
            Error::Storage(message)
        })
    }
}

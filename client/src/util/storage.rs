//! `localStorage`-backed session storage.
//!
//! SYSTEM CONTEXT
//! ==============
//! The session store writes through this backend so the session survives
//! reloads. The storage handle is looked up on every call, which keeps
//! `BrowserStorage` a zero-sized `Send + Sync` value that can live inside the
//! app-wide session context.

use session::{KeyValueStorage, StorageError};

/// [`KeyValueStorage`] over `window.localStorage`.
#[derive(Clone, Copy, Debug, Default)]
pub struct BrowserStorage;

#[cfg(feature = "csr")]
fn local_storage() -> Result<web_sys::Storage, StorageError> {
    web_sys::window()
        .and_then(|w| w.local_storage().ok().flatten())
        .ok_or_else(|| StorageError::Unavailable("localStorage is not available".to_owned()))
}

#[cfg(feature = "csr")]
fn js_error(err: wasm_bindgen::JsValue) -> StorageError {
    StorageError::Unavailable(format!("{err:?}"))
}

#[cfg(not(feature = "csr"))]
fn not_in_browser() -> StorageError {
    StorageError::Unavailable("localStorage is only available in the browser".to_owned())
}

impl KeyValueStorage for BrowserStorage {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        #[cfg(feature = "csr")]
        {
            local_storage()?.get_item(key).map_err(js_error)
        }
        #[cfg(not(feature = "csr"))]
        {
            let _ = key;
            Err(not_in_browser())
        }
    }

    fn set(&self, key: &str, value: &str) -> Result<(), StorageError> {
        #[cfg(feature = "csr")]
        {
            local_storage()?.set_item(key, value).map_err(js_error)
        }
        #[cfg(not(feature = "csr"))]
        {
            let _ = (key, value);
            Err(not_in_browser())
        }
    }

    fn remove(&self, key: &str) -> Result<(), StorageError> {
        #[cfg(feature = "csr")]
        {
            local_storage()?.remove_item(key).map_err(js_error)
        }
        #[cfg(not(feature = "csr"))]
        {
            let _ = key;
            Err(not_in_browser())
        }
    }
}

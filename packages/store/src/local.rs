//! # Browser local storage
//!
//! [`LocalStore`] is the [`KeyValueStore`] used on the web platform. It writes
//! straight into `window.localStorage`, which survives page reloads and is shared
//! by every tab of the same origin.
//!
//! The `Storage` handle is looked up on every call; `web_sys::Storage` is not
//! `Clone`-friendly across async boundaries and the lookup is cheap. All errors
//! (storage disabled, quota exceeded, private mode) are swallowed.

use crate::kv::KeyValueStore;

/// `window.localStorage`-backed KeyValueStore.
#[derive(Clone, Debug, Default)]
pub struct LocalStore;

impl LocalStore {
    pub fn new() -> Self {
        Self
    }

    fn storage() -> Option<web_sys::Storage> {
        web_sys::window()?.local_storage().ok().flatten()
    }
}

impl KeyValueStore for LocalStore {
    async fn get(&self, key: &str) -> Option<String> {
        Self::storage()?.get_item(key).ok()?
    }

    async fn set(&self, key: &str, value: &str) {
        if let Some(storage) = Self::storage() {
            let _ = storage.set_item(key, value);
        }
    }

    async fn remove(&self, key: &str) {
        if let Some(storage) = Self::storage() {
            let _ = storage.remove_item(key);
        }
    }
}

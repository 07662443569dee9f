//! # Filesystem-backed key-value store
//!
//! [`FileStore`] persists each key as a small file under a base directory. It is
//! the native counterpart of the browser's local storage, used when the UI runs
//! outside a browser (e.g. `dx serve` on desktop during development).
//!
//! ## Layout
//!
//! ```text
//! <base_dir>/
//! ├── access_token
//! ├── user_info
//! └── locale
//! ```
//!
//! Keys are sanitised so that only `[A-Za-z0-9_-]` reach the filesystem.

use std::path::PathBuf;

use crate::kv::KeyValueStore;

/// Filesystem-backed KeyValueStore for native builds.
#[derive(Clone, Debug)]
pub struct FileStore {
    base: PathBuf,
}

impl FileStore {
    pub fn new(base: PathBuf) -> Self {
        Self { base }
    }

    fn key_path(&self, key: &str) -> PathBuf {
        let name: String = key
            .chars()
            .map(|c| if c.is_ascii_alphanumeric() || c == '-' || c == '_' { c } else { '_' })
            .collect();
        self.base.join(name)
    }
}

impl KeyValueStore for FileStore {
    async fn get(&self, key: &str) -> Option<String> {
        std::fs::read_to_string(self.key_path(key)).ok()
    }

    async fn set(&self, key: &str, value: &str) {
        let _ = std::fs::create_dir_all(&self.base);
        let _ = std::fs::write(self.key_path(key), value);
    }

    async fn remove(&self, key: &str) {
        let _ = std::fs::remove_file(self.key_path(key));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_file_store_roundtrip() {
        let dir = std::env::temp_dir().join(format!("gatherings_test_{}", std::process::id()));
        let _ = std::fs::remove_dir_all(&dir);

        let store = FileStore::new(dir.clone());
        store.set("access_token", "token-1").await;

        // Re-open from same directory
        let reopened = FileStore::new(dir.clone());
        assert_eq!(reopened.get("access_token").await.as_deref(), Some("token-1"));

        reopened.remove("access_token").await;
        assert!(store.get("access_token").await.is_none());

        // Removing a missing key is a no-op
        reopened.remove("access_token").await;

        let _ = std::fs::remove_dir_all(&dir);
    }

    #[test]
    fn test_key_path_is_sanitised() {
        let store = FileStore::new(PathBuf::from("/tmp/base"));
        assert_eq!(store.key_path("../etc/passwd"), PathBuf::from("/tmp/base/___etc_passwd"));
        assert_eq!(store.key_path("user_info"), PathBuf::from("/tmp/base/user_info"));
    }
}

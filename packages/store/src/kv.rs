//! # Durable client storage
//!
//! [`KeyValueStore`] is the seam between the application and whatever durable
//! storage the platform offers. The session token, the cached identity and the
//! chosen locale are the only things written through it, each under a fixed key.
//!
//! | Implementation | Platform | Backing |
//! |----------------|----------|---------|
//! | [`crate::MemoryStore`] | any | `HashMap` behind `Arc<Mutex<_>>`, used by tests |
//! | [`crate::FileStore`] | native | one file per key under a data directory |
//! | `LocalStore` | WASM + `web` | the browser's `window.localStorage` |
//!
//! Reads return `None` on any backend failure and writes are best-effort, so an
//! unavailable storage degrades to "nothing persisted" instead of failing a view.

/// Async string key-value storage.
pub trait KeyValueStore {
    fn get(&self, key: &str) -> impl std::future::Future<Output = Option<String>>;
    fn set(&self, key: &str, value: &str) -> impl std::future::Future<Output = ()>;
    fn remove(&self, key: &str) -> impl std::future::Future<Output = ()>;
}

//! Shared API client constructor for all platforms.
//!
//! Every view talks to the server through one [`Client`], wired as
//! `ApiClient → AuthMiddleware → ReqwestTransport`, with the session kept in the
//! platform's [`store::KeyValueStore`]:
//! - **Web** (WASM + `web` feature): `localStorage` via [`store::LocalStore`]
//! - **WASM without `web`**: in memory via [`store::MemoryStore`]
//! - **Desktop / tests** (native): filesystem via [`store::FileStore`]

use api::{
    ApiClient, AuthMiddleware, ReqwestTransport, Session, SessionManager, UnauthorizedHook,
};
use dioxus::prelude::*;
use store::AppConfig;

#[cfg(all(target_arch = "wasm32", feature = "web"))]
pub type PlatformStore = store::LocalStore;
#[cfg(all(target_arch = "wasm32", not(feature = "web")))]
pub type PlatformStore = store::MemoryStore;
#[cfg(not(target_arch = "wasm32"))]
pub type PlatformStore = store::FileStore;

/// Transport stack used by the app.
pub type AppTransport = AuthMiddleware<ReqwestTransport, PlatformStore>;

/// The client type handed to every view.
pub type Client = ApiClient<AppTransport>;

/// Session lifecycle service over [`Client`].
pub type Manager = SessionManager<AppTransport, PlatformStore>;

/// Open the platform's durable store.
pub fn platform_store() -> PlatformStore {
    #[cfg(all(target_arch = "wasm32", feature = "web"))]
    {
        store::LocalStore::new()
    }
    #[cfg(all(target_arch = "wasm32", not(feature = "web")))]
    {
        store::MemoryStore::new()
    }
    #[cfg(not(target_arch = "wasm32"))]
    {
        let base = dirs::data_dir()
            .unwrap_or_else(|| std::path::PathBuf::from("."))
            .join("gatherings");
        store::FileStore::new(base)
    }
}

/// Build the client and its session manager from the configuration.
///
/// `on_unauthorized` runs after the middleware has cleared the session because
/// the server rejected the token.
pub fn make_client(config: &AppConfig, on_unauthorized: UnauthorizedHook) -> (Client, Manager) {
    let session = Session::new(platform_store());
    let transport = AuthMiddleware::new(
        ReqwestTransport::new(&config.api.base_url),
        session.clone(),
        on_unauthorized,
    );
    let client = ApiClient::new(transport);
    let manager = SessionManager::new(client.clone(), session);
    (client, manager)
}

/// The client provided by [`crate::AuthProvider`].
pub fn use_client() -> Client {
    use_context::<Client>()
}

/// Upload limits from the configuration provided by [`crate::AuthProvider`].
pub fn use_config() -> AppConfig {
    use_context::<AppConfig>()
}

//! Durable session: token and identity mirrored to client storage.

use store::KeyValueStore;
use tracing::warn;

use crate::models::{LoginResponse, UserInfo};

/// Storage key of the bearer token.
pub const ACCESS_TOKEN_KEY: &str = "access_token";

/// Storage key of the JSON-encoded [`UserInfo`].
pub const USER_INFO_KEY: &str = "user_info";

/// Typed view over the two session keys of a [`KeyValueStore`].
#[derive(Clone, Debug)]
pub struct Session<S> {
    store: S,
}

impl<S: KeyValueStore> Session<S> {
    pub fn new(store: S) -> Self {
        Self { store }
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    /// Persisted token, if any. An empty value counts as absent.
    pub async fn token(&self) -> Option<String> {
        self.store
            .get(ACCESS_TOKEN_KEY)
            .await
            .filter(|t| !t.is_empty())
    }

    /// Persisted identity. A value that no longer parses is treated as absent.
    pub async fn user(&self) -> Option<UserInfo> {
        let raw = self.store.get(USER_INFO_KEY).await?;
        match serde_json::from_str(&raw) {
            Ok(user) => Some(user),
            Err(e) => {
                warn!("Discarding unreadable {USER_INFO_KEY}: {e}");
                None
            }
        }
    }

    pub async fn persist(&self, login: &LoginResponse) {
        self.store.set(ACCESS_TOKEN_KEY, &login.access_token).await;
        self.store_user(&login.user_info).await;
    }

    pub async fn store_user(&self, user: &UserInfo) {
        match serde_json::to_string(user) {
            Ok(json) => self.store.set(USER_INFO_KEY, &json).await,
            Err(e) => warn!("Failed to encode {USER_INFO_KEY}: {e}"),
        }
    }

    /// Remove token and identity.
    pub async fn clear(&self) {
        self.store.remove(ACCESS_TOKEN_KEY).await;
        self.store.remove(USER_INFO_KEY).await;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::BTreeMap;
    use store::MemoryStore;

    fn login_response() -> LoginResponse {
        LoginResponse {
            access_token: "tok-1".to_string(),
            token_type: "bearer".to_string(),
            user_info: UserInfo {
                username: "ana".to_string(),
                email: Some("ana@example.org".to_string()),
                attributes: BTreeMap::new(),
            },
        }
    }

    #[tokio::test]
    async fn test_persist_and_clear() {
        let store = MemoryStore::new();
        let session = Session::new(store.clone());
        assert!(session.token().await.is_none());
        assert!(session.user().await.is_none());

        session.persist(&login_response()).await;
        assert_eq!(session.token().await.as_deref(), Some("tok-1"));
        assert_eq!(session.user().await.map(|u| u.username), Some("ana".to_string()));
        assert_eq!(store.len(), 2);

        session.clear().await;
        assert!(session.token().await.is_none());
        assert!(store.is_empty());
    }

    #[tokio::test]
    async fn test_corrupt_identity_is_absent() {
        let store = MemoryStore::new();
        store.set(USER_INFO_KEY, "{not json").await;
        store.set(ACCESS_TOKEN_KEY, "").await;

        let session = Session::new(store);
        assert!(session.user().await.is_none());
        assert!(session.token().await.is_none());
    }
}

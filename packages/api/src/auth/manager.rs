//! # Session lifecycle
//!
//! ```text
//! Unknown ──restore──▶ Checking ──▶ Authenticated(user)
//!                          │              │ logout / token rejected
//!                          └────────────▶ Anonymous
//! ```
//!
//! [`SessionManager`] performs the transitions; whoever renders the state (the UI
//! auth context) owns the current [`SessionState`] value.

use store::KeyValueStore;
use tracing::{debug, info, warn};

use super::Session;
use crate::client::ApiClient;
use crate::error::ApiError;
use crate::models::{LoginRequest, UserInfo};
use crate::transport::Transport;

#[derive(Clone, Debug, Default, PartialEq)]
pub enum SessionState {
    /// Nothing checked yet.
    #[default]
    Unknown,
    /// Startup check in flight.
    Checking,
    Authenticated(UserInfo),
    Anonymous,
}

impl SessionState {
    pub fn is_authenticated(&self) -> bool {
        matches!(self, Self::Authenticated(_))
    }

    pub fn user(&self) -> Option<&UserInfo> {
        match self {
            Self::Authenticated(user) => Some(user),
            _ => None,
        }
    }

    /// Whether the startup check has finished.
    pub fn is_resolved(&self) -> bool {
        matches!(self, Self::Authenticated(_) | Self::Anonymous)
    }
}

/// Login, logout and startup check over an [`ApiClient`] and a [`Session`].
pub struct SessionManager<T, S> {
    client: ApiClient<T>,
    session: Session<S>,
}

impl<T, S: Clone> Clone for SessionManager<T, S> {
    fn clone(&self) -> Self {
        Self {
            client: self.client.clone(),
            session: self.session.clone(),
        }
    }
}

impl<T: Transport, S: KeyValueStore> SessionManager<T, S> {
    pub fn new(client: ApiClient<T>, session: Session<S>) -> Self {
        Self { client, session }
    }

    pub fn client(&self) -> &ApiClient<T> {
        &self.client
    }

    /// Startup check. Without a persisted token no request is made. A persisted
    /// token the server no longer accepts is dropped silently.
    pub async fn restore(&self) -> SessionState {
        if self.session.token().await.is_none() {
            debug!("No persisted session");
            return SessionState::Anonymous;
        }
        match self.client.current_user().await {
            Ok(user) => {
                self.session.store_user(&user).await;
                info!("Restored session for {}", user.username);
                SessionState::Authenticated(user)
            }
            Err(e) => {
                debug!("Persisted session is no longer valid: {e}");
                self.session.clear().await;
                SessionState::Anonymous
            }
        }
    }

    /// Exchange credentials and persist the result. The server's error comes
    /// back unchanged and the session stays anonymous.
    pub async fn login(&self, credentials: &LoginRequest) -> Result<UserInfo, ApiError> {
        let response = self.client.login(credentials).await?;
        self.session.persist(&response).await;
        info!("Logged in as {}", response.user_info.username);
        Ok(response.user_info)
    }

    /// Always ends anonymous, whatever the server says.
    pub async fn logout(&self) -> SessionState {
        if let Err(e) = self.client.logout().await {
            warn!("Server logout failed, clearing local session anyway: {e}");
        }
        self.session.clear().await;
        SessionState::Anonymous
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{Harness, PASSWORD, TOKEN, USERNAME};

    #[tokio::test]
    async fn test_restore_without_token_makes_no_request() {
        let harness = Harness::new();

        let state = harness.manager.restore().await;

        assert_eq!(state, SessionState::Anonymous);
        assert_eq!(harness.backend.request_count(), 0);
    }

    #[tokio::test]
    async fn test_login_then_restore() {
        let harness = Harness::new();

        let user = harness
            .manager
            .login(&LoginRequest::new(USERNAME, PASSWORD))
            .await
            .unwrap();
        assert_eq!(user.display_name(), "Admin User");
        assert_eq!(harness.session().token().await.as_deref(), Some(TOKEN));

        let state = harness.manager.restore().await;
        assert!(state.is_authenticated());
        assert!(state.is_resolved());
        assert_eq!(state.user().map(|u| u.username.as_str()), Some(USERNAME));
    }

    #[tokio::test]
    async fn test_failed_login_stays_anonymous() {
        let harness = Harness::new();

        let err = harness
            .manager
            .login(&LoginRequest::new(USERNAME, "nope"))
            .await
            .unwrap_err();

        assert_eq!(err.to_string(), "Invalid username or password");
        assert!(harness.session().token().await.is_none());
        assert_eq!(harness.manager.restore().await, SessionState::Anonymous);
    }

    #[tokio::test]
    async fn test_restore_with_stale_token_clears_silently() {
        let harness = Harness::logged_in().await;
        harness.backend.expire_token();

        let state = harness.manager.restore().await;

        assert_eq!(state, SessionState::Anonymous);
        assert!(harness.session().token().await.is_none());
        assert!(harness.store.is_empty());
    }

    #[tokio::test]
    async fn test_logout_clears_even_when_server_unreachable() {
        let harness = Harness::logged_in().await;
        harness.backend.set_offline(true);

        let state = harness.manager.logout().await;

        assert_eq!(state, SessionState::Anonymous);
        assert!(harness.session().token().await.is_none());
        assert!(harness.store.is_empty());
    }

    #[test]
    fn test_state_helpers() {
        assert!(!SessionState::Unknown.is_resolved());
        assert!(!SessionState::Checking.is_resolved());
        assert!(SessionState::Anonymous.is_resolved());
        assert!(SessionState::Anonymous.user().is_none());
        assert_eq!(SessionState::default(), SessionState::Unknown);
    }
}

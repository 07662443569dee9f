//! Authentication context and hooks for the UI.

use std::rc::Rc;

use api::{ApiError, LoginRequest, SessionState, UnauthorizedHook, UserInfo};
use dioxus::prelude::*;
use store::AppConfig;

use crate::browser;
use crate::client::{make_client, Manager};
use crate::i18n::use_i18n;

/// Path of the login view, used when the server rejects the session.
pub const LOGIN_PATH: &str = "/login";

/// Session state plus the operations that change it.
#[derive(Clone)]
pub struct AuthContext {
    state: Signal<SessionState>,
    manager: Manager,
}

impl AuthContext {
    /// Current state. Reading it subscribes the calling component.
    pub fn state(&self) -> SessionState {
        (self.state)()
    }

    /// Exchange credentials. On failure the server's message comes back
    /// unchanged and the state stays anonymous.
    pub async fn login(&self, credentials: LoginRequest) -> Result<UserInfo, ApiError> {
        let mut state = self.state;
        let user = self.manager.login(&credentials).await?;
        state.set(SessionState::Authenticated(user.clone()));
        Ok(user)
    }

    pub async fn logout(&self) {
        let mut state = self.state;
        let next = self.manager.logout().await;
        state.set(next);
    }
}

/// Get the authentication context provided by [`AuthProvider`].
pub fn use_auth() -> AuthContext {
    use_context::<AuthContext>()
}

/// Provider component that builds the API client and manages the session.
///
/// Provides [`AuthContext`], [`crate::Client`] and the [`AppConfig`] to every
/// descendant, and runs the startup session check on mount.
#[component]
pub fn AuthProvider(config: AppConfig, children: Element) -> Element {
    let mut state = use_signal(SessionState::default);

    let (client, manager) = use_hook(|| {
        let on_unauthorized: UnauthorizedHook = Rc::new(move || {
            let mut state = state;
            state.set(SessionState::Anonymous);
            browser::redirect(LOGIN_PATH);
        });
        make_client(&config, on_unauthorized)
    });

    use_context_provider(|| client.clone());
    use_context_provider(|| config.clone());
    use_context_provider(|| AuthContext {
        state,
        manager: manager.clone(),
    });

    let _ = use_resource(move || {
        let manager = manager.clone();
        async move {
            state.set(SessionState::Checking);
            let resolved = manager.restore().await;
            state.set(resolved);
        }
    });

    rsx! {
        {children}
    }
}

/// Button to log out the current user.
#[component]
pub fn LogoutButton(#[props(default = "".to_string())] class: String) -> Element {
    let auth = use_auth();
    let i18n = use_i18n();
    let mut busy = use_signal(|| false);

    let onclick = move |_| {
        let auth = auth.clone();
        async move {
            busy.set(true);
            auth.logout().await;
            browser::redirect(LOGIN_PATH);
        }
    };

    rsx! {
        button {
            class: "{class}",
            disabled: busy(),
            onclick: onclick,
            {i18n.t("auth.logout")}
        }
    }
}

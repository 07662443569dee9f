use std::fmt;
use std::rc::Rc;

use store::KeyValueStore;
use tracing::{info, warn};

use crate::auth::Session;
use crate::error::ApiError;
use crate::transport::{HttpRequest, HttpResponse, Transport};

/// Callback run after the session was cleared because the server rejected the token.
pub type UnauthorizedHook = Rc<dyn Fn()>;

/// Transport stage that applies the session policy to every request.
///
/// - Outgoing: the token is read from the session store at send time and attached
///   as `Authorization: Bearer <token>` when present.
/// - Incoming 401: the durable session is cleared and the unauthorized hook runs
///   (the web build navigates to the login view). For a credential exchange the
///   hook is skipped so the login view can show the server's message.
///
/// Every response, 401 included, is handed back unchanged.
pub struct AuthMiddleware<T, S> {
    inner: T,
    session: Session<S>,
    on_unauthorized: UnauthorizedHook,
}

impl<T, S> AuthMiddleware<T, S> {
    pub fn new(inner: T, session: Session<S>, on_unauthorized: UnauthorizedHook) -> Self {
        Self {
            inner,
            session,
            on_unauthorized,
        }
    }

    pub fn inner(&self) -> &T {
        &self.inner
    }

    pub fn session(&self) -> &Session<S> {
        &self.session
    }
}

impl<T: fmt::Debug, S: fmt::Debug> fmt::Debug for AuthMiddleware<T, S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AuthMiddleware")
            .field("inner", &self.inner)
            .field("session", &self.session)
            .finish_non_exhaustive()
    }
}

impl<T: Transport, S: KeyValueStore> Transport for AuthMiddleware<T, S> {
    async fn send(&self, mut request: HttpRequest) -> Result<HttpResponse, ApiError> {
        if let Some(token) = self.session.token().await {
            request.bearer = Some(token);
        }
        let credential_exchange = request.credential_exchange;
        let path = request.path.clone();

        let response = self.inner.send(request).await?;

        if response.status == 401 {
            self.session.clear().await;
            if credential_exchange {
                info!("Credentials rejected for {path}");
            } else {
                warn!("Session rejected by {path}, signing out");
                (self.on_unauthorized)();
            }
        }
        Ok(response)
    }
}

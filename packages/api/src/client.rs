//! # API gateway client
//!
//! [`ApiClient`] is the single chokepoint for outbound calls. It owns nothing but a
//! shared handle to its [`Transport`]; in the app that transport is an
//! [`crate::AuthMiddleware`] around a [`crate::ReqwestTransport`], so every method
//! below gets the bearer token and the 401 policy for free.
//!
//! Every call is one request and one response. There are no retries, no caching
//! and no deduplication. Resource methods live in their own modules:
//!
//! | Module | Endpoints |
//! |--------|-----------|
//! | this one | `/auth/login`, `/auth/logout`, `/auth/me`, `/health` |
//! | [`crate::persons`] | `/persons[/:id]` |
//! | [`crate::recurring_meetings`] | `/recurring-meetings[/:id]`, `/recurring-meetings/leader/:id` |
//! | [`crate::reports`] | `/reports[/:id]` |
//! | [`crate::attachments`] | `/reports/:id/attachments[/:id][/download]` |

use std::rc::Rc;

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

use crate::error::ApiError;
use crate::models::{LoginRequest, LoginResponse, UserInfo};
use crate::transport::{HttpRequest, HttpResponse, Transport};

/// Offset pagination for list endpoints.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Page {
    pub skip: u32,
    pub limit: u32,
}

impl Default for Page {
    fn default() -> Self {
        Self { skip: 0, limit: 100 }
    }
}

impl Page {
    pub fn new(skip: u32, limit: u32) -> Self {
        Self { skip, limit }
    }

    /// First `limit` items.
    pub fn first(limit: u32) -> Self {
        Self { skip: 0, limit }
    }

    pub(crate) fn apply(&self, request: HttpRequest) -> HttpRequest {
        request.query("skip", self.skip).query("limit", self.limit)
    }
}

/// Body of `GET /health`.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Health {
    pub status: String,
}

/// Shared, cheaply clonable API client.
pub struct ApiClient<T> {
    transport: Rc<T>,
}

impl<T> Clone for ApiClient<T> {
    fn clone(&self) -> Self {
        Self {
            transport: Rc::clone(&self.transport),
        }
    }
}

impl<T> PartialEq for ApiClient<T> {
    fn eq(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.transport, &other.transport)
    }
}

impl<T> ApiClient<T> {
    pub fn new(transport: T) -> Self {
        Self {
            transport: Rc::new(transport),
        }
    }

    pub fn transport(&self) -> &T {
        &self.transport
    }
}

impl<T: Transport> ApiClient<T> {
    /// Send and fail on any non-success status.
    pub(crate) async fn execute(&self, request: HttpRequest) -> Result<HttpResponse, ApiError> {
        self.transport.send(request).await?.error_for_status()
    }

    /// Send and decode a JSON body.
    pub(crate) async fn fetch<R: DeserializeOwned>(
        &self,
        request: HttpRequest,
    ) -> Result<R, ApiError> {
        self.execute(request).await?.json()
    }

    /// Exchange credentials for a token. Persisting it is the caller's job.
    pub async fn login(&self, credentials: &LoginRequest) -> Result<LoginResponse, ApiError> {
        let request = HttpRequest::post("/auth/login")
            .json(credentials)?
            .credential_exchange();
        self.fetch(request).await
    }

    pub async fn logout(&self) -> Result<(), ApiError> {
        self.execute(HttpRequest::post("/auth/logout")).await?;
        Ok(())
    }

    pub async fn current_user(&self) -> Result<UserInfo, ApiError> {
        self.fetch(HttpRequest::get("/auth/me")).await
    }

    pub async fn health(&self) -> Result<Health, ApiError> {
        self.fetch(HttpRequest::get("/health")).await
    }
}

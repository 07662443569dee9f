//! # API crate: REST gateway and session for the gatherings admin
//!
//! Everything the views need to talk to the server goes through this crate.
//!
//! ## Modules
//!
//! | Module | Purpose |
//! |--------|---------|
//! | [`transport`] | [`Transport`] trait, request/response values, [`ReqwestTransport`] |
//! | [`middleware`] | [`AuthMiddleware`]: bearer token on the way out, 401 policy on the way back |
//! | [`client`] | [`ApiClient`], [`Page`], auth and health endpoints |
//! | [`persons`], [`recurring_meetings`], [`reports`], [`attachments`] | one method per resource operation |
//! | [`auth`] | [`Session`] over a `store::KeyValueStore` and the [`SessionManager`] lifecycle |
//! | [`upload`] | [`UploadPolicy`] size and type checks run before an upload |
//! | [`error`] | [`ApiError`] |
//!
//! ## Wiring
//!
//! ```text
//! view ─▶ ApiClient ─▶ AuthMiddleware ─▶ ReqwestTransport ─▶ REST API
//!                          │   ▲
//!                  token   ▼   │ 401: clear + hook
//!                        Session (access_token, user_info)
//! ```

pub mod attachments;
pub mod auth;
pub mod client;
pub mod error;
pub mod middleware;
pub mod models;
pub mod persons;
pub mod recurring_meetings;
pub mod reports;
pub mod transport;
pub mod upload;

#[cfg(test)]
pub(crate) mod testing;

pub use attachments::{default_file_key, Download};
pub use auth::{Session, SessionManager, SessionState, ACCESS_TOKEN_KEY, USER_INFO_KEY};
pub use client::{ApiClient, Health, Page};
pub use error::ApiError;
pub use middleware::{AuthMiddleware, UnauthorizedHook};
pub use models::{LoginRequest, LoginResponse, UserInfo};
pub use transport::{Body, HttpRequest, HttpResponse, Method, ReqwestTransport, Transport};
pub use upload::{UploadError, UploadFile, UploadPolicy};

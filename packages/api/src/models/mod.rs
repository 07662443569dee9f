//! Data models owned by the API client. Entity models live in `store::models`.

mod user;

pub use user::{LoginRequest, LoginResponse, UserInfo};

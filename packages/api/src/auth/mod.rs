//! Session storage and lifecycle.

mod manager;
mod session;

pub use manager::{SessionManager, SessionState};
pub use session::{Session, ACCESS_TOKEN_KEY, USER_INFO_KEY};

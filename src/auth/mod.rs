//! Accounts: login, registration, session identity.

pub mod handlers;
pub mod middleware;
pub mod password;

pub use handlers::*;
pub use middleware::{ensure_session, session_cookie, CurrentSession, SessionId, SESSION_COOKIE_NAME};

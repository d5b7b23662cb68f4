//! Session cookie middleware and the current-session extractor.

use axum::{
    extract::{FromRequestParts, Request, State},
    http::{request::Parts, StatusCode},
    middleware::Next,
    response::{IntoResponse, Response},
};
use axum_extra::extract::cookie::{Cookie, CookieJar};

use crate::config;
use crate::session::{SessionContext, SessionStore};
use crate::state::AppState;

pub const SESSION_COOKIE_NAME: &str = "codemate_session";

/// Session ID resolved by [`ensure_session`] for the current request
#[derive(Debug, Clone)]
pub struct SessionId(pub String);

/// Session cookie carrying `id`, valid for one expiry window from now
pub fn session_cookie(id: String) -> Cookie<'static> {
    Cookie::build((SESSION_COOKIE_NAME, id))
        .path("/")
        .http_only(true)
        .secure(false) // Set to true in production with HTTPS
        .max_age(time::Duration::hours(config::SESSION_EXPIRY_HOURS))
        .build()
}

/// Attach a session to every request, issuing a cookie for new visitors and
/// extending it for returning ones.
pub async fn ensure_session(
    State(state): State<AppState>,
    jar: CookieJar,
    mut req: Request,
    next: Next,
) -> Response {
    let session_id = jar
        .get(SESSION_COOKIE_NAME)
        .map(|c| c.value().to_string())
        .filter(|id| state.sessions.touch(id))
        .unwrap_or_else(|| state.sessions.create());

    req.extensions_mut().insert(SessionId(session_id.clone()));
    let response = next.run(req).await;

    // Rotated sessions already carry their new cookie
    if state.sessions.contains(&session_id) {
        (jar.add(session_cookie(session_id)), response).into_response()
    } else {
        response
    }
}

/// The visitor's session. Anonymous visitors act as the guest user.
#[derive(Clone)]
pub struct CurrentSession {
    pub id: String,
    username: Option<String>,
    store: SessionStore,
}

impl CurrentSession {
    /// Logged-in username, or the guest name
    pub fn username(&self) -> &str {
        self.username.as_deref().unwrap_or(config::GUEST_USERNAME)
    }

    pub fn is_logged_in(&self) -> bool {
        self.username.is_some()
    }

    /// Snapshot of the session state
    pub fn context(&self) -> SessionContext {
        self.store.get(&self.id)
    }

    /// Mutate the session state. The store lock is held only for `f`.
    pub fn update<R>(&self, f: impl FnOnce(&mut SessionContext) -> R) -> R {
        self.store.update(&self.id, f)
    }
}

impl FromRequestParts<AppState> for CurrentSession {
    type Rejection = Response;

    async fn from_request_parts(parts: &mut Parts, state: &AppState) -> Result<Self, Self::Rejection> {
        let SessionId(id) = parts.extensions.get::<SessionId>().cloned().ok_or_else(|| {
            tracing::error!("Session middleware not installed");
            (StatusCode::INTERNAL_SERVER_ERROR, "Session unavailable").into_response()
        })?;

        Ok(CurrentSession {
            username: state.sessions.username(&id),
            id,
            store: state.sessions.clone(),
        })
    }
}

//! Authentication handlers for login, register, and logout.

use askama::Template;
use axum::{
    extract::{Query, State},
    response::{Html, IntoResponse, Redirect, Response},
    Form,
};
use axum_extra::extract::cookie::CookieJar;
use serde::Deserialize;

use super::middleware::{session_cookie, CurrentSession};
use super::password::{self, Verification};
use crate::config;
use crate::db::{self, LogOnError};
use crate::error::AppError;
use crate::handlers::{redirect_with, NavContext, Notice};
use crate::session::SessionContext;
use crate::state::AppState;

#[derive(Template)]
#[template(path = "auth/login.html")]
pub struct LoginTemplate {
    pub nav: NavContext,
    pub error: Option<String>,
    pub message: Option<String>,
    pub username: String,
}

#[derive(Template)]
#[template(path = "auth/register.html")]
pub struct RegisterTemplate {
    pub nav: NavContext,
    pub error: Option<String>,
    pub username: String,
}

#[derive(Deserialize)]
pub struct LoginForm {
    pub username: String,
    pub password: String,
}

#[derive(Deserialize)]
pub struct RegisterForm {
    pub username: String,
    pub password: String,
}

fn render_login(session: &CurrentSession, error: Option<String>, message: Option<String>, username: &str) -> Response {
    let template = LoginTemplate {
        nav: NavContext::new(session, "login"),
        error,
        message,
        username: username.to_string(),
    };
    Html(template.render().unwrap_or_default()).into_response()
}

fn render_register(session: &CurrentSession, error: Option<String>, username: &str) -> Response {
    let template = RegisterTemplate {
        nav: NavContext::new(session, "login"),
        error,
        username: username.to_string(),
    };
    Html(template.render().unwrap_or_default()).into_response()
}

/// GET /login - Show login page
pub async fn login_page(session: CurrentSession, Query(notice): Query<Notice>) -> Response {
    render_login(&session, notice.error, notice.msg, "")
}

/// POST /login - Check credentials and move the visitor to a fresh session
pub async fn login_submit(
    State(state): State<AppState>,
    session: CurrentSession,
    jar: CookieJar,
    Form(form): Form<LoginForm>,
) -> Response {
    let username = form.username.trim();
    if username.is_empty() || form.password.is_empty() {
        return render_login(&session, Some("Please fill out all fields.".into()), None, username);
    }

    match check_credentials(&state, username, &form.password) {
        Ok(true) => {}
        Ok(false) => {
            tracing::info!("Failed login for {}", username);
            return render_login(
                &session,
                Some("Incorrect username or password.".into()),
                None,
                username,
            );
        }
        Err(e) => {
            e.log("login");
            return render_login(&session, Some(e.user_message()), None, username);
        }
    }

    // New ID on every login; the deck and preferences come along
    let session_id = state.sessions.rotate(&session.id);
    state
        .sessions
        .update(&session_id, |ctx| ctx.username = Some(username.to_string()));
    tracing::info!("User {} logged in", username);

    (jar.add(session_cookie(session_id)), Redirect::to("/dashboard")).into_response()
}

fn check_credentials(state: &AppState, username: &str, password_text: &str) -> Result<bool, AppError> {
    let conn = db::try_lock(&state.db)?;
    let Some(stored) = db::get_password_hash(&conn, username)? else {
        return Ok(false);
    };

    match password::verify_password(password_text, &stored) {
        Verification::Valid => Ok(true),
        Verification::ValidLegacy => {
            // Replace the unsalted digest now that we have the plaintext
            if let Some(hash) = password::hash_password(password_text).log_warn("Failed to rehash password") {
                db::update_password_hash(&conn, username, &hash)
                    .log_warn("Failed to upgrade legacy password hash");
            }
            Ok(true)
        }
        Verification::Invalid => Ok(false),
    }
}

/// GET /register - Show registration page
pub async fn register_page(session: CurrentSession) -> Response {
    render_register(&session, None, "")
}

/// POST /register - Create an account
pub async fn register_submit(
    State(state): State<AppState>,
    session: CurrentSession,
    Form(form): Form<RegisterForm>,
) -> Response {
    let username = form.username.trim();

    if let Err(e) = register_user(&state, username, &form.password) {
        e.log("register");
        return render_register(&session, Some(e.user_message()), username);
    }

    tracing::info!("Registered user {}", username);
    redirect_with("/login", Ok("Account created successfully! Please log in.")).into_response()
}

fn register_user(state: &AppState, username: &str, password_text: &str) -> Result<(), AppError> {
    if username.is_empty() || password_text.is_empty() {
        return Err(AppError::Validation("Please fill out all fields.".into()));
    }
    if !is_valid_username(username) {
        return Err(AppError::Validation(
            "Username must be 3-32 alphanumeric characters or underscores".into(),
        ));
    }
    if username.eq_ignore_ascii_case(config::GUEST_USERNAME) {
        return Err(AppError::Validation("That username is reserved. Try another one.".into()));
    }

    let hash = password::hash_password(password_text).map_err(|e| {
        tracing::error!("Password hashing failed: {}", e);
        AppError::Validation("Failed to process password".into())
    })?;

    let conn = db::try_lock(&state.db)?;
    if db::username_exists(&conn, username)? {
        return Err(AppError::Validation("Username already exists. Try another one.".into()));
    }
    db::create_user(&conn, username, &hash)?;
    Ok(())
}

/// POST /logout - Forget the user and everything held in the session
pub async fn logout(session: CurrentSession) -> impl IntoResponse {
    if let Some(username) = session.context().username {
        tracing::info!("User {} logged out", username);
    }
    session.update(|ctx| *ctx = SessionContext::default());
    Redirect::to("/login")
}

fn is_valid_username(username: &str) -> bool {
    username.len() >= 3
        && username.len() <= 32
        && username
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '_')
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_valid_usernames() {
        assert!(is_valid_username("abc"));
        assert!(is_valid_username("user123"));
        assert!(is_valid_username("my_user"));
        assert!(is_valid_username("User_Name_123"));
        assert!(is_valid_username("a".repeat(32).as_str()));
    }

    #[test]
    fn test_invalid_usernames() {
        assert!(!is_valid_username("ab")); // too short
        assert!(!is_valid_username(&"a".repeat(33))); // too long
        assert!(!is_valid_username("user name")); // space
        assert!(!is_valid_username("user-name")); // hyphen
        assert!(!is_valid_username("user@name")); // special char
        assert!(!is_valid_username("")); // empty
    }
}

//! HTTP router.

use axum::{middleware, routing::get, routing::post, Router};
use tower_http::services::ServeDir;
use tower_http::trace::TraceLayer;

use crate::auth;
use crate::handlers;
use crate::paths;
use crate::state::AppState;

pub fn build_router(state: AppState) -> Router {
  Router::new()
    .route("/", get(handlers::index))
    .route("/login", get(auth::login_page).post(auth::login_submit))
    .route("/register", get(auth::register_page).post(auth::register_submit))
    .route("/logout", post(auth::logout))
    .route("/dashboard", get(handlers::dashboard))
    .route("/planner", get(handlers::planner_page).post(handlers::planner_submit))
    .route("/summarizer", get(handlers::summarizer_page).post(handlers::summarizer_submit))
    .route("/questions", get(handlers::questions_page).post(handlers::questions_submit))
    .route("/flashcards", get(handlers::flashcards_page))
    .route("/flashcards/generate", post(handlers::flashcards_generate))
    .route("/flashcards/import", post(handlers::flashcards_import))
    .route("/flashcards/{index}/edit", post(handlers::flashcards_edit))
    .route("/flashcards/{index}/delete", post(handlers::flashcards_delete))
    .route("/flashcards/mode", post(handlers::flashcards_mode))
    .route("/flashcards/reveal", post(handlers::flashcards_reveal))
    .route("/flashcards/next", post(handlers::flashcards_next))
    .route("/flashcards/previous", post(handlers::flashcards_previous))
    .route("/flashcards/restart", post(handlers::flashcards_restart))
    .route("/flashcards/export/{format}", get(handlers::flashcards_export))
    .route("/settings", get(handlers::settings_page).post(handlers::settings_submit))
    .layer(middleware::from_fn_with_state(state.clone(), auth::ensure_session))
    .nest_service("/static", ServeDir::new(paths::STATIC_DIR))
    .layer(TraceLayer::new_for_http())
    .with_state(state)
}

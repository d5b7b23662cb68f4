use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use thiserror::Error;
use tracing::{error, warn};

use crate::db::DbLockError;
use crate::flashcards::{DeckError, TransferError};
use crate::generation::GenerationError;
use crate::planner::PlanError;

#[derive(Error, Debug)]
pub enum AppError {
    #[error("Database error: {0}")]
    Database(#[from] rusqlite::Error),

    #[error("{0}")]
    DatabaseLock(#[from] DbLockError),

    #[error("{0}")]
    Plan(#[from] PlanError),

    #[error("{0}")]
    Deck(#[from] DeckError),

    #[error("{0}")]
    Transfer(#[from] TransferError),

    #[error("{0}")]
    Generation(#[from] GenerationError),

    #[error("{0}")]
    Validation(String),
}

impl AppError {
    /// Storage problems are logged at error, user mistakes at warn
    pub fn log(&self, ctx: &str) {
        match self {
            AppError::Database(e) => error!(context = %ctx, db_error = %e, "Database error"),
            AppError::DatabaseLock(e) => error!(context = %ctx, "{}", e),
            AppError::Generation(e) => warn!(context = %ctx, "Generation failed: {}", e),
            other => warn!(context = %ctx, "{}", other),
        }
    }

    pub fn is_storage(&self) -> bool {
        matches!(self, AppError::Database(_) | AppError::DatabaseLock(_))
    }

    /// Text shown in place of the failed action
    pub fn user_message(&self) -> String {
        if self.is_storage() {
            format!("Something went wrong while saving your data: {}", self)
        } else {
            self.to_string()
        }
    }

    pub fn status(&self) -> StatusCode {
        if self.is_storage() {
            StatusCode::INTERNAL_SERVER_ERROR
        } else {
            StatusCode::BAD_REQUEST
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        self.log("request");
        (self.status(), self.user_message()).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_storage_errors_are_server_errors() {
        let err = AppError::from(DbLockError);
        assert!(err.is_storage());
        assert_eq!(err.status(), StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(
            err.user_message(),
            "Something went wrong while saving your data: Database unavailable"
        );
    }

    #[test]
    fn test_validation_message_passes_through() {
        let err = AppError::Validation("Please enter a topic".into());
        assert!(!err.is_storage());
        assert_eq!(err.status(), StatusCode::BAD_REQUEST);
        assert_eq!(err.user_message(), "Please enter a topic");
    }

    #[test]
    fn test_wraps_domain_errors() {
        let err = AppError::from(DeckError::NotStudying);
        assert_eq!(err.user_message(), "Switch to study mode to reveal answers");
    }
}

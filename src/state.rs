//! Application state shared by all handlers.

use std::sync::Arc;

use crate::db::DbPool;
use crate::generation::Generator;
use crate::planner::TopicCatalog;
use crate::session::SessionStore;

/// Application state passed to all handlers
#[derive(Clone)]
pub struct AppState {
    /// Shared SQLite connection (users, planner, study log)
    pub db: DbPool,

    /// Per-visitor session contexts
    pub sessions: SessionStore,

    /// Text-generation backends
    pub generator: Arc<Generator>,

    /// Per-language topic lists for the planner
    pub topics: TopicCatalog,
}

impl AppState {
    pub fn new(db: DbPool, generator: Generator, topics: TopicCatalog) -> Self {
        Self {
            db,
            sessions: SessionStore::new(),
            generator: Arc::new(generator),
            topics,
        }
    }
}

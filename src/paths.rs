//! Project path functions - single source of truth for default file paths.
//!
//! ## Environment Variables
//!
//! - `DATA_DIR`: Override the base data directory (default: "data")
//!
//! Explicit `DATABASE_PATH` / `TOPICS_DIR` settings (see config.rs) take
//! precedence over the paths derived here.

use std::env;
use std::sync::OnceLock;

/// Lazily initialized data directory from DATA_DIR env var
static DATA_DIR_VALUE: OnceLock<String> = OnceLock::new();

/// Get the base data directory (from DATA_DIR env var or default "data")
pub fn data_dir() -> &'static str {
    DATA_DIR_VALUE.get_or_init(|| env::var("DATA_DIR").unwrap_or_else(|_| "data".to_string()))
}

/// SQLite database holding users, plans and the study log
pub fn db_path() -> String {
    format!("{}/user_data.db", data_dir())
}

/// Directory with per-language topic JSON files
pub fn topics_dir() -> String {
    format!("{}/static_resources", data_dir())
}

/// Static assets served under /static (not under DATA_DIR)
pub const STATIC_DIR: &str = "static";

pub mod planner;
pub mod schema;
pub mod study_log;
pub mod users;

use rusqlite::{Connection, Result};
use std::path::Path;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

// Re-export all public items from submodules
pub use planner::*;
pub use schema::run_migrations;
pub use study_log::*;
pub use users::*;

pub type DbPool = Arc<Mutex<Connection>>;

/// Extension trait for logging errors before discarding them
pub trait LogOnError<T> {
    /// Log the error at warn level and return None
    fn log_warn(self, context: &str) -> Option<T>;
    /// Log the error at warn level and return the default
    fn log_warn_default(self, context: &str) -> T
    where
        T: Default;
}

impl<T, E: std::fmt::Display> LogOnError<T> for std::result::Result<T, E> {
    fn log_warn(self, context: &str) -> Option<T> {
        match self {
            Ok(v) => Some(v),
            Err(e) => {
                tracing::warn!("{}: {}", context, e);
                None
            }
        }
    }

    fn log_warn_default(self, context: &str) -> T
    where
        T: Default,
    {
        match self {
            Ok(v) => v,
            Err(e) => {
                tracing::warn!("{}: {}", context, e);
                T::default()
            }
        }
    }
}

/// Error returned when database lock cannot be acquired
#[derive(Debug)]
pub struct DbLockError;

impl std::fmt::Display for DbLockError {
  fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
    write!(f, "Database unavailable")
  }
}

impl std::error::Error for DbLockError {}

/// Try to acquire the database lock, returning an error if poisoned
pub fn try_lock(pool: &DbPool) -> std::result::Result<MutexGuard<'_, Connection>, DbLockError> {
  pool.lock().map_err(|_: PoisonError<_>| {
    tracing::error!("Database mutex poisoned - a thread panicked while holding the lock");
    DbLockError
  })
}

pub fn init_db(path: &Path) -> Result<DbPool> {
  if let Some(parent) = path.parent() {
    std::fs::create_dir_all(parent).ok();
  }

  // Create backup before migrations if database exists
  if path.exists() {
    let backup_path = path.with_extension("db.backup");
    if let Err(e) = std::fs::copy(path, &backup_path) {
      tracing::warn!("Could not create database backup: {}", e);
    }
  }

  let conn = Connection::open(path)?;
  run_migrations(&conn)?;
  Ok(Arc::new(Mutex::new(conn)))
}

#[cfg(test)]
mod tests {
  use super::*;
  use tempfile::TempDir;

  #[test]
  fn test_init_db_creates_parent_and_backup() {
    let temp = TempDir::new().unwrap();
    let path = temp.path().join("nested").join("user_data.db");

    let pool = init_db(&path).unwrap();
    drop(pool);
    assert!(path.exists());
    assert!(!path.with_extension("db.backup").exists());

    // Second start backs up the existing file
    let _pool = init_db(&path).unwrap();
    assert!(path.with_extension("db.backup").exists());
  }

  #[test]
  fn test_log_warn_default() {
    let err: std::result::Result<i64, String> = Err("boom".to_string());
    assert_eq!(err.log_warn_default("test"), 0);

    let ok: std::result::Result<i64, String> = Ok(3);
    assert_eq!(ok.log_warn("test"), Some(3));
  }

  #[test]
  fn test_try_lock() {
    let pool: DbPool = Arc::new(Mutex::new(Connection::open_in_memory().unwrap()));
    assert!(try_lock(&pool).is_ok());
  }
}

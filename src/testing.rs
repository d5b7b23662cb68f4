//! Database fixtures for unit tests.

use rusqlite::Connection;
use tempfile::TempDir;

/// A migrated `user_data.db` in a temporary directory, removed on drop.
pub struct TestEnv {
    _temp: TempDir,
    pub conn: Connection,
}

impl TestEnv {
    pub fn new() -> rusqlite::Result<Self> {
        let temp =
            TempDir::new().map_err(|e| rusqlite::Error::ToSqlConversionFailure(Box::new(e)))?;
        let conn = Connection::open(temp.path().join("user_data.db"))?;
        crate::db::schema::run_migrations(&conn)?;
        Ok(Self { _temp: temp, conn })
    }

    /// Register `username` with a placeholder hash
    pub fn with_user(self, username: &str) -> rusqlite::Result<Self> {
        crate::db::create_user(&self.conn, username, "not-a-real-hash")?;
        Ok(self)
    }
}

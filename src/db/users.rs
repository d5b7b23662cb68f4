//! Credential table operations.

use chrono::Local;
use rusqlite::{params, Connection, OptionalExtension, Result};

/// Create a new user with an already-hashed password
pub fn create_user(conn: &Connection, username: &str, password_hash: &str) -> Result<()> {
  let now = Local::now().format("%Y-%m-%d %H:%M:%S").to_string();
  conn.execute(
    "INSERT INTO users (username, password_hash, created_at) VALUES (?1, ?2, ?3)",
    params![username, password_hash, now],
  )?;
  Ok(())
}

/// Get the stored password hash for a user
pub fn get_password_hash(conn: &Connection, username: &str) -> Result<Option<String>> {
  conn
    .query_row(
      "SELECT password_hash FROM users WHERE username = ?1",
      params![username],
      |row| row.get(0),
    )
    .optional()
}

/// Check if a username already exists
pub fn username_exists(conn: &Connection, username: &str) -> Result<bool> {
  let count: i64 = conn.query_row(
    "SELECT COUNT(*) FROM users WHERE username = ?1",
    params![username],
    |row| row.get(0),
  )?;
  Ok(count > 0)
}

/// Replace a user's password hash (used when upgrading legacy hashes)
pub fn update_password_hash(conn: &Connection, username: &str, password_hash: &str) -> Result<()> {
  conn.execute(
    "UPDATE users SET password_hash = ?1 WHERE username = ?2",
    params![password_hash, username],
  )?;
  Ok(())
}

/// Account creation timestamp as stored
pub fn get_created_at(conn: &Connection, username: &str) -> Result<Option<String>> {
  conn
    .query_row(
      "SELECT created_at FROM users WHERE username = ?1",
      params![username],
      |row| row.get(0),
    )
    .optional()
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::testing::TestEnv;

  #[test]
  fn test_create_and_lookup_user() {
    let env = TestEnv::new().unwrap();
    create_user(&env.conn, "alice", "hash1").unwrap();

    assert!(username_exists(&env.conn, "alice").unwrap());
    assert!(!username_exists(&env.conn, "bob").unwrap());
    assert_eq!(
      get_password_hash(&env.conn, "alice").unwrap(),
      Some("hash1".to_string())
    );
    assert_eq!(get_password_hash(&env.conn, "bob").unwrap(), None);
  }

  #[test]
  fn test_duplicate_username_rejected() {
    let env = TestEnv::new().unwrap().with_user("alice").unwrap();
    assert!(create_user(&env.conn, "alice", "hash2").is_err());
  }

  #[test]
  fn test_update_password_hash() {
    let env = TestEnv::new().unwrap();
    create_user(&env.conn, "alice", "old").unwrap();
    update_password_hash(&env.conn, "alice", "new").unwrap();
    assert_eq!(
      get_password_hash(&env.conn, "alice").unwrap(),
      Some("new".to_string())
    );
  }

  #[test]
  fn test_created_at_format() {
    let env = TestEnv::new().unwrap().with_user("alice").unwrap();
    let created = get_created_at(&env.conn, "alice").unwrap().unwrap();
    // "YYYY-MM-DD HH:MM:SS"
    assert_eq!(created.len(), 19);
    assert_eq!(&created[4..5], "-");
    assert_eq!(&created[10..11], " ");
  }
}

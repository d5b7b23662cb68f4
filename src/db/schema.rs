use rusqlite::{Connection, Result};

pub fn run_migrations(conn: &Connection) -> Result<()> {
  // Migration: databases written before the column rename store the hash in `password`
  if table_exists(conn, "users")
    && column_exists(conn, "users", "password")
    && !column_exists(conn, "users", "password_hash")
  {
    tracing::info!("Renaming users.password to users.password_hash");
    conn.execute("ALTER TABLE users RENAME COLUMN password TO password_hash", [])?;
  }

  // Create tables with COMPLETE schema for new databases
  // Migrations below handle upgrades for existing databases
  conn.execute_batch(
    r#"
    CREATE TABLE IF NOT EXISTS users (
      username TEXT PRIMARY KEY,
      password_hash TEXT NOT NULL,
      created_at TEXT NOT NULL
    );

    -- At most one row per user, enforced by delete-before-insert
    CREATE TABLE IF NOT EXISTS planner (
      username TEXT,
      language TEXT,
      goal TEXT,
      start_date TEXT,
      end_date TEXT,
      total_days INTEGER,
      plan_json TEXT
    );

    -- Append-only; a day may be logged more than once
    CREATE TABLE IF NOT EXISTS study_log (
      username TEXT,
      study_date TEXT
    );

    CREATE INDEX IF NOT EXISTS idx_planner_username ON planner(username);
    CREATE INDEX IF NOT EXISTS idx_study_log_username ON study_log(username, study_date);
    "#,
  )?;

  // ============================================================
  // MIGRATIONS FOR EXISTING DATABASES
  // These are no-ops for new databases (columns already exist)
  // ============================================================

  add_column_if_missing(conn, "planner", "total_days", "INTEGER")?;

  Ok(())
}

fn table_exists(conn: &Connection, table: &str) -> bool {
  conn
    .query_row(
      "SELECT EXISTS(SELECT 1 FROM sqlite_master WHERE type='table' AND name=?1)",
      [table],
      |row| row.get(0),
    )
    .unwrap_or(false)
}

/// Check if a column exists in a table
fn column_exists(conn: &Connection, table: &str, column: &str) -> bool {
  conn
    .prepare(&format!("SELECT {} FROM {} LIMIT 1", column, table))
    .is_ok()
}

/// Add a column if it doesn't already exist
fn add_column_if_missing(conn: &Connection, table: &str, column: &str, column_def: &str) -> Result<()> {
  if !column_exists(conn, table, column) {
    conn.execute(
      &format!("ALTER TABLE {} ADD COLUMN {} {}", table, column, column_def),
      [],
    )?;
  }
  Ok(())
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn test_migrations_are_idempotent() {
    let conn = Connection::open_in_memory().unwrap();
    run_migrations(&conn).unwrap();
    run_migrations(&conn).unwrap();
    assert!(table_exists(&conn, "users"));
    assert!(table_exists(&conn, "planner"));
    assert!(table_exists(&conn, "study_log"));
  }

  #[test]
  fn test_legacy_password_column_renamed() {
    let conn = Connection::open_in_memory().unwrap();
    conn
      .execute_batch(
        r#"
        CREATE TABLE users (username TEXT PRIMARY KEY, password TEXT, created_at TEXT);
        INSERT INTO users VALUES ('old', 'abc123', '2024-01-01 10:00:00');
        "#,
      )
      .unwrap();

    run_migrations(&conn).unwrap();

    assert!(column_exists(&conn, "users", "password_hash"));
    assert!(!column_exists(&conn, "users", "password"));
    let hash: String = conn
      .query_row("SELECT password_hash FROM users WHERE username = 'old'", [], |r| r.get(0))
      .unwrap();
    assert_eq!(hash, "abc123");
  }

  #[test]
  fn test_planner_missing_column_added() {
    let conn = Connection::open_in_memory().unwrap();
    conn
      .execute_batch(
        "CREATE TABLE planner (username TEXT, language TEXT, goal TEXT, start_date TEXT, end_date TEXT, plan_json TEXT);",
      )
      .unwrap();

    run_migrations(&conn).unwrap();
    assert!(column_exists(&conn, "planner", "total_days"));
  }
}

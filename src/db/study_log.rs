//! Append-only study session log

use chrono::NaiveDate;
use rusqlite::{params, Connection, Result};

/// Record a study session. Repeated entries for the same day are kept.
pub fn log_study_session(conn: &Connection, username: &str, study_date: NaiveDate) -> Result<()> {
  conn.execute(
    "INSERT INTO study_log (username, study_date) VALUES (?1, ?2)",
    params![username, study_date.to_string()],
  )?;
  Ok(())
}

/// All logged dates for a user, one per entry, oldest first
pub fn get_study_dates(conn: &Connection, username: &str) -> Result<Vec<NaiveDate>> {
  let mut stmt = conn.prepare(
    "SELECT study_date FROM study_log WHERE username = ?1 ORDER BY study_date",
  )?;

  let raw = stmt
    .query_map(params![username], |row| row.get::<_, String>(0))?
    .collect::<Result<Vec<_>>>()?;

  Ok(
    raw
      .into_iter()
      .filter_map(|s| match s.parse::<NaiveDate>() {
        Ok(d) => Some(d),
        Err(e) => {
          tracing::warn!("Skipping malformed study_date {:?}: {}", s, e);
          None
        }
      })
      .collect(),
  )
}

/// Total number of log entries for a user
pub fn count_study_sessions(conn: &Connection, username: &str) -> Result<i64> {
  conn.query_row(
    "SELECT COUNT(*) FROM study_log WHERE username = ?1",
    params![username],
    |row| row.get(0),
  )
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::testing::TestEnv;

  fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
  }

  #[test]
  fn test_log_and_read_dates() {
    let env = TestEnv::new().unwrap();
    log_study_session(&env.conn, "alice", date(2024, 1, 3)).unwrap();
    log_study_session(&env.conn, "alice", date(2024, 1, 1)).unwrap();
    log_study_session(&env.conn, "bob", date(2024, 1, 2)).unwrap();

    assert_eq!(
      get_study_dates(&env.conn, "alice").unwrap(),
      vec![date(2024, 1, 1), date(2024, 1, 3)]
    );
    assert_eq!(count_study_sessions(&env.conn, "bob").unwrap(), 1);
  }

  #[test]
  fn test_duplicate_entries_are_kept() {
    let env = TestEnv::new().unwrap();
    let day = date(2024, 5, 5);
    log_study_session(&env.conn, "alice", day).unwrap();
    log_study_session(&env.conn, "alice", day).unwrap();

    assert_eq!(count_study_sessions(&env.conn, "alice").unwrap(), 2);
    assert_eq!(get_study_dates(&env.conn, "alice").unwrap(), vec![day, day]);
  }

  #[test]
  fn test_malformed_dates_are_skipped() {
    let env = TestEnv::new().unwrap();
    env
      .conn
      .execute("INSERT INTO study_log VALUES ('alice', 'yesterday')", [])
      .unwrap();
    log_study_session(&env.conn, "alice", date(2024, 1, 1)).unwrap();

    assert_eq!(get_study_dates(&env.conn, "alice").unwrap(), vec![date(2024, 1, 1)]);
  }
}

//! Study plan persistence. One row per user, replaced wholesale.

use chrono::NaiveDate;
use rusqlite::types::Type;
use rusqlite::{params, Connection, OptionalExtension, Result, Row};

use crate::domain::{Schedule, StudyPlan};

/// Replace the user's plan: delete then insert in one transaction
pub fn save_plan(conn: &Connection, plan: &StudyPlan) -> Result<()> {
  let plan_json = serde_json::to_string(&plan.schedule)
    .map_err(|e| rusqlite::Error::ToSqlConversionFailure(Box::new(e)))?;

  let tx = conn.unchecked_transaction()?;
  tx.execute("DELETE FROM planner WHERE username = ?1", params![plan.owner])?;
  tx.execute(
    r#"
    INSERT INTO planner (username, language, goal, start_date, end_date, total_days, plan_json)
    VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)
    "#,
    params![
      plan.owner,
      plan.language,
      plan.goal,
      plan.start_date.to_string(),
      plan.end_date.to_string(),
      plan.total_days,
      plan_json
    ],
  )?;
  tx.commit()
}

/// Load the user's current plan, if any
pub fn load_plan(conn: &Connection, username: &str) -> Result<Option<StudyPlan>> {
  conn
    .query_row(
      r#"
      SELECT username, language, goal, start_date, end_date, total_days, plan_json
      FROM planner
      WHERE username = ?1
      LIMIT 1
      "#,
      params![username],
      row_to_plan,
    )
    .optional()
}

fn parse_date(idx: usize, s: &str) -> Result<NaiveDate> {
  s.parse::<NaiveDate>()
    .map_err(|e| rusqlite::Error::FromSqlConversionFailure(idx, Type::Text, Box::new(e)))
}

fn row_to_plan(row: &Row) -> Result<StudyPlan> {
  let start_str: String = row.get(3)?;
  let end_str: String = row.get(4)?;
  let start_date = parse_date(3, &start_str)?;
  let end_date = parse_date(4, &end_str)?;

  let plan_json: String = row.get(6)?;
  let schedule: Schedule = serde_json::from_str(&plan_json)
    .map_err(|e| rusqlite::Error::FromSqlConversionFailure(6, Type::Text, Box::new(e)))?;

  // Older rows may lack total_days
  let total_days: Option<i64> = row.get(5)?;
  let total_days = total_days.unwrap_or_else(|| (end_date - start_date).num_days()).max(0) as u32;

  Ok(StudyPlan {
    owner: row.get(0)?,
    language: row.get::<_, Option<String>>(1)?.unwrap_or_default(),
    goal: row.get::<_, Option<String>>(2)?.unwrap_or_default(),
    start_date,
    end_date,
    total_days,
    schedule,
  })
}

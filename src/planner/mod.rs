//! Study plan creation.

pub mod scheduler;
pub mod topics;

use chrono::{Duration, NaiveDate};
use thiserror::Error;

use crate::config;
use crate::domain::{Language, StudyPlan};

pub use scheduler::{build_schedule, REVISION_PLACEHOLDER};
pub use topics::{fallback_topics, TopicCatalog, FALLBACK_TOPICS};

#[derive(Error, Debug, PartialEq, Eq)]
pub enum PlanError {
  #[error("Study duration must be between {min} and {max} weeks (got {got})")]
  InvalidDuration { got: u32, min: u32, max: u32 },
}

/// Build a plan for `owner` covering `weeks` whole weeks from `start_date`
pub fn create_plan(
  owner: &str,
  language: Language,
  goal: &str,
  start_date: NaiveDate,
  weeks: u32,
  topics: &[String],
) -> Result<StudyPlan, PlanError> {
  if !(config::MIN_PLAN_WEEKS..=config::MAX_PLAN_WEEKS).contains(&weeks) {
    return Err(PlanError::InvalidDuration {
      got: weeks,
      min: config::MIN_PLAN_WEEKS,
      max: config::MAX_PLAN_WEEKS,
    });
  }

  let total_days = weeks * 7;
  let schedule = build_schedule(topics, start_date, total_days);

  Ok(StudyPlan {
    owner: owner.to_string(),
    language: language.as_str().to_string(),
    goal: goal.trim().to_string(),
    start_date,
    end_date: start_date + Duration::days(i64::from(total_days)),
    total_days,
    schedule,
  })
}

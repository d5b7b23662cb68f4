use chrono::{Duration, NaiveDate};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Day → topic mapping, ordered by date
pub type Schedule = BTreeMap<NaiveDate, String>;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StudyPlan {
  pub owner: String,
  pub language: String,
  pub goal: String,
  pub start_date: NaiveDate,
  /// Exclusive: `start_date + total_days`
  pub end_date: NaiveDate,
  pub total_days: u32,
  pub schedule: Schedule,
}

/// Progress of a plan relative to a given day
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PlanProgress {
  pub completed_days: usize,
  pub total_days: usize,
  pub percent: u8,
}

impl PlanProgress {
  pub fn remaining_days(&self) -> usize {
    self.total_days - self.completed_days
  }
}

impl StudyPlan {
  /// Schedule days strictly before `today` count as completed.
  /// The denominator is the number of scheduled days, not distinct topics.
  pub fn progress(&self, today: NaiveDate) -> PlanProgress {
    let total_days = self.schedule.len();
    let completed_days = self.schedule.keys().filter(|d| **d < today).count();
    let percent = if total_days > 0 {
      (completed_days * 100 / total_days) as u8
    } else {
      0
    };

    PlanProgress {
      completed_days,
      total_days,
      percent,
    }
  }

  /// Days until the end date; negative once the plan is over
  pub fn days_left(&self, today: NaiveDate) -> i64 {
    (self.end_date - today).num_days()
  }

  pub fn days_spent(&self, today: NaiveDate) -> i64 {
    (today - self.start_date).num_days().max(0)
  }

  /// Entries for `today` through `today + 6`
  pub fn upcoming_week(&self, today: NaiveDate) -> Vec<(NaiveDate, &str)> {
    let last = today + Duration::days(6);
    self
      .schedule
      .range(today..=last)
      .map(|(d, t)| (*d, t.as_str()))
      .collect()
  }

  pub fn topic_for(&self, day: NaiveDate) -> Option<&str> {
    self.schedule.get(&day).map(String::as_str)
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
  }

  fn plan_from(start: NaiveDate, days: u32) -> StudyPlan {
    let schedule = (0..days)
      .map(|i| (start + Duration::days(i as i64), format!("Topic {}", i)))
      .collect();
    StudyPlan {
      owner: "alice".to_string(),
      language: "Python".to_string(),
      goal: "Learn".to_string(),
      start_date: start,
      end_date: start + Duration::days(days as i64),
      total_days: days,
      schedule,
    }
  }

  #[test]
  fn test_progress_before_start() {
    let plan = plan_from(date(2024, 1, 1), 14);
    let progress = plan.progress(date(2023, 12, 25));
    assert_eq!(progress.completed_days, 0);
    assert_eq!(progress.percent, 0);
    assert_eq!(progress.remaining_days(), 14);
  }

  #[test]
  fn test_progress_counts_strictly_before_today() {
    let plan = plan_from(date(2024, 1, 1), 14);
    // Jan 1..=Jan 7 are before Jan 8
    let progress = plan.progress(date(2024, 1, 8));
    assert_eq!(progress.completed_days, 7);
    assert_eq!(progress.percent, 50);
  }

  #[test]
  fn test_progress_truncates_percent() {
    let plan = plan_from(date(2024, 1, 1), 21);
    // 1/21 = 4.76%
    let progress = plan.progress(date(2024, 1, 2));
    assert_eq!(progress.percent, 4);
  }

  #[test]
  fn test_progress_after_end() {
    let plan = plan_from(date(2024, 1, 1), 7);
    let progress = plan.progress(date(2024, 3, 1));
    assert_eq!(progress.percent, 100);
  }

  #[test]
  fn test_days_left_and_spent() {
    let plan = plan_from(date(2024, 1, 1), 7);
    assert_eq!(plan.days_left(date(2024, 1, 3)), 5);
    assert_eq!(plan.days_spent(date(2024, 1, 3)), 2);
    assert_eq!(plan.days_spent(date(2023, 12, 1)), 0);
    assert_eq!(plan.days_left(date(2024, 1, 10)), -2);
  }

  #[test]
  fn test_upcoming_week_is_inclusive() {
    let plan = plan_from(date(2024, 1, 1), 28);
    let upcoming = plan.upcoming_week(date(2024, 1, 10));
    assert_eq!(upcoming.len(), 7);
    assert_eq!(upcoming[0].0, date(2024, 1, 10));
    assert_eq!(upcoming[6].0, date(2024, 1, 16));
  }

  #[test]
  fn test_upcoming_week_near_end() {
    let plan = plan_from(date(2024, 1, 1), 7);
    let upcoming = plan.upcoming_week(date(2024, 1, 5));
    assert_eq!(upcoming.len(), 3);
  }
}

//! Topic-to-day assignment for study plans.

use chrono::{Duration, NaiveDate};

use crate::domain::Schedule;

/// Topic shown on days left over after every topic has been assigned
pub const REVISION_PLACEHOLDER: &str = "📝 Revision / Practice";

/// Assign `topics` to `total_days` consecutive days starting at `start`.
///
/// When the topics fit in the plan, each day takes the next topic and the
/// remaining days get [`REVISION_PLACEHOLDER`]. When there are more topics
/// than days the topic cursor never advances, so every day gets `topics[0]`.
/// Existing plans depend on that assignment, so it is kept as is.
pub fn build_schedule(topics: &[String], start: NaiveDate, total_days: u32) -> Schedule {
  let advance = topics.len() <= total_days as usize;
  let mut schedule = Schedule::new();
  let mut cursor = 0;

  for offset in 0..total_days {
    let day = start + Duration::days(i64::from(offset));
    let topic = match topics.get(cursor) {
      Some(topic) => {
        if advance {
          cursor += 1;
        }
        topic.clone()
      }
      None => REVISION_PLACEHOLDER.to_string(),
    };
    schedule.insert(day, topic);
  }

  schedule
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::planner::topics::fallback_topics;

  fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
  }

  fn topics(n: usize) -> Vec<String> {
    (1..=n).map(|i| format!("Topic {}", i)).collect()
  }

  #[test]
  fn test_schedule_covers_every_day_without_gaps() {
    let start = date(2024, 2, 20);
    for weeks in 1..=12u32 {
      let total_days = weeks * 7;
      for list in [fallback_topics(), topics(3)] {
        let schedule = build_schedule(&list, start, total_days);
        assert_eq!(schedule.len(), total_days as usize);

        let expected: Vec<NaiveDate> = (0..total_days)
          .map(|i| start + Duration::days(i as i64))
          .collect();
        let keys: Vec<NaiveDate> = schedule.keys().copied().collect();
        assert_eq!(keys, expected, "weeks = {}", weeks);
      }
    }
  }

  #[test]
  fn test_topics_in_order_before_placeholder() {
    let list = fallback_topics();
    let schedule = build_schedule(&list, date(2024, 1, 1), 21);
    let values: Vec<&String> = schedule.values().collect();

    for (i, topic) in list.iter().enumerate() {
      assert_eq!(values[i], topic);
    }
    for value in &values[list.len()..] {
      assert_eq!(value.as_str(), REVISION_PLACEHOLDER);
    }
  }

  #[test]
  fn test_exact_fit_has_no_placeholder() {
    let list = topics(14);
    let schedule = build_schedule(&list, date(2024, 1, 1), 14);
    assert!(schedule.values().all(|t| t != REVISION_PLACEHOLDER));
    assert_eq!(schedule.values().last().unwrap(), "Topic 14");
  }

  #[test]
  fn test_more_topics_than_days_repeats_first_topic() {
    let list = topics(20);
    let schedule = build_schedule(&list, date(2024, 1, 1), 14);
    assert_eq!(schedule.len(), 14);
    assert!(schedule.values().all(|t| t == "Topic 1"));
  }

  #[test]
  fn test_one_week_with_fallback_is_all_introduction() {
    let start = date(2024, 1, 1);
    let schedule = build_schedule(&fallback_topics(), start, 7);

    assert_eq!(schedule.len(), 7);
    assert_eq!(schedule.keys().next(), Some(&start));
    assert_eq!(schedule.keys().last(), Some(&date(2024, 1, 7)));
    assert!(schedule.values().all(|t| t == "Introduction"));
  }

  #[test]
  fn test_empty_topic_list_is_all_revision() {
    let schedule = build_schedule(&[], date(2024, 1, 1), 7);
    assert_eq!(schedule.len(), 7);
    assert!(schedule.values().all(|t| t == REVISION_PLACEHOLDER));
  }
}

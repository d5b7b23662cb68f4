//! Streaks, badges and the weekly activity series.

use chrono::{Duration, NaiveDate};
use std::collections::HashSet;

/// Acknowledgment shown for the current streak
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Badge {
  None,
  /// At least one day
  Started,
  /// Three days or more
  ThreeDay,
  /// A full week or more
  SevenDay,
}

impl Badge {
  pub fn for_streak(streak: u32) -> Self {
    if streak >= 7 {
      Self::SevenDay
    } else if streak >= 3 {
      Self::ThreeDay
    } else if streak > 0 {
      Self::Started
    } else {
      Self::None
    }
  }

  pub fn message(&self) -> Option<&'static str> {
    match self {
      Self::None => None,
      Self::Started => Some("🔥 You're on a streak. Keep it going!"),
      Self::ThreeDay => Some("🥈 3-day streak badge unlocked!"),
      Self::SevenDay => Some("🏆 7-day streak! Top badge unlocked!"),
    }
  }
}

/// Consecutive days with at least one entry, ending today.
///
/// Presence-based: several entries on one day count once.
pub fn current_streak(dates: &[NaiveDate], today: NaiveDate) -> u32 {
  let logged: HashSet<NaiveDate> = dates.iter().copied().collect();
  let mut streak = 0;
  let mut day = today;
  while logged.contains(&day) {
    streak += 1;
    day -= Duration::days(1);
  }
  streak
}

/// One bar of the weekly series
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DayCount {
  pub date: NaiveDate,
  /// Abbreviated weekday name ("Mon")
  pub weekday: String,
  pub count: u32,
}

/// Entry counts for the seven days ending today, oldest first
pub fn weekly_series(dates: &[NaiveDate], today: NaiveDate) -> Vec<DayCount> {
  (0..7)
    .rev()
    .map(|back| {
      let date = today - Duration::days(back);
      DayCount {
        date,
        weekday: date.format("%a").to_string(),
        count: dates.iter().filter(|d| **d == date).count() as u32,
      }
    })
    .collect()
}

#[cfg(test)]
mod tests {
  use super::*;

  fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
  }

  #[test]
  fn test_streak_zero_without_today() {
    let today = date(2024, 6, 10);
    let dates = vec![date(2024, 6, 9), date(2024, 6, 8)];
    assert_eq!(current_streak(&dates, today), 0);
  }

  #[test]
  fn test_streak_counts_back_from_today() {
    let today = date(2024, 6, 10);
    let dates = vec![
      date(2024, 6, 10),
      date(2024, 6, 9),
      date(2024, 6, 8),
      // gap on the 7th
      date(2024, 6, 6),
    ];
    assert_eq!(current_streak(&dates, today), 3);
  }

  #[test]
  fn test_streak_crosses_month_boundary() {
    let today = date(2024, 3, 1);
    let dates = vec![date(2024, 3, 1), date(2024, 2, 29), date(2024, 2, 28)];
    assert_eq!(current_streak(&dates, today), 3);
  }

  #[test]
  fn test_duplicate_entries_do_not_change_streak() {
    let today = date(2024, 6, 10);
    let mut dates = vec![date(2024, 6, 10), date(2024, 6, 9)];
    let before = current_streak(&dates, today);
    let before_count = weekly_series(&dates, today)[6].count;

    dates.push(today);
    dates.push(today);

    assert_eq!(current_streak(&dates, today), before);
    assert_eq!(weekly_series(&dates, today)[6].count, before_count + 2);
  }

  #[test]
  fn test_badge_thresholds() {
    assert_eq!(Badge::for_streak(0), Badge::None);
    assert_eq!(Badge::for_streak(1), Badge::Started);
    assert_eq!(Badge::for_streak(2), Badge::Started);
    assert_eq!(Badge::for_streak(3), Badge::ThreeDay);
    assert_eq!(Badge::for_streak(6), Badge::ThreeDay);
    assert_eq!(Badge::for_streak(7), Badge::SevenDay);
    assert_eq!(Badge::for_streak(30), Badge::SevenDay);
    assert!(Badge::None.message().is_none());
  }

  #[test]
  fn test_weekly_series_order_and_names() {
    // 2024-06-10 is a Monday
    let today = date(2024, 6, 10);
    let dates = vec![date(2024, 6, 4), date(2024, 6, 10), date(2024, 6, 10), date(2024, 6, 1)];
    let series = weekly_series(&dates, today);

    assert_eq!(series.len(), 7);
    assert_eq!(series[0].date, date(2024, 6, 4));
    assert_eq!(series[0].weekday, "Tue");
    assert_eq!(series[0].count, 1);
    assert_eq!(series[6].weekday, "Mon");
    assert_eq!(series[6].count, 2);
    // June 1st is outside the window
    assert_eq!(series.iter().map(|d| d.count).sum::<u32>(), 3);
  }
}

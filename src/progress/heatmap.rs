use chrono::{Datelike, NaiveDate};
use std::collections::BTreeMap;

/// Entry count for one (ISO week, day-of-month) bucket
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HeatmapCell {
  pub week: u32,
  pub day: u32,
  pub count: u32,
}

/// Group log dates by ISO week number and day of month.
/// Every entry counts, so a day logged twice has count 2.
pub fn heatmap_cells(dates: &[NaiveDate]) -> Vec<HeatmapCell> {
  let mut buckets: BTreeMap<(u32, u32), u32> = BTreeMap::new();
  for date in dates {
    *buckets.entry((date.iso_week().week(), date.day())).or_insert(0) += 1;
  }

  buckets
    .into_iter()
    .map(|((week, day), count)| HeatmapCell { week, day, count })
    .collect()
}

/// Largest bucket count, for scaling cell intensity
pub fn max_count(cells: &[HeatmapCell]) -> u32 {
  cells.iter().map(|c| c.count).max().unwrap_or(0)
}

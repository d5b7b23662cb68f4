//! Derived progress views over the study log.

pub mod heatmap;
pub mod streak;

use rand::seq::IndexedRandom;

pub use heatmap::{heatmap_cells, max_count, HeatmapCell};
pub use streak::{current_streak, weekly_series, Badge, DayCount};

const TIPS: [&str; 8] = [
  "Small daily sessions beat occasional marathons.",
  "Explain today's topic out loud as if teaching a friend.",
  "Type the examples yourself instead of copy-pasting them.",
  "When stuck, write the smallest program that shows the problem.",
  "Revisit yesterday's flashcards before starting something new.",
  "Read other people's code. It is half of programming.",
  "Break a big exercise into functions you can test one by one.",
  "Errors are hints. Read the whole message before searching.",
];

/// A motivational tip for the dashboard
pub fn random_tip() -> &'static str {
  TIPS.choose(&mut rand::rng()).copied().unwrap_or(TIPS[0])
}

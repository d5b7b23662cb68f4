//! Per-language topic lists.
//!
//! Each supported language may have a JSON document `{"topics": [...]}` in
//! the topics directory. Languages without a usable file get the generic
//! curriculum.

use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

use crate::domain::Language;

/// Generic curriculum used when no language-specific list is configured
pub const FALLBACK_TOPICS: [&str; 15] = [
  "Introduction",
  "Variables",
  "Data Types",
  "Operators",
  "Control Flow",
  "Functions",
  "Arrays/Lists",
  "Strings",
  "OOP Basics",
  "Advanced OOP",
  "File Handling",
  "Error Handling",
  "Recursion",
  "Libraries",
  "Project Work",
];

pub fn fallback_topics() -> Vec<String> {
  FALLBACK_TOPICS.iter().map(|t| t.to_string()).collect()
}

#[derive(Debug, Deserialize)]
struct TopicFile {
  #[serde(default)]
  topics: Vec<String>,
}

/// Looks up topic lists from the configured directory
#[derive(Debug, Clone)]
pub struct TopicCatalog {
  dir: PathBuf,
}

impl TopicCatalog {
  pub fn new(dir: impl Into<PathBuf>) -> Self {
    Self { dir: dir.into() }
  }

  pub fn dir(&self) -> &Path {
    &self.dir
  }

  /// Ordered topic list for `language`, never empty
  pub fn topics_for(&self, language: Language) -> Vec<String> {
    let path = self.dir.join(language.topic_file());
    if !path.exists() {
      return fallback_topics();
    }

    match read_topic_file(&path) {
      Ok(topics) if !topics.is_empty() => topics,
      Ok(_) => {
        tracing::warn!("Topic file {} has no topics, using generic list", path.display());
        fallback_topics()
      }
      Err(e) => {
        tracing::warn!("Failed to read topic file {}: {}", path.display(), e);
        fallback_topics()
      }
    }
  }
}

#[derive(Debug, Error)]
enum TopicFileError {
  #[error("cannot read file: {0}")]
  Io(#[from] std::io::Error),
  #[error("invalid JSON: {0}")]
  Json(#[from] serde_json::Error),
}

fn read_topic_file(path: &Path) -> Result<Vec<String>, TopicFileError> {
  let contents = fs::read_to_string(path)?;
  let file: TopicFile = serde_json::from_str(&contents)?;
  Ok(
    file
      .topics
      .into_iter()
      .map(|t| t.trim().to_string())
      .filter(|t| !t.is_empty())
      .collect(),
  )
}

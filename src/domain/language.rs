use serde::{Deserialize, Serialize};

/// Programming languages the planner and question generator know about
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Language {
  Python,
  Java,
  Cpp,
  JavaScript,
}

impl Language {
  pub const ALL: [Language; 4] = [Self::Python, Self::Java, Self::Cpp, Self::JavaScript];

  pub fn from_str(s: &str) -> Option<Self> {
    match s {
      "Python" => Some(Self::Python),
      "Java" => Some(Self::Java),
      "C++" => Some(Self::Cpp),
      "JavaScript" => Some(Self::JavaScript),
      _ => None,
    }
  }

  /// Display label, also used as the stored plan language
  pub fn as_str(&self) -> &'static str {
    match self {
      Self::Python => "Python",
      Self::Java => "Java",
      Self::Cpp => "C++",
      Self::JavaScript => "JavaScript",
    }
  }

  /// File name of the topic list inside the topics directory
  pub fn topic_file(&self) -> &'static str {
    match self {
      Self::Python => "py_questions.json",
      Self::Java => "java_questions.json",
      Self::Cpp => "cpp_questions.json",
      Self::JavaScript => "js_questions.json",
    }
  }
}

impl std::fmt::Display for Language {
  fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
    write!(f, "{}", self.as_str())
  }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Difficulty {
  Easy,
  Medium,
  Hard,
}

impl Difficulty {
  pub const ALL: [Difficulty; 3] = [Self::Easy, Self::Medium, Self::Hard];

  pub fn from_str(s: &str) -> Option<Self> {
    match s {
      "Easy" => Some(Self::Easy),
      "Medium" => Some(Self::Medium),
      "Hard" => Some(Self::Hard),
      _ => None,
    }
  }

  pub fn as_str(&self) -> &'static str {
    match self {
      Self::Easy => "Easy",
      Self::Medium => "Medium",
      Self::Hard => "Hard",
    }
  }
}

impl std::fmt::Display for Difficulty {
  fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
    write!(f, "{}", self.as_str())
  }
}

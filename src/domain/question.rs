use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum QuestionType {
  Mcq,
  ShortAnswer,
  Coding,
  /// In-band failure marker produced by the generation adapter
  Error,
}

impl QuestionType {
  /// Parse a label as the model writes it. Unknown labels read as short answer.
  pub fn from_label(s: &str) -> Self {
    match s.trim().to_ascii_lowercase().as_str() {
      "mcq" | "multiple choice" => Self::Mcq,
      "coding" | "code" => Self::Coding,
      "error" => Self::Error,
      _ => Self::ShortAnswer,
    }
  }

  pub fn as_str(&self) -> &'static str {
    match self {
      Self::Mcq => "MCQ",
      Self::ShortAnswer => "Short Answer",
      Self::Coding => "Coding",
      Self::Error => "Error",
    }
  }

  /// CSS class used to tint the question card
  pub fn css_class(&self) -> &'static str {
    match self {
      Self::Mcq => "q-mcq",
      Self::ShortAnswer => "q-short",
      Self::Coding => "q-coding",
      Self::Error => "q-error",
    }
  }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PracticeQuestion {
  pub kind: QuestionType,
  pub question: String,
}

impl PracticeQuestion {
  pub fn new(kind: QuestionType, question: impl Into<String>) -> Self {
    Self {
      kind,
      question: question.into(),
    }
  }

  pub fn is_error(&self) -> bool {
    self.kind == QuestionType::Error
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn test_from_label_known() {
    assert_eq!(QuestionType::from_label("MCQ"), QuestionType::Mcq);
    assert_eq!(QuestionType::from_label("Short Answer"), QuestionType::ShortAnswer);
    assert_eq!(QuestionType::from_label("coding"), QuestionType::Coding);
  }

  #[test]
  fn test_from_label_unknown_is_short_answer() {
    assert_eq!(QuestionType::from_label("Essay"), QuestionType::ShortAnswer);
    assert_eq!(QuestionType::from_label(""), QuestionType::ShortAnswer);
  }

  #[test]
  fn test_labels() {
    assert_eq!(QuestionType::ShortAnswer.as_str(), "Short Answer");
    assert_eq!(QuestionType::Mcq.as_str(), "MCQ");
  }
}

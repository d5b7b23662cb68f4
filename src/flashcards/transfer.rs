//! Flashcard import and export.
//!
//! CSV files carry a `question,answer` header. TSV (and `.txt`) files are
//! headerless `question<TAB>answer` rows.

use csv::{QuoteStyle, ReaderBuilder, StringRecord, WriterBuilder};
use std::path::Path;
use thiserror::Error;

use crate::domain::Flashcard;

#[derive(Debug, Error)]
pub enum TransferError {
  #[error("Unsupported file type: {0}")]
  UnsupportedFileType(String),
  #[error("Invalid file structure: {0}")]
  InvalidStructure(String),
  #[error("CSV error: {0}")]
  Csv(#[from] csv::Error),
  #[error("IO error: {0}")]
  Io(#[from] std::io::Error),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExportFormat {
  Csv,
  Tsv,
}

impl ExportFormat {
  pub fn from_str(s: &str) -> Option<Self> {
    match s.to_ascii_lowercase().as_str() {
      "csv" => Some(Self::Csv),
      "tsv" => Some(Self::Tsv),
      _ => None,
    }
  }

  pub fn extension(&self) -> &'static str {
    match self {
      Self::Csv => "csv",
      Self::Tsv => "tsv",
    }
  }

  pub fn content_type(&self) -> &'static str {
    match self {
      Self::Csv => "text/csv; charset=utf-8",
      Self::Tsv => "text/tab-separated-values; charset=utf-8",
    }
  }

  pub fn file_name(&self) -> String {
    format!("flashcards.{}", self.extension())
  }
}

/// Serialize cards in the given format
pub fn export(cards: &[Flashcard], format: ExportFormat) -> Result<Vec<u8>, TransferError> {
  match format {
    ExportFormat::Csv => {
      let mut writer = WriterBuilder::new().from_writer(Vec::new());
      for card in cards {
        writer.serialize(card)?;
      }
      // an empty deck still gets its header
      if cards.is_empty() {
        writer.write_record(["question", "answer"])?;
      }
      writer.into_inner().map_err(|e| TransferError::Io(e.into_error()))
    }
    ExportFormat::Tsv => {
      let mut writer = WriterBuilder::new()
        .delimiter(b'\t')
        .has_headers(false)
        .quote_style(QuoteStyle::Never)
        .from_writer(Vec::new());
      for card in cards {
        writer.write_record([flatten_field(&card.question), flatten_field(&card.answer)])?;
      }
      writer.into_inner().map_err(|e| TransferError::Io(e.into_error()))
    }
  }
}

/// Parse an uploaded file, choosing the format by extension
pub fn import(filename: &str, bytes: &[u8]) -> Result<Vec<Flashcard>, TransferError> {
  let extension = Path::new(filename)
    .extension()
    .and_then(|e| e.to_str())
    .map(|e| e.to_ascii_lowercase())
    .unwrap_or_default();

  let cards = match extension.as_str() {
    "csv" => import_csv(bytes)?,
    "tsv" | "txt" => import_tsv(bytes)?,
    _ => return Err(TransferError::UnsupportedFileType(filename.to_string())),
  };

  if cards.is_empty() {
    return Err(TransferError::InvalidStructure("file contains no flashcards".into()));
  }
  Ok(cards)
}

fn import_csv(bytes: &[u8]) -> Result<Vec<Flashcard>, TransferError> {
  let mut reader = ReaderBuilder::new().has_headers(true).from_reader(bytes);

  let headers = reader.headers().map_err(invalid)?.clone();
  let column = |name: &str| {
    headers
      .iter()
      .position(|h| h == name)
      .ok_or_else(|| TransferError::InvalidStructure(format!("missing '{}' column", name)))
  };
  let question_col = column("question")?;
  let answer_col = column("answer")?;

  let mut cards = Vec::new();
  for record in reader.records() {
    let record = record.map_err(invalid)?;
    let (Some(question), Some(answer)) = (record.get(question_col), record.get(answer_col)) else {
      return Err(TransferError::InvalidStructure("short row".into()));
    };
    cards.push(Flashcard::new(question, answer));
  }
  Ok(cards)
}

fn import_tsv(bytes: &[u8]) -> Result<Vec<Flashcard>, TransferError> {
  let mut reader = ReaderBuilder::new()
    .has_headers(false)
    .delimiter(b'\t')
    .quoting(false)
    .flexible(true)
    .from_reader(bytes);

  let mut cards = Vec::new();
  let mut record = StringRecord::new();
  while reader.read_record(&mut record).map_err(invalid)? {
    if record.len() != 2 {
      return Err(TransferError::InvalidStructure(format!(
        "expected 2 columns, found {} on line {}",
        record.len(),
        record.position().map(|p| p.line()).unwrap_or(0)
      )));
    }
    cards.push(Flashcard::new(&record[0], &record[1]));
  }
  Ok(cards)
}

fn invalid(e: csv::Error) -> TransferError {
  TransferError::InvalidStructure(e.to_string())
}

/// Keep a field on one TSV row
fn flatten_field(s: &str) -> String {
  s.replace(['\t', '\r', '\n'], " ")
}

#[cfg(test)]
mod tests {
  use super::*;

  fn sample() -> Vec<Flashcard> {
    vec![
      Flashcard::new("What is a closure?", "A function that captures its environment"),
      Flashcard::new("List, tuple, set?", "Ordered, \"immutable\", unique\nthree kinds"),
    ]
  }

  #[test]
  fn test_csv_roundtrip() {
    let bytes = export(&sample(), ExportFormat::Csv).unwrap();
    let text = String::from_utf8(bytes.clone()).unwrap();
    assert!(text.starts_with("question,answer\n"));

    let cards = import("flashcards.csv", &bytes).unwrap();
    assert_eq!(cards, sample());
  }

  #[test]
  fn test_csv_columns_any_order_extra_ignored() {
    let data = b"answer,tag,question\n4,math,2+2?\nParis,geo,Capital of France?\n";
    let cards = import("deck.CSV", data).unwrap();
    assert_eq!(
      cards,
      vec![Flashcard::new("2+2?", "4"), Flashcard::new("Capital of France?", "Paris")]
    );
  }

  #[test]
  fn test_csv_without_header_is_invalid() {
    let err = import("deck.csv", b"2+2?,4\n").unwrap_err();
    assert!(matches!(err, TransferError::InvalidStructure(_)));
  }

  #[test]
  fn test_csv_header_only_is_invalid() {
    let err = import("deck.csv", b"question,answer\n").unwrap_err();
    assert!(matches!(err, TransferError::InvalidStructure(_)));
  }

  #[test]
  fn test_tsv_two_rows_no_header() {
    let cards = import("cards.tsv", b"Q1\tA1\nQ2\tA2\n").unwrap();
    assert_eq!(cards, vec![Flashcard::new("Q1", "A1"), Flashcard::new("Q2", "A2")]);
  }

  #[test]
  fn test_txt_treated_as_tsv() {
    let cards = import("notes.txt", b"What is Rust?\tA language").unwrap();
    assert_eq!(cards.len(), 1);
  }

  #[test]
  fn test_tsv_wrong_column_count() {
    let err = import("cards.tsv", b"Q1\tA1\nQ2\tA2\textra\n").unwrap_err();
    assert!(matches!(err, TransferError::InvalidStructure(_)));

    let err = import("cards.tsv", b"only one column\n").unwrap_err();
    assert!(matches!(err, TransferError::InvalidStructure(_)));
  }

  #[test]
  fn test_unknown_extension() {
    let err = import("cards.json", b"[]").unwrap_err();
    assert!(matches!(err, TransferError::UnsupportedFileType(_)));

    let err = import("noext", b"a\tb").unwrap_err();
    assert!(matches!(err, TransferError::UnsupportedFileType(_)));
  }

  #[test]
  fn test_tsv_export_has_no_header_or_quotes() {
    let bytes = export(&sample(), ExportFormat::Tsv).unwrap();
    let text = String::from_utf8(bytes).unwrap();
    let lines: Vec<&str> = text.lines().collect();

    assert_eq!(lines.len(), 2);
    assert_eq!(lines[0], "What is a closure?\tA function that captures its environment");
    assert_eq!(lines[1], "List, tuple, set?\tOrdered, \"immutable\", unique three kinds");

    let cards = import("flashcards.tsv", text.as_bytes()).unwrap();
    assert_eq!(cards.len(), 2);
  }

  #[test]
  fn test_empty_export_csv_keeps_header() {
    let bytes = export(&[], ExportFormat::Csv).unwrap();
    assert_eq!(String::from_utf8(bytes).unwrap(), "question,answer\n");
  }

  #[test]
  fn test_format_parsing() {
    assert_eq!(ExportFormat::from_str("CSV"), Some(ExportFormat::Csv));
    assert_eq!(ExportFormat::from_str("tsv"), Some(ExportFormat::Tsv));
    assert_eq!(ExportFormat::from_str("xlsx"), None);
    assert_eq!(ExportFormat::Tsv.file_name(), "flashcards.tsv");
  }
}

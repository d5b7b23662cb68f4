//! Per-session flashcard deck with a review cursor.

use thiserror::Error;

use crate::domain::Flashcard;

#[derive(Debug, Error, PartialEq)]
pub enum DeckError {
  #[error("No card at position {index} (deck has {len})")]
  OutOfRange { index: usize, len: usize },
  #[error("Switch to study mode to reveal answers")]
  NotStudying,
  #[error("No flashcards to study")]
  Empty,
}

/// View toggle, independent of the cards themselves
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum DeckMode {
  #[default]
  Listing,
  Studying,
}

impl DeckMode {
  pub fn from_str(s: &str) -> Option<Self> {
    match s {
      "list" | "listing" => Some(Self::Listing),
      "study" | "studying" => Some(Self::Studying),
      _ => None,
    }
  }

  pub fn as_str(&self) -> &'static str {
    match self {
      Self::Listing => "list",
      Self::Studying => "study",
    }
  }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct FlashcardDeck {
  cards: Vec<Flashcard>,
  cursor: usize,
  revealed: bool,
  mode: DeckMode,
}

impl FlashcardDeck {
  pub fn new() -> Self {
    Self::default()
  }

  pub fn cards(&self) -> &[Flashcard] {
    &self.cards
  }

  pub fn len(&self) -> usize {
    self.cards.len()
  }

  pub fn is_empty(&self) -> bool {
    self.cards.is_empty()
  }

  pub fn cursor(&self) -> usize {
    self.cursor
  }

  pub fn is_revealed(&self) -> bool {
    self.revealed
  }

  pub fn mode(&self) -> DeckMode {
    self.mode
  }

  /// Card under the cursor, if any
  pub fn current(&self) -> Option<&Flashcard> {
    self.cards.get(self.cursor)
  }

  /// Swap in a freshly generated or imported set
  pub fn replace(&mut self, cards: Vec<Flashcard>) {
    self.cards = cards;
    self.cursor = 0;
    self.revealed = false;
  }

  pub fn set_mode(&mut self, mode: DeckMode) {
    self.mode = mode;
    self.revealed = false;
  }

  pub fn edit(&mut self, index: usize, question: &str, answer: &str) -> Result<(), DeckError> {
    let len = self.cards.len();
    let card = self
      .cards
      .get_mut(index)
      .ok_or(DeckError::OutOfRange { index, len })?;
    card.question = question.to_string();
    card.answer = answer.to_string();
    Ok(())
  }

  /// Remove a card and shift the rest down.
  ///
  /// Deleting before the cursor keeps the cursor on the same card. Deleting
  /// the current card leaves the cursor on its successor (or the new last
  /// card) with the answer hidden.
  pub fn delete(&mut self, index: usize) -> Result<Flashcard, DeckError> {
    let len = self.cards.len();
    if index >= len {
      return Err(DeckError::OutOfRange { index, len });
    }
    let removed = self.cards.remove(index);

    if index < self.cursor {
      self.cursor -= 1;
    } else if index == self.cursor {
      self.cursor = self.cursor.min(self.cards.len().saturating_sub(1));
      self.revealed = false;
    }
    Ok(removed)
  }

  pub fn reveal(&mut self) -> Result<(), DeckError> {
    if self.mode != DeckMode::Studying {
      return Err(DeckError::NotStudying);
    }
    if self.current().is_none() {
      return Err(DeckError::Empty);
    }
    self.revealed = true;
    Ok(())
  }

  /// Advance one card; no-op on the last card
  pub fn next(&mut self) {
    if self.cursor + 1 < self.cards.len() {
      self.cursor += 1;
    }
    self.revealed = false;
  }

  /// Go back one card; no-op on the first card
  pub fn previous(&mut self) {
    self.cursor = self.cursor.saturating_sub(1);
    self.revealed = false;
  }

  pub fn restart(&mut self) {
    self.cursor = 0;
    self.revealed = false;
  }
}

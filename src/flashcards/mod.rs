//! Session flashcards: review state machine and file transfer.

pub mod deck;
pub mod transfer;

pub use deck::{DeckError, DeckMode, FlashcardDeck};
pub use transfer::{export, import, ExportFormat, TransferError};

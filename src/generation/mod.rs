//! Text generation: summaries, flashcards and practice questions.
//!
//! Models return typed errors. [`Generator`] is the boundary that turns
//! failures into in-band values the views can show as-is.

pub mod huggingface;
pub mod openai;
pub mod parse;

use async_trait::async_trait;
use std::sync::Arc;
use thiserror::Error;

use crate::config::Settings;
use crate::domain::{Difficulty, Flashcard, Language, PracticeQuestion, QuestionType};

pub use huggingface::HuggingFaceClient;
pub use openai::OpenAiClient;

#[derive(Debug, Error)]
pub enum GenerationError {
    #[error("{0} is not set")]
    MissingApiKey(&'static str),
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),
    #[error("API request failed with status {status}: {body}")]
    Api { status: u16, body: String },
    #[error("Empty response from API")]
    EmptyResponse,
    #[error("{0}")]
    Parse(String),
}

/// Which backend handles a notes request
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ModelChoice {
    #[default]
    OpenAi,
    HuggingFaceT5,
}

impl ModelChoice {
    pub const ALL: [ModelChoice; 2] = [Self::OpenAi, Self::HuggingFaceT5];

    /// Accepts the display label or the short form value
    pub fn from_str(s: &str) -> Option<Self> {
        match s {
            "OpenAI GPT-3.5" | "openai" => Some(Self::OpenAi),
            "HuggingFace T5-Small" | "t5" => Some(Self::HuggingFaceT5),
            _ => None,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Self::OpenAi => "OpenAI GPT-3.5",
            Self::HuggingFaceT5 => "HuggingFace T5-Small",
        }
    }

    pub fn value(&self) -> &'static str {
        match self {
            Self::OpenAi => "openai",
            Self::HuggingFaceT5 => "t5",
        }
    }
}

/// Parameters of a practice question request
#[derive(Debug, Clone, PartialEq)]
pub struct QuestionRequest {
    pub language: Language,
    pub topic: String,
    pub difficulty: Difficulty,
    pub count: u8,
}

/// A backend that can work on free-form notes
#[async_trait]
pub trait NotesModel: Send + Sync {
    async fn summarize(&self, text: &str) -> Result<String, GenerationError>;
    async fn flashcards(&self, text: &str) -> Result<Vec<Flashcard>, GenerationError>;
}

/// A backend that can write practice questions
#[async_trait]
pub trait QuestionModel: Send + Sync {
    async fn questions(&self, request: &QuestionRequest) -> Result<Vec<PracticeQuestion>, GenerationError>;
}

pub struct Generator {
    openai: Arc<dyn NotesModel>,
    t5: Arc<dyn NotesModel>,
    question_model: Arc<dyn QuestionModel>,
}

impl Generator {
    pub fn new(
        openai: Arc<dyn NotesModel>,
        t5: Arc<dyn NotesModel>,
        question_model: Arc<dyn QuestionModel>,
    ) -> Self {
        Self {
            openai,
            t5,
            question_model,
        }
    }

    /// Real HTTP clients configured from settings
    pub fn from_settings(settings: &Settings) -> Self {
        let openai = Arc::new(OpenAiClient::new(settings.openai.clone()));
        let t5 = Arc::new(HuggingFaceClient::new(settings.huggingface.clone()));
        Self::new(openai.clone(), t5, openai)
    }

    fn model(&self, choice: ModelChoice) -> &dyn NotesModel {
        match choice {
            ModelChoice::OpenAi => self.openai.as_ref(),
            ModelChoice::HuggingFaceT5 => self.t5.as_ref(),
        }
    }

    /// Summary text, or `"Error: <message>"` on failure
    pub async fn summarize(&self, text: &str, choice: ModelChoice) -> String {
        match self.model(choice).summarize(text).await {
            Ok(summary) => summary,
            Err(e) => {
                tracing::warn!("Summary with {} failed: {}", choice.label(), e);
                format!("Error: {}", e)
            }
        }
    }

    /// Generated cards, or a single `Error` card carrying the message
    pub async fn flashcards(&self, text: &str, choice: ModelChoice) -> Vec<Flashcard> {
        match self.model(choice).flashcards(text).await {
            Ok(cards) => cards,
            Err(e) => {
                tracing::warn!("Flashcards with {} failed: {}", choice.label(), e);
                vec![Flashcard::new("Error", e.to_string())]
            }
        }
    }

    /// Generated questions, or a single `Error` question carrying the message
    pub async fn questions(&self, request: &QuestionRequest) -> Vec<PracticeQuestion> {
        match self.question_model.questions(request).await {
            Ok(questions) => questions,
            Err(e) => {
                tracing::warn!("Question generation failed: {}", e);
                vec![PracticeQuestion::new(QuestionType::Error, e.to_string())]
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Echo;

    #[async_trait]
    impl NotesModel for Echo {
        async fn summarize(&self, text: &str) -> Result<String, GenerationError> {
            Ok(format!("summary of {}", text))
        }

        async fn flashcards(&self, text: &str) -> Result<Vec<Flashcard>, GenerationError> {
            Ok(vec![Flashcard::new("Q", text)])
        }
    }

    #[async_trait]
    impl QuestionModel for Echo {
        async fn questions(&self, request: &QuestionRequest) -> Result<Vec<PracticeQuestion>, GenerationError> {
            Ok(vec![PracticeQuestion::new(QuestionType::Coding, request.topic.clone()); request.count as usize])
        }
    }

    struct Broken;

    #[async_trait]
    impl NotesModel for Broken {
        async fn summarize(&self, _text: &str) -> Result<String, GenerationError> {
            Err(GenerationError::Api { status: 429, body: "rate limited".into() })
        }

        async fn flashcards(&self, _text: &str) -> Result<Vec<Flashcard>, GenerationError> {
            Err(GenerationError::EmptyResponse)
        }
    }

    #[async_trait]
    impl QuestionModel for Broken {
        async fn questions(&self, _request: &QuestionRequest) -> Result<Vec<PracticeQuestion>, GenerationError> {
            Err(GenerationError::MissingApiKey("OPENAI_API_KEY"))
        }
    }

    fn request() -> QuestionRequest {
        QuestionRequest {
            language: Language::Python,
            topic: "Loops".into(),
            difficulty: Difficulty::Easy,
            count: 2,
        }
    }

    #[tokio::test]
    async fn test_dispatch_by_choice() {
        let generator = Generator::new(Arc::new(Echo), Arc::new(Broken), Arc::new(Echo));

        assert_eq!(generator.summarize("notes", ModelChoice::OpenAi).await, "summary of notes");
        assert!(generator.summarize("notes", ModelChoice::HuggingFaceT5).await.starts_with("Error: "));
    }

    #[tokio::test]
    async fn test_failures_become_in_band_values() {
        let generator = Generator::new(Arc::new(Broken), Arc::new(Broken), Arc::new(Broken));

        let summary = generator.summarize("notes", ModelChoice::OpenAi).await;
        assert_eq!(summary, "Error: API request failed with status 429: rate limited");

        let cards = generator.flashcards("notes", ModelChoice::OpenAi).await;
        assert_eq!(cards, vec![Flashcard::new("Error", "Empty response from API")]);

        let questions = generator.questions(&request()).await;
        assert_eq!(questions.len(), 1);
        assert!(questions[0].is_error());
        assert_eq!(questions[0].question, "OPENAI_API_KEY is not set");
    }

    #[tokio::test]
    async fn test_questions_pass_through() {
        let generator = Generator::new(Arc::new(Echo), Arc::new(Echo), Arc::new(Echo));
        let questions = generator.questions(&request()).await;
        assert_eq!(questions.len(), 2);
        assert_eq!(questions[0].question, "Loops");
    }

    #[test]
    fn test_model_choice_labels() {
        for choice in ModelChoice::ALL {
            assert_eq!(ModelChoice::from_str(choice.label()), Some(choice));
            assert_eq!(ModelChoice::from_str(choice.value()), Some(choice));
        }
        assert_eq!(ModelChoice::from_str("gpt-4"), None);
    }
}

//! OpenAI chat completions client.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use tracing::debug;

use super::parse::{parse_flashcards, parse_questions};
use super::{GenerationError, NotesModel, QuestionModel, QuestionRequest};
use crate::config::{self, ServiceConfig};
use crate::domain::{Flashcard, PracticeQuestion};

pub struct OpenAiClient {
    config: ServiceConfig,
    client: reqwest::Client,
}

#[derive(Debug, Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    messages: Vec<Message<'a>>,
    max_tokens: u32,
    temperature: f32,
}

#[derive(Debug, Serialize)]
struct Message<'a> {
    role: &'a str,
    content: &'a str,
}

#[derive(Debug, Deserialize)]
struct ChatResponse {
    choices: Vec<Choice>,
}

#[derive(Debug, Deserialize)]
struct Choice {
    message: ResponseMessage,
}

#[derive(Debug, Deserialize)]
struct ResponseMessage {
    content: String,
}

impl OpenAiClient {
    pub fn new(config: ServiceConfig) -> Self {
        Self {
            config,
            client: reqwest::Client::new(),
        }
    }

    async fn chat(&self, prompt: &str) -> Result<String, GenerationError> {
        if self.config.api_key.is_empty() {
            return Err(GenerationError::MissingApiKey("OPENAI_API_KEY"));
        }

        debug!("Calling OpenAI chat completions");

        let request = ChatRequest {
            model: config::OPENAI_CHAT_MODEL,
            messages: vec![Message {
                role: "user",
                content: prompt,
            }],
            max_tokens: config::OPENAI_MAX_TOKENS,
            temperature: config::OPENAI_TEMPERATURE,
        };

        let url = format!("{}/v1/chat/completions", self.config.base_url.trim_end_matches('/'));
        let response = self
            .client
            .post(url)
            .bearer_auth(&self.config.api_key)
            .json(&request)
            .send()
            .await?;

        if !response.status().is_success() {
            let status = response.status().as_u16();
            let body = response.text().await.unwrap_or_default();
            return Err(GenerationError::Api { status, body });
        }

        let chat: ChatResponse = response
            .json()
            .await
            .map_err(|e| GenerationError::Parse(format!("Failed to parse response: {}", e)))?;

        chat.choices
            .into_iter()
            .next()
            .map(|c| c.message.content.trim().to_string())
            .filter(|c| !c.is_empty())
            .ok_or(GenerationError::EmptyResponse)
    }
}

fn summary_prompt(text: &str) -> String {
    format!(
        "Summarize the following programming notes into a concise study summary. \
         Keep the key concepts and any important code terms.\n\n{}",
        text
    )
}

fn flashcard_prompt(text: &str) -> String {
    format!(
        "From the following programming notes, generate a list of flashcards.\n\
         Each flashcard should have a question and an answer.\n\
         Respond in the format:\n\
         Q: [Question text]\nA: [Answer text]\n---\n\n{}",
        text
    )
}

fn question_prompt(request: &QuestionRequest) -> String {
    format!(
        "Generate {count} {difficulty} practice questions about \"{topic}\" in {language}.\n\
         Mix multiple-choice, short answer and coding questions. Put the options of a \
         multiple-choice question inside its question text.\n\
         Respond only with a JSON array of objects with the keys \"type\" \
         (one of \"MCQ\", \"Short Answer\", \"Coding\") and \"question\".",
        count = request.count,
        difficulty = request.difficulty.as_str().to_lowercase(),
        topic = request.topic,
        language = request.language,
    )
}

#[async_trait]
impl NotesModel for OpenAiClient {
    async fn summarize(&self, text: &str) -> Result<String, GenerationError> {
        self.chat(&summary_prompt(text)).await
    }

    async fn flashcards(&self, text: &str) -> Result<Vec<Flashcard>, GenerationError> {
        let output = self.chat(&flashcard_prompt(text)).await?;
        Ok(parse_flashcards(&output))
    }
}

#[async_trait]
impl QuestionModel for OpenAiClient {
    async fn questions(&self, request: &QuestionRequest) -> Result<Vec<PracticeQuestion>, GenerationError> {
        let output = self.chat(&question_prompt(request)).await?;
        let mut questions = parse_questions(&output)?;
        questions.truncate(request.count as usize);
        Ok(questions)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{Difficulty, Language};

    fn client_without_key() -> OpenAiClient {
        OpenAiClient::new(ServiceConfig {
            api_key: String::new(),
            base_url: config::OPENAI_BASE_URL.to_string(),
        })
    }

    #[tokio::test]
    async fn test_missing_key_fails_before_request() {
        let client = client_without_key();
        let err = client.summarize("notes").await.unwrap_err();
        assert!(matches!(err, GenerationError::MissingApiKey("OPENAI_API_KEY")));
    }

    #[test]
    fn test_flashcard_prompt_asks_for_block_format() {
        let prompt = flashcard_prompt("Variables hold values.");
        assert!(prompt.contains("Q: [Question text]\nA: [Answer text]\n---"));
        assert!(prompt.ends_with("Variables hold values."));
    }

    #[test]
    fn test_question_prompt_mentions_request() {
        let prompt = question_prompt(&QuestionRequest {
            language: Language::Cpp,
            topic: "Pointers".into(),
            difficulty: Difficulty::Hard,
            count: 3,
        });
        assert!(prompt.starts_with("Generate 3 hard practice questions about \"Pointers\" in C++."));
        assert!(prompt.contains("JSON array"));
    }
}

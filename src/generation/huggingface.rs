//! Hugging Face inference API client for T5 summarization.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use tracing::debug;

use super::{GenerationError, NotesModel};
use crate::config::{self, ServiceConfig};
use crate::domain::Flashcard;

/// Question text of the single card produced from a T5 summary
pub const SUMMARY_CARD_QUESTION: &str = "Summarize the notes in a sentence?";

pub struct HuggingFaceClient {
    config: ServiceConfig,
    client: reqwest::Client,
}

#[derive(Debug, Serialize)]
struct SummarizationRequest<'a> {
    inputs: &'a str,
    parameters: Parameters,
}

#[derive(Debug, Serialize)]
struct Parameters {
    max_length: u32,
    min_length: u32,
    do_sample: bool,
}

#[derive(Debug, Deserialize)]
struct SummarizationOutput {
    summary_text: String,
}

impl HuggingFaceClient {
    pub fn new(config: ServiceConfig) -> Self {
        Self {
            config,
            client: reqwest::Client::new(),
        }
    }

    fn model_url(&self) -> String {
        format!(
            "{}/models/{}",
            self.config.base_url.trim_end_matches('/'),
            config::HUGGINGFACE_SUMMARY_MODEL
        )
    }
}

#[async_trait]
impl NotesModel for HuggingFaceClient {
    async fn summarize(&self, text: &str) -> Result<String, GenerationError> {
        if self.config.api_key.is_empty() {
            return Err(GenerationError::MissingApiKey("HUGGINGFACE_API_TOKEN"));
        }

        debug!("Calling Hugging Face summarization");

        let request = SummarizationRequest {
            inputs: text,
            parameters: Parameters {
                max_length: config::SUMMARY_MAX_LENGTH,
                min_length: config::SUMMARY_MIN_LENGTH,
                do_sample: false,
            },
        };

        let response = self
            .client
            .post(self.model_url())
            .bearer_auth(&self.config.api_key)
            .json(&request)
            .send()
            .await?;

        if !response.status().is_success() {
            let status = response.status().as_u16();
            let body = response.text().await.unwrap_or_default();
            return Err(GenerationError::Api { status, body });
        }

        let outputs: Vec<SummarizationOutput> = response
            .json()
            .await
            .map_err(|e| GenerationError::Parse(format!("Failed to parse response: {}", e)))?;

        outputs
            .into_iter()
            .next()
            .map(|o| o.summary_text.trim().to_string())
            .filter(|s| !s.is_empty())
            .ok_or(GenerationError::EmptyResponse)
    }

    async fn flashcards(&self, text: &str) -> Result<Vec<Flashcard>, GenerationError> {
        let summary = self.summarize(text).await?;
        Ok(vec![Flashcard::new(SUMMARY_CARD_QUESTION, summary)])
    }
}

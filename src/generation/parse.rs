//! Parsing of model output into flashcards and practice questions.

use serde::Deserialize;

use super::GenerationError;
use crate::domain::{Flashcard, PracticeQuestion, QuestionType};

/// Parse `Q: ... / A: ... / ---` blocks.
///
/// Blocks are separated by a line containing only `---`. A block needs both
/// a `Q:` and an `A:` line with text after the prefix, otherwise it is
/// dropped. The first matching line of each kind wins.
pub fn parse_flashcards(text: &str) -> Vec<Flashcard> {
    let mut cards = Vec::new();
    let mut question: Option<String> = None;
    let mut answer: Option<String> = None;

    for line in text.lines().map(str::trim) {
        if line == "---" {
            push_card(&mut cards, question.take(), answer.take());
            continue;
        }
        if question.is_none() {
            if let Some(q) = line.strip_prefix("Q:") {
                question = Some(q.trim().to_string());
                continue;
            }
        }
        if answer.is_none() {
            if let Some(a) = line.strip_prefix("A:") {
                answer = Some(a.trim().to_string());
            }
        }
    }
    push_card(&mut cards, question, answer);

    cards
}

fn push_card(cards: &mut Vec<Flashcard>, question: Option<String>, answer: Option<String>) {
    if let (Some(q), Some(a)) = (question, answer) {
        if !q.is_empty() && !a.is_empty() {
            cards.push(Flashcard::new(q, a));
        }
    }
}

#[derive(Debug, Deserialize)]
struct RawQuestion {
    #[serde(rename = "type", default)]
    kind: String,
    question: String,
}

/// Parse a JSON array of `{type, question}` objects.
///
/// Tolerates a surrounding markdown code fence or prose around the array.
/// Unknown types become short-answer questions.
pub fn parse_questions(text: &str) -> Result<Vec<PracticeQuestion>, GenerationError> {
    let start = text.find('[');
    let end = text.rfind(']');
    let json = match (start, end) {
        (Some(s), Some(e)) if s < e => &text[s..=e],
        _ => return Err(GenerationError::Parse("response contains no JSON array".into())),
    };

    let raw: Vec<RawQuestion> =
        serde_json::from_str(json).map_err(|e| GenerationError::Parse(e.to_string()))?;

    let questions: Vec<PracticeQuestion> = raw
        .into_iter()
        .filter(|q| !q.question.trim().is_empty())
        .map(|q| PracticeQuestion::new(QuestionType::from_label(q.kind.trim()), q.question.trim()))
        .collect();

    if questions.is_empty() {
        return Err(GenerationError::Parse("no questions returned".into()));
    }
    Ok(questions)
}

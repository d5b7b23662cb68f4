//! Practice question generator.

use askama::Template;
use axum::{extract::State, response::Html, Form};
use serde::Deserialize;

use super::{NavContext, SelectOption};
use crate::auth::CurrentSession;
use crate::config;
use crate::domain::{Difficulty, Language, PracticeQuestion};
use crate::error::AppError;
use crate::generation::QuestionRequest;
use crate::state::AppState;

#[derive(Template)]
#[template(path = "questions.html")]
pub struct QuestionsTemplate {
  pub nav: NavContext,
  pub error: Option<String>,
  pub message: Option<String>,
  pub languages: Vec<SelectOption>,
  pub difficulties: Vec<SelectOption>,
  pub form: QuestionFormValues,
  pub min_count: u8,
  pub max_count: u8,
  pub questions: Vec<QuestionView>,
}

pub struct QuestionFormValues {
  pub language: String,
  pub difficulty: String,
  pub topic: String,
  pub count: String,
}

impl Default for QuestionFormValues {
  fn default() -> Self {
    Self {
      language: Language::Python.as_str().to_string(),
      difficulty: Difficulty::Easy.as_str().to_string(),
      topic: String::new(),
      count: config::DEFAULT_QUESTIONS.to_string(),
    }
  }
}

pub struct QuestionView {
  pub number: usize,
  pub kind: &'static str,
  pub css_class: &'static str,
  pub question: String,
}

impl QuestionView {
  fn new(number: usize, q: &PracticeQuestion) -> Self {
    Self {
      number,
      kind: q.kind.as_str(),
      css_class: q.kind.css_class(),
      question: q.question.clone(),
    }
  }
}

#[derive(Deserialize)]
pub struct QuestionForm {
  pub language: String,
  pub difficulty: String,
  #[serde(default)]
  pub topic: String,
  pub count: String,
}

fn template(session: &CurrentSession, form: QuestionFormValues) -> QuestionsTemplate {
  QuestionsTemplate {
    nav: NavContext::new(session, "questions"),
    error: None,
    message: None,
    languages: SelectOption::list(Language::ALL.iter().map(|l| (l.as_str(), l.as_str())), &form.language),
    difficulties: SelectOption::list(Difficulty::ALL.iter().map(|d| (d.as_str(), d.as_str())), &form.difficulty),
    form,
    min_count: config::MIN_QUESTIONS,
    max_count: config::MAX_QUESTIONS,
    questions: Vec::new(),
  }
}

fn parse_request(form: &QuestionForm) -> Result<QuestionRequest, AppError> {
  let language = Language::from_str(form.language.trim())
    .ok_or_else(|| AppError::Validation(format!("Unknown language: {}", form.language)))?;
  let difficulty = Difficulty::from_str(form.difficulty.trim())
    .ok_or_else(|| AppError::Validation(format!("Unknown difficulty: {}", form.difficulty)))?;

  let topic = form.topic.trim();
  if topic.is_empty() {
    return Err(AppError::Validation("Please enter a topic to generate questions.".into()));
  }

  let count = form
    .count
    .trim()
    .parse::<u8>()
    .ok()
    .filter(|n| (config::MIN_QUESTIONS..=config::MAX_QUESTIONS).contains(n))
    .ok_or_else(|| {
      AppError::Validation(format!(
        "Number of questions must be between {} and {}",
        config::MIN_QUESTIONS,
        config::MAX_QUESTIONS
      ))
    })?;

  Ok(QuestionRequest {
    language,
    topic: topic.to_string(),
    difficulty,
    count,
  })
}

/// GET /questions
pub async fn questions_page(session: CurrentSession) -> Html<String> {
  Html(template(&session, QuestionFormValues::default()).render().unwrap_or_default())
}

/// POST /questions
pub async fn questions_submit(
  State(state): State<AppState>,
  session: CurrentSession,
  Form(form): Form<QuestionForm>,
) -> Html<String> {
  let request = parse_request(&form);
  let mut page = template(
    &session,
    QuestionFormValues {
      language: form.language,
      difficulty: form.difficulty,
      topic: form.topic,
      count: form.count,
    },
  );

  match request {
    Ok(request) => {
      let questions = state.generator.questions(&request).await;
      if questions.iter().any(PracticeQuestion::is_error) {
        page.error = Some("⚠️ Failed to generate questions. Try again.".into());
      } else {
        page.message = Some(format!(
          "✅ Generated {} questions for {} - {} [{}]",
          questions.len(),
          request.language,
          request.topic,
          request.difficulty
        ));
      }
      page.questions = questions
        .iter()
        .enumerate()
        .map(|(i, q)| QuestionView::new(i + 1, q))
        .collect();
    }
    Err(e) => {
      e.log("questions");
      page.error = Some(e.user_message());
    }
  }

  Html(page.render().unwrap_or_default())
}

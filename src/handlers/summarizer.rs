//! Notes summarizer: paste notes or upload a `.txt` file.

use askama::Template;
use axum::{
  extract::{multipart::Field, Multipart, State},
  response::Html,
};

use super::{NavContext, SelectOption};
use crate::auth::CurrentSession;
use crate::error::AppError;
use crate::generation::ModelChoice;
use crate::state::AppState;

pub(crate) fn model_options(selected: ModelChoice) -> Vec<SelectOption> {
  SelectOption::list(ModelChoice::ALL.iter().map(|m| (m.value(), m.label())), selected.value())
}

#[derive(Template)]
#[template(path = "summarizer.html")]
pub struct SummarizerTemplate {
  pub nav: NavContext,
  pub error: Option<String>,
  pub upload_mode: bool,
  pub notes: String,
  pub models: Vec<SelectOption>,
  pub summary: Option<String>,
  pub summary_failed: bool,
}

/// Submitted summarizer form
#[derive(Debug, Default)]
pub(crate) struct NotesInput {
  pub upload_mode: bool,
  pub notes: String,
  pub model: ModelChoice,
}

async fn field_text(field: Field<'_>) -> Result<String, AppError> {
  field
    .text()
    .await
    .map_err(|e| AppError::Validation(format!("Could not read form: {}", e)))
}

/// Read the notes form. Uploaded `.txt` content replaces pasted text in
/// upload mode.
pub(crate) async fn read_notes_form(multipart: &mut Multipart) -> Result<NotesInput, AppError> {
  let mut input = NotesInput::default();
  let mut pasted = String::new();
  let mut uploaded: Option<String> = None;

  while let Some(field) = multipart
    .next_field()
    .await
    .map_err(|e| AppError::Validation(format!("Could not read form: {}", e)))?
  {
    let name = field.name().unwrap_or_default().to_string();
    match name.as_str() {
      "mode" => input.upload_mode = field_text(field).await? == "upload",
      "model" => {
        let value = field_text(field).await?;
        input.model = ModelChoice::from_str(&value)
          .ok_or_else(|| AppError::Validation(format!("Unknown model: {}", value)))?;
      }
      "notes" => pasted = field_text(field).await?,
      "file" => {
        let filename = field.file_name().unwrap_or_default().to_string();
        let bytes = field
          .bytes()
          .await
          .map_err(|e| AppError::Validation(format!("Could not read upload: {}", e)))?;
        if filename.is_empty() && bytes.is_empty() {
          continue;
        }
        if !filename.to_ascii_lowercase().ends_with(".txt") {
          return Err(AppError::Validation("Please upload a .txt file".into()));
        }
        let text = String::from_utf8(bytes.to_vec())
          .map_err(|_| AppError::Validation("The uploaded file is not UTF-8 text".into()))?;
        uploaded = Some(text);
      }
      _ => {}
    }
  }

  input.notes = match (input.upload_mode, uploaded) {
    (true, Some(text)) => text,
    (true, None) => String::new(),
    (false, _) => pasted,
  };
  Ok(input)
}

/// GET /summarizer
pub async fn summarizer_page(session: CurrentSession) -> Html<String> {
  let template = SummarizerTemplate {
    nav: NavContext::new(&session, "summarizer"),
    error: None,
    upload_mode: false,
    notes: String::new(),
    models: model_options(ModelChoice::default()),
    summary: None,
    summary_failed: false,
  };
  Html(template.render().unwrap_or_default())
}

/// POST /summarizer
pub async fn summarizer_submit(
  State(state): State<AppState>,
  session: CurrentSession,
  mut multipart: Multipart,
) -> Html<String> {
  let mut template = SummarizerTemplate {
    nav: NavContext::new(&session, "summarizer"),
    error: None,
    upload_mode: false,
    notes: String::new(),
    models: model_options(ModelChoice::default()),
    summary: None,
    summary_failed: false,
  };

  match read_notes_form(&mut multipart).await {
    Ok(input) => {
      template.upload_mode = input.upload_mode;
      template.models = model_options(input.model);
      if input.notes.trim().is_empty() {
        template.error = Some("Please provide some input to summarize.".into());
      } else {
        let summary = state.generator.summarize(&input.notes, input.model).await;
        template.summary_failed = summary.starts_with("Error:");
        template.summary = Some(summary);
      }
      template.notes = input.notes;
    }
    Err(e) => {
      e.log("summarizer");
      template.error = Some(e.user_message());
    }
  }

  Html(template.render().unwrap_or_default())
}

//! Flashcards: generate from notes, import, edit, study and export.

use askama::Template;
use axum::{
  extract::{Multipart, Path, Query, State},
  http::{header, StatusCode},
  response::{Html, IntoResponse, Redirect, Response},
  Form,
};
use serde::Deserialize;

use super::summarizer::{model_options, read_notes_form};
use super::{redirect_with, NavContext, Notice, SelectOption};
use crate::auth::CurrentSession;
use crate::error::AppError;
use crate::flashcards::{self, DeckMode, ExportFormat};
use crate::generation::ModelChoice;
use crate::state::AppState;

const PAGE: &str = "/flashcards";

pub struct CardView {
  pub index: usize,
  pub question: String,
  pub answer: String,
}

/// The card under the study cursor
pub struct StudyView {
  pub position: usize,
  pub total: usize,
  pub question: String,
  pub answer: String,
  pub revealed: bool,
  pub is_first: bool,
  pub is_last: bool,
}

#[derive(Template)]
#[template(path = "flashcards.html")]
pub struct FlashcardsTemplate {
  pub nav: NavContext,
  pub error: Option<String>,
  pub message: Option<String>,
  pub models: Vec<SelectOption>,
  pub studying: bool,
  /// Mode the toggle button switches to
  pub other_mode: &'static str,
  pub cards: Vec<CardView>,
  pub study: Option<StudyView>,
}

/// GET /flashcards
pub async fn flashcards_page(session: CurrentSession, Query(notice): Query<Notice>) -> Html<String> {
  let deck = session.context().deck;

  let cards = deck
    .cards()
    .iter()
    .enumerate()
    .map(|(index, c)| CardView {
      index,
      question: c.question.clone(),
      answer: c.answer.clone(),
    })
    .collect();

  let study = deck.current().map(|card| StudyView {
    position: deck.cursor() + 1,
    total: deck.len(),
    question: card.question.clone(),
    answer: card.answer.clone(),
    revealed: deck.is_revealed(),
    is_first: deck.cursor() == 0,
    is_last: deck.cursor() + 1 == deck.len(),
  });

  let template = FlashcardsTemplate {
    nav: NavContext::new(&session, "flashcards"),
    error: notice.error,
    message: notice.msg,
    models: model_options(ModelChoice::default()),
    studying: deck.mode() == DeckMode::Studying,
    other_mode: match deck.mode() {
      DeckMode::Listing => DeckMode::Studying,
      DeckMode::Studying => DeckMode::Listing,
    }
    .as_str(),
    cards,
    study,
  };
  Html(template.render().unwrap_or_default())
}

fn finish(result: Result<String, AppError>, ctx: &str) -> Redirect {
  match result {
    Ok(msg) if msg.is_empty() => Redirect::to(PAGE),
    Ok(msg) => redirect_with(PAGE, Ok(&msg)),
    Err(e) => {
      e.log(ctx);
      redirect_with(PAGE, Err(&e.user_message()))
    }
  }
}

/// POST /flashcards/generate - Replace the deck with cards made from notes
pub async fn flashcards_generate(
  State(state): State<AppState>,
  session: CurrentSession,
  mut multipart: Multipart,
) -> Redirect {
  let result = async {
    let input = read_notes_form(&mut multipart).await?;
    if input.notes.trim().is_empty() {
      return Err(AppError::Validation(
        "Please provide some content to create flashcards.".into(),
      ));
    }

    let cards = state.generator.flashcards(&input.notes, input.model).await;
    if cards.is_empty() {
      return Err(AppError::Validation(
        "No flashcards could be made from these notes. Try adding more detail.".into(),
      ));
    }

    let count = cards.len();
    session.update(|ctx| ctx.deck.replace(cards));
    Ok::<_, AppError>(format!("✅ Generated {} flashcards", count))
  }
  .await;

  finish(result, "flashcards generate")
}

/// POST /flashcards/import - Replace the deck with an uploaded CSV/TSV file
pub async fn flashcards_import(session: CurrentSession, mut multipart: Multipart) -> Redirect {
  let result = async {
    while let Some(field) = multipart
      .next_field()
      .await
      .map_err(|e| AppError::Validation(format!("Could not read upload: {}", e)))?
    {
      if field.name() != Some("file") {
        continue;
      }
      let filename = field.file_name().unwrap_or_default().to_string();
      let bytes = field
        .bytes()
        .await
        .map_err(|e| AppError::Validation(format!("Could not read upload: {}", e)))?;
      // Browsers send an empty part when no file was chosen
      if filename.is_empty() && bytes.is_empty() {
        continue;
      }

      let cards = flashcards::import(&filename, &bytes)?;
      let count = cards.len();
      session.update(|ctx| ctx.deck.replace(cards));
      tracing::info!("Imported {} flashcards from {}", count, filename);
      return Ok(format!("✅ Imported {} flashcards", count));
    }
    Err::<String, _>(AppError::Validation("Please choose a file to import.".into()))
  }
  .await;

  finish(result, "flashcards import")
}

#[derive(Deserialize)]
pub struct EditForm {
  pub question: String,
  pub answer: String,
}

/// POST /flashcards/{index}/edit
pub async fn flashcards_edit(
  session: CurrentSession,
  Path(index): Path<usize>,
  Form(form): Form<EditForm>,
) -> Redirect {
  let result = session
    .update(|ctx| ctx.deck.edit(index, form.question.trim(), form.answer.trim()))
    .map(|_| "Card updated".to_string())
    .map_err(AppError::from);
  finish(result, "flashcards edit")
}

/// POST /flashcards/{index}/delete
pub async fn flashcards_delete(session: CurrentSession, Path(index): Path<usize>) -> Redirect {
  let result = session
    .update(|ctx| ctx.deck.delete(index))
    .map(|_| "Card deleted".to_string())
    .map_err(AppError::from);
  finish(result, "flashcards delete")
}

#[derive(Deserialize)]
pub struct ModeForm {
  pub mode: String,
}

/// POST /flashcards/mode - Switch between list and study view
pub async fn flashcards_mode(session: CurrentSession, Form(form): Form<ModeForm>) -> Redirect {
  let result = DeckMode::from_str(&form.mode)
    .ok_or_else(|| AppError::Validation(format!("Unknown mode: {}", form.mode)))
    .map(|mode| {
      session.update(|ctx| ctx.deck.set_mode(mode));
      String::new()
    });
  finish(result, "flashcards mode")
}

/// POST /flashcards/reveal
pub async fn flashcards_reveal(session: CurrentSession) -> Redirect {
  let result = session
    .update(|ctx| ctx.deck.reveal())
    .map(|_| String::new())
    .map_err(AppError::from);
  finish(result, "flashcards reveal")
}

/// POST /flashcards/next
pub async fn flashcards_next(session: CurrentSession) -> Redirect {
  session.update(|ctx| ctx.deck.next());
  Redirect::to(PAGE)
}

/// POST /flashcards/previous
pub async fn flashcards_previous(session: CurrentSession) -> Redirect {
  session.update(|ctx| ctx.deck.previous());
  Redirect::to(PAGE)
}

/// POST /flashcards/restart
pub async fn flashcards_restart(session: CurrentSession) -> Redirect {
  session.update(|ctx| ctx.deck.restart());
  Redirect::to(PAGE)
}

/// GET /flashcards/export/{format} - Download the deck
pub async fn flashcards_export(session: CurrentSession, Path(format): Path<String>) -> Response {
  let Some(format) = ExportFormat::from_str(&format) else {
    return (StatusCode::NOT_FOUND, "Unknown export format").into_response();
  };

  let deck = session.context().deck;
  match flashcards::export(deck.cards(), format) {
    Ok(bytes) => (
      [
        (header::CONTENT_TYPE, format.content_type().to_string()),
        (
          header::CONTENT_DISPOSITION,
          format!("attachment; filename=\"{}\"", format.file_name()),
        ),
      ],
      bytes,
    )
      .into_response(),
    Err(e) => AppError::from(e).into_response(),
  }
}

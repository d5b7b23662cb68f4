pub mod dashboard;
pub mod flashcards;
pub mod planner;
pub mod questions;
pub mod settings;
pub mod summarizer;

use axum::response::Redirect;
use chrono::{Local, NaiveDate};
use serde::Deserialize;

use crate::auth::CurrentSession;

pub use dashboard::dashboard;
pub use flashcards::*;
pub use planner::{planner_page, planner_submit};
pub use questions::{questions_page, questions_submit};
pub use settings::{settings_page, settings_submit};
pub use summarizer::{summarizer_page, summarizer_submit};

/// Navigation bar state shared by every page template
pub struct NavContext {
  pub username: String,
  pub logged_in: bool,
  pub active: &'static str,
}

impl NavContext {
  pub fn new(session: &CurrentSession, active: &'static str) -> Self {
    Self {
      username: session.username().to_string(),
      logged_in: session.is_logged_in(),
      active,
    }
  }
}

/// An `<option>` in a select box
pub struct SelectOption {
  pub value: &'static str,
  pub label: &'static str,
  pub selected: bool,
}

impl SelectOption {
  /// Build options from `(value, label)` pairs, selecting the one equal to `current`
  pub fn list(items: impl IntoIterator<Item = (&'static str, &'static str)>, current: &str) -> Vec<Self> {
    items
      .into_iter()
      .map(|(value, label)| Self {
        value,
        label,
        selected: value == current,
      })
      .collect()
  }
}

/// `?msg=` / `?error=` notices carried across a redirect
#[derive(Debug, Default, Deserialize)]
pub struct Notice {
  pub msg: Option<String>,
  pub error: Option<String>,
}

/// Redirect to `path` with an info or error notice in the query string
pub fn redirect_with(path: &str, notice: Result<&str, &str>) -> Redirect {
  let (key, text) = match notice {
    Ok(text) => ("msg", text),
    Err(text) => ("error", text),
  };
  Redirect::to(&format!("{}?{}={}", path, key, urlencoding::encode(text)))
}

pub(crate) fn today() -> NaiveDate {
  Local::now().date_naive()
}

pub async fn index() -> Redirect {
  Redirect::to("/dashboard")
}

#[cfg(test)]
mod tests {
  use super::*;
  use axum::http::header::LOCATION;
  use axum::response::IntoResponse;

  #[test]
  fn test_select_option_marks_current() {
    let options = SelectOption::list([("a", "A"), ("b", "B")], "b");
    assert!(!options[0].selected);
    assert!(options[1].selected);
  }

  #[test]
  fn test_redirect_with_encodes_message() {
    let response = redirect_with("/flashcards", Err("Invalid file structure: a,b")).into_response();
    assert_eq!(
      response.headers()[LOCATION],
      "/flashcards?error=Invalid%20file%20structure%3A%20a%2Cb"
    );
  }
}

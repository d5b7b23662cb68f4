//! Dashboard preferences and account details.

use askama::Template;
use axum::{
  extract::{Query, State},
  response::{Html, Redirect},
  Form,
};
use serde::Deserialize;

use super::{redirect_with, NavContext, Notice};
use crate::auth::CurrentSession;
use crate::db::{self, LogOnError};
use crate::session::Preferences;
use crate::state::AppState;

/// One checkbox on the settings form
pub struct Toggle {
  pub name: &'static str,
  pub label: &'static str,
  pub checked: bool,
}

fn toggles(prefs: &Preferences) -> Vec<Toggle> {
  vec![
    Toggle { name: "show_tips", label: "💡 Show daily tip", checked: prefs.show_tips },
    Toggle { name: "show_pie", label: "🥧 Show progress pie", checked: prefs.show_pie },
    Toggle { name: "show_time", label: "⏳ Show time remaining", checked: prefs.show_time },
    Toggle { name: "show_streak", label: "🔥 Show streak and weekly activity", checked: prefs.show_streak },
    Toggle { name: "show_heatmap", label: "📅 Show calendar heatmap", checked: prefs.show_heatmap },
    Toggle { name: "auto_log", label: "📝 Log a study session when I open today's plan", checked: prefs.auto_log },
  ]
}

#[derive(Template)]
#[template(path = "settings.html")]
pub struct SettingsTemplate {
  pub nav: NavContext,
  pub message: Option<String>,
  pub error: Option<String>,
  pub toggles: Vec<Toggle>,
  pub member_since: Option<String>,
  pub total_sessions: i64,
}

/// Checkboxes are only submitted when ticked
#[derive(Debug, Default, Deserialize)]
pub struct SettingsForm {
  pub show_tips: Option<String>,
  pub show_pie: Option<String>,
  pub show_time: Option<String>,
  pub show_streak: Option<String>,
  pub show_heatmap: Option<String>,
  pub auto_log: Option<String>,
}

impl From<SettingsForm> for Preferences {
  fn from(form: SettingsForm) -> Self {
    Self {
      show_tips: form.show_tips.is_some(),
      show_pie: form.show_pie.is_some(),
      show_time: form.show_time.is_some(),
      show_streak: form.show_streak.is_some(),
      show_heatmap: form.show_heatmap.is_some(),
      auto_log: form.auto_log.is_some(),
    }
  }
}

/// GET /settings
pub async fn settings_page(
  State(state): State<AppState>,
  session: CurrentSession,
  Query(notice): Query<Notice>,
) -> Html<String> {
  let prefs = session.context().preferences;

  let (member_since, total_sessions) = match db::try_lock(&state.db) {
    Ok(conn) => (
      db::get_created_at(&conn, session.username()).log_warn("Failed to load account").flatten(),
      db::count_study_sessions(&conn, session.username()).log_warn_default("Failed to count study sessions"),
    ),
    Err(_) => (None, 0),
  };

  let template = SettingsTemplate {
    nav: NavContext::new(&session, "settings"),
    message: notice.msg,
    error: notice.error,
    toggles: toggles(&prefs),
    member_since,
    total_sessions,
  };
  Html(template.render().unwrap_or_default())
}

/// POST /settings
pub async fn settings_submit(session: CurrentSession, Form(form): Form<SettingsForm>) -> Redirect {
  let prefs = Preferences::from(form);
  session.update(|ctx| ctx.preferences = prefs);
  redirect_with("/settings", Ok("Preferences saved"))
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn test_unticked_boxes_turn_off() {
    let prefs = Preferences::from(SettingsForm {
      show_tips: Some("on".into()),
      auto_log: Some("on".into()),
      ..Default::default()
    });
    assert!(prefs.show_tips);
    assert!(prefs.auto_log);
    assert!(!prefs.show_pie);
    assert!(!prefs.show_heatmap);
  }

  #[test]
  fn test_toggles_reflect_preferences() {
    let toggles = toggles(&Preferences::default());
    assert_eq!(toggles.len(), 6);
    assert!(toggles.iter().all(|t| t.checked));
  }
}

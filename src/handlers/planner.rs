//! Study planner: create a plan and show the current one.

use askama::Template;
use axum::{
  extract::{Query, State},
  response::{Html, IntoResponse, Response},
  Form,
};
use chrono::NaiveDate;
use serde::Deserialize;

use super::dashboard::{plan_rows, PlanRow};
use super::{redirect_with, today, NavContext, Notice, SelectOption};
use crate::auth::CurrentSession;
use crate::config;
use crate::db;
use crate::domain::{Language, StudyPlan};
use crate::error::AppError;
use crate::planner;
use crate::state::AppState;

#[derive(Template)]
#[template(path = "planner.html")]
pub struct PlannerTemplate {
  pub nav: NavContext,
  pub error: Option<String>,
  pub message: Option<String>,
  pub languages: Vec<SelectOption>,
  pub form: PlannerFormValues,
  pub min_weeks: u32,
  pub max_weeks: u32,
  pub plan: Option<PlanView>,
  pub logged_today: bool,
}

/// Values echoed back into the form
pub struct PlannerFormValues {
  pub language: String,
  pub goal: String,
  pub start_date: String,
  pub weeks: String,
}

pub struct PlanView {
  pub language: String,
  pub goal: String,
  pub start_date: String,
  pub end_date: String,
  pub total_days: u32,
  pub rows: Vec<PlanRow>,
}

#[derive(Deserialize)]
pub struct PlannerForm {
  pub language: String,
  #[serde(default)]
  pub goal: String,
  pub start_date: String,
  pub weeks: String,
}

fn plan_view(plan: &StudyPlan, today: NaiveDate) -> PlanView {
  PlanView {
    language: plan.language.clone(),
    goal: plan.goal.clone(),
    start_date: plan.start_date.to_string(),
    end_date: plan.end_date.to_string(),
    total_days: plan.total_days,
    rows: plan_rows(plan, today),
  }
}

fn default_form(today: NaiveDate) -> PlannerFormValues {
  PlannerFormValues {
    language: Language::Python.as_str().to_string(),
    goal: String::new(),
    start_date: today.to_string(),
    weeks: config::DEFAULT_PLAN_WEEKS.to_string(),
  }
}

/// Load the user's plan and, when today is on it, log a study session
fn load_and_log(state: &AppState, username: &str, auto_log: bool, today: NaiveDate) -> Result<(Option<StudyPlan>, bool), AppError> {
  let conn = db::try_lock(&state.db)?;
  let plan = db::load_plan(&conn, username)?;

  let mut logged = false;
  if auto_log && plan.as_ref().is_some_and(|p| p.topic_for(today).is_some()) {
    db::log_study_session(&conn, username, today)?;
    tracing::debug!("Auto-logged study session for {} on {}", username, today);
    logged = true;
  }
  Ok((plan, logged))
}

fn render(
  session: &CurrentSession,
  state: &AppState,
  form: PlannerFormValues,
  error: Option<String>,
  message: Option<String>,
) -> Html<String> {
  let today = today();
  let auto_log = session.context().preferences.auto_log;

  let (plan, logged_today, error) = match load_and_log(state, session.username(), auto_log, today) {
    Ok((plan, logged)) => (plan, logged, error),
    Err(e) => {
      e.log("planner");
      (None, false, error.or(Some(e.user_message())))
    }
  };

  let template = PlannerTemplate {
    nav: NavContext::new(session, "planner"),
    error,
    message,
    languages: SelectOption::list(Language::ALL.iter().map(|l| (l.as_str(), l.as_str())), &form.language),
    form,
    min_weeks: config::MIN_PLAN_WEEKS,
    max_weeks: config::MAX_PLAN_WEEKS,
    plan: plan.as_ref().map(|p| plan_view(p, today)),
    logged_today,
  };
  Html(template.render().unwrap_or_default())
}

/// GET /planner
pub async fn planner_page(
  State(state): State<AppState>,
  session: CurrentSession,
  Query(notice): Query<Notice>,
) -> Html<String> {
  render(&session, &state, default_form(today()), notice.error, notice.msg)
}

fn build_plan(state: &AppState, owner: &str, form: &PlannerForm) -> Result<StudyPlan, AppError> {
  let language = Language::from_str(form.language.trim())
    .ok_or_else(|| AppError::Validation(format!("Unknown language: {}", form.language)))?;
  let start_date = form
    .start_date
    .trim()
    .parse::<NaiveDate>()
    .map_err(|_| AppError::Validation("Please pick a valid start date".into()))?;
  let weeks = form.weeks.trim().parse::<u32>().map_err(|_| {
    AppError::Validation(format!(
      "Study duration must be between {} and {} weeks",
      config::MIN_PLAN_WEEKS,
      config::MAX_PLAN_WEEKS
    ))
  })?;

  let topics = state.topics.topics_for(language);
  Ok(planner::create_plan(owner, language, &form.goal, start_date, weeks, &topics)?)
}

/// POST /planner - Replace the user's plan
pub async fn planner_submit(
  State(state): State<AppState>,
  session: CurrentSession,
  Form(form): Form<PlannerForm>,
) -> Response {
  let result = build_plan(&state, session.username(), &form).and_then(|plan| {
    let conn = db::try_lock(&state.db)?;
    db::save_plan(&conn, &plan)?;
    Ok(plan)
  });

  match result {
    Ok(plan) => {
      tracing::info!(
        "Saved {}-day {} plan for {}",
        plan.total_days,
        plan.language,
        plan.owner
      );
      redirect_with("/planner", Ok("✅ Study plan saved!")).into_response()
    }
    Err(e) => {
      e.log("planner");
      let values = PlannerFormValues {
        language: form.language,
        goal: form.goal,
        start_date: form.start_date,
        weeks: form.weeks,
      };
      render(&session, &state, values, Some(e.user_message()), None).into_response()
    }
  }
}

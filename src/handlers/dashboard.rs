//! Progress dashboard: plan status, streak, weekly activity and heatmap.

use askama::Template;
use axum::{extract::State, response::Html};
use chrono::NaiveDate;

use super::{today, NavContext};
use crate::auth::CurrentSession;
use crate::db::{self, LogOnError};
use crate::domain::StudyPlan;
use crate::error::AppError;
use crate::progress::{self, Badge};
use crate::session::Preferences;
use crate::state::AppState;

/// One row of a schedule table
pub struct PlanRow {
  pub date: String,
  pub weekday: String,
  pub topic: String,
  pub is_today: bool,
  pub is_past: bool,
}

impl PlanRow {
  fn new(date: NaiveDate, topic: &str, today: NaiveDate) -> Self {
    Self {
      date: date.to_string(),
      weekday: date.format("%a").to_string(),
      topic: topic.to_string(),
      is_today: date == today,
      is_past: date < today,
    }
  }
}

pub(crate) fn plan_rows(plan: &StudyPlan, today: NaiveDate) -> Vec<PlanRow> {
  plan
    .schedule
    .iter()
    .map(|(d, t)| PlanRow::new(*d, t, today))
    .collect()
}

pub struct WeeklyBar {
  pub label: String,
  pub count: u32,
  /// Bar height as a percentage of the busiest day
  pub height: u32,
}

pub struct HeatCell {
  pub day: u32,
  pub count: u32,
  /// Intensity bucket 1..=4
  pub level: u32,
}

pub struct HeatWeek {
  pub week: u32,
  pub cells: Vec<HeatCell>,
}

/// Plan figures shown when the user has a plan
pub struct PlanSummary {
  pub language: String,
  pub goal: String,
  pub start_date: String,
  pub end_date: String,
  pub percent: u8,
  pub completed_days: usize,
  pub remaining_days: usize,
  pub total_days: usize,
  pub days_left: i64,
  pub days_spent: i64,
  pub upcoming: Vec<PlanRow>,
  pub rows: Vec<PlanRow>,
}

#[derive(Template)]
#[template(path = "dashboard.html")]
pub struct DashboardTemplate {
  pub nav: NavContext,
  pub prefs: Preferences,
  pub error: Option<String>,
  pub plan: Option<PlanSummary>,
  pub streak: u32,
  pub badge: Option<&'static str>,
  pub total_sessions: i64,
  pub weekly: Vec<WeeklyBar>,
  pub heatmap: Vec<HeatWeek>,
  pub tip: &'static str,
}

fn summarize_plan(plan: &StudyPlan, today: NaiveDate) -> PlanSummary {
  let progress = plan.progress(today);
  PlanSummary {
    language: plan.language.clone(),
    goal: plan.goal.clone(),
    start_date: plan.start_date.to_string(),
    end_date: plan.end_date.to_string(),
    percent: progress.percent,
    completed_days: progress.completed_days,
    remaining_days: progress.remaining_days(),
    total_days: progress.total_days,
    days_left: plan.days_left(today),
    days_spent: plan.days_spent(today),
    upcoming: plan
      .upcoming_week(today)
      .into_iter()
      .map(|(d, t)| PlanRow::new(d, t, today))
      .collect(),
    rows: plan_rows(plan, today),
  }
}

fn weekly_bars(dates: &[NaiveDate], today: NaiveDate) -> Vec<WeeklyBar> {
  let series = progress::weekly_series(dates, today);
  let max = series.iter().map(|d| d.count).max().unwrap_or(0).max(1);
  series
    .into_iter()
    .map(|d| WeeklyBar {
      height: d.count * 100 / max,
      label: d.weekday,
      count: d.count,
    })
    .collect()
}

fn heatmap_weeks(dates: &[NaiveDate]) -> Vec<HeatWeek> {
  let cells = progress::heatmap_cells(dates);
  let max = progress::max_count(&cells).max(1);

  let mut weeks: Vec<HeatWeek> = Vec::new();
  for cell in cells {
    let heat = HeatCell {
      day: cell.day,
      count: cell.count,
      level: (cell.count * 4).div_ceil(max).clamp(1, 4),
    };
    match weeks.last_mut() {
      Some(w) if w.week == cell.week => w.cells.push(heat),
      _ => weeks.push(HeatWeek {
        week: cell.week,
        cells: vec![heat],
      }),
    }
  }
  weeks
}

fn load_plan(state: &AppState, username: &str) -> Result<Option<StudyPlan>, AppError> {
  let conn = db::try_lock(&state.db)?;
  Ok(db::load_plan(&conn, username)?)
}

/// GET /dashboard
pub async fn dashboard(State(state): State<AppState>, session: CurrentSession) -> Html<String> {
  let username = session.username().to_string();
  let today = today();
  let prefs = session.context().preferences;

  let (plan, error) = match load_plan(&state, &username) {
    Ok(plan) => (plan, None),
    Err(e) => {
      e.log("dashboard");
      (None, Some(e.user_message()))
    }
  };

  let (dates, total_sessions) = match db::try_lock(&state.db) {
    Ok(conn) => (
      db::get_study_dates(&conn, &username).log_warn_default("Failed to load study log"),
      db::count_study_sessions(&conn, &username).log_warn_default("Failed to count study sessions"),
    ),
    Err(_) => (Vec::new(), 0),
  };

  let streak = progress::current_streak(&dates, today);

  let template = DashboardTemplate {
    nav: NavContext::new(&session, "dashboard"),
    prefs,
    error,
    plan: plan.as_ref().map(|p| summarize_plan(p, today)),
    streak,
    badge: Badge::for_streak(streak).message(),
    total_sessions,
    weekly: weekly_bars(&dates, today),
    heatmap: heatmap_weeks(&dates),
    tip: progress::random_tip(),
  };
  Html(template.render().unwrap_or_default())
}

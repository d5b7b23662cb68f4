use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use codemate::{app, config, db, generation::Generator, planner::TopicCatalog, state::AppState};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
  tracing_subscriber::registry()
    .with(
      tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| "codemate=debug,tower_http=debug".into()),
    )
    .with(tracing_subscriber::fmt::layer())
    .init();

  let settings = config::load();

  let pool = db::init_db(&settings.database_path)?;
  tracing::info!("Database ready at {}", settings.database_path.display());

  let topics = TopicCatalog::new(settings.topics_dir.clone());
  if !topics.dir().exists() {
    tracing::warn!(
      "Topic directory {} not found, plans will use the generic curriculum",
      topics.dir().display()
    );
  }

  if settings.openai.api_key.is_empty() {
    tracing::warn!("OPENAI_API_KEY is not set, OpenAI features will report errors");
  }

  let state = AppState::new(pool, Generator::from_settings(&settings), topics);
  let router = app::build_router(state);

  let bind_addr = settings.bind_addr();
  let listener = tokio::net::TcpListener::bind(&bind_addr).await?;
  tracing::info!("Server running on http://localhost:{}", settings.server_port);

  axum::serve(listener, router).await?;
  Ok(())
}

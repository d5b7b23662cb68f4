//! Application configuration.
//!
//! Runtime settings are resolved with priority config.toml > environment
//! (including `.env`) > defaults. Fixed limits live here as constants.

use serde::Deserialize;
use std::path::PathBuf;

use crate::paths;

// ==================== File Configuration ====================

/// Configuration file structure for config.toml
#[derive(Debug, Default, Deserialize)]
struct FileConfig {
    server: Option<ServerConfig>,
    database: Option<DatabaseConfig>,
    planner: Option<PlannerConfig>,
    openai: Option<EndpointConfig>,
    huggingface: Option<EndpointConfig>,
}

#[derive(Debug, Deserialize)]
struct ServerConfig {
    addr: Option<String>,
    port: Option<u16>,
}

#[derive(Debug, Deserialize)]
struct DatabaseConfig {
    path: Option<String>,
}

#[derive(Debug, Deserialize)]
struct PlannerConfig {
    topics_dir: Option<String>,
}

#[derive(Debug, Deserialize)]
struct EndpointConfig {
    base_url: Option<String>,
}

/// Settings for an outbound text-generation service
#[derive(Debug, Clone)]
pub struct ServiceConfig {
    pub api_key: String,
    pub base_url: String,
}

/// Resolved runtime settings
#[derive(Debug, Clone)]
pub struct Settings {
    pub server_addr: String,
    pub server_port: u16,
    pub database_path: PathBuf,
    pub topics_dir: PathBuf,
    pub openai: ServiceConfig,
    pub huggingface: ServiceConfig,
}

impl Settings {
    /// Full address to bind the HTTP listener to
    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.server_addr, self.server_port)
    }
}

/// Load settings from config.toml, the environment and defaults
pub fn load() -> Settings {
    // Load .env file if present
    let _ = dotenvy::dotenv();

    let file = match std::fs::read_to_string(CONFIG_FILE) {
        Ok(contents) => parse_file_config(&contents).unwrap_or_else(|e| {
            tracing::warn!("Ignoring invalid {}: {}", CONFIG_FILE, e);
            FileConfig::default()
        }),
        Err(_) => FileConfig::default(),
    };

    resolve(file, |key| std::env::var(key).ok())
}

fn parse_file_config(contents: &str) -> Result<FileConfig, toml::de::Error> {
    toml::from_str(contents)
}

/// Merge file values over environment values over defaults
fn resolve(file: FileConfig, env: impl Fn(&str) -> Option<String>) -> Settings {
    let server = file.server;
    let server_addr = server
        .as_ref()
        .and_then(|s| s.addr.clone())
        .or_else(|| env("CODEMATE_ADDR"))
        .unwrap_or_else(|| SERVER_ADDR.to_string());
    let server_port = server
        .as_ref()
        .and_then(|s| s.port)
        .or_else(|| env("PORT").and_then(|p| p.parse().ok()))
        .unwrap_or(SERVER_PORT);

    let database_path = match file.database.and_then(|d| d.path) {
        Some(path) => {
            tracing::info!("Using database from {}: {}", CONFIG_FILE, path);
            PathBuf::from(path)
        }
        None => match env("DATABASE_PATH") {
            Some(path) => {
                tracing::info!("Using database from DATABASE_PATH env: {}", path);
                PathBuf::from(path)
            }
            None => PathBuf::from(paths::db_path()),
        },
    };

    let topics_dir = file
        .planner
        .and_then(|p| p.topics_dir)
        .or_else(|| env("TOPICS_DIR"))
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from(paths::topics_dir()));

    let openai = ServiceConfig {
        api_key: env("OPENAI_API_KEY").unwrap_or_default(),
        base_url: file
            .openai
            .and_then(|o| o.base_url)
            .or_else(|| env("OPENAI_BASE_URL"))
            .unwrap_or_else(|| OPENAI_BASE_URL.to_string()),
    };

    let huggingface = ServiceConfig {
        api_key: env("HUGGINGFACE_API_TOKEN").unwrap_or_default(),
        base_url: file
            .huggingface
            .and_then(|h| h.base_url)
            .or_else(|| env("HUGGINGFACE_BASE_URL"))
            .unwrap_or_else(|| HUGGINGFACE_BASE_URL.to_string()),
    };

    Settings {
        server_addr,
        server_port,
        database_path,
        topics_dir,
        openai,
        huggingface,
    }
}

/// Optional configuration file in the working directory
pub const CONFIG_FILE: &str = "config.toml";

// ==================== Server Configuration ====================

/// Default address to bind to
pub const SERVER_ADDR: &str = "0.0.0.0";

/// Default server port
pub const SERVER_PORT: u16 = 8501;

// ==================== Session Configuration ====================

/// Session expiration time in hours of inactivity
pub const SESSION_EXPIRY_HOURS: i64 = 12;

/// Probability threshold for session cleanup (0-255, lower = less frequent)
/// Value of 25 means ~10% chance (25/256) on each session access
pub const SESSION_CLEANUP_THRESHOLD: u8 = 25;

/// Identity used when nobody is logged in
pub const GUEST_USERNAME: &str = "guest";

// ==================== Planner Configuration ====================

pub const MIN_PLAN_WEEKS: u32 = 1;
pub const MAX_PLAN_WEEKS: u32 = 12;
pub const DEFAULT_PLAN_WEEKS: u32 = 4;

// ==================== Question Generation ====================

pub const MIN_QUESTIONS: u8 = 1;
pub const MAX_QUESTIONS: u8 = 10;
pub const DEFAULT_QUESTIONS: u8 = 5;

// ==================== Text Generation Backends ====================

pub const OPENAI_BASE_URL: &str = "https://api.openai.com";
pub const OPENAI_CHAT_MODEL: &str = "gpt-3.5-turbo";
pub const OPENAI_MAX_TOKENS: u32 = 1000;
pub const OPENAI_TEMPERATURE: f32 = 0.5;

pub const HUGGINGFACE_BASE_URL: &str = "https://api-inference.huggingface.co";
pub const HUGGINGFACE_SUMMARY_MODEL: &str = "t5-small";
pub const SUMMARY_MAX_LENGTH: u32 = 200;
pub const SUMMARY_MIN_LENGTH: u32 = 40;

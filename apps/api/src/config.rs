use std::path::PathBuf;

use anyhow::{Context, Result};

pub const DEFAULT_ADZUNA_BASE_URL: &str = "https://api.adzuna.com/v1/api/jobs";

/// Application configuration loaded from environment variables.
/// External services are optional: a missing credential disables the
/// feature at request time instead of failing startup.
#[derive(Debug, Clone)]
pub struct Config {
    pub port: u16,
    pub rust_log: String,
    pub adzuna_app_id: Option<String>,
    pub adzuna_app_key: Option<String>,
    pub adzuna_base_url: String,
    pub embedding_url: String,
    pub embedding_model: String,
    pub course_catalog_path: PathBuf,
    pub course_min_score: f64,
    pub anthropic_api_key: Option<String>,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Builds the config from any key lookup. Blank values count as unset.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        Ok(Config {
            port: get("PORT")
                .unwrap_or_else(|| "5000".to_string())
                .parse::<u16>()
                .context("PORT must be a valid port number")?,
            rust_log: get("RUST_LOG").unwrap_or_else(|| "info".to_string()),
            adzuna_app_id: get("ADZUNA_API_ID"),
            adzuna_app_key: get("ADZUNA_API_KEY"),
            adzuna_base_url: get("ADZUNA_BASE_URL")
                .unwrap_or_else(|| DEFAULT_ADZUNA_BASE_URL.to_string()),
            embedding_url: get("EMBEDDING_URL")
                .unwrap_or_else(|| "http://localhost:11434".to_string()),
            embedding_model: get("EMBEDDING_MODEL").unwrap_or_else(|| "all-minilm".to_string()),
            course_catalog_path: get("COURSE_CATALOG_PATH")
                .map(PathBuf::from)
                .unwrap_or_else(|| PathBuf::from("data/courses.json")),
            course_min_score: get("COURSE_MIN_SCORE")
                .map(|v| v.parse::<f64>())
                .transpose()
                .context("COURSE_MIN_SCORE must be a number")?
                .unwrap_or(0.01),
            anthropic_api_key: get("ANTHROPIC_API_KEY"),
        })
    }
}

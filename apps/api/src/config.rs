use std::time::Duration;

use anyhow::{Context, Result};

const DEFAULT_OPENAI_BASE_URL: &str = "https://api.openai.com";
const DEFAULT_GOOGLE_SEARCH_URL: &str = "https://www.googleapis.com/customsearch/v1";
const DEFAULT_WIKIPEDIA_API_URL: &str = "https://en.wikipedia.org/w/api.php";

/// Application configuration loaded from environment variables.
/// Built once at startup; fails startup if any required secret is missing.
#[derive(Debug, Clone)]
pub struct Config {
    pub openai_api_key: String,
    pub google_cse_id: String,
    pub google_api_key: String,
    pub openai_base_url: String,
    pub google_search_url: String,
    pub wikipedia_api_url: String,
    /// Per outbound HTTP call.
    pub request_timeout: Duration,
    /// Whole suggestion pipeline, both LLM calls and every lookup.
    pub pipeline_timeout: Duration,
    pub port: u16,
    pub rust_log: String,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing

        Ok(Config {
            openai_api_key: require_env("OPENAI_API_KEY")?,
            google_cse_id: require_env("GOOGLE_CSE_ID")?,
            google_api_key: require_env("GOOGLE_API_KEY")?,
            openai_base_url: env_or("OPENAI_BASE_URL", DEFAULT_OPENAI_BASE_URL),
            google_search_url: env_or("GOOGLE_SEARCH_URL", DEFAULT_GOOGLE_SEARCH_URL),
            wikipedia_api_url: env_or("WIKIPEDIA_API_URL", DEFAULT_WIKIPEDIA_API_URL),
            request_timeout: Duration::from_secs(parse_env("REQUEST_TIMEOUT_SECS", 60)?),
            pipeline_timeout: Duration::from_secs(parse_env("PIPELINE_TIMEOUT_SECS", 180)?),
            port: parse_env("PORT", 8080)?,
            rust_log: env_or("RUST_LOG", "info"),
        })
    }
}

fn require_env(key: &str) -> Result<String> {
    std::env::var(key).with_context(|| format!("Required environment variable '{key}' is not set"))
}

fn env_or(key: &str, default: &str) -> String {
    std::env::var(key).unwrap_or_else(|_| default.to_string())
}

fn parse_env<T>(key: &str, default: T) -> Result<T>
where
    T: std::str::FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    match std::env::var(key) {
        Ok(raw) => raw
            .trim()
            .parse::<T>()
            .with_context(|| format!("{key} must be a valid number, got '{raw}'")),
        Err(_) => Ok(default),
    }
}

#[cfg(test)]
impl Config {
    /// Config pointing every upstream at the given base URL (a wiremock server).
    pub fn for_tests(base_url: &str) -> Self {
        Config {
            openai_api_key: "test-openai-key".to_string(),
            google_cse_id: "test-cse".to_string(),
            google_api_key: "test-google-key".to_string(),
            openai_base_url: base_url.to_string(),
            google_search_url: format!("{base_url}/customsearch/v1"),
            wikipedia_api_url: format!("{base_url}/w/api.php"),
            request_timeout: Duration::from_secs(5),
            pipeline_timeout: Duration::from_secs(10),
            port: 0,
            rust_log: "debug".to_string(),
        }
    }
}

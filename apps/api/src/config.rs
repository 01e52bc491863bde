use std::path::PathBuf;
use std::str::FromStr;
use std::time::Duration;

use anyhow::{Context, Result};

use crate::jobs::scraper::ScrapeSettings;

/// Application configuration loaded from environment variables.
/// Every variable has a default; malformed values fail startup.
#[derive(Debug, Clone)]
pub struct Config {
    pub port: u16,
    pub rust_log: String,
    /// W3C WebDriver endpoint (chromedriver, selenium).
    pub webdriver_url: String,
    pub job_search_url: String,
    pub job_location: String,
    pub settle_delay: Duration,
    pub scrape_deadline: Duration,
    pub max_upload_bytes: usize,
    /// Optional JSON skill vocabulary; the built-in list is used when unset.
    pub skill_vocabulary_path: Option<PathBuf>,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing

        Ok(Config {
            port: parse_env("PORT", 5000)?,
            rust_log: std::env::var("RUST_LOG").unwrap_or_else(|_| "info".to_string()),
            webdriver_url: env_or("WEBDRIVER_URL", "http://localhost:9515"),
            job_search_url: env_or("JOB_SEARCH_URL", "https://www.linkedin.com/jobs/search/"),
            job_location: env_or("JOB_LOCATION", "India"),
            settle_delay: Duration::from_millis(parse_env("SCRAPE_SETTLE_MS", 5000)?),
            scrape_deadline: Duration::from_secs(parse_env("SCRAPE_DEADLINE_SECS", 90)?),
            max_upload_bytes: parse_env("MAX_UPLOAD_BYTES", 5 * 1024 * 1024)?,
            skill_vocabulary_path: std::env::var("SKILL_VOCABULARY_PATH")
                .ok()
                .filter(|p| !p.trim().is_empty())
                .map(PathBuf::from),
        })
    }

    pub fn scrape_settings(&self) -> ScrapeSettings {
        ScrapeSettings {
            search_url: self.job_search_url.clone(),
            location: self.job_location.clone(),
            settle_delay: self.settle_delay,
            deadline: self.scrape_deadline,
        }
    }
}

fn env_or(key: &str, default: &str) -> String {
    std::env::var(key).unwrap_or_else(|_| default.to_string())
}

fn parse_env<T>(key: &str, default: T) -> Result<T>
where
    T: FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    match std::env::var(key) {
        Ok(raw) => raw
            .trim()
            .parse::<T>()
            .with_context(|| format!("Environment variable '{key}' has invalid value '{raw}'")),
        Err(_) => Ok(default),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_env_uses_default_when_unset() {
        let value: u64 = parse_env("JOBFINDER_TEST_UNSET_VARIABLE", 42).unwrap();
        assert_eq!(value, 42);
    }

    #[test]
    fn test_parse_env_rejects_garbage() {
        std::env::set_var("JOBFINDER_TEST_BAD_PORT", "eighty");
        let err = parse_env::<u16>("JOBFINDER_TEST_BAD_PORT", 5000).unwrap_err();
        assert!(err.to_string().contains("JOBFINDER_TEST_BAD_PORT"));
    }

    #[test]
    fn test_parse_env_reads_value() {
        std::env::set_var("JOBFINDER_TEST_SETTLE_MS", " 250 ");
        let value: u64 = parse_env("JOBFINDER_TEST_SETTLE_MS", 5000).unwrap();
        assert_eq!(value, 250);
    }
}

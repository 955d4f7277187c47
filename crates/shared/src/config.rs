use anyhow::{Context, Result};
use chrono::Local;
use std::env;
use std::path::PathBuf;
use std::time::Duration;
use url::Url;

pub const DEFAULT_OUTPUT_PATH: &str = "briefing.md";
pub const DEFAULT_MODEL: &str = "gemini-2.5-flash";

/// Hacker News (Algolia search API) settings.
#[derive(Debug, Clone)]
pub struct HackerNewsSettings {
    pub base_url: Url,
    pub query: String,
    pub hits_per_page: u32,
    pub min_points: u64,
    pub max_items: usize,
}

/// GitHub repository search settings.
#[derive(Debug, Clone)]
pub struct GithubSettings {
    pub base_url: Url,
    pub lookback_days: i64,
    pub min_stars: u64,
    pub max_items: usize,
}

/// Bounds for the generation retry loop.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetryPolicy {
    pub max_attempts: u32,
    /// Wait before retry `n` is `n * backoff_step`.
    pub backoff_step: Duration,
}

impl RetryPolicy {
    /// Delay to wait after `failures` consecutive transient failures.
    pub fn backoff(&self, failures: u32) -> Duration {
        self.backoff_step.saturating_mul(failures)
    }
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            max_attempts: 3,
            backoff_step: Duration::from_secs(20),
        }
    }
}

#[derive(Debug, Clone)]
pub struct GenerationSettings {
    pub base_url: Url,
    pub model: String,
    pub request_timeout: Duration,
    pub retry: RetryPolicy,
}

#[derive(Debug, Clone)]
pub struct Config {
    pub gemini_api_key: Option<String>,
    pub github_token: Option<String>,
    pub date: String,
    pub hacker_news: HackerNewsSettings,
    pub github: GithubSettings,
    pub fetch_timeout: Duration,
    pub generation: GenerationSettings,
    pub output_path: PathBuf,
    pub step_summary_path: Option<PathBuf>,
}

impl Config {
    /// Configuration with built-in defaults and no credentials.
    pub fn new(date: impl Into<String>) -> Result<Self> {
        Ok(Self {
            gemini_api_key: None,
            github_token: None,
            date: date.into(),
            hacker_news: HackerNewsSettings {
                base_url: Url::parse("https://hn.algolia.com")
                    .context("Invalid Hacker News base URL")?,
                query: "AI OR LLM OR GPT".to_string(),
                hits_per_page: 30,
                min_points: 20,
                max_items: 10,
            },
            github: GithubSettings {
                base_url: Url::parse("https://api.github.com")
                    .context("Invalid GitHub base URL")?,
                lookback_days: 7,
                min_stars: 20,
                max_items: 10,
            },
            fetch_timeout: Duration::from_secs(10),
            generation: GenerationSettings {
                base_url: Url::parse("https://generativelanguage.googleapis.com")
                    .context("Invalid Gemini base URL")?,
                model: DEFAULT_MODEL.to_string(),
                request_timeout: Duration::from_secs(120),
                retry: RetryPolicy::default(),
            },
            output_path: PathBuf::from(DEFAULT_OUTPUT_PATH),
            step_summary_path: None,
        })
    }

    pub fn from_env() -> Result<Self> {
        // Try to load .env from multiple locations
        Self::try_load_dotenv();

        let today = Local::now().format("%Y-%m-%d").to_string();
        let mut config = Self::new(today)?;

        // A missing Gemini key is reported by the briefing generator, not here
        config.gemini_api_key = non_blank_var("GEMINI_API_KEY");
        config.github_token = non_blank_var("GITHUB_TOKEN");
        config.step_summary_path = non_blank_var("GITHUB_STEP_SUMMARY").map(PathBuf::from);

        if let Some(model) = non_blank_var("GEMINI_MODEL") {
            config.generation.model = model;
        }

        Ok(config)
    }

    fn try_load_dotenv() {
        // 1. Current directory (for development)
        if dotenvy::dotenv().is_ok() {
            return;
        }

        // 2. ~/.config/daily-pulse/.env
        if let Some(config_dir) = dirs::config_dir() {
            let config_path = config_dir.join("daily-pulse").join(".env");
            if config_path.exists() && dotenvy::from_path(&config_path).is_ok() {
                return;
            }
        }

        // 3. ~/.env
        if let Some(home_dir) = dirs::home_dir() {
            let home_path = home_dir.join(".env");
            if home_path.exists() {
                let _ = dotenvy::from_path(&home_path);
            }
        }
    }
}

fn non_blank_var(key: &str) -> Option<String> {
    normalize_secret(env::var(key).ok())
}

/// Trims surrounding whitespace; blank values count as absent.
pub fn normalize_secret(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_documented_thresholds() {
        let config = Config::new("2026-10-17").unwrap();
        assert_eq!(config.hacker_news.min_points, 20);
        assert_eq!(config.hacker_news.max_items, 10);
        assert_eq!(config.github.max_items, 10);
        assert_eq!(config.fetch_timeout, Duration::from_secs(10));
        assert_eq!(config.generation.retry.max_attempts, 3);
        assert_eq!(config.output_path, PathBuf::from("briefing.md"));
        assert!(config.gemini_api_key.is_none());
    }

    #[test]
    fn backoff_grows_linearly() {
        let policy = RetryPolicy::default();
        assert_eq!(policy.backoff(1), Duration::from_secs(20));
        assert_eq!(policy.backoff(2), Duration::from_secs(40));
    }

    #[test]
    fn blank_secrets_are_absent() {
        assert_eq!(normalize_secret(None), None);
        assert_eq!(normalize_secret(Some("   \n".into())), None);
        assert_eq!(
            normalize_secret(Some("  key-123\n".into())),
            Some("key-123".to_string())
        );
    }
}

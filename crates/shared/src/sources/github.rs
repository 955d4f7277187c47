use chrono::{Duration as ChronoDuration, NaiveDate};
use reqwest::Client;
use serde::Deserialize;
use std::time::Duration;
use tracing::{debug, instrument};

use super::{rank, SourceFetcher};
use crate::config::{Config, GithubSettings};
use crate::error::FetchError;
use crate::models::NewsItem;

pub const PLACEHOLDER: &str = "No GitHub data available.";

#[derive(Debug, Deserialize)]
struct Repository {
    full_name: String,
    description: Option<String>,
    #[serde(default)]
    stargazers_count: u64,
    html_url: Option<String>,
}

#[derive(Debug, Deserialize)]
struct SearchResponse {
    items: Vec<Repository>,
}

/// Most-starred recently created repositories, via the GitHub search API.
pub struct GithubTrendingClient {
    client: Client,
    settings: GithubSettings,
    token: Option<String>,
    date: String,
    timeout: Duration,
}

impl GithubTrendingClient {
    pub fn new(config: &Config) -> Result<Self, FetchError> {
        let client = Client::builder()
            .timeout(config.fetch_timeout)
            .user_agent(concat!("daily-pulse/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|e| FetchError::Request(format!("Failed to create HTTP client: {}", e)))?;

        Ok(Self {
            client,
            settings: config.github.clone(),
            token: config.github_token.clone(),
            date: config.date.clone(),
            timeout: config.fetch_timeout,
        })
    }

    fn search_url(&self) -> Result<String, FetchError> {
        let today = NaiveDate::parse_from_str(&self.date, "%Y-%m-%d")
            .map_err(|e| FetchError::Request(format!("Invalid run date {}: {}", self.date, e)))?;
        let since = today - ChronoDuration::days(self.settings.lookback_days);
        let query = format!("created:>{}", since.format("%Y-%m-%d"));

        let endpoint = self
            .settings
            .base_url
            .join("search/repositories")
            .map_err(|e| FetchError::Request(format!("Invalid GitHub URL: {}", e)))?;

        Ok(format!(
            "{}?q={}&sort=stars&order=desc&per_page={}",
            endpoint,
            urlencoding::encode(&query),
            self.settings.max_items.max(1) * 3
        ))
    }
}

impl SourceFetcher for GithubTrendingClient {
    fn name(&self) -> &'static str {
        "GitHub"
    }

    fn placeholder(&self) -> &'static str {
        PLACEHOLDER
    }

    #[instrument(skip(self), fields(authenticated = self.token.is_some()))]
    async fn fetch(&self) -> Result<Vec<NewsItem>, FetchError> {
        let url = self.search_url()?;
        debug!(%url, "Querying GitHub search");

        let mut request = self
            .client
            .get(&url)
            .header("Accept", "application/vnd.github+json");
        if let Some(token) = &self.token {
            request = request.header("Authorization", format!("Bearer {}", token));
        }

        let response = request
            .send()
            .await
            .map_err(|e| FetchError::from_reqwest(e, self.timeout))?;

        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|e| FetchError::from_reqwest(e, self.timeout))?;

        if !status.is_success() {
            return Err(FetchError::Status {
                status: status.as_u16(),
                body,
            });
        }

        let parsed: SearchResponse = serde_json::from_str(&body)
            .map_err(|e| FetchError::Malformed(format!("GitHub response: {}", e)))?;

        let items = parsed.items.into_iter().map(|repo| {
            NewsItem::new(repo.full_name, repo.html_url, repo.stargazers_count)
                .with_description(repo.description.filter(|d| !d.trim().is_empty()))
        });

        Ok(rank(items, self.settings.min_stars, self.settings.max_items))
    }

    fn format_item(&self, item: &NewsItem) -> String {
        format!(
            "- [GitHub] {} ({} stars): {}",
            item.title,
            item.score,
            item.description.as_deref().map(str::trim).unwrap_or("No description")
        )
    }
}

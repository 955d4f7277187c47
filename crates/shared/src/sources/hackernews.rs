use reqwest::Client;
use serde::Deserialize;
use std::time::Duration;
use tracing::{debug, instrument};

use super::{rank, SourceFetcher};
use crate::config::{Config, HackerNewsSettings};
use crate::error::FetchError;
use crate::models::NewsItem;

pub const PLACEHOLDER: &str = "No Hacker News data available.";

#[derive(Debug, Deserialize)]
struct Hit {
    title: Option<String>,
    url: Option<String>,
    #[serde(default)]
    points: Option<u64>,
    #[serde(rename = "objectID")]
    #[allow(dead_code)]
    object_id: Option<String>,
}

#[derive(Debug, Deserialize)]
struct SearchResponse {
    hits: Vec<Hit>,
}

/// Recent AI stories from the Hacker News Algolia search API.
pub struct HackerNewsClient {
    client: Client,
    settings: HackerNewsSettings,
    timeout: Duration,
}

impl HackerNewsClient {
    pub fn new(config: &Config) -> Result<Self, FetchError> {
        let client = Client::builder()
            .timeout(config.fetch_timeout)
            .build()
            .map_err(|e| FetchError::Request(format!("Failed to create HTTP client: {}", e)))?;

        Ok(Self {
            client,
            settings: config.hacker_news.clone(),
            timeout: config.fetch_timeout,
        })
    }

    fn search_url(&self) -> Result<String, FetchError> {
        let endpoint = self
            .settings
            .base_url
            .join("api/v1/search_by_date")
            .map_err(|e| FetchError::Request(format!("Invalid Hacker News URL: {}", e)))?;

        Ok(format!(
            "{}?query={}&tags=story&hitsPerPage={}",
            endpoint,
            urlencoding::encode(&self.settings.query),
            self.settings.hits_per_page
        ))
    }
}

impl SourceFetcher for HackerNewsClient {
    fn name(&self) -> &'static str {
        "Hacker News"
    }

    fn placeholder(&self) -> &'static str {
        PLACEHOLDER
    }

    #[instrument(skip(self), fields(query = %self.settings.query))]
    async fn fetch(&self) -> Result<Vec<NewsItem>, FetchError> {
        let url = self.search_url()?;
        debug!(%url, "Querying Hacker News");

        let response = self
            .client
            .get(&url)
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
            .map_err(|e| FetchError::Malformed(format!("Hacker News response: {}", e)))?;

        // Untitled hits are comments or deleted stories
        let items = parsed.hits.into_iter().filter_map(|hit| {
            let title = hit.title.filter(|t| !t.trim().is_empty())?;
            Some(NewsItem::new(title, hit.url, hit.points.unwrap_or(0)))
        });

        Ok(rank(items, self.settings.min_points, self.settings.max_items))
    }

    fn format_item(&self, item: &NewsItem) -> String {
        format!(
            "- [HN] {} (Link: {})",
            item.title,
            item.link.as_deref().unwrap_or("N/A")
        )
    }
}

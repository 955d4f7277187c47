//! Ranked-item sources that feed the raw digest.
//!
//! Each source fetches a bounded list of [`NewsItem`]s. [`render_section`]
//! turns a source into digest text and never fails: any fetch error is
//! logged and replaced by the source's placeholder line, so one dead
//! upstream only degrades the briefing instead of aborting the run.

pub mod github;
pub mod hackernews;

use tracing::{info, warn};

use crate::error::FetchError;
use crate::models::NewsItem;

pub use github::GithubTrendingClient;
pub use hackernews::HackerNewsClient;

pub trait SourceFetcher {
    /// Short label used in progress and warning logs.
    fn name(&self) -> &'static str;

    /// Text substituted for the section when nothing could be fetched.
    fn placeholder(&self) -> &'static str;

    async fn fetch(&self) -> Result<Vec<NewsItem>, FetchError>;

    fn format_item(&self, item: &NewsItem) -> String;
}

/// Keep items scoring at least `min_score`, in upstream order, capped at `limit`.
pub fn rank(items: impl IntoIterator<Item = NewsItem>, min_score: u64, limit: usize) -> Vec<NewsItem> {
    items
        .into_iter()
        .filter(|item| item.score >= min_score)
        .take(limit)
        .collect()
}

/// Fetch a source and format it as one digest section.
pub async fn render_section<S: SourceFetcher>(source: &S) -> String {
    info!(source = source.name(), "Fetching {}...", source.name());

    match source.fetch().await {
        Ok(items) if items.is_empty() => {
            warn!(source = source.name(), "No items passed the score threshold");
            source.placeholder().to_string()
        }
        Ok(items) => {
            info!(source = source.name(), count = items.len(), "Fetched items");
            items
                .iter()
                .map(|item| source.format_item(item))
                .collect::<Vec<_>>()
                .join("\n")
        }
        Err(e) => {
            warn!(source = source.name(), error = %e, "Fetch failed; using placeholder");
            source.placeholder().to_string()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn scored(title: &str, score: u64) -> NewsItem {
        NewsItem::new(title, None, score)
    }

    #[test]
    fn rank_drops_low_scores_and_keeps_order() {
        let ranked = rank(
            vec![scored("low", 5), scored("mid", 25), scored("high", 60)],
            20,
            10,
        );
        let titles: Vec<_> = ranked.iter().map(|i| i.title.as_str()).collect();
        assert_eq!(titles, vec!["mid", "high"]);
    }

    #[test]
    fn rank_truncates_after_filtering() {
        let items = (0..20).map(|i| scored(&format!("s{}", i), if i % 2 == 0 { 100 } else { 1 }));
        let ranked = rank(items, 20, 3);
        let titles: Vec<_> = ranked.iter().map(|i| i.title.as_str()).collect();
        assert_eq!(titles, vec!["s0", "s2", "s4"]);
    }

    #[test]
    fn threshold_is_inclusive() {
        assert_eq!(rank(vec![scored("edge", 20)], 20, 10).len(), 1);
    }

    struct Scripted {
        result: fn() -> Result<Vec<NewsItem>, FetchError>,
    }

    impl SourceFetcher for Scripted {
        fn name(&self) -> &'static str {
            "Scripted"
        }

        fn placeholder(&self) -> &'static str {
            "No scripted data available."
        }

        async fn fetch(&self) -> Result<Vec<NewsItem>, FetchError> {
            (self.result)()
        }

        fn format_item(&self, item: &NewsItem) -> String {
            format!("- {}", item.title)
        }
    }

    #[tokio::test]
    async fn render_section_formats_one_line_per_item() {
        let source = Scripted {
            result: || Ok(vec![scored("a", 30), scored("b", 40)]),
        };
        assert_eq!(render_section(&source).await, "- a\n- b");
    }

    #[tokio::test]
    async fn render_section_substitutes_placeholder_on_error() {
        let source = Scripted {
            result: || Err(FetchError::Timeout(std::time::Duration::from_secs(10))),
        };
        assert_eq!(render_section(&source).await, "No scripted data available.");
    }

    #[tokio::test]
    async fn render_section_substitutes_placeholder_when_empty() {
        let source = Scripted { result: || Ok(Vec::new()) };
        assert_eq!(render_section(&source).await, "No scripted data available.");
    }
}

use serde::{Deserialize, Serialize};

/// A ranked item from one of the news sources
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewsItem {
    pub title: String,
    pub link: Option<String>,
    pub score: u64,
    /// Repository description; Hacker News stories have none
    pub description: Option<String>,
}

impl NewsItem {
    pub fn new(title: impl Into<String>, link: Option<String>, score: u64) -> Self {
        Self {
            title: title.into(),
            link,
            score,
            description: None,
        }
    }

    pub fn with_description(mut self, description: Option<String>) -> Self {
        self.description = description;
        self
    }
}

// Public modules
pub mod briefing;
pub mod config;
pub mod digest;
pub mod error;
pub mod gemini;
pub mod models;
pub mod pipeline;
pub mod report;
pub mod sources;

// Re-export commonly used types
pub use briefing::{Briefing, BriefingGenerator};
pub use config::{Config, RetryPolicy};
pub use error::{FetchError, GenerationError};
pub use gemini::{GeminiClient, GenerationBackend};
pub use models::NewsItem;
pub use pipeline::{run, RunOptions, RunReport};
pub use report::ReportWriter;
pub use sources::{GithubTrendingClient, HackerNewsClient, SourceFetcher};

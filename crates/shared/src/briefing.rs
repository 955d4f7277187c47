//! Turns the raw digest into a podcast briefing with the generation service.
//!
//! Transient failures (rate limit, quota, overload) are retried with a
//! linearly growing wait. Any other failure ends the loop at once, since
//! retrying a bad key or an unknown model only delays the same error.
//! Every outcome is a [`Briefing`]; nothing here returns `Err`.

use std::time::Instant;
use tokio::time::sleep;
use tracing::{error, info, instrument, warn};

use crate::config::{Config, RetryPolicy};
use crate::gemini::{GeminiClient, GenerationBackend};

pub const CREDENTIAL_MISSING: &str =
    "Briefing unavailable: GEMINI_API_KEY is not set, so no summary could be generated.";

pub const RETRIES_EXHAUSTED: &str =
    "Briefing generation failed after retries: the generation service stayed overloaded or rate limited.";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Briefing {
    Generated(String),
    Failed(String),
}

impl Briefing {
    /// The artifact body, whether generated text or the failure description.
    pub fn text(&self) -> &str {
        match self {
            Briefing::Generated(text) | Briefing::Failed(text) => text,
        }
    }

    pub fn is_generated(&self) -> bool {
        matches!(self, Briefing::Generated(_))
    }
}

pub fn build_prompt(date: &str, digest: &str) -> String {
    format!(
        r#"You are the producer of a technical AI podcast.
Below is today's raw feed of stories from Hacker News and repositories from GitHub for {date}:

{digest}

TASK:
1. Pick the 5-7 most significant stories and tools.
2. Write a "Podcast Briefing" script for the hosts.
3. Organize it into three sections: "Top Headlines", "Deep Dive", and "Quick Hits".
4. Use Markdown headings and keep links next to the items they belong to."#
    )
}

pub struct BriefingGenerator<B> {
    /// `None` when no API key was configured.
    backend: Option<B>,
    date: String,
    retry: RetryPolicy,
}

impl BriefingGenerator<GeminiClient> {
    pub fn from_config(config: &Config) -> Result<Self, crate::error::GenerationError> {
        let backend = match &config.gemini_api_key {
            Some(key) => Some(GeminiClient::new(key.clone(), &config.generation)?),
            None => None,
        };
        Ok(Self::new(
            backend,
            config.date.clone(),
            config.generation.retry,
        ))
    }
}

impl<B: GenerationBackend> BriefingGenerator<B> {
    pub fn new(backend: Option<B>, date: impl Into<String>, retry: RetryPolicy) -> Self {
        Self {
            backend,
            date: date.into(),
            retry,
        }
    }

    #[instrument(skip_all, fields(date = %self.date, digest_chars = digest.len()))]
    pub async fn generate(&self, digest: &str) -> Briefing {
        let Some(backend) = &self.backend else {
            error!("GEMINI_API_KEY is not set; skipping generation");
            return Briefing::Failed(CREDENTIAL_MISSING.to_string());
        };

        let prompt = build_prompt(&self.date, digest);
        let max_attempts = self.retry.max_attempts.max(1);
        let started = Instant::now();

        for attempt in 1..=max_attempts {
            info!(attempt, max = max_attempts, "Requesting briefing");

            match backend.generate(&prompt).await {
                Ok(text) => {
                    info!(
                        attempt,
                        elapsed_ms = started.elapsed().as_millis() as u64,
                        "Briefing generated"
                    );
                    return Briefing::Generated(text);
                }
                Err(e) if e.is_transient() => {
                    if attempt == max_attempts {
                        error!(attempt, error = %e, "Transient failure on final attempt");
                        break;
                    }
                    let delay = self.retry.backoff(attempt);
                    warn!(attempt, ?delay, error = %e, "Transient failure; backing off");
                    sleep(delay).await;
                }
                Err(e) => {
                    error!(attempt, error = %e, "Permanent failure; not retrying");
                    return Briefing::Failed(format!("Briefing generation failed: {}", e));
                }
            }
        }

        Briefing::Failed(RETRIES_EXHAUSTED.to_string())
    }
}

//! One sequential run: fetch both sources, assemble, generate, write.

use std::path::PathBuf;
use tracing::{error, info, warn};

use crate::briefing::{Briefing, BriefingGenerator};
use crate::config::Config;
use crate::digest;
use crate::error::FetchError;
use crate::report::ReportWriter;
use crate::sources::{
    github, hackernews, render_section, GithubTrendingClient, HackerNewsClient, SourceFetcher,
};

#[derive(Debug, Clone, Copy, Default)]
pub struct RunOptions {
    /// Write the raw digest instead of calling the generation service.
    pub dry_run: bool,
}

#[derive(Debug)]
pub struct RunReport {
    pub digest: String,
    pub briefing: Briefing,
    /// Written artifact path, or the formatted write error.
    pub artifact: Result<PathBuf, String>,
}

impl RunReport {
    pub fn succeeded(&self) -> bool {
        self.artifact.is_ok()
    }
}

async fn section<S: SourceFetcher>(client: Result<S, FetchError>, placeholder: &str) -> String {
    match client {
        Ok(source) => render_section(&source).await,
        Err(e) => {
            warn!(error = %e, "Could not build source client; using placeholder");
            placeholder.to_string()
        }
    }
}

pub async fn run(config: &Config, options: RunOptions) -> RunReport {
    let hn_section = section(HackerNewsClient::new(config), hackernews::PLACEHOLDER).await;
    let github_section = section(GithubTrendingClient::new(config), github::PLACEHOLDER).await;

    let digest = digest::assemble(&hn_section, &github_section);
    info!(chars = digest.len(), "Assembled raw digest");

    let briefing = if options.dry_run {
        info!("Dry run; skipping generation");
        Briefing::Generated(digest.clone())
    } else {
        match BriefingGenerator::from_config(config) {
            Ok(generator) => generator.generate(&digest).await,
            Err(e) => {
                error!(error = %e, "Could not build generation client");
                Briefing::Failed(format!("Briefing generation failed: {}", e))
            }
        }
    };

    let writer = ReportWriter::new(&config.output_path, config.step_summary_path.clone());
    let artifact = writer
        .write(briefing.text(), &config.date)
        .map_err(|e| {
            error!(path = %writer.path().display(), error = ?e, "Failed to write briefing artifact");
            format!("{:#}", e)
        });

    RunReport {
        digest,
        briefing,
        artifact,
    }
}

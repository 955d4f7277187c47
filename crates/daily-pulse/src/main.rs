use anyhow::Result;
use clap::Parser;
use shared::{Config, RunOptions};
use std::path::PathBuf;
use std::process::ExitCode;
use tracing::error;
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(name = "daily-pulse")]
#[command(about = "Build a daily AI podcast briefing from Hacker News and GitHub")]
struct Args {
    /// Path of the markdown artifact (overwritten on every run)
    #[arg(short, long, default_value = shared::config::DEFAULT_OUTPUT_PATH)]
    output: PathBuf,

    /// Gemini model identifier
    #[arg(short, long, env = "GEMINI_MODEL")]
    model: Option<String>,

    /// Minimum Hacker News points for a story to be included
    #[arg(long)]
    min_points: Option<u64>,

    /// Minimum stars for a GitHub repository to be included
    #[arg(long)]
    min_stars: Option<u64>,

    /// Maximum items kept from each source
    #[arg(long)]
    max_items: Option<usize>,

    /// Maximum generation attempts before giving up
    #[arg(long)]
    max_attempts: Option<u32>,

    /// Date stamped on the briefing (YYYY-MM-DD, defaults to today)
    #[arg(long, value_parser = parse_date)]
    date: Option<String>,

    /// Skip the model call and write the raw digest instead
    #[arg(long)]
    dry_run: bool,
}

fn parse_date(value: &str) -> Result<String, String> {
    chrono::NaiveDate::parse_from_str(value, "%Y-%m-%d")
        .map(|d| d.format("%Y-%m-%d").to_string())
        .map_err(|e| format!("expected YYYY-MM-DD: {}", e))
}

impl Args {
    fn apply(self, config: &mut Config) -> RunOptions {
        config.output_path = self.output;
        if let Some(model) = self.model {
            config.generation.model = model;
        }
        if let Some(points) = self.min_points {
            config.hacker_news.min_points = points;
        }
        if let Some(stars) = self.min_stars {
            config.github.min_stars = stars;
        }
        if let Some(max) = self.max_items {
            config.hacker_news.max_items = max;
            config.github.max_items = max;
        }
        if let Some(attempts) = self.max_attempts {
            config.generation.retry.max_attempts = attempts;
        }
        if let Some(date) = self.date {
            config.date = date;
        }
        RunOptions {
            dry_run: self.dry_run,
        }
    }
}

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .init();
}

#[tokio::main]
async fn main() -> ExitCode {
    init_tracing();

    match run().await {
        Ok(code) => code,
        Err(e) => {
            error!(error = ?e, "daily-pulse failed");
            ExitCode::FAILURE
        }
    }
}

async fn run() -> Result<ExitCode> {
    let args = Args::parse();
    let mut config = Config::from_env()?;
    let options = args.apply(&mut config);

    println!("\n📰 Building Daily AI Pulse for {}...", config.date);
    let report = shared::run(&config, options).await;

    if !report.briefing.is_generated() {
        println!("\n⚠ {}", report.briefing.text());
    }

    match &report.artifact {
        Ok(path) => {
            println!("\n✅ Briefing saved to: {}", path.display());
            Ok(ExitCode::SUCCESS)
        }
        Err(e) => {
            println!("\n✗ Could not save briefing: {}", e);
            Ok(ExitCode::FAILURE)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_leave_config_untouched() {
        let args = Args::parse_from(["daily-pulse"]);
        let mut config = Config::new("2026-10-17").unwrap();
        let options = args.apply(&mut config);

        assert!(!options.dry_run);
        assert_eq!(config.output_path, PathBuf::from("briefing.md"));
        assert_eq!(config.hacker_news.min_points, 20);
        assert_eq!(config.generation.retry.max_attempts, 3);
    }

    #[test]
    fn flags_override_config() {
        let args = Args::parse_from([
            "daily-pulse",
            "-o",
            "out/pulse.md",
            "--min-points",
            "50",
            "--max-items",
            "3",
            "--max-attempts",
            "5",
            "--date",
            "2026-01-02",
            "--dry-run",
        ]);
        let mut config = Config::new("2026-10-17").unwrap();
        let options = args.apply(&mut config);

        assert!(options.dry_run);
        assert_eq!(config.output_path, PathBuf::from("out/pulse.md"));
        assert_eq!(config.hacker_news.min_points, 50);
        assert_eq!(config.hacker_news.max_items, 3);
        assert_eq!(config.github.max_items, 3);
        assert_eq!(config.generation.retry.max_attempts, 5);
        assert_eq!(config.date, "2026-01-02");
    }

    #[test]
    fn rejects_malformed_date() {
        assert!(Args::try_parse_from(["daily-pulse", "--date", "17/10/2026"]).is_err());
    }
}

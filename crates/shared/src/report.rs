use anyhow::{Context, Result};
use std::fs::{self, OpenOptions};
use std::io::Write;
use std::path::{Path, PathBuf};
use tracing::{info, warn};

/// Writes the briefing to its fixed-name markdown artifact.
pub struct ReportWriter {
    path: PathBuf,
    step_summary: Option<PathBuf>,
}

pub fn render_markdown(text: &str, date: &str) -> String {
    format!("# Daily AI Pulse: {}\n\n{}", date, text)
}

impl ReportWriter {
    pub fn new(path: impl Into<PathBuf>, step_summary: Option<PathBuf>) -> Self {
        Self {
            path: path.into(),
            step_summary,
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Replace the artifact with this run's briefing, then mirror it to the
    /// CI step summary when one is configured.
    pub fn write(&self, text: &str, date: &str) -> Result<PathBuf> {
        let content = render_markdown(text, date);

        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent).with_context(|| {
                format!("Failed to create output directory: {}", parent.display())
            })?;
        }

        fs::write(&self.path, &content)
            .with_context(|| format!("Failed to write briefing file: {}", self.path.display()))?;
        info!(path = %self.path.display(), bytes = content.len(), "Wrote briefing");

        if let Some(summary_path) = &self.step_summary {
            if let Err(e) = Self::append_step_summary(summary_path, &content) {
                warn!(path = %summary_path.display(), error = %e, "Could not append to step summary");
            }
        }

        Ok(self.path.clone())
    }

    fn append_step_summary(path: &Path, content: &str) -> Result<()> {
        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(path)
            .with_context(|| format!("Failed to open step summary: {}", path.display()))?;
        writeln!(file, "{}", content).context("Failed to append step summary")?;
        Ok(())
    }
}

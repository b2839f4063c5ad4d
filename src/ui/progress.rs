use anyhow::{Context, Result};
use indicatif::{ProgressBar, ProgressDrawTarget, ProgressStyle};

use crate::models::FetchOutcome;

const TEMPLATE: &str = "{spinner:.green} {prefix} [{bar:30}] {pos}/{len} {msg}";

/// Progress bar shown on stderr while build dates are fetched.
pub struct FetchProgress {
    bar: ProgressBar,
}

impl FetchProgress {
    pub fn new(total: usize) -> Result<Self> {
        Self::with_draw_target(total, ProgressDrawTarget::stderr())
    }

    pub fn hidden(total: usize) -> Result<Self> {
        Self::with_draw_target(total, ProgressDrawTarget::hidden())
    }

    fn with_draw_target(total: usize, target: ProgressDrawTarget) -> Result<Self> {
        let bar = ProgressBar::with_draw_target(Some(total as u64), target);
        bar.set_style(Self::progress_bar_style()?);
        bar.set_prefix("Checking build dates");
        Ok(Self { bar })
    }

    pub fn progress_bar_style() -> Result<ProgressStyle> {
        ProgressStyle::with_template(TEMPLATE)
            .context("Failed to create progress bar style")
            .map(|style| style.progress_chars("#>-"))
    }

    pub fn record(&self, outcome: &FetchOutcome) {
        self.bar.set_message(outcome.name().to_string());
        self.bar.inc(1);
    }

    #[cfg(test)]
    pub fn position(&self) -> u64 {
        self.bar.position()
    }

    pub fn finish(&self) {
        self.bar.finish_and_clear();
    }
}

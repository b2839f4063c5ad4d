use anyhow::Context;
use chrono::{DateTime, Utc};
use std::sync::Arc;
use tracing::{debug, warn};

use crate::config::AppConfig;
use crate::error::{AppError, Result};
use crate::models::{FetchOutcome, Outcome, PackageInfo};
use crate::services::{
    AgeFilter, BuildDateFetcher, CommandRunner, DefaultCommandRunner, DefaultUpdateExecutor,
    PacmanParser, UpdateExecutor,
};
use crate::ui::{FetchProgress, Prompt, StdinPrompt};

pub const CONFIRMATION_QUESTION: &str = "Do you want to update the packages?";

/// Drives a whole run: list pending upgrades, fetch build dates, filter by
/// age, confirm and update.
pub struct DefaultUpdateCheckService {
    runner: Arc<dyn CommandRunner>,
    fetcher: BuildDateFetcher,
    executor: Box<dyn UpdateExecutor>,
    prompt: Arc<dyn Prompt>,
    pacman_path: String,
    show_progress: bool,
}

impl DefaultUpdateCheckService {
    pub fn from_config(app_config: &dyn AppConfig, show_progress: bool) -> Self {
        let runner: Arc<dyn CommandRunner> = Arc::new(DefaultCommandRunner);
        let executor = DefaultUpdateExecutor::new(runner.clone(), app_config);
        let mut service = Self::new(runner, Box::new(executor), Arc::new(StdinPrompt), app_config);
        service.show_progress = show_progress;
        service
    }

    pub fn new(
        runner: Arc<dyn CommandRunner>,
        executor: Box<dyn UpdateExecutor>,
        prompt: Arc<dyn Prompt>,
        app_config: &dyn AppConfig,
    ) -> Self {
        Self {
            fetcher: BuildDateFetcher::new(runner.clone(), app_config),
            runner,
            executor,
            prompt,
            pacman_path: app_config.get_pacman_path().to_string(),
            show_progress: false,
        }
    }

    /// Names reported by `pacman -Qu`.
    pub async fn list_pending(&self) -> Result<Vec<String>> {
        let listing = match self
            .runner
            .run(&self.pacman_path, &["-Qu".to_string()])
            .await
        {
            Ok(listing) => listing,
            // pacman exits with 1 and prints nothing when there is nothing to upgrade
            Err(err) if err.is_silent_exit(1) => String::new(),
            Err(err) => return Err(AppError::Query(err)),
        };

        Ok(PacmanParser::parse_pending_names(&listing))
    }

    /// Fetches build dates for `names` and keeps the ones older than
    /// `threshold_days`.
    pub async fn find_outdated(
        &self,
        names: &[String],
        threshold_days: u32,
        now: DateTime<Utc>,
    ) -> Result<Vec<String>> {
        let progress = if self.show_progress {
            FetchProgress::new(names.len())?
        } else {
            FetchProgress::hidden(names.len())?
        };

        let outcomes = self
            .fetcher
            .fetch_all(names, |outcome| progress.record(outcome))
            .await;
        progress.finish();

        let infos: Vec<PackageInfo> = outcomes
            .into_iter()
            .filter_map(FetchOutcome::into_info)
            .collect();
        debug!("Fetched build dates for {}/{} packages", infos.len(), names.len());

        for info in infos.iter().filter(|info| info.build_date.is_none()) {
            warn!("Unknown build date for {}, check it manually", info.name);
        }

        Ok(AgeFilter::filter_outdated(&infos, threshold_days, now))
    }

    /// Asks for confirmation on the blocking pool, the prompt reads stdin.
    async fn confirm(&self) -> Result<bool> {
        let prompt = self.prompt.clone();
        tokio::task::spawn_blocking(move || prompt.confirm(CONFIRMATION_QUESTION))
            .await
            .context("Confirmation prompt did not complete")?
            .map_err(AppError::Prompt)
    }

    pub async fn run(&self, threshold_days: u32, now: DateTime<Utc>) -> Result<Outcome> {
        let pending = self.list_pending().await?;
        debug!("{} packages have pending upgrades", pending.len());

        let outdated = if pending.is_empty() {
            Vec::new()
        } else {
            self.find_outdated(&pending, threshold_days, now).await?
        };

        if outdated.is_empty() {
            println!("No updates found.");
            return Ok(Outcome::NothingToDo);
        }

        println!("Packages to be updated:");
        for name in &outdated {
            println!("{}", name);
        }

        if !self.confirm().await? {
            println!("Update cancelled.");
            return Ok(Outcome::Cancelled);
        }

        self.executor
            .update(&outdated)
            .await
            .map_err(AppError::Update)?;

        println!("Packages updated successfully.");
        Ok(Outcome::Updated(outdated))
    }
}

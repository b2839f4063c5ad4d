use futures::StreamExt;
use futures::stream;
use std::collections::HashSet;
use std::sync::Arc;
use std::time::Duration;
use tokio::time::timeout;
use tracing::debug;

use crate::config::AppConfig;
use crate::models::{FetchOutcome, PackageInfo};
use crate::services::{CommandRunner, PacmanParser};

/// Queries `pacman -Si` for many packages at once.
pub struct BuildDateFetcher {
    runner: Arc<dyn CommandRunner>,
    pacman_path: String,
    max_concurrent_queries: usize,
    query_timeout: Duration,
}

impl BuildDateFetcher {
    pub fn new(runner: Arc<dyn CommandRunner>, app_config: &dyn AppConfig) -> Self {
        Self {
            runner,
            pacman_path: app_config.get_pacman_path().to_string(),
            max_concurrent_queries: app_config.get_max_concurrent_queries(),
            query_timeout: app_config.get_query_timeout(),
        }
    }

    /// Fetches the build date of every distinct name.
    ///
    /// At most `max_concurrent_queries` queries run at the same time.
    /// `on_complete` is called as each query finishes, in completion order.
    /// Returns once all queries are done; the result is unordered.
    pub async fn fetch_all<F>(&self, names: &[String], mut on_complete: F) -> Vec<FetchOutcome>
    where
        F: FnMut(&FetchOutcome),
    {
        let mut seen = HashSet::new();
        let unique_names: Vec<String> = names
            .iter()
            .filter(|name| seen.insert(name.as_str()))
            .cloned()
            .collect();

        debug!(
            "Fetching build dates for {} packages ({} at a time)",
            unique_names.len(),
            self.max_concurrent_queries
        );

        let mut outcomes = Vec::with_capacity(unique_names.len());
        let mut pending = stream::iter(unique_names)
            .map(|name| self.fetch_one(name))
            .buffer_unordered(self.max_concurrent_queries);

        while let Some(outcome) = pending.next().await {
            on_complete(&outcome);
            outcomes.push(outcome);
        }

        outcomes
    }

    async fn fetch_one(&self, name: String) -> FetchOutcome {
        let args = vec!["-Si".to_string(), name.clone()];

        let outcome = match timeout(
            self.query_timeout,
            self.runner.run(&self.pacman_path, &args),
        )
        .await
        {
            Ok(Ok(info)) => {
                FetchOutcome::Fetched(PackageInfo::new(name, PacmanParser::parse_build_date(&info)))
            }
            Ok(Err(err)) => FetchOutcome::Skipped {
                name,
                reason: err.to_string(),
            },
            Err(_) => FetchOutcome::Skipped {
                name,
                reason: format!("timed out after {}s", self.query_timeout.as_secs_f64()),
            },
        };

        if let FetchOutcome::Skipped { name, reason } = &outcome {
            debug!("Skipping {}: {}", name, reason);
        }

        outcome
    }
}

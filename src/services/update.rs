use async_trait::async_trait;
use std::sync::Arc;
use tracing::{debug, info};

use crate::config::AppConfig;
use crate::services::{CommandError, CommandRunner};

/// Runs `sudo pacman -Sy <names...>` with the terminal attached.
pub struct DefaultUpdateExecutor {
    runner: Arc<dyn CommandRunner>,
    pacman_path: String,
    elevation_command: Option<String>,
}

impl DefaultUpdateExecutor {
    pub fn new(runner: Arc<dyn CommandRunner>, app_config: &dyn AppConfig) -> Self {
        Self {
            runner,
            pacman_path: app_config.get_pacman_path().to_string(),
            elevation_command: app_config.get_elevation_command().map(str::to_string),
        }
    }

    /// Program and arguments of the update command for `names`.
    pub fn build_command(&self, names: &[String]) -> (String, Vec<String>) {
        let mut args = Vec::with_capacity(names.len() + 2);
        let program = match &self.elevation_command {
            Some(elevation) => {
                args.push(self.pacman_path.clone());
                elevation.clone()
            }
            None => self.pacman_path.clone(),
        };
        args.push("-Sy".to_string());
        args.extend(names.iter().cloned());
        (program, args)
    }
}

#[cfg_attr(test, mockall::automock)]
#[async_trait]
impl UpdateExecutor for DefaultUpdateExecutor {
    async fn update(&self, names: &[String]) -> Result<(), CommandError> {
        if names.is_empty() {
            debug!("Nothing to update");
            return Ok(());
        }

        let (program, args) = self.build_command(names);
        info!("Updating {} packages: {}", names.len(), names.join(", "));
        self.runner.stream(&program, &args).await
    }
}

#[async_trait]
pub trait UpdateExecutor: Send + Sync {
    async fn update(&self, names: &[String]) -> Result<(), CommandError>;
}

use std::time::Duration;

pub const DEFAULT_PACMAN_PATH: &str = "pacman";
pub const DEFAULT_ELEVATION_COMMAND: &str = "sudo";
pub const DEFAULT_MAX_CONCURRENT_QUERIES: usize = 16;
pub const DEFAULT_QUERY_TIMEOUT_SECS: u64 = 30;

/// Application configuration settings
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DefaultAppConfig {
    /// ARCH_UPDATE_PACMAN environment variable
    pacman_path: String,
    /// ARCH_UPDATE_SUDO environment variable, empty disables elevation
    elevation_command: Option<String>,
    /// ARCH_UPDATE_JOBS environment variable
    max_concurrent_queries: usize,
    /// ARCH_UPDATE_TIMEOUT environment variable
    query_timeout: Duration,
}

impl DefaultAppConfig {
    pub fn new(
        pacman_path: Option<String>,
        elevation_command: Option<String>,
        max_concurrent_queries: Option<usize>,
        query_timeout_secs: Option<u64>,
    ) -> DefaultAppConfig {
        let elevation_command = elevation_command
            .unwrap_or(DEFAULT_ELEVATION_COMMAND.to_string())
            .trim()
            .to_string();

        DefaultAppConfig {
            pacman_path: pacman_path.unwrap_or(DEFAULT_PACMAN_PATH.to_string()),
            elevation_command: (!elevation_command.is_empty()).then_some(elevation_command),
            max_concurrent_queries: max_concurrent_queries
                .unwrap_or(DEFAULT_MAX_CONCURRENT_QUERIES)
                .max(1),
            query_timeout: Duration::from_secs(
                query_timeout_secs.unwrap_or(DEFAULT_QUERY_TIMEOUT_SECS),
            ),
        }
    }
}

impl Default for DefaultAppConfig {
    fn default() -> Self {
        DefaultAppConfig::new(None, None, None, None)
    }
}

impl AppConfig for DefaultAppConfig {
    fn get_pacman_path(&self) -> &str {
        &self.pacman_path
    }

    fn get_elevation_command(&self) -> Option<&str> {
        self.elevation_command.as_deref()
    }

    fn get_max_concurrent_queries(&self) -> usize {
        self.max_concurrent_queries
    }

    fn get_query_timeout(&self) -> Duration {
        self.query_timeout
    }
}

pub trait AppConfig: Send + Sync + 'static {
    fn get_pacman_path(&self) -> &str;
    fn get_elevation_command(&self) -> Option<&str>;
    fn get_max_concurrent_queries(&self) -> usize;
    fn get_query_timeout(&self) -> Duration;
}

mod app;

pub use app::{
    AppConfig, DEFAULT_ELEVATION_COMMAND, DEFAULT_MAX_CONCURRENT_QUERIES, DEFAULT_PACMAN_PATH,
    DEFAULT_QUERY_TIMEOUT_SECS, DefaultAppConfig,
};

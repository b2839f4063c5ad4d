use chrono::Utc;
use clap::Parser;
use clap::builder::TypedValueParser;
use clap_verbosity_flag::Verbosity;
use tracing::debug;

use crate::config::{
    DEFAULT_ELEVATION_COMMAND, DEFAULT_MAX_CONCURRENT_QUERIES, DEFAULT_PACMAN_PATH,
    DEFAULT_QUERY_TIMEOUT_SECS, DefaultAppConfig,
};
use crate::error::Result;
use crate::models::Outcome;
use crate::services::DefaultUpdateCheckService;

#[derive(Parser, Debug)]
#[command(
    name = "arch-update",
    about = "Updates pending pacman packages whose build date is older than a number of days",
    version,
    long_about = None
)]
pub struct Cli {
    #[arg(
        value_name = "DAYS",
        help = "Only update packages built more than this many days ago"
    )]
    pub days: u32,

    #[arg(
        short,
        long,
        env = "ARCH_UPDATE_JOBS",
        default_value_t = DEFAULT_MAX_CONCURRENT_QUERIES,
        value_parser = clap::value_parser!(u16).range(1..).map(usize::from),
        help = "Maximum number of package queries to run at once"
    )]
    pub jobs: usize,

    #[arg(
        long = "timeout",
        value_name = "SECS",
        env = "ARCH_UPDATE_TIMEOUT",
        default_value_t = DEFAULT_QUERY_TIMEOUT_SECS,
        help = "Seconds to wait for a single package query"
    )]
    pub timeout_secs: u64,

    #[arg(
        long,
        value_name = "PATH",
        env = "ARCH_UPDATE_PACMAN",
        default_value = DEFAULT_PACMAN_PATH,
        help = "pacman executable"
    )]
    pub pacman: String,

    #[arg(
        long,
        value_name = "PATH",
        env = "ARCH_UPDATE_SUDO",
        default_value = DEFAULT_ELEVATION_COMMAND,
        help = "Command used to gain privileges for the update, empty to run pacman directly"
    )]
    pub sudo: String,

    #[command(flatten)]
    pub verbosity: Verbosity,
}

impl Cli {
    pub fn app_config(&self) -> DefaultAppConfig {
        DefaultAppConfig::new(
            Some(self.pacman.clone()),
            Some(self.sudo.clone()),
            Some(self.jobs),
            Some(self.timeout_secs),
        )
    }
}

pub async fn handle(cli: &Cli) -> Result<Outcome> {
    let app_config = cli.app_config();
    debug!("Running with {:?}", app_config);

    let service = DefaultUpdateCheckService::from_config(&app_config, !cli.verbosity.is_silent());
    service.run(cli.days, Utc::now()).await
}

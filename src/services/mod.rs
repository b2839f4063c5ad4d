mod age_filter;
mod command;
mod fetcher;
mod pacman_parser;
mod update;
mod update_check;

pub use age_filter::AgeFilter;
pub use command::{CommandError, CommandRunner, DefaultCommandRunner};
pub use fetcher::BuildDateFetcher;
pub use pacman_parser::PacmanParser;
pub use update::{DefaultUpdateExecutor, UpdateExecutor};
pub use update_check::DefaultUpdateCheckService;

#[cfg(test)]
pub use command::MockDefaultCommandRunner;
#[cfg(test)]
pub use update::MockDefaultUpdateExecutor;

use thiserror::Error;

use crate::services::CommandError;

#[derive(Error, Debug)]
pub enum AppError {
    #[error("Failed to list pending updates: {0}")]
    Query(#[source] CommandError),

    #[error("Failed to update packages: {0}")]
    Update(#[source] CommandError),

    #[error("Failed to read confirmation: {0}")]
    Prompt(#[source] std::io::Error),

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

pub type Result<T> = std::result::Result<T, AppError>;

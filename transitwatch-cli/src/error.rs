//! CLI error type.

use thiserror::Error;
use transitwatch::service::ServiceError;

/// Errors surfaced to the user by CLI commands.
#[derive(Debug, Error)]
pub enum CliError {
    /// Configuration or argument problem.
    #[error("configuration error: {0}")]
    Config(String),

    /// The transit backend could not be reached or answered garbage.
    #[error(transparent)]
    Service(#[from] ServiceError),

    /// Runtime setup failed.
    #[error("runtime error: {0}")]
    Runtime(String),
}

//! CLI errors.

use forecast_portal_client::ClientError;
use forecast_portal_client::config::ConfigError;
use thiserror::Error;

/// Errors that end a command with a non-zero exit code.
#[derive(Debug, Error)]
pub enum CliError {
    #[error(transparent)]
    Client(#[from] ClientError),

    #[error(transparent)]
    Config(#[from] ConfigError),

    /// A `--field` argument without `=`.
    #[error("Invalid field '{0}': expected NAME=VALUE")]
    InvalidField(String),

    /// The reset link is not a URL.
    #[error("Invalid reset link: {0}")]
    InvalidLink(url::ParseError),

    #[error("Failed to write output: {0}")]
    Output(#[from] std::io::Error),

    /// The server did not accept the submission (already shown).
    #[error("Request was not accepted")]
    NotAccepted,

    #[error("Not logged in")]
    NotLoggedIn,
}

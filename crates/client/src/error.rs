//! Error types for the gateway.

use forecast_portal_core::FormError;
use thiserror::Error;

use crate::config::ConfigError;

/// Errors that can occur while submitting a form through the gateway.
///
/// A non-2xx response is not an error: its `{error}` body is shown to the
/// user. These are the failures that never produced a readable response.
#[derive(Debug, Error)]
pub enum ClientError {
    /// HTTP request failed.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// Response body was not JSON.
    #[error("parse error: {0}")]
    Parse(String),

    /// The stored API key cannot be sent as a header value.
    #[error("invalid header value: {0}")]
    InvalidHeader(String),

    /// Endpoint URL could not be built.
    #[error("invalid URL: {0}")]
    Url(#[from] url::ParseError),

    /// Session persistence failed.
    #[error("session store error: {0}")]
    Store(String),

    /// A bound form field was missing.
    #[error(transparent)]
    Form(#[from] FormError),

    /// Configuration error.
    #[error(transparent)]
    Config(#[from] ConfigError),
}

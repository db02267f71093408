//! Error types for PrettyLink

use thiserror::Error;

/// Errors that can occur while configuring the generator or generating a link
#[derive(Debug, Error)]
pub enum LinkError {
    /// URL is missing
    #[error("Missing required parameter: url")]
    MissingUrl,

    /// URL has invalid scheme
    #[error("Invalid URL: must start with http:// or https://")]
    InvalidUrlScheme,

    /// URL could not be parsed
    #[error("Invalid URL: {0}")]
    InvalidUrl(#[from] url::ParseError),

    /// Domain argument to a registration call is unusable
    #[error("Invalid domain: must not be empty")]
    InvalidDomain,

    /// Template name argument to a registration call is unusable
    #[error("Invalid template name: must not be empty")]
    InvalidTemplateName,

    /// No template registered under the requested name
    #[error("No template registered under name '{0}'")]
    UnknownTemplate(String),

    /// Failed to build HTTP client
    #[error("Failed to create HTTP client")]
    ClientBuildError(#[source] reqwest::Error),

    /// Request timed out waiting for first byte
    #[error("Request timed out: server did not respond in time")]
    FirstByteTimeout,

    /// Failed to connect to server
    #[error("Failed to connect to server")]
    ConnectError(#[source] reqwest::Error),

    /// Other request error
    #[error("Request failed: {0}")]
    RequestError(String),

    /// Server answered, but not with a success status
    #[error("Server answered with HTTP status {0}")]
    HttpStatus(u16),
}

impl LinkError {
    /// Create an error from a reqwest error
    pub fn from_reqwest(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            LinkError::FirstByteTimeout
        } else if err.is_connect() {
            LinkError::ConnectError(err)
        } else {
            LinkError::RequestError(err.to_string())
        }
    }
}

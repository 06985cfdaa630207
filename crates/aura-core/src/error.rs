use aura_api::GitHubError;
use chrono::{DateTime, Utc};
use thiserror::Error;

/// All the ways an aura evaluation can go wrong
///
/// The classifier and scorer themselves never fail; everything here comes
/// from input validation, the data source, or the local environment.
#[derive(Error, Debug)]
pub enum Error {
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("API request failed: {0}")]
    ApiError(String),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Rate limit exceeded{}", reset_hint(.reset_at))]
    RateLimitExceeded { reset_at: Option<DateTime<Utc>> },

    #[error("Authentication failed: {0}")]
    AuthError(String),

    #[error("Configuration error: {0}")]
    ConfigError(String),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),
}

fn reset_hint(reset_at: &Option<DateTime<Utc>>) -> String {
    reset_at
        .as_ref()
        .map(|at| format!(", resets at {}", at.format("%Y-%m-%d %H:%M:%S UTC")))
        .unwrap_or_default()
}

impl From<GitHubError> for Error {
    fn from(err: GitHubError) -> Self {
        match err {
            GitHubError::NotFound(what) => Error::NotFound(what),
            GitHubError::AuthRequired => {
                Error::AuthError("invalid GitHub token or insufficient permissions".to_string())
            }
            GitHubError::RateLimitExceeded { reset_at } => Error::RateLimitExceeded { reset_at },
            other => Error::ApiError(other.to_string()),
        }
    }
}

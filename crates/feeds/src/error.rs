//! Error types for data source operations.

use thiserror::Error;

/// Errors that can occur while talking to the market-data provider.
#[derive(Debug, Error)]
pub enum FeedError {
    #[error("HTTP request failed: {0}")]
    Http(String),

    #[error("Provider returned HTTP {0}")]
    Status(u16),

    #[error("Timeout: {0}")]
    Timeout(String),

    #[error("Failed to parse response: {0}")]
    Parse(String),

    #[error("Failed to build HTTP client: {0}")]
    ClientBuild(String),
}

impl From<reqwest::Error> for FeedError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            FeedError::Timeout(err.to_string())
        } else if err.is_decode() {
            FeedError::Parse(err.to_string())
        } else if let Some(status) = err.status() {
            FeedError::Status(status.as_u16())
        } else {
            FeedError::Http(err.to_string())
        }
    }
}

impl From<serde_json::Error> for FeedError {
    fn from(err: serde_json::Error) -> Self {
        FeedError::Parse(err.to_string())
    }
}

impl FeedError {
    /// Returns true if the next poll cycle is likely to succeed.
    pub fn is_transient(&self) -> bool {
        match self {
            FeedError::Http(_) | FeedError::Timeout(_) => true,
            FeedError::Status(code) => *code == 429 || *code >= 500,
            FeedError::Parse(_) | FeedError::ClientBuild(_) => false,
        }
    }
}

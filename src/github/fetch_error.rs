//! Failure classification for GitHub API requests.

use reqwest::StatusCode;
use thiserror::Error;

/// Errors produced by a single GET against the GitHub API.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FetchError {
    /// The API refused the request because the quota is exhausted.
    ///
    /// Anonymous callers hit this routinely, so callers usually stop early rather than fail.
    #[error("GitHub API rate limit exceeded")]
    RateLimited,

    #[error("GitHub API request failed with HTTP {status}")]
    RequestFailed { status: u16 },

    /// No response was received at all.
    #[error("GitHub API transport error: {0}")]
    Transport(String),

    /// A successful response carried a body of an unexpected shape.
    #[error("unable to decode GitHub API response: {0}")]
    Decode(String),
}

impl FetchError {
    /// Classify a non-success status code.
    ///
    /// Returns `None` for 2xx statuses.
    #[must_use]
    pub fn from_status(status: StatusCode) -> Option<Self> {
        if status.is_success() {
            return None;
        }

        Some(match status.as_u16() {
            403 | 429 => Self::RateLimited,
            status => Self::RequestFailed { status },
        })
    }

    #[must_use]
    pub const fn is_rate_limited(&self) -> bool {
        matches!(self, Self::RateLimited)
    }
}

impl From<serde_json::Error> for FetchError {
    fn from(e: serde_json::Error) -> Self {
        Self::Decode(e.to_string())
    }
}

//! Wire shapes of the GitHub REST API responses this crate consumes.
//!
//! Only the fields actually used are modeled; everything else in the payloads is ignored.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// One page of `GET /search/issues`.
#[derive(Debug, Clone, Deserialize)]
pub struct SearchPage<T> {
    #[serde(default)]
    pub total_count: u64,

    #[serde(default = "Vec::new")]
    pub items: Vec<T>,
}

/// A pull request or issue as returned by the search endpoint.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct SearchIssue {
    pub number: u64,
    pub title: String,
    pub state: String,

    /// API URL of the repository the item lives in, e.g. `https://api.github.com/repos/o/r`.
    pub repository_url: String,

    pub html_url: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,

    /// Present only for pull requests.
    #[serde(default)]
    pub pull_request: Option<PullRequestMarker>,
}

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct PullRequestMarker {
    #[serde(default)]
    pub merged_at: Option<DateTime<Utc>>,
}

/// An entry of `GET /users/{user}/events/public`.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct PublicEvent {
    #[serde(rename = "type")]
    pub event_type: String,
    pub repo: EventRepo,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct EventRepo {
    /// Full name, `owner/name`.
    pub name: String,

    /// API URL of the repository.
    pub url: String,
}

#[derive(Debug, Clone, Deserialize, Serialize, PartialEq, Eq)]
pub struct RepositoryOwner {
    pub login: String,
}

/// Repository metadata, as returned by both `GET /repos/{owner}/{repo}` and the user repository list.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct RepositoryDetail {
    pub id: u64,
    pub name: String,
    pub full_name: String,
    pub html_url: String,
    pub description: Option<String>,
    pub owner: RepositoryOwner,

    #[serde(default)]
    pub stargazers_count: u64,

    #[serde(default)]
    pub forks_count: u64,

    pub language: Option<String>,

    #[serde(default)]
    pub topics: Vec<String>,

    #[serde(default)]
    pub fork: bool,

    #[serde(default)]
    pub private: bool,

    pub updated_at: Option<DateTime<Utc>>,
}

/// `GET /users/{user}`.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct UserProfile {
    pub login: String,
    pub name: Option<String>,
    pub bio: Option<String>,
    pub html_url: Option<String>,
    pub avatar_url: Option<String>,

    #[serde(default)]
    pub public_repos: u64,

    #[serde(default)]
    pub followers: u64,

    #[serde(default)]
    pub following: u64,
}

/// `GET /repos/{owner}/{repo}/languages`: bytes of code per language.
pub type LanguageBytes = BTreeMap<String, u64>;

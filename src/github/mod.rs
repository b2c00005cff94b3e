//! Access to the GitHub REST API.
//!
//! The layer is split along the seams the rest of the crate depends on:
//!
//! - [`JsonFetcher`] is the transport boundary. [`GithubClient`] implements it with `reqwest`,
//!   classifying failures into [`FetchError`] and optionally caching successful responses.
//! - [`paginate`] walks a paginated search query, stopping early on throttling.
//! - [`PacingPolicy`] decides how long to wait between consecutive pages.
//! - [`RepositoryKey`] parses the repository references found in API payloads.

mod client;
mod endpoints;
mod fetch_error;
pub(crate) mod fetcher;
mod pacing;
mod paginator;
mod repo_key;
mod request_tracker;
mod response_cache;
pub mod types;

pub use client::GithubClient;
pub use endpoints::{Endpoints, SearchKind};
pub use fetch_error::FetchError;
pub use fetcher::{JsonFetcher, fetch_as};
pub use pacing::{FixedPause, NoPause, PacingPolicy};
pub use paginator::{PageOutcome, PageQuery, Pagination, paginate, search_items};
pub use repo_key::{ReferenceError, RepositoryKey};
pub use request_tracker::{RequestCategory, RequestCounts, RequestTracker};
pub use response_cache::ResponseCache;

/// Log target for the GitHub API layer
pub(crate) const LOG_TARGET: &str = "github";

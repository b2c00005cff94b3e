//! A user's own public work: profile, repositories, and language statistics.

mod filter;
mod language_stats;
mod profile;
mod repositories;

pub use filter::{RepoSort, RepositoryFilter, available_languages};
pub use language_stats::{
    LanguageShare, LanguageStat, RepositoryTotals, breakdown_or_primary, language_breakdown, language_stats, repository_totals,
};
pub use profile::fetch_user;
pub use repositories::{
    RepositoryListing, RepositoryOptions, example_repositories, fetch_languages, fetch_repositories, fetch_repository,
};

/// Log target for portfolio lookups
pub(crate) const LOG_TARGET: &str = "portfolio";

use super::LOG_TARGET;
use crate::config::Config;
use crate::github::types::{LanguageBytes, RepositoryDetail, RepositoryOwner};
use crate::github::{Endpoints, FetchError, JsonFetcher, fetch_as};
use chrono::{Duration as ChronoDuration, Utc};

/// Query parameters of the owned repository listing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RepositoryOptions {
    pub sort: String,
    pub per_page: u32,
    pub repo_type: String,
}

impl Default for RepositoryOptions {
    fn default() -> Self {
        Self {
            sort: "updated".to_string(),
            per_page: 12,
            repo_type: "owner".to_string(),
        }
    }
}

impl From<&Config> for RepositoryOptions {
    fn from(config: &Config) -> Self {
        Self {
            sort: config.repos_sort.clone(),
            per_page: config.repos_per_page,
            repo_type: config.repos_type.clone(),
        }
    }
}

/// The repositories shown for a user.
#[derive(Debug, Clone)]
pub struct RepositoryListing {
    pub repositories: Vec<RepositoryDetail>,

    /// Whether `repositories` holds sample data because the live list was unavailable.
    pub is_example: bool,
}

/// List the public, non-fork repositories owned by `username`.
///
/// An empty result or a throttled request yields the sample listing instead. Other failures are
/// returned to the caller.
pub async fn fetch_repositories<F>(
    fetcher: &F,
    endpoints: &Endpoints,
    username: &str,
    options: &RepositoryOptions,
) -> Result<RepositoryListing, FetchError>
where
    F: JsonFetcher + ?Sized,
{
    let url = endpoints.user_repositories(username, &options.sort, options.per_page, &options.repo_type);

    let repositories = match fetch_as::<Vec<RepositoryDetail>, _>(fetcher, &url).await {
        Ok(repositories) => repositories,
        Err(FetchError::RateLimited) => {
            log::warn!(target: LOG_TARGET, "Rate limit reached while listing repositories of '{username}', showing sample repositories");
            return Ok(example_listing(username));
        }
        Err(e) => return Err(e),
    };

    let total = repositories.len();
    let repositories: Vec<_> = repositories
        .into_iter()
        .filter(|repo| !repo.private && !repo.fork && repo.owner.login.eq_ignore_ascii_case(username))
        .collect();
    log::debug!(target: LOG_TARGET, "Kept {} of {total} repositories of '{username}'", repositories.len());

    if repositories.is_empty() {
        log::info!(target: LOG_TARGET, "No public repositories found for '{username}', showing sample repositories");
        return Ok(example_listing(username));
    }

    Ok(RepositoryListing {
        repositories,
        is_example: false,
    })
}

/// Fetch the details of a single repository.
pub async fn fetch_repository<F>(fetcher: &F, endpoints: &Endpoints, owner: &str, name: &str) -> Result<RepositoryDetail, FetchError>
where
    F: JsonFetcher + ?Sized,
{
    fetch_as(fetcher, &endpoints.repository(owner, name)).await
}

/// Fetch the bytes of code per language in a repository.
pub async fn fetch_languages<F>(fetcher: &F, endpoints: &Endpoints, owner: &str, name: &str) -> Result<LanguageBytes, FetchError>
where
    F: JsonFetcher + ?Sized,
{
    fetch_as(fetcher, &endpoints.repository_languages(owner, name)).await
}

fn example_listing(username: &str) -> RepositoryListing {
    RepositoryListing {
        repositories: example_repositories(username),
        is_example: true,
    }
}

/// Sample repositories attributed to `username`, most recently updated first.
#[must_use]
pub fn example_repositories(username: &str) -> Vec<RepositoryDetail> {
    let samples = [
        ("portfolio-website", "Personal portfolio built with HTML, CSS, and JavaScript", "JavaScript", 5),
        ("react-todo-app", "Task manager built with React and TypeScript", "TypeScript", 12),
        ("python-data-analysis", "Data analysis scripts using Python and Pandas", "Python", 8),
        ("node-api-rest", "REST API built with Node.js and Express", "JavaScript", 15),
    ];

    let now = Utc::now();
    samples
        .into_iter()
        .zip(0_i64..)
        .map(|((name, description, language, stars), age_days)| RepositoryDetail {
            id: 0,
            name: name.to_string(),
            full_name: format!("{username}/{name}"),
            html_url: format!("https://github.com/{username}/{name}"),
            description: Some(description.to_string()),
            owner: RepositoryOwner {
                login: username.to_string(),
            },
            stargazers_count: stars,
            forks_count: 0,
            language: Some(language.to_string()),
            topics: Vec::new(),
            fork: false,
            private: false,
            updated_at: Some(now - ChronoDuration::days(age_days)),
        })
        .collect()
}

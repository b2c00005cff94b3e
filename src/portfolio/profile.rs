use super::LOG_TARGET;
use crate::github::types::UserProfile;
use crate::github::{Endpoints, FetchError, JsonFetcher, fetch_as};

/// Look up the public profile of `username`.
pub async fn fetch_user<F>(fetcher: &F, endpoints: &Endpoints, username: &str) -> Result<UserProfile, FetchError>
where
    F: JsonFetcher + ?Sized,
{
    log::debug!(target: LOG_TARGET, "Fetching the profile of '{username}'");
    fetch_as(fetcher, &endpoints.user(username)).await
}

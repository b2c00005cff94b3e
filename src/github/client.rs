use super::request_tracker::{RequestCategory, RequestTracker};
use super::response_cache::ResponseCache;
use super::{FetchError, JsonFetcher, LOG_TARGET};
use crate::config::Config;
use anyhow::Context;
use async_trait::async_trait;
use chrono::DateTime;
use reqwest::header::{ACCEPT, AUTHORIZATION, HeaderMap, HeaderValue};
use serde_json::Value;
use url::Url;

/// Below this many remaining requests, every response logs a quota warning.
const LOW_QUOTA_THRESHOLD: u64 = 10;

/// HTTP client for the GitHub REST API.
///
/// Performs plain GETs, classifies failures into [`FetchError`], and never retries.
#[derive(Debug)]
pub struct GithubClient {
    http: reqwest::Client,
    cache: Option<ResponseCache>,
    tracker: RequestTracker,
}

impl GithubClient {
    /// Build a client from configuration.
    ///
    /// `token` is optional; anonymous access works but has a much smaller quota.
    pub fn new(config: &Config, token: Option<&str>, tracker: RequestTracker) -> anyhow::Result<Self> {
        let mut headers = HeaderMap::new();
        let _ = headers.insert(ACCEPT, HeaderValue::from_static("application/vnd.github+json"));

        if let Some(token) = token.filter(|t| !t.is_empty()) {
            let mut value = HeaderValue::from_str(&format!("Bearer {token}")).context("formatting the GitHub token header")?;
            value.set_sensitive(true);
            let _ = headers.insert(AUTHORIZATION, value);
        }

        let http = reqwest::Client::builder()
            .user_agent(config.user_agent.as_str())
            .timeout(config.request_timeout)
            .default_headers(headers)
            .build()
            .context("creating the HTTP client")?;

        let cache = (!config.cache_ttl.is_zero()).then(|| ResponseCache::new(config.cache_ttl));

        Ok(Self { http, cache, tracker })
    }

    #[must_use]
    pub const fn tracker(&self) -> &RequestTracker {
        &self.tracker
    }

    /// Drop every cached response.
    pub fn clear_cache(&self) {
        if let Some(cache) = &self.cache {
            cache.clear();
        }
    }

    async fn fetch_uncached(&self, url: &Url) -> Result<Value, FetchError> {
        log::debug!(target: LOG_TARGET, "GET {url}");

        let response = self
            .http
            .get(url.clone())
            .send()
            .await
            .map_err(|e| FetchError::Transport(e.to_string()))?;

        warn_if_quota_low(response.headers());

        let status = response.status();
        if let Some(err) = FetchError::from_status(status) {
            log::debug!(target: LOG_TARGET, "GET {url} returned HTTP {}", status.as_u16());
            return Err(err);
        }

        let bytes = response.bytes().await.map_err(|e| FetchError::Transport(e.to_string()))?;
        Ok(serde_json::from_slice(&bytes)?)
    }
}

#[async_trait]
impl JsonFetcher for GithubClient {
    async fn fetch_json(&self, url: &Url) -> Result<Value, FetchError> {
        if let Some(cache) = &self.cache
            && let Some(value) = cache.get(url.as_str())
        {
            log::debug!(target: LOG_TARGET, "Serving '{url}' from the response cache");
            return Ok(value);
        }

        let category = RequestCategory::of(url);
        self.tracker.add_request(category);
        let result = self.fetch_uncached(url).await;
        self.tracker.complete_request(category);

        if let (Some(cache), Ok(value)) = (&self.cache, &result) {
            cache.insert(url.as_str(), value.clone());
        }

        result
    }
}

/// Log a warning when the `X-RateLimit-Remaining` header reports an almost exhausted quota.
fn warn_if_quota_low(headers: &HeaderMap) {
    let Some(remaining) = header_u64(headers, "x-ratelimit-remaining") else {
        return;
    };

    if remaining >= LOW_QUOTA_THRESHOLD {
        return;
    }

    let reset = header_u64(headers, "x-ratelimit-reset")
        .and_then(|secs| i64::try_from(secs).ok())
        .and_then(|secs| DateTime::from_timestamp(secs, 0));

    match reset {
        Some(reset) => log::warn!(
            target: LOG_TARGET,
            "Only {remaining} GitHub API request(s) left; the quota resets at {}",
            reset.format("%Y-%m-%d %H:%M:%S UTC")
        ),
        None => log::warn!(target: LOG_TARGET, "Only {remaining} GitHub API request(s) left"),
    }
}

fn header_u64(headers: &HeaderMap, name: &str) -> Option<u64> {
    headers.get(name)?.to_str().ok()?.trim().parse().ok()
}

use super::types::SearchPage;
use super::{FetchError, JsonFetcher, LOG_TARGET, PacingPolicy};
use core::fmt;
use serde::de::DeserializeOwned;
use serde_json::Value;
use url::Url;

/// Describes one logical paginated query.
pub struct PageQuery<'a, T> {
    /// Human-readable name used in log messages, e.g. "pull requests".
    pub label: &'a str,

    /// Items requested per page. A shorter page marks the end of the results.
    pub per_page: u32,

    /// Hard upper bound on the number of pages fetched.
    pub page_cap: u32,

    /// Builds the URL for a 1-based page number.
    pub url_for_page: &'a (dyn Fn(u32) -> Url + Send + Sync),

    /// Pulls the result items out of a page body.
    pub extract: fn(Value) -> Result<Vec<T>, FetchError>,
}

impl<T> fmt::Debug for PageQuery<'_, T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PageQuery")
            .field("label", &self.label)
            .field("per_page", &self.per_page)
            .field("page_cap", &self.page_cap)
            .finish_non_exhaustive()
    }
}

/// Extract `items[]` from a search response.
pub fn search_items<T: DeserializeOwned>(value: Value) -> Result<Vec<T>, FetchError> {
    Ok(serde_json::from_value::<SearchPage<T>>(value)?.items)
}

/// Why pagination stopped.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PageOutcome {
    /// A page came back empty.
    Exhausted,

    /// A page came back shorter than requested.
    LastPage,

    /// The page cap was reached.
    PageCap,

    /// The API signaled throttling; items gathered so far are kept.
    RateLimited,

    /// Any other failure.
    Failed(FetchError),
}

/// Accumulated items of a paginated query together with how it ended.
#[derive(Debug)]
pub struct Pagination<T> {
    pub items: Vec<T>,
    pub outcome: PageOutcome,
    pub pages_fetched: u32,
}

impl<T> Pagination<T> {
    /// Items to hand to the next stage.
    ///
    /// Throttling keeps the partial result; any other failure yields nothing, so one broken
    /// source cannot poison the merge with half a result set.
    #[must_use]
    pub fn into_items(self, label: &str) -> Vec<T> {
        match self.outcome {
            PageOutcome::Failed(e) => {
                log::warn!(target: LOG_TARGET, "Unable to fetch {label}, continuing without them: {e}");
                Vec::new()
            }
            _ => self.items,
        }
    }
}

/// Fetch every page of `query`, stopping on exhaustion, a short page, the page cap, or throttling.
pub async fn paginate<T, F, P>(fetcher: &F, pacing: &P, query: &PageQuery<'_, T>) -> Pagination<T>
where
    F: JsonFetcher + ?Sized,
    P: PacingPolicy + ?Sized,
{
    let mut items = Vec::new();
    let mut pages_fetched = 0u32;
    let per_page = usize::try_from(query.per_page).unwrap_or(usize::MAX);

    for page in 1..=query.page_cap {
        let delay = pacing.delay_before(pages_fetched);
        if !delay.is_zero() {
            tokio::time::sleep(delay).await;
        }

        log::debug!(target: LOG_TARGET, "Fetching {} page {page}", query.label);
        let url = (query.url_for_page)(page);
        pages_fetched += 1;

        let page_items = match fetcher.fetch_json(&url).await.and_then(query.extract) {
            Ok(page_items) => page_items,
            Err(FetchError::RateLimited) => {
                log::warn!(
                    target: LOG_TARGET,
                    "Rate limit reached while fetching {} page {page}, keeping {} item(s) gathered so far",
                    query.label,
                    items.len()
                );
                return Pagination { items, outcome: PageOutcome::RateLimited, pages_fetched };
            }
            Err(e) => return Pagination { items, outcome: PageOutcome::Failed(e), pages_fetched },
        };

        if page_items.is_empty() {
            return Pagination { items, outcome: PageOutcome::Exhausted, pages_fetched };
        }

        let count = page_items.len();
        items.extend(page_items);

        if count < per_page {
            return Pagination { items, outcome: PageOutcome::LastPage, pages_fetched };
        }
    }

    log::debug!(target: LOG_TARGET, "Stopped fetching {} at the cap of {} page(s)", query.label, query.page_cap);
    Pagination { items, outcome: PageOutcome::PageCap, pages_fetched }
}

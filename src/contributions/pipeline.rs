use super::{AggregateOptions, EnrichError, EnrichedContributionRecord, LOG_TARGET, aggregate, enrich, example_contributions};
use crate::config::Config;
use crate::github::types::{PublicEvent, SearchIssue};
use crate::github::{Endpoints, FetchError, JsonFetcher, PacingPolicy, PageQuery, SearchKind, fetch_as, paginate, search_items};
use serde::Serialize;

/// Parameters of one contribution run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ContributionSettings {
    pub search_per_page: u32,
    pub pull_request_page_cap: u32,
    pub issue_page_cap: u32,
    pub events_per_page: u32,
    pub aggregate: AggregateOptions,
}

impl From<&Config> for ContributionSettings {
    fn from(config: &Config) -> Self {
        Self {
            search_per_page: config.search_per_page,
            pull_request_page_cap: config.pull_request_page_cap,
            issue_page_cap: config.issue_page_cap,
            events_per_page: config.events_per_page,
            aggregate: AggregateOptions {
                cap: config.contribution_cap,
                include_other_events: config.include_other_events,
            },
        }
    }
}

/// Raw item counts per source, before aggregation.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct SourceCounts {
    pub pull_requests: usize,
    pub issues: usize,
    pub events: usize,
}

/// Result of [`collect_contributions`].
#[derive(Debug)]
pub struct ContributionReport {
    pub username: String,

    /// Ranked, enriched records; the example dataset when `is_example` is set.
    pub records: Vec<EnrichedContributionRecord>,

    pub source_counts: SourceCounts,

    /// Repositories found by aggregation, before enrichment.
    pub repositories_discovered: usize,

    /// Records dropped because their details could not be fetched.
    pub failures: Vec<EnrichError>,

    /// Whether `records` holds the fixed example dataset instead of live data.
    pub is_example: bool,
}

impl ContributionReport {
    /// Contributions summed over every reported repository.
    #[must_use]
    pub fn total_contributions(&self) -> usize {
        self.records.iter().map(|r| r.summary.total_contributions).sum()
    }
}

/// Fetch, merge, rank, cap, and enrich the contributions `username` made to other people's
/// repositories.
///
/// Sources are fetched one after the other: pull requests, issues, then public events. A source
/// that fails contributes nothing; throttling keeps whatever was fetched before it. When nothing
/// survives, the example dataset is returned instead.
pub async fn collect_contributions<F, P>(
    fetcher: &F,
    endpoints: &Endpoints,
    pacing: &P,
    settings: &ContributionSettings,
    username: &str,
) -> ContributionReport
where
    F: JsonFetcher + ?Sized,
    P: PacingPolicy + ?Sized,
{
    log::info!(target: LOG_TARGET, "Collecting contributions of '{username}'");

    let pull_requests = search(fetcher, endpoints, pacing, settings, username, SearchKind::PullRequest).await;
    let issues = search(fetcher, endpoints, pacing, settings, username, SearchKind::Issue).await;
    let events = public_events(fetcher, endpoints, settings, username).await;

    let source_counts = SourceCounts {
        pull_requests: pull_requests.len(),
        issues: issues.len(),
        events: events.len(),
    };
    log::debug!(target: LOG_TARGET, "Fetched {source_counts:?}");

    let records = aggregate(&pull_requests, &issues, &events, username, settings.aggregate);
    let repositories_discovered = records.len();

    let outcome = enrich(fetcher, records).await;
    let is_example = outcome.enriched.is_empty();
    let records = if is_example {
        log::info!(target: LOG_TARGET, "No contributions found for '{username}', showing example data");
        example_contributions()
    } else {
        outcome.enriched
    };

    ContributionReport {
        username: username.to_string(),
        records,
        source_counts,
        repositories_discovered,
        failures: outcome.failures,
        is_example,
    }
}

async fn search<F, P>(
    fetcher: &F,
    endpoints: &Endpoints,
    pacing: &P,
    settings: &ContributionSettings,
    username: &str,
    kind: SearchKind,
) -> Vec<SearchIssue>
where
    F: JsonFetcher + ?Sized,
    P: PacingPolicy + ?Sized,
{
    let (label, page_cap) = match kind {
        SearchKind::PullRequest => ("pull requests", settings.pull_request_page_cap),
        SearchKind::Issue => ("issues", settings.issue_page_cap),
    };

    let per_page = settings.search_per_page;
    let url_for_page = |page| endpoints.search_issues(username, kind, per_page, page);
    let query = PageQuery {
        label,
        per_page,
        page_cap,
        url_for_page: &url_for_page,
        extract: search_items::<SearchIssue>,
    };

    paginate(fetcher, pacing, &query).await.into_items(label)
}

async fn public_events<F>(fetcher: &F, endpoints: &Endpoints, settings: &ContributionSettings, username: &str) -> Vec<PublicEvent>
where
    F: JsonFetcher + ?Sized,
{
    let url = endpoints.public_events(username, settings.events_per_page);
    match fetch_as::<Vec<PublicEvent>, _>(fetcher, &url).await {
        Ok(events) => events,
        Err(FetchError::RateLimited) => {
            log::warn!(target: LOG_TARGET, "Rate limit reached while fetching public events, continuing without them");
            Vec::new()
        }
        Err(e) => {
            log::warn!(target: LOG_TARGET, "Unable to fetch public events, continuing without them: {e}");
            Vec::new()
        }
    }
}

use super::{ContributionItem, ContributionKind, LOG_TARGET, RepositoryContributionRecord};
use crate::github::types::RepositoryDetail;
use crate::github::{FetchError, JsonFetcher, RepositoryKey, fetch_as};
use chrono::{DateTime, Utc};
use futures::future::join_all;
use serde::Serialize;
use thiserror::Error;

/// Condensed view of the contributions made to one repository.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ContributionSummary {
    pub total_contributions: usize,

    /// Distinct kinds, in the order they were first seen.
    pub kinds: Vec<ContributionKind>,

    pub last_activity: DateTime<Utc>,
    pub items: Vec<ContributionItem>,
}

impl ContributionSummary {
    #[must_use]
    pub fn new(items: Vec<ContributionItem>, last_activity: DateTime<Utc>) -> Self {
        let mut kinds = Vec::new();
        for item in &items {
            if !kinds.contains(&item.kind) {
                kinds.push(item.kind);
            }
        }

        Self {
            total_contributions: items.len(),
            kinds,
            last_activity,
            items,
        }
    }

    #[must_use]
    pub fn pull_requests(&self) -> usize {
        self.count(ContributionKind::PullRequest)
    }

    #[must_use]
    pub fn issues(&self) -> usize {
        self.count(ContributionKind::Issue)
    }

    /// Everything that is neither a pull request nor an issue.
    #[must_use]
    pub fn other(&self) -> usize {
        self.total_contributions - self.pull_requests() - self.issues()
    }

    fn count(&self, kind: ContributionKind) -> usize {
        self.items.iter().filter(|i| i.kind == kind).count()
    }
}

impl From<RepositoryContributionRecord> for ContributionSummary {
    fn from(record: RepositoryContributionRecord) -> Self {
        Self::new(record.items, record.last_activity)
    }
}

/// A contribution record decorated with the repository's metadata.
#[derive(Debug, Clone, Serialize)]
pub struct EnrichedContributionRecord {
    pub repository: RepositoryDetail,
    pub summary: ContributionSummary,
}

/// Repository details could not be fetched for one record.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unable to fetch details of repository '{key}'")]
pub struct EnrichError {
    pub key: RepositoryKey,

    #[source]
    pub source: FetchError,
}

/// Successes in input order, plus the records that could not be enriched.
#[derive(Debug, Default)]
pub struct EnrichmentOutcome {
    pub enriched: Vec<EnrichedContributionRecord>,
    pub failures: Vec<EnrichError>,
}

/// Fetch repository details for every record concurrently.
///
/// A failed fetch drops only its own record; the rest are returned in their original order.
pub async fn enrich<F>(fetcher: &F, records: Vec<RepositoryContributionRecord>) -> EnrichmentOutcome
where
    F: JsonFetcher + ?Sized,
{
    let results = join_all(records.into_iter().map(|record| enrich_one(fetcher, record))).await;

    let (enriched, failures): (Vec<_>, Vec<_>) = results.into_iter().partition(Result::is_ok);
    let enriched: Vec<_> = enriched.into_iter().filter_map(Result::ok).collect();
    let failures: Vec<_> = failures.into_iter().filter_map(Result::err).collect();

    for failure in &failures {
        log::warn!(target: LOG_TARGET, "{failure}: {}", failure.source);
    }

    EnrichmentOutcome { enriched, failures }
}

async fn enrich_one<F>(fetcher: &F, record: RepositoryContributionRecord) -> Result<EnrichedContributionRecord, EnrichError>
where
    F: JsonFetcher + ?Sized,
{
    match fetch_as::<RepositoryDetail, _>(fetcher, &record.metadata_url).await {
        Ok(repository) => Ok(EnrichedContributionRecord {
            repository,
            summary: record.into(),
        }),
        Err(source) => Err(EnrichError { key: record.key, source }),
    }
}

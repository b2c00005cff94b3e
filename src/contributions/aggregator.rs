use super::{ContributionItem, ContributionKind, LOG_TARGET, RepositoryContributionRecord};
use crate::github::types::{PublicEvent, SearchIssue};
use crate::github::{ReferenceError, RepositoryKey};
use std::collections::HashMap;
use url::Url;

/// Knobs for [`aggregate`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AggregateOptions {
    /// Maximum number of records returned.
    pub cap: usize,

    /// Keep events whose type is not a recognized contribution type.
    pub include_other_events: bool,
}

impl Default for AggregateOptions {
    fn default() -> Self {
        Self {
            cap: 30,
            include_other_events: false,
        }
    }
}

/// Records keyed by repository, kept in first-seen order.
#[derive(Debug, Default)]
struct RecordSet {
    records: Vec<RepositoryContributionRecord>,
    index: HashMap<RepositoryKey, usize>,
}

impl RecordSet {
    fn add(&mut self, key: RepositoryKey, metadata_url: Url, item: ContributionItem) {
        if let Some(&i) = self.index.get(&key) {
            self.records[i].push(item);
            return;
        }

        let _ = self.index.insert(key.clone(), self.records.len());
        self.records.push(RepositoryContributionRecord::new(key, metadata_url, item));
    }
}

/// Merge pull requests, issues, and events of `subject` into per-repository records.
///
/// Sources are consumed in that fixed order. Items in repositories owned by `subject` are
/// dropped, as are items whose repository reference cannot be parsed. The result is sorted by
/// most recent activity, ties keeping first-seen order, and truncated to `options.cap`.
#[must_use]
pub fn aggregate(
    pull_requests: &[SearchIssue],
    issues: &[SearchIssue],
    events: &[PublicEvent],
    subject: &str,
    options: AggregateOptions,
) -> Vec<RepositoryContributionRecord> {
    let mut set = RecordSet::default();

    let searched = pull_requests
        .iter()
        .map(|pr| (ContributionKind::PullRequest, pr))
        .chain(issues.iter().map(|issue| (ContributionKind::Issue, issue)));

    for (kind, issue) in searched {
        match search_reference(issue) {
            Ok((key, url)) if !key.is_owned_by(subject) => set.add(key, url, ContributionItem::from_search_issue(kind, issue)),
            Ok(_) => {}
            Err(e) => log::debug!(target: LOG_TARGET, "Skipping {kind} #{}: {e}", issue.number),
        }
    }

    let kept_events = events
        .iter()
        .filter(|event| options.include_other_events || ContributionKind::is_contribution_event(&event.event_type));

    for event in kept_events {
        match event_reference(event) {
            Ok((key, url)) if !key.is_owned_by(subject) => set.add(key, url, ContributionItem::from_event(event)),
            Ok(_) => {}
            Err(e) => log::debug!(target: LOG_TARGET, "Skipping {} event: {e}", event.event_type),
        }
    }

    let mut records = set.records;
    records.sort_by(|a, b| b.last_activity.cmp(&a.last_activity));
    records.truncate(options.cap);
    records
}

fn search_reference(issue: &SearchIssue) -> Result<(RepositoryKey, Url), ReferenceError> {
    let url = Url::parse(&issue.repository_url).map_err(|_| ReferenceError::MalformedReference(issue.repository_url.clone()))?;
    let key = RepositoryKey::from_api_url(&url)?;
    Ok((key, url))
}

fn event_reference(event: &PublicEvent) -> Result<(RepositoryKey, Url), ReferenceError> {
    let key: RepositoryKey = event.repo.name.parse()?;
    let url = Url::parse(&event.repo.url).map_err(|_| ReferenceError::MalformedReference(event.repo.url.clone()))?;
    Ok((key, url))
}

use super::ContributionItem;
use crate::github::RepositoryKey;
use chrono::{DateTime, Utc};
use serde::Serialize;
use url::Url;

/// Everything the subject user did in one foreign repository.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RepositoryContributionRecord {
    pub key: RepositoryKey,

    /// Where repository details are fetched from, set by the first source that saw the repository.
    pub metadata_url: Url,

    /// Pull requests first, then issues, then events, each in source order.
    pub items: Vec<ContributionItem>,

    /// Most recent activity timestamp among `items`.
    pub last_activity: DateTime<Utc>,
}

impl RepositoryContributionRecord {
    pub(crate) fn new(key: RepositoryKey, metadata_url: Url, first: ContributionItem) -> Self {
        Self {
            key,
            metadata_url,
            last_activity: first.timestamp,
            items: vec![first],
        }
    }

    pub(crate) fn push(&mut self, item: ContributionItem) {
        if item.timestamp > self.last_activity {
            self.last_activity = item.timestamp;
        }
        self.items.push(item);
    }
}

use crate::github::types::{PublicEvent, SearchIssue};
use chrono::{DateTime, Utc};
use serde::Serialize;
use strum::{Display, EnumIter};

/// Event types counted as contributions when other events are not kept.
const CONTRIBUTION_EVENT_TYPES: [&str; 6] = [
    "PushEvent",
    "PullRequestEvent",
    "IssuesEvent",
    "CreateEvent",
    "ForkEvent",
    "WatchEvent",
];

/// The kind of action a contribution records.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Display, EnumIter)]
pub enum ContributionKind {
    PullRequest,
    Issue,
    Push,
    Create,
    Fork,
    Watch,
    Other,
}

impl ContributionKind {
    /// Map a GitHub event type name such as `PushEvent` onto a kind.
    ///
    /// Unrecognized names map to [`ContributionKind::Other`].
    #[must_use]
    pub fn from_event_type(event_type: &str) -> Self {
        match event_type {
            "PullRequestEvent" => Self::PullRequest,
            "IssuesEvent" => Self::Issue,
            "PushEvent" => Self::Push,
            "CreateEvent" => Self::Create,
            "ForkEvent" => Self::Fork,
            "WatchEvent" => Self::Watch,
            _ => Self::Other,
        }
    }

    /// Whether `event_type` is one of the event types treated as a contribution.
    #[must_use]
    pub fn is_contribution_event(event_type: &str) -> bool {
        CONTRIBUTION_EVENT_TYPES.contains(&event_type)
    }
}

/// Lifecycle state of a pull request or issue.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Display)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum ItemState {
    Open,
    Closed,
    Merged,
}

impl ItemState {
    fn of(issue: &SearchIssue) -> Option<Self> {
        if issue.pull_request.as_ref().is_some_and(|pr| pr.merged_at.is_some()) {
            return Some(Self::Merged);
        }

        match issue.state.as_str() {
            "open" => Some(Self::Open),
            "closed" => Some(Self::Closed),
            _ => None,
        }
    }
}

/// One observed action by the subject user against a foreign repository.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ContributionItem {
    pub kind: ContributionKind,
    pub title: Option<String>,
    pub state: Option<ItemState>,

    /// When the item was last active: `updated_at` for pull requests and issues,
    /// `created_at` for events.
    pub timestamp: DateTime<Utc>,

    /// When a pull request or issue was opened.
    pub opened_at: Option<DateTime<Utc>>,

    pub link: Option<String>,
    pub sequence_number: Option<u64>,
}

impl ContributionItem {
    /// Build an item from a search result of the given kind.
    #[must_use]
    pub fn from_search_issue(kind: ContributionKind, issue: &SearchIssue) -> Self {
        Self {
            kind,
            title: Some(issue.title.clone()),
            state: ItemState::of(issue),
            timestamp: issue.updated_at,
            opened_at: Some(issue.created_at),
            link: issue.html_url.clone(),
            sequence_number: Some(issue.number),
        }
    }

    #[must_use]
    pub fn from_event(event: &PublicEvent) -> Self {
        Self {
            kind: ContributionKind::from_event_type(&event.event_type),
            title: None,
            state: None,
            timestamp: event.created_at,
            opened_at: None,
            link: None,
            sequence_number: None,
        }
    }
}

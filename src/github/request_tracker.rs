//! Request tracking for monitoring outstanding GitHub API requests.

use crate::misc::ProgressReporter;
use std::collections::BTreeMap;
use std::sync::{Arc, Mutex};
use strum::Display;
use url::Url;

/// The family of endpoint a request targets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Display)]
#[strum(serialize_all = "lowercase")]
pub enum RequestCategory {
    Search,
    Events,
    Repos,
    Users,
}

impl RequestCategory {
    /// Classify a request by the leading segments of its URL path.
    ///
    /// Any prefix before the first `search`, `repos`, or `users` segment is skipped, so API roots
    /// such as `/api/v3` classify the same way.
    #[must_use]
    pub fn of(url: &Url) -> Self {
        let segments: Vec<_> = url.path_segments().map(Iterator::collect).unwrap_or_default();
        let rest = segments
            .iter()
            .position(|s| matches!(*s, "search" | "repos" | "users"))
            .map_or(&[][..], |start| &segments[start..]);

        match rest {
            ["search", ..] => Self::Search,
            ["repos", ..] => Self::Repos,
            ["users", _, "events", ..] => Self::Events,
            _ => Self::Users,
        }
    }
}

/// Issued and completed counts for one category.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct RequestCounts {
    pub issued: u64,
    pub completed: u64,
}

/// Tracks outstanding requests and mirrors them onto a progress reporter.
///
/// Requests are tracked per [`RequestCategory`], so the progress message reads like
/// `3/5 search, 1/1 events`.
#[derive(Debug, Clone)]
pub struct RequestTracker {
    counters: Arc<Mutex<BTreeMap<RequestCategory, RequestCounts>>>,
    progress: Option<ProgressReporter>,
}

impl RequestTracker {
    /// Create a tracker that reports onto `progress`.
    #[must_use]
    pub fn new(progress: ProgressReporter) -> Self {
        Self {
            counters: Arc::new(Mutex::new(BTreeMap::new())),
            progress: Some(progress),
        }
    }

    /// Create a tracker that only counts.
    #[must_use]
    pub fn silent() -> Self {
        Self {
            counters: Arc::new(Mutex::new(BTreeMap::new())),
            progress: None,
        }
    }

    pub fn add_request(&self, category: RequestCategory) {
        self.counters.lock().expect("lock poisoned").entry(category).or_default().issued += 1;
        self.update_progress();
    }

    pub fn complete_request(&self, category: RequestCategory) {
        self.counters.lock().expect("lock poisoned").entry(category).or_default().completed += 1;
        self.update_progress();
    }

    /// Current counts for every category that has seen traffic.
    #[must_use]
    pub fn snapshot(&self) -> BTreeMap<RequestCategory, RequestCounts> {
        self.counters.lock().expect("lock poisoned").clone()
    }

    fn update_progress(&self) {
        let Some(progress) = &self.progress else {
            return;
        };

        let counters = self.counters.lock().expect("lock poisoned");

        let mut total_issued = 0u64;
        let mut total_completed = 0u64;
        let mut parts = Vec::with_capacity(counters.len());

        for (category, counts) in counters.iter().filter(|(_, c)| c.issued > 0) {
            total_issued += counts.issued;
            total_completed += counts.completed;
            parts.push(format!("{}/{} {category}", counts.completed, counts.issued));
        }

        if total_issued > 0 {
            progress.set_length(total_issued);
            progress.set_position(total_completed);
            progress.set_message(parts.join(", "));
        }
    }
}

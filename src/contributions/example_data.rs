use super::{ContributionItem, ContributionKind, ContributionSummary, EnrichedContributionRecord};
use crate::github::types::{RepositoryDetail, RepositoryOwner};
use chrono::{DateTime, NaiveDate, Utc};

struct ExampleRepository {
    id: u64,
    owner: &'static str,
    name: &'static str,
    description: &'static str,
    stars: u64,
    forks: u64,
    language: &'static str,
    items: &'static [(ContributionKind, &'static str, (i32, u32, u32))],
}

const EXAMPLES: [ExampleRepository; 2] = [
    ExampleRepository {
        id: 1,
        owner: "community",
        name: "awesome-open-source",
        description: "A curated collection of open source projects",
        stars: 2500,
        forks: 450,
        language: "JavaScript",
        items: &[
            (ContributionKind::PullRequest, "Add new awesome project", (2024, 1, 15)),
            (ContributionKind::Issue, "Bug in search functionality", (2024, 1, 10)),
            (ContributionKind::PullRequest, "Fix documentation typos", (2023, 12, 20)),
        ],
    },
    ExampleRepository {
        id: 2,
        owner: "devtools",
        name: "developer-tools",
        description: "Essential tools for developers",
        stars: 1200,
        forks: 180,
        language: "Python",
        items: &[
            (ContributionKind::PullRequest, "Improve CLI interface", (2023, 11, 30)),
            (ContributionKind::Issue, "Feature request: dark mode", (2023, 11, 25)),
        ],
    },
];

fn midnight((year, month, day): (i32, u32, u32)) -> DateTime<Utc> {
    NaiveDate::from_ymd_opt(year, month, day)
        .and_then(|d| d.and_hms_opt(0, 0, 0))
        .map_or(DateTime::<Utc>::UNIX_EPOCH, |dt| dt.and_utc())
}

/// A fixed dataset shown when a user has no contributions to report.
///
/// Records are ordered by most recent activity, like live results.
#[must_use]
pub fn example_contributions() -> Vec<EnrichedContributionRecord> {
    EXAMPLES
        .iter()
        .map(|example| {
            let full_name = format!("{}/{}", example.owner, example.name);
            let items: Vec<_> = example
                .items
                .iter()
                .map(|&(kind, title, date)| ContributionItem {
                    kind,
                    title: Some(title.to_string()),
                    state: None,
                    timestamp: midnight(date),
                    opened_at: Some(midnight(date)),
                    link: None,
                    sequence_number: None,
                })
                .collect();
            let last_activity = items.iter().map(|i| i.timestamp).max().unwrap_or(DateTime::<Utc>::UNIX_EPOCH);

            EnrichedContributionRecord {
                repository: RepositoryDetail {
                    id: example.id,
                    name: example.name.to_string(),
                    html_url: format!("https://github.com/{full_name}"),
                    full_name,
                    description: Some(example.description.to_string()),
                    owner: RepositoryOwner {
                        login: example.owner.to_string(),
                    },
                    stargazers_count: example.stars,
                    forks_count: example.forks,
                    language: Some(example.language.to_string()),
                    topics: Vec::new(),
                    fork: false,
                    private: false,
                    updated_at: None,
                },
                summary: ContributionSummary::new(items, last_activity),
            }
        })
        .collect()
}

use super::LOG_TARGET;
use crate::github::FetchError;
use crate::github::types::{LanguageBytes, RepositoryDetail};
use chrono::{DateTime, Utc};
use serde::Serialize;
use std::collections::{HashMap, HashSet};

/// Languages kept in a per-repository breakdown.
const MAX_BREAKDOWN_LANGUAGES: usize = 5;

/// How many repositories use a language as their primary one.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LanguageStat {
    pub language: String,
    pub count: usize,

    /// Share of repositories with a known primary language, 0..=100.
    pub percentage: f64,
}

/// Share of a single repository's code written in one language.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LanguageShare {
    pub language: String,
    pub bytes: u64,
    pub percentage: f64,
}

/// Count primary languages across `repositories`.
///
/// Repositories without a primary language are ignored. Sorted by count descending, then by name.
#[must_use]
pub fn language_stats(repositories: &[RepositoryDetail]) -> Vec<LanguageStat> {
    let mut counts: HashMap<&str, usize> = HashMap::new();
    for language in repositories.iter().filter_map(|r| r.language.as_deref()) {
        *counts.entry(language).or_insert(0) += 1;
    }

    let total: usize = counts.values().sum();
    let mut stats: Vec<_> = counts
        .into_iter()
        .map(|(language, count)| LanguageStat {
            language: language.to_string(),
            count,
            percentage: percent(count as u64, total as u64),
        })
        .collect();

    stats.sort_by(|a, b| b.count.cmp(&a.count).then_with(|| a.language.cmp(&b.language)));
    stats
}

/// Headline numbers over a repository list.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct RepositoryTotals {
    pub total_stars: u64,

    /// Distinct primary languages.
    pub language_count: usize,

    /// Most recent `updated_at` of any repository.
    pub last_update: Option<DateTime<Utc>>,
}

#[must_use]
pub fn repository_totals(repositories: &[RepositoryDetail]) -> RepositoryTotals {
    let languages: HashSet<_> = repositories.iter().filter_map(|r| r.language.as_deref()).collect();

    RepositoryTotals {
        total_stars: repositories.iter().map(|r| r.stargazers_count).sum(),
        language_count: languages.len(),
        last_update: repositories.iter().filter_map(|r| r.updated_at).max(),
    }
}

/// Turn per-language byte counts into percentages, largest first.
///
/// Only the five largest languages are kept; percentages stay relative to the full total.
#[must_use]
pub fn language_breakdown(bytes: &LanguageBytes) -> Vec<LanguageShare> {
    let total: u64 = bytes.values().sum();
    let mut shares: Vec<_> = bytes
        .iter()
        .map(|(language, &count)| LanguageShare {
            language: language.clone(),
            bytes: count,
            percentage: percent(count, total),
        })
        .collect();

    shares.sort_by(|a, b| b.bytes.cmp(&a.bytes).then_with(|| a.language.cmp(&b.language)));
    shares.truncate(MAX_BREAKDOWN_LANGUAGES);
    shares
}

/// The breakdown of `repo` given the result of fetching its languages.
///
/// When the fetch failed, the primary language is reported at 100%, or nothing when the
/// repository has no primary language.
#[must_use]
pub fn breakdown_or_primary(repo: &RepositoryDetail, fetched: Result<LanguageBytes, FetchError>) -> Vec<LanguageShare> {
    match fetched {
        Ok(bytes) => language_breakdown(&bytes),
        Err(e) => {
            log::warn!(target: LOG_TARGET, "Could not fetch the languages of '{}', using its primary language: {e}", repo.full_name);
            repo.language
                .iter()
                .map(|language| LanguageShare {
                    language: language.clone(),
                    bytes: 0,
                    percentage: 100.0,
                })
                .collect()
        }
    }
}

#[expect(clippy::cast_precision_loss, reason = "Precision loss acceptable for display percentages")]
fn percent(part: u64, total: u64) -> f64 {
    if total == 0 {
        return 0.0;
    }

    (part as f64 / total as f64 * 1000.0).round() / 10.0
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::github::types::RepositoryOwner;
    use chrono::TimeZone;

    fn repo(name: &str, language: Option<&str>) -> RepositoryDetail {
        RepositoryDetail {
            id: 1,
            name: name.to_string(),
            full_name: format!("me/{name}"),
            html_url: format!("https://github.com/me/{name}"),
            description: None,
            owner: RepositoryOwner { login: "me".to_string() },
            stargazers_count: 0,
            forks_count: 0,
            language: language.map(str::to_string),
            topics: Vec::new(),
            fork: false,
            private: false,
            updated_at: None,
        }
    }

    #[test]
    fn test_language_stats() {
        let repos = [
            repo("a", Some("JavaScript")),
            repo("b", Some("TypeScript")),
            repo("c", Some("Python")),
            repo("d", Some("JavaScript")),
            repo("e", None),
        ];

        let stats = language_stats(&repos);
        let summary: Vec<_> = stats.iter().map(|s| (s.language.as_str(), s.count, s.percentage)).collect();
        assert_eq!(
            summary,
            [("JavaScript", 2, 50.0), ("Python", 1, 25.0), ("TypeScript", 1, 25.0)]
        );
    }

    #[test]
    fn test_language_stats_rounds_to_one_decimal() {
        let repos = [repo("a", Some("Rust")), repo("b", Some("Go")), repo("c", Some("C"))];
        let stats = language_stats(&repos);
        assert!(stats.iter().all(|s| (s.percentage - 33.3).abs() < f64::EPSILON));
    }

    #[test]
    fn test_language_stats_empty() {
        assert!(language_stats(&[]).is_empty());
        assert!(language_stats(&[repo("a", None)]).is_empty());
    }

    #[test]
    fn test_language_breakdown() {
        let bytes: LanguageBytes = [("CSS".to_string(), 227), ("HTML".to_string(), 321), ("JavaScript".to_string(), 452)]
            .into_iter()
            .collect();

        let shares = language_breakdown(&bytes);
        let summary: Vec<_> = shares.iter().map(|s| (s.language.as_str(), s.percentage)).collect();
        assert_eq!(summary, [("JavaScript", 45.2), ("HTML", 32.1), ("CSS", 22.7)]);
    }

    #[test]
    fn test_language_breakdown_empty() {
        assert!(language_breakdown(&LanguageBytes::new()).is_empty());
    }

    #[test]
    fn test_language_breakdown_keeps_five_largest() {
        let bytes: LanguageBytes = ["A", "B", "C", "D", "E", "F", "G", "H"]
            .into_iter()
            .zip(1_u64..)
            .map(|(language, n)| (language.to_string(), n * 100))
            .collect();

        let shares = language_breakdown(&bytes);
        let names: Vec<_> = shares.iter().map(|s| s.language.as_str()).collect();
        assert_eq!(names, ["H", "G", "F", "E", "D"]);
        assert!((shares[0].percentage - 22.2).abs() < f64::EPSILON);
    }

    #[test]
    fn test_breakdown_falls_back_to_primary_language() {
        let shares = breakdown_or_primary(&repo("a", Some("Go")), Err(FetchError::RequestFailed { status: 500 }));
        assert_eq!(
            shares,
            [LanguageShare {
                language: "Go".to_string(),
                bytes: 0,
                percentage: 100.0,
            }]
        );

        assert!(breakdown_or_primary(&repo("b", None), Err(FetchError::RateLimited)).is_empty());
    }

    #[test]
    fn test_breakdown_uses_fetched_bytes() {
        let bytes: LanguageBytes = [("Rust".to_string(), 30), ("C".to_string(), 10)].into_iter().collect();
        let shares = breakdown_or_primary(&repo("a", Some("Go")), Ok(bytes));
        let names: Vec<_> = shares.iter().map(|s| s.language.as_str()).collect();
        assert_eq!(names, ["Rust", "C"]);
    }

    #[test]
    fn test_repository_totals() {
        let mut a = repo("a", Some("Rust"));
        a.stargazers_count = 10;
        a.updated_at = Some(Utc.with_ymd_and_hms(2024, 5, 1, 0, 0, 0).unwrap());
        let mut b = repo("b", Some("Rust"));
        b.stargazers_count = 5;
        b.updated_at = Some(Utc.with_ymd_and_hms(2024, 6, 2, 0, 0, 0).unwrap());
        let mut c = repo("c", Some("Python"));
        c.stargazers_count = 1;
        let d = repo("d", None);

        let totals = repository_totals(&[a, b, c, d]);
        assert_eq!(totals.total_stars, 16);
        assert_eq!(totals.language_count, 2);
        assert_eq!(totals.last_update, Some(Utc.with_ymd_and_hms(2024, 6, 2, 0, 0, 0).unwrap()));
    }

    #[test]
    fn test_repository_totals_empty() {
        assert_eq!(repository_totals(&[]), RepositoryTotals::default());
    }
}

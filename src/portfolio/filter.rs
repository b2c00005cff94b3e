use crate::github::types::RepositoryDetail;
use clap::ValueEnum;
use core::cmp::Reverse;
use strum::Display;

/// Order of a filtered repository list.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum, Display)]
#[strum(serialize_all = "lowercase")]
pub enum RepoSort {
    /// Most recently updated first
    #[default]
    Updated,

    /// Most starred first
    Stars,

    /// Alphabetical, ignoring case
    Name,
}

/// Free-text search, language filter, and ordering over a repository list.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RepositoryFilter {
    /// Matched case-insensitively against name, description, and topics.
    pub query: Option<String>,

    /// Primary language, compared case-insensitively.
    pub language: Option<String>,

    pub sort: RepoSort,
}

impl RepositoryFilter {
    /// Whether `repo` passes both the query and the language filter.
    #[must_use]
    pub fn matches(&self, repo: &RepositoryDetail) -> bool {
        self.matches_query(repo) && self.matches_language(repo)
    }

    fn matches_query(&self, repo: &RepositoryDetail) -> bool {
        let Some(query) = self.query.as_deref().map(str::trim).filter(|q| !q.is_empty()) else {
            return true;
        };

        let needle = query.to_lowercase();
        repo.name.to_lowercase().contains(&needle)
            || repo.description.as_deref().is_some_and(|d| d.to_lowercase().contains(&needle))
            || repo.topics.iter().any(|t| t.to_lowercase().contains(&needle))
    }

    fn matches_language(&self, repo: &RepositoryDetail) -> bool {
        self.language
            .as_deref()
            .is_none_or(|wanted| repo.language.as_deref().is_some_and(|l| l.eq_ignore_ascii_case(wanted)))
    }

    /// The matching repositories of `repositories`, in the requested order.
    #[must_use]
    pub fn apply(&self, repositories: &[RepositoryDetail]) -> Vec<RepositoryDetail> {
        let mut kept: Vec<_> = repositories.iter().filter(|r| self.matches(r)).cloned().collect();

        match self.sort {
            RepoSort::Updated => kept.sort_by_key(|r| Reverse(r.updated_at)),
            RepoSort::Stars => kept.sort_by_key(|r| Reverse(r.stargazers_count)),
            RepoSort::Name => kept.sort_by_cached_key(|r| r.name.to_lowercase()),
        }

        kept
    }
}

/// Distinct primary languages of `repositories`, sorted by name.
#[must_use]
pub fn available_languages(repositories: &[RepositoryDetail]) -> Vec<&str> {
    let mut languages: Vec<_> = repositories.iter().filter_map(|r| r.language.as_deref()).collect();
    languages.sort_unstable();
    languages.dedup();
    languages
}

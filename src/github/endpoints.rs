use anyhow::bail;
use strum::Display;
use url::Url;

/// Which flavor of search result is requested from `/search/issues`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display)]
pub enum SearchKind {
    #[strum(serialize = "pr")]
    PullRequest,

    #[strum(serialize = "issue")]
    Issue,
}

/// Builds URLs for the GitHub REST API endpoints this crate consumes.
#[derive(Debug, Clone)]
pub struct Endpoints {
    base: Url,
}

impl Endpoints {
    /// Create endpoints rooted at `base`, usually `https://api.github.com`.
    pub fn new(base: Url) -> anyhow::Result<Self> {
        if base.cannot_be_a_base() {
            bail!("'{base}' cannot be used as an API base URL");
        }

        Ok(Self { base })
    }

    #[must_use]
    pub const fn base(&self) -> &Url {
        &self.base
    }

    /// `GET /search/issues?q=author:{user}+type:{kind}+state:all&per_page&page&sort=updated`
    #[must_use]
    pub fn search_issues(&self, username: &str, kind: SearchKind, per_page: u32, page: u32) -> Url {
        self.build(
            &["search", "issues"],
            &[
                ("q", format!("author:{username} type:{kind} state:all")),
                ("per_page", per_page.to_string()),
                ("page", page.to_string()),
                ("sort", "updated".to_string()),
            ],
        )
    }

    /// `GET /users/{user}/events/public?per_page`
    #[must_use]
    pub fn public_events(&self, username: &str, per_page: u32) -> Url {
        self.build(&["users", username, "events", "public"], &[("per_page", per_page.to_string())])
    }

    /// `GET /users/{user}`
    #[must_use]
    pub fn user(&self, username: &str) -> Url {
        self.build(&["users", username], &[])
    }

    /// `GET /users/{user}/repos?sort&per_page&type`
    #[must_use]
    pub fn user_repositories(&self, username: &str, sort: &str, per_page: u32, repo_type: &str) -> Url {
        self.build(
            &["users", username, "repos"],
            &[
                ("sort", sort.to_string()),
                ("per_page", per_page.to_string()),
                ("type", repo_type.to_string()),
            ],
        )
    }

    /// `GET /repos/{owner}/{repo}`
    #[must_use]
    pub fn repository(&self, owner: &str, name: &str) -> Url {
        self.build(&["repos", owner, name], &[])
    }

    /// `GET /repos/{owner}/{repo}/languages`
    #[must_use]
    pub fn repository_languages(&self, owner: &str, name: &str) -> Url {
        self.build(&["repos", owner, name, "languages"], &[])
    }

    fn build(&self, segments: &[&str], query: &[(&str, String)]) -> Url {
        let mut url = self.base.clone();

        // `new` guarantees the base can carry path segments
        if let Ok(mut path) = url.path_segments_mut() {
            let _ = path.pop_if_empty().extend(segments);
        }

        if !query.is_empty() {
            let _ = url.query_pairs_mut().extend_pairs(query);
        }

        url
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn endpoints() -> Endpoints {
        Endpoints::new(Url::parse("https://api.github.com").unwrap()).unwrap()
    }

    #[test]
    fn test_rejects_non_base_url() {
        assert!(Endpoints::new(Url::parse("mailto:someone@example.com").unwrap()).is_err());
    }

    #[test]
    fn test_search_issues() {
        let url = endpoints().search_issues("me", SearchKind::PullRequest, 100, 2);
        assert_eq!(
            url.as_str(),
            "https://api.github.com/search/issues?q=author%3Ame+type%3Apr+state%3Aall&per_page=100&page=2&sort=updated"
        );
    }

    #[test]
    fn test_search_kind_display() {
        assert_eq!(SearchKind::PullRequest.to_string(), "pr");
        assert_eq!(SearchKind::Issue.to_string(), "issue");
    }

    #[test]
    fn test_public_events() {
        assert_eq!(
            endpoints().public_events("me", 100).as_str(),
            "https://api.github.com/users/me/events/public?per_page=100"
        );
    }

    #[test]
    fn test_repository_paths() {
        let e = endpoints();
        assert_eq!(e.user("me").as_str(), "https://api.github.com/users/me");
        assert_eq!(e.repository("foo", "bar").as_str(), "https://api.github.com/repos/foo/bar");
        assert_eq!(
            e.repository_languages("foo", "bar").as_str(),
            "https://api.github.com/repos/foo/bar/languages"
        );
        assert_eq!(
            e.user_repositories("me", "updated", 12, "owner").as_str(),
            "https://api.github.com/users/me/repos?sort=updated&per_page=12&type=owner"
        );
    }

    #[test]
    fn test_base_with_path_prefix() {
        let e = Endpoints::new(Url::parse("https://ghe.example.com/api/v3/").unwrap()).unwrap();
        assert_eq!(e.user("me").as_str(), "https://ghe.example.com/api/v3/users/me");
    }
}

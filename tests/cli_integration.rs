//! End-to-end tests of the command line, run against a mock GitHub API.
//!
//! Every test writes a configuration file pointing `api_base_url` at a local `wiremock` server,
//! with caching and page pauses disabled.

use gh_portfolio::Host;
use serde_json::{Value, json};
use std::fs;
use std::path::PathBuf;
use tempfile::TempDir;
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

/// Test host that captures output to in-memory buffers.
struct TestHost {
    output_buf: Vec<u8>,
    error_buf: Vec<u8>,
    exit_code: Option<i32>,
}

impl TestHost {
    const fn new() -> Self {
        Self {
            output_buf: Vec::new(),
            error_buf: Vec::new(),
            exit_code: None,
        }
    }

    fn output_str(&self) -> String {
        String::from_utf8_lossy(&self.output_buf).into_owned()
    }

    fn error_str(&self) -> String {
        String::from_utf8_lossy(&self.error_buf).into_owned()
    }

    fn output_json(&self) -> Value {
        serde_json::from_slice(&self.output_buf).unwrap()
    }
}

impl Host for TestHost {
    fn output(&mut self) -> impl std::io::Write {
        &mut self.output_buf
    }

    fn error(&mut self) -> impl std::io::Write {
        &mut self.error_buf
    }

    fn exit(&mut self, code: i32) {
        self.exit_code = Some(code);
    }
}

struct Fixture {
    server: MockServer,
    _dir: TempDir,
    config: PathBuf,
}

impl Fixture {
    async fn new() -> Self {
        let server = MockServer::start().await;
        let dir = tempfile::tempdir().unwrap();
        let config = dir.path().join("gh-portfolio.toml");
        fs::write(
            &config,
            format!("api_base_url = \"{}\"\ncache_ttl = \"0s\"\npage_pause = \"0s\"\n", server.uri()),
        )
        .unwrap();

        Self { server, _dir: dir, config }
    }

    async fn run(&self, args: &[&str]) -> TestHost {
        let mut host = TestHost::new();
        let mut argv = vec!["gh-portfolio".to_string()];
        argv.extend(args.iter().map(ToString::to_string));
        argv.extend(["--config".to_string(), self.config.display().to_string()]);
        argv.extend(["--color".to_string(), "never".to_string()]);

        gh_portfolio::run(&mut host, argv).await;
        host
    }

    fn api(&self, suffix: &str) -> String {
        format!("{}{suffix}", self.server.uri())
    }

    fn repository(&self, owner: &str, name: &str, language: &str) -> Value {
        json!({
            "id": 7,
            "name": name,
            "full_name": format!("{owner}/{name}"),
            "html_url": format!("https://github.com/{owner}/{name}"),
            "description": format!("The {name} project"),
            "owner": { "login": owner },
            "stargazers_count": 42,
            "forks_count": 3,
            "language": language,
            "topics": ["tooling"],
            "fork": false,
            "private": false,
            "updated_at": "2024-02-01T00:00:00Z"
        })
    }

    async fn mount_json(&self, route: &str, body: Value) {
        Mock::given(method("GET"))
            .and(path(route))
            .respond_with(ResponseTemplate::new(200).set_body_json(body))
            .mount(&self.server)
            .await;
    }

    async fn mount_search(&self, kind: &str, items: Value) {
        Mock::given(method("GET"))
            .and(path("/search/issues"))
            .and(query_param("q", format!("author:octo type:{kind} state:all")))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "total_count": 1, "items": items })))
            .mount(&self.server)
            .await;
    }

    /// A pull request to `foo/bar`, an issue on the user's own repository, and a push to `baz/qux`,
    /// whose details are unavailable.
    async fn mount_contributions(&self) {
        self.mount_search(
            "pr",
            json!([{
                "number": 12,
                "title": "Speed up the parser",
                "state": "closed",
                "repository_url": self.api("/repos/foo/bar"),
                "html_url": "https://github.com/foo/bar/pull/12",
                "created_at": "2024-03-01T00:00:00Z",
                "updated_at": "2024-03-04T00:00:00Z",
                "pull_request": { "merged_at": "2024-03-03T00:00:00Z" }
            }]),
        )
        .await;

        self.mount_search(
            "issue",
            json!([{
                "number": 3,
                "title": "Note to self",
                "state": "open",
                "repository_url": self.api("/repos/octo/dotfiles"),
                "html_url": "https://github.com/octo/dotfiles/issues/3",
                "created_at": "2024-03-02T00:00:00Z",
                "updated_at": "2024-03-02T00:00:00Z"
            }]),
        )
        .await;

        self.mount_json(
            "/users/octo/events/public",
            json!([{
                "type": "PushEvent",
                "repo": { "name": "baz/qux", "url": self.api("/repos/baz/qux") },
                "created_at": "2024-03-05T00:00:00Z"
            }]),
        )
        .await;

        self.mount_json("/repos/foo/bar", self.repository("foo", "bar", "Rust")).await;

        Mock::given(method("GET"))
            .and(path("/repos/baz/qux"))
            .respond_with(ResponseTemplate::new(404))
            .mount(&self.server)
            .await;
    }
}

#[tokio::test]
async fn test_contributions_json() {
    let fixture = Fixture::new().await;
    fixture.mount_contributions().await;

    let host = fixture.run(&["contributions", "octo", "--format", "json"]).await;
    assert_eq!(host.exit_code, None, "stderr: {}", host.error_str());

    let report = host.output_json();
    assert_eq!(report["username"], "octo");
    assert_eq!(report["is_example"], false);
    assert_eq!(report["source_counts"], json!({ "pull_requests": 1, "issues": 1, "events": 1 }));
    assert_eq!(report["repositories_discovered"], 2);

    let repositories = report["repositories"].as_array().unwrap();
    assert_eq!(repositories.len(), 1);
    assert_eq!(repositories[0]["repository"]["full_name"], "foo/bar");
    assert_eq!(repositories[0]["pull_requests"], 1);
    assert_eq!(repositories[0]["items"][0]["state"], "merged");

    assert_eq!(report["failures"][0]["repository"], "baz/qux");
}

#[tokio::test]
async fn test_contributions_console() {
    let fixture = Fixture::new().await;
    fixture.mount_contributions().await;

    let host = fixture.run(&["contributions", "octo"]).await;
    assert_eq!(host.exit_code, None, "stderr: {}", host.error_str());

    let text = host.output_str();
    assert!(text.contains("foo/bar  by foo"), "{text}");
    assert!(text.contains("1 contribution: 1 PR"), "{text}");
    assert!(text.contains("[PullRequest] 2024-03-04 Speed up the parser (merged)"), "{text}");
    assert!(text.contains("1 repository skipped"), "{text}");
    assert!(text.contains("1 repository • 1 contribution total"), "{text}");
    assert!(!text.contains("octo/dotfiles"), "{text}");
    assert!(!text.contains('\u{1b}'));
}

#[tokio::test]
async fn test_contributions_fall_back_to_examples() {
    let fixture = Fixture::new().await;
    fixture.mount_search("pr", json!([])).await;
    fixture.mount_search("issue", json!([])).await;
    fixture.mount_json("/users/octo/events/public", json!([])).await;

    let host = fixture.run(&["contributions", "octo", "--format", "json"]).await;
    assert_eq!(host.exit_code, None, "stderr: {}", host.error_str());

    let report = host.output_json();
    assert_eq!(report["is_example"], true);
    assert_eq!(report["repositories"][0]["repository"]["full_name"], "community/awesome-open-source");
}

#[tokio::test]
async fn test_contributions_rejects_zero_cap() {
    let fixture = Fixture::new().await;

    let host = fixture.run(&["contributions", "octo", "--cap", "0"]).await;
    assert_eq!(host.exit_code, Some(1));
    assert!(host.error_str().contains("--cap must be at least 1"));
    assert!(fixture.server.received_requests().await.unwrap().is_empty());
}

#[tokio::test]
async fn test_profile() {
    let fixture = Fixture::new().await;
    fixture
        .mount_json(
            "/users/octo",
            json!({
                "login": "octo",
                "name": "Octo Cat",
                "bio": "Writes tools",
                "html_url": "https://github.com/octo",
                "public_repos": 2,
                "followers": 10,
                "following": 1
            }),
        )
        .await;

    let host = fixture.run(&["profile", "octo"]).await;
    assert_eq!(host.exit_code, None, "stderr: {}", host.error_str());
    let text = host.output_str();
    assert!(text.starts_with("Octo Cat (octo)"), "{text}");
    assert!(text.contains("Writes tools"));
}

#[tokio::test]
async fn test_profile_not_found() {
    let fixture = Fixture::new().await;

    let host = fixture.run(&["profile", "ghost"]).await;
    assert_eq!(host.exit_code, Some(1));
    assert!(host.error_str().contains("fetching the profile of 'ghost'"), "{}", host.error_str());
    assert!(host.error_str().contains("HTTP 404"), "{}", host.error_str());
}

#[tokio::test]
async fn test_repos_filtered_with_languages() {
    let fixture = Fixture::new().await;
    fixture
        .mount_json(
            "/users/octo/repos",
            json!([fixture.repository("octo", "alpha", "Rust"), fixture.repository("octo", "beta", "Python")]),
        )
        .await;
    fixture
        .mount_json("/repos/octo/alpha/languages", json!({ "Rust": 750, "Shell": 250 }))
        .await;

    let host = fixture
        .run(&["repos", "octo", "--language", "rust", "--languages", "--format", "json"])
        .await;
    assert_eq!(host.exit_code, None, "stderr: {}", host.error_str());

    let report = host.output_json();
    assert_eq!(report["total"], 2);
    assert_eq!(report["is_example"], false);
    assert_eq!(report["repositories"].as_array().unwrap().len(), 1);
    assert_eq!(report["repositories"][0]["name"], "alpha");
    assert_eq!(report["language_stats"].as_array().unwrap().len(), 2);
    assert_eq!(report["breakdowns"]["alpha"][0], json!({ "language": "Rust", "bytes": 750, "percentage": 75.0 }));
    assert_eq!(report["total_stars"], 84);
    assert_eq!(report["language_count"], 2);
    assert_eq!(report["last_update"], "2024-02-01T00:00:00Z");
}

#[tokio::test]
async fn test_repos_languages_fall_back_to_primary_language() {
    let fixture = Fixture::new().await;
    fixture
        .mount_json("/users/octo/repos", json!([fixture.repository("octo", "alpha", "Rust")]))
        .await;
    Mock::given(method("GET"))
        .and(path("/repos/octo/alpha/languages"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&fixture.server)
        .await;

    let host = fixture.run(&["repos", "octo", "--languages", "--format", "json"]).await;
    assert_eq!(host.exit_code, None, "stderr: {}", host.error_str());

    let report = host.output_json();
    assert_eq!(report["breakdowns"]["alpha"], json!([{ "language": "Rust", "bytes": 0, "percentage": 100.0 }]));
}

#[tokio::test]
async fn test_repos_rate_limited_shows_samples() {
    let fixture = Fixture::new().await;
    Mock::given(method("GET"))
        .and(path("/users/octo/repos"))
        .respond_with(ResponseTemplate::new(403))
        .mount(&fixture.server)
        .await;

    let host = fixture.run(&["repos", "octo"]).await;
    assert_eq!(host.exit_code, None, "stderr: {}", host.error_str());
    let text = host.output_str();
    assert!(text.contains("showing sample repositories"), "{text}");
    assert!(text.contains("portfolio-website"), "{text}");
}

#[tokio::test]
async fn test_init_writes_config() {
    let dir = tempfile::tempdir().unwrap();
    let output = dir.path().join("fresh.toml");
    let mut host = TestHost::new();

    gh_portfolio::run(&mut host, ["gh-portfolio", "init", "--output", output.to_str().unwrap()]).await;

    assert_eq!(host.exit_code, None, "stderr: {}", host.error_str());
    assert!(fs::read_to_string(&output).unwrap().contains("contribution_cap = 30"));
}

#[tokio::test]
async fn test_invalid_config_is_reported() {
    let dir = tempfile::tempdir().unwrap();
    let config = dir.path().join("bad.toml");
    fs::write(&config, "contribution_cap = 0\n").unwrap();
    let mut host = TestHost::new();

    gh_portfolio::run(
        &mut host,
        ["gh-portfolio", "profile", "octo", "--config", config.to_str().unwrap()],
    )
    .await;

    assert_eq!(host.exit_code, Some(1));
    assert!(host.error_str().starts_with("Error: "), "{}", host.error_str());
    assert!(host.error_str().contains("contribution_cap"), "{}", host.error_str());
}

#[tokio::test]
async fn test_usage_error() {
    let mut host = TestHost::new();
    gh_portfolio::run(&mut host, ["gh-portfolio", "frobnicate"]).await;

    assert_eq!(host.exit_code, Some(1));
    assert!(host.error_str().contains("frobnicate"));
    assert!(host.output_buf.is_empty());
}

#[tokio::test]
async fn test_help_goes_to_output() {
    let mut host = TestHost::new();
    gh_portfolio::run(&mut host, ["gh-portfolio", "--help"]).await;

    assert_eq!(host.exit_code, Some(0));
    assert!(host.output_str().contains("contributions"));
}

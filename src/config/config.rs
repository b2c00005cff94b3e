use anyhow::{Context, bail};
use core::time::Duration;
use serde::{Deserialize, Serialize};
use std::fs;
use std::io;
use std::path::Path;
use url::Url;

/// The default configuration TOML content, embedded from `default_config.toml`
pub const DEFAULT_CONFIG_TOML: &str = include_str!("../../default_config.toml");

/// Name of the configuration file looked up in the working directory
pub const CONFIG_FILE_NAME: &str = "gh-portfolio.toml";

const LOG_TARGET: &str = "config";

/// Largest page size the search API honors
const MAX_SEARCH_PER_PAGE: u32 = 100;

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct Config {
    /// Root of the GitHub REST API
    #[serde(default = "default_api_base_url")]
    pub api_base_url: Url,

    /// Value sent in the `User-Agent` header, which GitHub requires
    #[serde(default = "default_user_agent")]
    pub user_agent: String,

    /// Upper bound on the duration of a single request
    #[serde(default = "default_request_timeout", with = "humantime_serde")]
    pub request_timeout: Duration,

    /// How long successful responses are reused, zero disables the cache
    #[serde(default = "default_cache_ttl", with = "humantime_serde")]
    pub cache_ttl: Duration,

    /// Items requested per search page
    #[serde(default = "default_search_per_page")]
    pub search_per_page: u32,

    /// Maximum number of pull request search pages fetched
    #[serde(default = "default_pull_request_page_cap")]
    pub pull_request_page_cap: u32,

    /// Maximum number of issue search pages fetched
    #[serde(default = "default_issue_page_cap")]
    pub issue_page_cap: u32,

    /// Events requested from the public events feed
    #[serde(default = "default_events_per_page")]
    pub events_per_page: u32,

    /// Pause before each search page after the first
    #[serde(default = "default_page_pause", with = "humantime_serde")]
    pub page_pause: Duration,

    /// Maximum number of repositories reported as contributions
    #[serde(default = "default_contribution_cap")]
    pub contribution_cap: usize,

    /// Keep events of types other than push, pull request, issues, create, fork, and watch
    #[serde(default)]
    pub include_other_events: bool,

    /// Repositories requested when listing a user's own repositories
    #[serde(default = "default_repos_per_page")]
    pub repos_per_page: u32,

    /// Sort order requested when listing a user's own repositories
    #[serde(default = "default_repos_sort")]
    pub repos_sort: String,

    /// Repository type requested when listing a user's own repositories
    #[serde(default = "default_repos_type")]
    pub repos_type: String,
}

fn default_api_base_url() -> Url {
    Url::parse("https://api.github.com").expect("the default API base URL should parse")
}

fn default_user_agent() -> String {
    "gh-portfolio".to_string()
}

const fn default_request_timeout() -> Duration {
    Duration::from_secs(30)
}

const fn default_cache_ttl() -> Duration {
    Duration::from_secs(5 * 60)
}

const fn default_search_per_page() -> u32 {
    100
}

const fn default_pull_request_page_cap() -> u32 {
    10
}

const fn default_issue_page_cap() -> u32 {
    5
}

const fn default_events_per_page() -> u32 {
    100
}

const fn default_page_pause() -> Duration {
    Duration::from_millis(100)
}

const fn default_contribution_cap() -> usize {
    30
}

const fn default_repos_per_page() -> u32 {
    12
}

fn default_repos_sort() -> String {
    "updated".to_string()
}

fn default_repos_type() -> String {
    "owner".to_string()
}

impl Config {
    /// Load configuration from a file or use defaults
    ///
    /// Without an explicit path, `gh-portfolio.toml` in `dir` is used when it exists.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read, parsed, or holds invalid values
    pub fn load(dir: &Path, config_path: Option<&Path>) -> anyhow::Result<Self> {
        let (final_path, text) = if let Some(path) = config_path {
            let text = fs::read_to_string(path).with_context(|| format!("reading configuration file '{}'", path.display()))?;
            (path.to_path_buf(), text)
        } else {
            let path = dir.join(CONFIG_FILE_NAME);
            match fs::read_to_string(&path) {
                Ok(text) => (path, text),
                Err(e) if e.kind() == io::ErrorKind::NotFound => {
                    log::debug!(target: LOG_TARGET, "No '{}' found, using the default configuration", path.display());
                    return Ok(Self::default());
                }
                Err(e) => return Err(e).with_context(|| format!("reading configuration file '{}'", path.display())),
            }
        };

        let config: Self = toml::from_str(&text).with_context(|| format!("parsing configuration file '{}'", final_path.display()))?;
        config
            .validate()
            .with_context(|| format!("validating configuration file '{}'", final_path.display()))?;

        Ok(config)
    }

    /// Save the default configuration to a TOML file
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be written
    pub fn save_default(output_path: &Path) -> anyhow::Result<()> {
        fs::write(output_path, DEFAULT_CONFIG_TOML)
            .with_context(|| format!("writing default configuration to '{}'", output_path.display()))
    }

    /// Validate configuration values
    ///
    /// # Errors
    ///
    /// Returns an error if a page size or cap is zero, the search page size exceeds what the API
    /// honors, or the user agent is blank
    pub fn validate(&self) -> anyhow::Result<()> {
        let sizes = [
            ("search_per_page", self.search_per_page),
            ("pull_request_page_cap", self.pull_request_page_cap),
            ("issue_page_cap", self.issue_page_cap),
            ("events_per_page", self.events_per_page),
            ("repos_per_page", self.repos_per_page),
        ];

        for (name, value) in sizes {
            if value == 0 {
                bail!("{name} must be greater than zero");
            }
        }

        if self.search_per_page > MAX_SEARCH_PER_PAGE {
            bail!("search_per_page must be at most {MAX_SEARCH_PER_PAGE}, got {}", self.search_per_page);
        }

        if self.contribution_cap == 0 {
            bail!("contribution_cap must be greater than zero");
        }

        if self.user_agent.trim().is_empty() {
            bail!("user_agent must not be empty");
        }

        if self.api_base_url.cannot_be_a_base() {
            bail!("api_base_url '{}' cannot be used as a base URL", self.api_base_url);
        }

        Ok(())
    }
}

impl Default for Config {
    fn default() -> Self {
        toml::from_str(DEFAULT_CONFIG_TOML).expect("default_config.toml should be valid TOML that deserializes to Config")
    }
}

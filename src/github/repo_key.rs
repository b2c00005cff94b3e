use core::fmt::{Display, Formatter, Result as FmtResult};
use core::str::FromStr;
use serde::{Serialize, Serializer};
use std::sync::Arc;
use thiserror::Error;
use url::Url;

/// A reference that could not be turned into a repository key.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ReferenceError {
    #[error("malformed repository reference '{0}'")]
    MalformedReference(String),
}

/// Identifies a GitHub repository as `owner/name`.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct RepositoryKey {
    owner: Arc<str>,
    name: Arc<str>,
}

impl RepositoryKey {
    /// Create a key from its parts, rejecting empty or slash-bearing components.
    pub fn new(owner: impl AsRef<str>, name: impl AsRef<str>) -> Result<Self, ReferenceError> {
        let owner = owner.as_ref();
        let name = name.as_ref();

        if !is_valid_component(owner) || !is_valid_component(name) {
            return Err(ReferenceError::MalformedReference(format!("{owner}/{name}")));
        }

        Ok(Self {
            owner: Arc::from(owner),
            name: Arc::from(name),
        })
    }

    /// Parse a repository API URL such as `https://api.github.com/repos/rust-lang/rust`.
    ///
    /// The URL must end in exactly `repos/{owner}/{name}`; any prefix before `repos` is
    /// accepted so that enterprise and test servers work too.
    pub fn from_api_url(url: &Url) -> Result<Self, ReferenceError> {
        let malformed = || ReferenceError::MalformedReference(url.to_string());

        let segments: Vec<&str> = url
            .path_segments()
            .ok_or_else(malformed)?
            .filter(|s| !s.is_empty())
            .collect();

        match segments.as_slice() {
            [.., "repos", owner, name] => Self::new(owner, name).map_err(|_| malformed()),
            _ => Err(malformed()),
        }
    }

    /// Parse a textual API URL.
    pub fn from_api_url_str(url: &str) -> Result<Self, ReferenceError> {
        let parsed = Url::parse(url).map_err(|_| ReferenceError::MalformedReference(url.to_string()))?;
        Self::from_api_url(&parsed)
    }

    #[must_use]
    pub fn owner(&self) -> &str {
        &self.owner
    }

    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Whether this repository belongs to `login`, compared the way GitHub compares logins.
    #[must_use]
    pub fn is_owned_by(&self, login: &str) -> bool {
        self.owner.eq_ignore_ascii_case(login)
    }
}

fn is_valid_component(s: &str) -> bool {
    !s.is_empty() && !s.contains('/') && !s.chars().any(char::is_whitespace)
}

impl FromStr for RepositoryKey {
    type Err = ReferenceError;

    /// Parse a full name of the form `owner/name`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (owner, name) = s
            .split_once('/')
            .ok_or_else(|| ReferenceError::MalformedReference(s.to_string()))?;
        Self::new(owner, name).map_err(|_| ReferenceError::MalformedReference(s.to_string()))
    }
}

impl Display for RepositoryKey {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        write!(f, "{}/{}", self.owner, self.name)
    }
}

impl Serialize for RepositoryKey {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.collect_str(self)
    }
}

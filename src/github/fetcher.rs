use super::FetchError;
use async_trait::async_trait;
use serde::de::DeserializeOwned;
use serde_json::Value;
use url::Url;

/// Transport boundary for all GitHub API reads.
///
/// Implementations perform a single GET and classify failures. They never retry; retry and
/// early-termination policy belong to the caller.
#[async_trait]
pub trait JsonFetcher: Send + Sync {
    async fn fetch_json(&self, url: &Url) -> Result<Value, FetchError>;
}

/// Fetch `url` and decode the body into `T`.
pub async fn fetch_as<T, F>(fetcher: &F, url: &Url) -> Result<T, FetchError>
where
    T: DeserializeOwned,
    F: JsonFetcher + ?Sized,
{
    let value = fetcher.fetch_json(url).await?;
    Ok(serde_json::from_value(value)?)
}

#[cfg(test)]
pub(crate) mod scripted {
    //! A fetcher that replays canned responses, for tests that must not touch the network.

    use super::{FetchError, JsonFetcher};
    use async_trait::async_trait;
    use serde_json::Value;
    use std::collections::{HashMap, VecDeque};
    use std::sync::Mutex;
    use url::Url;

    #[derive(Debug, Default)]
    pub struct ScriptedFetcher {
        responses: Mutex<HashMap<String, VecDeque<Result<Value, FetchError>>>>,
        requested: Mutex<Vec<String>>,
    }

    impl ScriptedFetcher {
        pub fn new() -> Self {
            Self::default()
        }

        /// Queue a response for `url`. Responses for the same URL are replayed in order.
        pub fn respond(&self, url: &Url, response: Result<Value, FetchError>) -> &Self {
            self.responses
                .lock()
                .unwrap()
                .entry(url.to_string())
                .or_default()
                .push_back(response);
            self
        }

        /// URLs requested so far, in request order.
        pub fn requested(&self) -> Vec<String> {
            self.requested.lock().unwrap().clone()
        }
    }

    #[async_trait]
    impl JsonFetcher for ScriptedFetcher {
        async fn fetch_json(&self, url: &Url) -> Result<Value, FetchError> {
            self.requested.lock().unwrap().push(url.to_string());
            self.responses
                .lock()
                .unwrap()
                .get_mut(url.as_str())
                .and_then(VecDeque::pop_front)
                .unwrap_or(Err(FetchError::RequestFailed { status: 404 }))
        }
    }
}

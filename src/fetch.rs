//! Document fetching.
//!
//! The loader only sees the [`Fetch`] trait. [`DocumentFetcher`] is the real
//! implementation: HTTP(S) locations go through a shared `reqwest` client,
//! anything else is read from the local filesystem.

use crate::error::FetchError;
use std::future::Future;
use std::time::Duration;

/// Retrieve the text behind a location.
pub trait Fetch: Send + Sync {
    fn fetch_text(&self, location: &str) -> impl Future<Output = Result<String, FetchError>> + Send;
}

/// Fetches over HTTP(S) or from disk depending on the location.
#[derive(Debug, Clone)]
pub struct DocumentFetcher {
    client: reqwest::Client,
}

impl DocumentFetcher {
    /// Build a fetcher whose HTTP requests give up after `timeout`.
    pub fn new(timeout: Option<Duration>) -> Result<Self, FetchError> {
        let mut builder = reqwest::Client::builder().user_agent(concat!(
            env!("CARGO_PKG_NAME"),
            "/",
            env!("CARGO_PKG_VERSION")
        ));
        if let Some(timeout) = timeout {
            builder = builder.timeout(timeout);
        }
        let client = builder.build().map_err(|e| FetchError::Transport {
            location: "<client>".to_string(),
            message: e.to_string(),
        })?;
        Ok(Self { client })
    }

    async fn fetch_http(&self, location: &str) -> Result<String, FetchError> {
        let transport = |e: reqwest::Error| FetchError::Transport {
            location: location.to_string(),
            message: e.to_string(),
        };

        let response = self.client.get(location).send().await.map_err(transport)?;
        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::Status {
                location: location.to_string(),
                status: status.as_u16(),
            });
        }
        response.text().await.map_err(transport)
    }
}

impl Fetch for DocumentFetcher {
    async fn fetch_text(&self, location: &str) -> Result<String, FetchError> {
        if is_remote(location) {
            tracing::debug!(location, "Fetching over HTTP");
            self.fetch_http(location).await
        } else {
            tracing::debug!(location, "Reading from disk");
            tokio::fs::read_to_string(location)
                .await
                .map_err(|source| FetchError::Io {
                    location: location.to_string(),
                    source,
                })
        }
    }
}

/// Whether `location` must be fetched over the network.
pub fn is_remote(location: &str) -> bool {
    let lower = location.get(..8).unwrap_or(location).to_ascii_lowercase();
    lower.starts_with("http://") || lower.starts_with("https://")
}

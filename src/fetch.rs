//! Profile page fetching over plain HTTP GET.
//!
//! The network edge of the pipeline is a single trait, [`Fetch`], so the
//! batch machinery can be driven by the real [`HttpFetcher`] in production
//! and by a deterministic in-memory fake in tests.
//!
//! One call, one GET, one attempt: there is no retry, no custom header
//! beyond the user agent, and no response-size policing. The request
//! timeout configured on the client is the single place a hung fetch gets
//! cancelled; everything the fetch holds (the connection, the body stream)
//! is released by drop on every path out of [`Fetch::fetch`].

use reqwest::StatusCode;
use std::time::Duration;
use thiserror::Error;
use tracing::debug;

/// Errors produced by a single fetch attempt.
///
/// Both variants mean the same thing to the batch: the item is skipped. The
/// split only exists so logs say whether the network or the remote service
/// was at fault.
#[derive(Debug, Error)]
pub enum FetchError {
    /// The request never completed: DNS, connect, timeout, or a failure
    /// while reading the body.
    #[error("request failed: {0}")]
    Transport(#[from] reqwest::Error),
    /// The remote answered with a non-success status. All non-2xx codes are
    /// treated uniformly.
    #[error("unexpected status {0}")]
    Status(StatusCode),
}

/// Anything that can turn a URL into a response body.
pub trait Fetch {
    /// Fetch `url` and return the raw response body.
    async fn fetch(&self, url: &str) -> Result<String, FetchError>;
}

/// Settings for the HTTP client behind [`HttpFetcher`].
#[derive(Debug, Clone)]
pub struct FetcherConfig {
    /// User agent sent with every request.
    pub user_agent: String,
    /// Deadline for one whole request, connect through body.
    pub timeout: Duration,
    /// Deadline for establishing the connection alone.
    pub connect_timeout: Duration,
}

impl Default for FetcherConfig {
    fn default() -> Self {
        Self {
            user_agent: concat!("influencer_census/", env!("CARGO_PKG_VERSION")).to_string(),
            timeout: Duration::from_secs(30),
            connect_timeout: Duration::from_secs(10),
        }
    }
}

/// The real fetcher: a shared `reqwest::Client` issuing one GET per call.
#[derive(Debug, Clone)]
pub struct HttpFetcher {
    client: reqwest::Client,
}

impl HttpFetcher {
    /// Build a fetcher from `config`.
    ///
    /// # Errors
    ///
    /// Returns the underlying client-build failure, which is a
    /// configuration problem and should abort the run before any target is
    /// attempted.
    pub fn new(config: FetcherConfig) -> Result<Self, reqwest::Error> {
        let client = reqwest::Client::builder()
            .user_agent(&config.user_agent)
            .timeout(config.timeout)
            .connect_timeout(config.connect_timeout)
            .build()?;
        Ok(Self { client })
    }
}

impl Fetch for HttpFetcher {
    async fn fetch(&self, url: &str) -> Result<String, FetchError> {
        let response = self.client.get(url).send().await?;
        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::Status(status));
        }
        let body = response.text().await?;
        debug!(%url, bytes = body.len(), "Fetched profile page");
        Ok(body)
    }
}

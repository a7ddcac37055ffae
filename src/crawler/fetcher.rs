//! HTTP fetcher implementation
//!
//! This module handles all HTTP requests for the crawler, including:
//! - Building HTTP clients with the session identity and timeouts
//! - GET requests to fetch page content
//! - Retry with exponential backoff for failed attempts
//! - Cancellation between attempts and during backoff waits
//! - Error classification

use crate::config::FetchConfig;
use crate::crawler::backoff::BackoffPolicy;
use crate::crawler::identity::IdentityPool;
use crate::crawler::observer::{CrawlEvent, CrawlObserver};
use crate::ScoutError;
use async_trait::async_trait;
use reqwest::Client;
use std::time::Duration;
use tokio_util::sync::CancellationToken;
use url::Url;

/// Per-crawl state shared with every fetch
pub struct FetchContext<'a> {
    /// Aborts pending attempts and backoff waits when cancelled
    pub cancel: &'a CancellationToken,

    /// Receives one event per failed attempt
    pub observer: &'a dyn CrawlObserver,
}

/// Retrieves document bodies by URL
#[async_trait]
pub trait DocumentFetcher: Send + Sync {
    /// Fetches `url` and returns the response body
    ///
    /// Implementations retry transient failures on their own; an error
    /// returned here is final for this URL.
    async fn fetch(&self, url: &Url, ctx: &FetchContext<'_>) -> Result<String, ScoutError>;
}

/// Timeouts and retry budget for an [`HttpFetcher`]
#[derive(Debug, Clone, PartialEq)]
pub struct FetchSettings {
    pub backoff: BackoffPolicy,
    /// Whole-request timeout, applied to every attempt
    pub request_timeout: Duration,
    pub connect_timeout: Duration,
}

impl FetchSettings {
    pub fn from_config(config: &FetchConfig) -> Self {
        Self {
            backoff: BackoffPolicy::from_config(config),
            request_timeout: Duration::from_millis(config.request_timeout_ms),
            connect_timeout: Duration::from_millis(config.connect_timeout_ms),
        }
    }
}

impl Default for FetchSettings {
    fn default() -> Self {
        Self::from_config(&FetchConfig::default())
    }
}

/// Builds an HTTP client with proper configuration
///
/// # Arguments
///
/// * `identity` - The User-Agent sent with every request of this session
/// * `settings` - Request and connect timeouts
///
/// # Returns
///
/// * `Ok(Client)` - Successfully built HTTP client
/// * `Err(reqwest::Error)` - Failed to build client
///
/// # Example
///
/// ```no_run
/// use quote_scout::crawler::{build_http_client, FetchSettings};
///
/// let client = build_http_client("TestAgent/1.0", &FetchSettings::default()).unwrap();
/// ```
pub fn build_http_client(identity: &str, settings: &FetchSettings) -> Result<Client, reqwest::Error> {
    Client::builder()
        .user_agent(identity)
        .timeout(settings.request_timeout)
        .connect_timeout(settings.connect_timeout)
        .gzip(true)
        .brotli(true)
        .build()
}

/// reqwest-backed fetcher holding one session identity
#[derive(Debug, Clone)]
pub struct HttpFetcher {
    client: Client,
    identity: String,
    backoff: BackoffPolicy,
}

impl HttpFetcher {
    /// Creates a fetcher whose identity is drawn at random from `pool`
    pub fn new(settings: FetchSettings, pool: &IdentityPool) -> Result<Self, ScoutError> {
        let identity = pool.pick_random().to_string();
        Self::with_identity(settings, identity)
    }

    /// Creates a fetcher with a pinned identity
    pub fn with_identity(
        settings: FetchSettings,
        identity: impl Into<String>,
    ) -> Result<Self, ScoutError> {
        let identity = identity.into();
        let client = build_http_client(&identity, &settings)?;
        tracing::debug!("HTTP session identity: {}", identity);

        Ok(Self {
            client,
            identity,
            backoff: settings.backoff,
        })
    }

    pub fn identity(&self) -> &str {
        &self.identity
    }

    /// Performs one GET; the error is a human-readable cause
    async fn attempt(&self, url: &Url) -> Result<String, String> {
        let response = self
            .client
            .get(url.clone())
            .send()
            .await
            .map_err(|e| describe_error(&e))?;

        let status = response.status();
        if !status.is_success() {
            return Err(format!("HTTP {}", status.as_u16()));
        }

        response.text().await.map_err(|e| describe_error(&e))
    }
}

#[async_trait]
impl DocumentFetcher for HttpFetcher {
    /// Fetches a URL with retry logic
    ///
    /// # Retry Logic
    ///
    /// | Condition | Action |
    /// |-----------|--------|
    /// | 2xx | Return body |
    /// | Any other status | Retry after backoff |
    /// | Timeout / connection error | Retry after backoff |
    /// | Non-HTTP(S) URL | Immediate → InvalidUrl |
    /// | Attempts exhausted | Fetch error with last cause |
    /// | Cancellation | Immediate → Cancelled |
    async fn fetch(&self, url: &Url, ctx: &FetchContext<'_>) -> Result<String, ScoutError> {
        if url.scheme() != "http" && url.scheme() != "https" {
            return Err(ScoutError::InvalidUrl(format!(
                "{} (only HTTP and HTTPS are supported)",
                url
            )));
        }

        let max_attempts = self.backoff.max_attempts();
        let mut attempt = 1;

        loop {
            if ctx.cancel.is_cancelled() {
                return Err(ScoutError::Cancelled {
                    url: url.to_string(),
                });
            }

            tracing::debug!("GET {} (attempt {}/{})", url, attempt, max_attempts);

            let result = tokio::select! {
                biased;
                _ = ctx.cancel.cancelled() => {
                    return Err(ScoutError::Cancelled { url: url.to_string() });
                }
                result = self.attempt(url) => result,
            };

            let cause = match result {
                Ok(body) => return Ok(body),
                Err(cause) => cause,
            };

            ctx.observer.on_event(&CrawlEvent::FetchAttemptFailed {
                url: url.to_string(),
                attempt,
                cause: cause.clone(),
            });

            if !self.backoff.should_retry(attempt) {
                return Err(ScoutError::Fetch {
                    url: url.to_string(),
                    cause,
                    attempts: attempt,
                });
            }

            let delay = self.backoff.delay_for(attempt);
            tracing::debug!("Retrying {} in {:?}", url, delay);

            tokio::select! {
                biased;
                _ = ctx.cancel.cancelled() => {
                    return Err(ScoutError::Cancelled { url: url.to_string() });
                }
                _ = tokio::time::sleep(delay) => {}
            }

            attempt += 1;
        }
    }
}

/// Classifies a transport error into a short cause
fn describe_error(error: &reqwest::Error) -> String {
    if error.is_timeout() {
        "Request timeout".to_string()
    } else if error.is_connect() {
        "Connection refused".to_string()
    } else if error.is_decode() || error.is_body() {
        format!("Failed to read body: {}", error)
    } else {
        error.to_string()
    }
}

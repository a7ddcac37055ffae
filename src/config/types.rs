use crate::crawler::identity::DEFAULT_IDENTITIES;
use serde::Deserialize;

/// Main configuration structure for Quote-Scout
///
/// Every section is optional in the TOML file; missing keys fall back to
/// the defaults below.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Config {
    pub crawler: CrawlerConfig,
    pub fetch: FetchConfig,
    #[serde(rename = "user-agent")]
    pub user_agent: UserAgentConfig,
    pub output: OutputConfig,
}

/// Crawl scope configuration
#[derive(Debug, Clone, Deserialize)]
#[serde(default, rename_all = "kebab-case")]
pub struct CrawlerConfig {
    /// Site root; list pages live at `{base-url}/page/{n}/`
    pub base_url: String,

    /// Number of list pages to crawl
    pub page_count: u32,

    /// Maximum number of author pages fetched at once
    pub max_concurrent_details: usize,
}

impl Default for CrawlerConfig {
    fn default() -> Self {
        Self {
            base_url: "https://quotes.toscrape.com".to_string(),
            page_count: 30,
            max_concurrent_details: 4,
        }
    }
}

/// Retry and timeout configuration for HTTP fetches
#[derive(Debug, Clone, Deserialize)]
#[serde(default, rename_all = "kebab-case")]
pub struct FetchConfig {
    /// Wait after the first failed attempt (milliseconds)
    pub initial_delay_ms: u64,

    /// Factor applied to the wait after each further failure
    pub backoff_multiplier: f64,

    /// Upper bound on any single wait (milliseconds)
    pub max_delay_ms: u64,

    /// Total attempts per URL, including the first
    pub max_attempts: u32,

    /// Per-request timeout (milliseconds)
    pub request_timeout_ms: u64,

    /// Connection establishment timeout (milliseconds)
    pub connect_timeout_ms: u64,
}

impl Default for FetchConfig {
    fn default() -> Self {
        Self {
            initial_delay_ms: 2_000,
            backoff_multiplier: 2.0,
            max_delay_ms: 10_000,
            max_attempts: 5,
            request_timeout_ms: 30_000,
            connect_timeout_ms: 10_000,
        }
    }
}

/// Client identity configuration
#[derive(Debug, Clone, Deserialize)]
#[serde(default, rename_all = "kebab-case")]
pub struct UserAgentConfig {
    /// User-Agent strings to pick the session identity from
    pub pool: Vec<String>,
}

impl Default for UserAgentConfig {
    fn default() -> Self {
        Self {
            pool: DEFAULT_IDENTITIES.iter().map(|s| s.to_string()).collect(),
        }
    }
}

/// Output configuration
#[derive(Debug, Clone, Deserialize)]
#[serde(default, rename_all = "kebab-case")]
pub struct OutputConfig {
    /// Path of the CSV file to write
    pub csv_path: String,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            csv_path: "quotes.csv".to_string(),
        }
    }
}

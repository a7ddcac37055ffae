//! Crawler module for quote fetching and enrichment
//!
//! This module contains the core crawling logic, including:
//! - HTTP fetching with retry and exponential backoff
//! - Session identity selection
//! - HTML parsing and quote/author extraction
//! - Overall crawl coordination and progress events

pub mod backoff;
mod coordinator;
mod document;
mod fetcher;
pub mod identity;
mod observer;
mod parser;
mod report;

pub use backoff::BackoffPolicy;
pub use coordinator::{Coordinator, DEFAULT_MAX_CONCURRENT_DETAILS};
pub use document::{collapse_whitespace, text_of, Document, Query};
pub use fetcher::{build_http_client, DocumentFetcher, FetchContext, FetchSettings, HttpFetcher};
pub use identity::IdentityPool;
pub use observer::{CrawlEvent, CrawlObserver, NoopObserver, RecordingObserver, TracingObserver};
pub use parser::{extract_detail, extract_list_page, parse_born_line};
pub use report::CrawlReport;

use crate::config::Config;
use crate::ScoutError;
use std::sync::Arc;
use tokio_util::sync::CancellationToken;

/// Runs a complete crawl operation from configuration
///
/// This is the main entry point for starting a crawl. It will:
/// 1. Build the identity pool and pick the session identity
/// 2. Build the HTTP fetcher with the configured backoff and timeouts
/// 3. Crawl `config.crawler.page_count` list pages
/// 4. Return the collected records with run statistics
///
/// # Arguments
///
/// * `config` - The crawler configuration
/// * `observer` - Receives progress and failure events
/// * `cancel` - Stops the crawl early when cancelled
///
/// # Returns
///
/// * `Ok(CrawlReport)` - Crawl ran (possibly with skipped pages or partial)
/// * `Err(ScoutError)` - Configuration or client setup failed before any work
pub async fn crawl(
    config: &Config,
    observer: Arc<dyn CrawlObserver>,
    cancel: &CancellationToken,
) -> Result<CrawlReport, ScoutError> {
    let pool = IdentityPool::new(config.user_agent.pool.clone())?;
    let fetcher = HttpFetcher::new(FetchSettings::from_config(&config.fetch), &pool)?;

    let coordinator = Coordinator::new(&config.crawler.base_url, fetcher, observer)?
        .with_max_concurrent_details(config.crawler.max_concurrent_details);

    Ok(coordinator.run(config.crawler.page_count, cancel).await)
}

//! Crawler coordinator - main crawl orchestration logic
//!
//! This module contains the crawl loop that coordinates:
//! - Walking list pages `1..=page_count` strictly in order
//! - Extracting quote stubs from each list page
//! - Enriching stubs from author pages with bounded concurrency
//! - Degrading failures to skipped pages or unenriched records
//! - Stopping early on cancellation with a partial report

use crate::config::validate_base_url;
use crate::crawler::document::Document;
use crate::crawler::fetcher::{DocumentFetcher, FetchContext};
use crate::crawler::observer::{CrawlEvent, CrawlObserver};
use crate::crawler::parser::{extract_detail, extract_list_page};
use crate::crawler::report::CrawlReport;
use crate::record::{Enrichment, Record, RecordStub};
use crate::url::{page_url, resolve_link};
use crate::{ConfigError, ScoutError};
use chrono::Utc;
use futures::stream::{self, StreamExt};
use std::sync::Arc;
use tokio_util::sync::CancellationToken;
use url::Url;

/// Default number of author pages fetched at once
pub const DEFAULT_MAX_CONCURRENT_DETAILS: usize = 4;

/// Main crawler coordinator structure
pub struct Coordinator<F> {
    fetcher: F,
    base_url: Url,
    max_concurrent_details: usize,
    observer: Arc<dyn CrawlObserver>,
}

impl<F: DocumentFetcher> Coordinator<F> {
    /// Creates a new coordinator instance
    ///
    /// # Arguments
    ///
    /// * `base_url` - Site root used for list pages and author links
    /// * `fetcher` - Fetcher used for every request
    /// * `observer` - Receives progress and failure events
    ///
    /// # Returns
    ///
    /// * `Ok(Coordinator)` - Successfully created coordinator
    /// * `Err(ConfigError)` - The base URL is not an absolute HTTP(S) URL
    pub fn new(
        base_url: &str,
        fetcher: F,
        observer: Arc<dyn CrawlObserver>,
    ) -> Result<Self, ConfigError> {
        let base_url = validate_base_url(base_url)?;

        Ok(Self {
            fetcher,
            base_url,
            max_concurrent_details: DEFAULT_MAX_CONCURRENT_DETAILS,
            observer,
        })
    }

    /// Sets how many author pages may be in flight at once (at least 1)
    pub fn with_max_concurrent_details(mut self, limit: usize) -> Self {
        self.max_concurrent_details = limit.max(1);
        self
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// Runs the crawl over list pages `1..=page_count`
    ///
    /// Fetch and parse failures never abort the run: a failed list page is
    /// skipped and a failed author page leaves its record unenriched. When
    /// `cancel` fires, the records gathered so far are returned and the
    /// report is marked partial.
    pub async fn run(&self, page_count: u32, cancel: &CancellationToken) -> CrawlReport {
        let mut report = CrawlReport::new(page_count);
        let ctx = FetchContext {
            cancel,
            observer: self.observer.as_ref(),
        };

        tracing::info!("Scraping quotes from {} ({} pages)...", self.base_url, page_count);

        for page in 1..=page_count {
            if cancel.is_cancelled() {
                tracing::info!("Crawl cancelled before page {}", page);
                report.partial = true;
                break;
            }

            let url = match page_url(&self.base_url, page) {
                Ok(url) => url,
                Err(e) => {
                    self.page_failed(&mut report, page, &self.base_url, &e);
                    continue;
                }
            };

            match self.fetch_list_page(&url, &ctx).await {
                Ok(stubs) => {
                    tracing::debug!("Page {}: {} quote entries", page, stubs.len());
                    let outcomes = self.enrich_all(stubs, &ctx).await;

                    for (record, detail_failed) in outcomes {
                        if detail_failed {
                            report.details_failed += 1;
                        }
                        report.records.push(record);
                    }

                    report.pages_completed += 1;
                    self.observer.on_event(&CrawlEvent::PageCompleted {
                        page_number: page,
                        records_so_far: report.records.len(),
                    });
                }
                Err(e) if e.is_cancelled() => {
                    tracing::info!("Crawl cancelled while fetching page {}", page);
                    report.partial = true;
                    break;
                }
                Err(e) => self.page_failed(&mut report, page, &url, &e),
            }

            if cancel.is_cancelled() {
                report.partial = true;
                break;
            }
        }

        report.finished_at = Utc::now();

        tracing::info!(
            "Crawl finished: {} quotes from {}/{} pages ({} pages failed, {} without author details){}",
            report.records.len(),
            report.pages_completed,
            page_count,
            report.pages_failed.len(),
            report.details_failed,
            if report.partial { " [partial]" } else { "" }
        );

        report
    }

    /// Fetches and parses one list page
    async fn fetch_list_page(
        &self,
        url: &Url,
        ctx: &FetchContext<'_>,
    ) -> Result<Vec<RecordStub>, ScoutError> {
        let body = self.fetcher.fetch(url, ctx).await?;
        let document = Document::parse(url.as_str(), &body)?;
        Ok(extract_list_page(document.html()))
    }

    /// Enriches every stub, keeping input order regardless of completion order
    async fn enrich_all(
        &self,
        stubs: Vec<RecordStub>,
        ctx: &FetchContext<'_>,
    ) -> Vec<(Record, bool)> {
        stream::iter(stubs)
            .map(|stub| self.enrich(stub, ctx))
            .buffered(self.max_concurrent_details)
            .collect()
            .await
    }

    /// Merges a stub with its author details
    ///
    /// The flag is true when the author page was attempted and failed.
    async fn enrich(&self, stub: RecordStub, ctx: &FetchContext<'_>) -> (Record, bool) {
        if !stub.has_detail_link() {
            return (stub.into_record(Enrichment::default()), false);
        }

        match self.fetch_detail(&stub.detail_link, ctx).await {
            Ok(enrichment) => (stub.into_record(enrichment), false),
            Err(e) if e.is_cancelled() => (stub.into_record(Enrichment::default()), false),
            Err(e) => {
                self.observer.on_event(&CrawlEvent::DetailFailed {
                    url: stub.detail_link.clone(),
                    author: stub.author.clone(),
                    cause: e.to_string(),
                });
                (stub.into_record(Enrichment::default()), true)
            }
        }
    }

    /// Resolves, fetches and parses one author page
    async fn fetch_detail(
        &self,
        link: &str,
        ctx: &FetchContext<'_>,
    ) -> Result<Enrichment, ScoutError> {
        let url = resolve_link(link, &self.base_url).ok_or_else(|| {
            ScoutError::InvalidUrl(format!("Cannot resolve author link '{}'", link))
        })?;

        let body = self.fetcher.fetch(&url, ctx).await?;
        let document = Document::parse(url.as_str(), &body)?;
        Ok(extract_detail(document.html()))
    }

    fn page_failed(&self, report: &mut CrawlReport, page: u32, url: &Url, error: &ScoutError) {
        report.pages_failed.push(page);
        self.observer.on_event(&CrawlEvent::PageFailed {
            page_number: page,
            url: url.to_string(),
            cause: error.to_string(),
        });
    }
}

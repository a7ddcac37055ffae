//! Progress events emitted during a crawl
//!
//! The coordinator and fetcher report what happens through a
//! [`CrawlObserver`]; rendering is up to the observer.

use std::sync::{Mutex, PoisonError};

/// Something noteworthy that happened during a crawl
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CrawlEvent {
    /// A list page and all of its author pages were processed
    PageCompleted {
        page_number: u32,
        records_so_far: usize,
    },

    /// A list page was skipped after its fetch or parse failed
    PageFailed {
        page_number: u32,
        url: String,
        cause: String,
    },

    /// A single HTTP attempt failed; a retry may follow
    FetchAttemptFailed {
        url: String,
        attempt: u32,
        cause: String,
    },

    /// An author page could not be used; the record is kept without enrichment
    DetailFailed {
        url: String,
        author: String,
        cause: String,
    },
}

/// Receives crawl events
pub trait CrawlObserver: Send + Sync {
    fn on_event(&self, event: &CrawlEvent);
}

/// Renders events as log lines
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingObserver;

impl CrawlObserver for TracingObserver {
    fn on_event(&self, event: &CrawlEvent) {
        match event {
            CrawlEvent::PageCompleted {
                page_number,
                records_so_far,
            } => {
                tracing::info!(
                    "Page {} scraped. Quotes found: {}",
                    page_number,
                    records_so_far
                );
            }
            CrawlEvent::PageFailed {
                page_number,
                url,
                cause,
            } => {
                tracing::warn!("Skipping page {} ({}): {}", page_number, url, cause);
            }
            CrawlEvent::FetchAttemptFailed {
                url,
                attempt,
                cause,
            } => {
                tracing::debug!("Attempt {} for {} failed: {}", attempt, url, cause);
            }
            CrawlEvent::DetailFailed { url, author, cause } => {
                tracing::warn!(
                    "No author details for {} ({}): {}",
                    author,
                    url,
                    cause
                );
            }
        }
    }
}

/// Keeps every event in memory, in arrival order
#[derive(Debug, Default)]
pub struct RecordingObserver {
    events: Mutex<Vec<CrawlEvent>>,
}

impl RecordingObserver {
    pub fn new() -> Self {
        Self::default()
    }

    /// Snapshot of all events received so far
    pub fn events(&self) -> Vec<CrawlEvent> {
        self.events
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// Page numbers of all `PageFailed` events
    pub fn failed_pages(&self) -> Vec<u32> {
        self.events()
            .into_iter()
            .filter_map(|e| match e {
                CrawlEvent::PageFailed { page_number, .. } => Some(page_number),
                _ => None,
            })
            .collect()
    }

    /// Number of `FetchAttemptFailed` events
    pub fn attempt_failures(&self) -> usize {
        self.events()
            .iter()
            .filter(|e| matches!(e, CrawlEvent::FetchAttemptFailed { .. }))
            .count()
    }
}

impl CrawlObserver for RecordingObserver {
    fn on_event(&self, event: &CrawlEvent) {
        self.events
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(event.clone());
    }
}

/// Discards every event
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopObserver;

impl CrawlObserver for NoopObserver {
    fn on_event(&self, _event: &CrawlEvent) {}
}

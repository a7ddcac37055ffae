use crate::record::Record;
use chrono::{DateTime, Utc};

/// Outcome of a crawl run
#[derive(Debug, Clone)]
pub struct CrawlReport {
    /// Records in (page, in-page) order
    pub records: Vec<Record>,

    /// Number of list pages the caller asked for
    pub pages_requested: u32,

    /// List pages fetched and processed
    pub pages_completed: u32,

    /// List pages skipped after their fetch or parse failed
    pub pages_failed: Vec<u32>,

    /// Records emitted without enrichment because their author page failed
    pub details_failed: usize,

    /// True when the run stopped early on cancellation
    pub partial: bool,

    pub started_at: DateTime<Utc>,
    pub finished_at: DateTime<Utc>,
}

impl CrawlReport {
    pub(crate) fn new(pages_requested: u32) -> Self {
        let now = Utc::now();
        Self {
            records: Vec::new(),
            pages_requested,
            pages_completed: 0,
            pages_failed: Vec::new(),
            details_failed: 0,
            partial: false,
            started_at: now,
            finished_at: now,
        }
    }

    /// Number of records collected
    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Wall-clock duration of the run in whole seconds
    pub fn duration_seconds(&self) -> i64 {
        (self.finished_at - self.started_at).num_seconds()
    }
}

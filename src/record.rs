//! Record types produced by the crawl pipeline
//!
//! A [`RecordStub`] is what the list page offers; an [`Enrichment`] is what
//! the author page adds. Merging the two yields the final [`Record`].

use serde::{Deserialize, Serialize};

/// A fully merged quote record, one CSV row
///
/// Every field is always present; unresolved enrichment is an empty string
/// so the output has a stable column set.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Record {
    /// The quoted text
    pub text: String,

    /// Author display name
    pub author: String,

    /// Link to the author page, exactly as found on the list page
    pub detail_link: String,

    /// Author birth date
    pub birth_date: String,

    /// Author birthplace
    pub birth_place: String,

    /// Author description
    pub description: String,
}

/// A quote extracted from a list page, before enrichment
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecordStub {
    pub text: String,
    pub author: String,
    /// Empty when the entry has no author link
    pub detail_link: String,
}

impl RecordStub {
    /// Returns true if this stub has a link worth fetching
    pub fn has_detail_link(&self) -> bool {
        !self.detail_link.trim().is_empty()
    }

    /// Consumes the stub and merges it with enrichment into a record
    pub fn into_record(self, enrichment: Enrichment) -> Record {
        Record {
            text: self.text,
            author: self.author,
            detail_link: self.detail_link,
            birth_date: enrichment.birth_date.unwrap_or_default(),
            birth_place: enrichment.birth_place.unwrap_or_default(),
            description: enrichment.description.unwrap_or_default(),
        }
    }
}

/// Author details scraped from a detail page
///
/// Any subset of fields may be absent.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Enrichment {
    pub birth_date: Option<String>,
    pub birth_place: Option<String>,
    pub description: Option<String>,
}

impl Enrichment {
    /// Returns true if no field was resolved
    pub fn is_empty(&self) -> bool {
        self.birth_date.is_none() && self.birth_place.is_none() && self.description.is_none()
    }
}

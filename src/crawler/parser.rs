//! Extractors for list pages and author pages
//!
//! This module turns parsed documents into:
//! - quote stubs (from list pages)
//! - author enrichment (from detail pages)
//!
//! Missing elements are never errors: a list entry without text or author is
//! dropped, and absent author details stay empty.

use crate::crawler::document::Query;
use crate::record::{Enrichment, RecordStub};
use lazy_static::lazy_static;
use scraper::Selector;

const E: &str = "Invalid selector";
lazy_static! {
    static ref QUOTE: Selector = Selector::parse("div.quote").expect(E);
    static ref QUOTE_TEXT: Selector = Selector::parse("span.text").expect(E);
    static ref QUOTE_AUTHOR: Selector = Selector::parse("small.author").expect(E);
    static ref AUTHOR_LINK: Selector = Selector::parse("span a").expect(E);
    static ref PARAGRAPH: Selector = Selector::parse("p").expect(E);
    static ref AUTHOR_DESCRIPTION: Selector = Selector::parse("div.author-description").expect(E);
}

/// Label that introduces the birth line on an author page
const BORN_LABEL: &str = "Born:";

/// Separates birth date from birthplace on the birth line
const PLACE_SEPARATOR: &str = " in ";

/// Extracts quote stubs from a list page, in document order
///
/// # Entry Rules
///
/// | Element | Selector | When missing |
/// |---------|----------|--------------|
/// | entry | `div.quote` | no stubs |
/// | text | `span.text` | entry dropped |
/// | author | `small.author` | entry dropped |
/// | detail link | `href` of `span a` | empty string |
///
/// # Example
///
/// ```
/// use quote_scout::crawler::extract_list_page;
/// use scraper::Html;
///
/// let html = Html::parse_document(r#"
///     <div class="quote">
///         <span class="text">“Quote”</span>
///         <span>by <small class="author">Someone</small> <a href="/author/Someone">(about)</a></span>
///     </div>"#);
/// let stubs = extract_list_page(&html);
/// assert_eq!(stubs.len(), 1);
/// assert_eq!(stubs[0].detail_link, "/author/Someone");
/// ```
pub fn extract_list_page<Q: Query>(doc: &Q) -> Vec<RecordStub> {
    let mut stubs = Vec::new();

    for entry in doc.select_all(&QUOTE) {
        let text = entry.first_text(&QUOTE_TEXT);
        let author = entry.first_text(&QUOTE_AUTHOR);

        let (text, author) = match (text, author) {
            (Some(text), Some(author)) => (text, author),
            (text, author) => {
                tracing::debug!(
                    "Dropping quote entry (text present: {}, author present: {})",
                    text.is_some(),
                    author.is_some()
                );
                continue;
            }
        };

        let detail_link = entry.first_attr(&AUTHOR_LINK, "href").unwrap_or_default();

        stubs.push(RecordStub {
            text,
            author,
            detail_link,
        });
    }

    stubs
}

/// Extracts author details from a detail page
///
/// Each field is independently optional; this never fails.
pub fn extract_detail<Q: Query>(doc: &Q) -> Enrichment {
    let (birth_date, birth_place) = match doc.find_text(&PARAGRAPH, BORN_LABEL) {
        Some(line) => parse_born_line(&line),
        None => (None, None),
    };

    let description = doc.first_text(&AUTHOR_DESCRIPTION);

    Enrichment {
        birth_date,
        birth_place,
        description,
    }
}

/// Splits a birth line into `(birth date, birthplace)`
///
/// Everything after the first `:` is the remainder. If the remainder
/// contains `" in "`, the text before it is the date and the text after it
/// the place; otherwise the whole remainder is the date. Blank pieces are
/// reported as absent.
///
/// # Examples
///
/// ```
/// use quote_scout::crawler::parse_born_line;
///
/// let (date, place) = parse_born_line("Born: September 16, 1977 in New York City");
/// assert_eq!(date.as_deref(), Some("September 16, 1977"));
/// assert_eq!(place.as_deref(), Some("New York City"));
///
/// let (date, place) = parse_born_line("Born: 1977");
/// assert_eq!(date.as_deref(), Some("1977"));
/// assert_eq!(place, None);
/// ```
pub fn parse_born_line(line: &str) -> (Option<String>, Option<String>) {
    let remainder = match line.split_once(':') {
        Some((_, rest)) => rest,
        None => return (None, None),
    };

    let non_blank = |s: &str| {
        let s = s.trim();
        if s.is_empty() {
            None
        } else {
            Some(s.to_string())
        }
    };

    match remainder.split_once(PLACE_SEPARATOR) {
        Some((date, place)) => (non_blank(date), non_blank(place)),
        None => (non_blank(remainder), None),
    }
}

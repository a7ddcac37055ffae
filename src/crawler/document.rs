//! Parsed documents and the structural queries the extractors rely on

use crate::ScoutError;
use scraper::{ElementRef, Html, Selector};

/// A fetched body that has been accepted as markup
#[derive(Debug)]
pub struct Document {
    html: Html,
}

impl Document {
    /// Parses a response body
    ///
    /// HTML parsing itself is error tolerant, so a body is only rejected
    /// when it is blank or contains no markup at all.
    pub fn parse(url: &str, body: &str) -> Result<Self, ScoutError> {
        if body.trim().is_empty() {
            return Err(ScoutError::Parse {
                url: url.to_string(),
                message: "empty document".to_string(),
            });
        }

        if !body.contains('<') {
            return Err(ScoutError::Parse {
                url: url.to_string(),
                message: "no markup found in response body".to_string(),
            });
        }

        Ok(Self {
            html: Html::parse_document(body),
        })
    }

    pub fn html(&self) -> &Html {
        &self.html
    }
}

/// Structural lookups over a document or one of its elements
pub trait Query {
    /// All elements matching `selector`, in document order
    fn select_all<'a>(&'a self, selector: &Selector) -> Vec<ElementRef<'a>>;

    /// Trimmed text of the first match; None if missing or blank
    fn first_text(&self, selector: &Selector) -> Option<String> {
        self.select_all(selector)
            .into_iter()
            .next()
            .map(|el| text_of(&el).trim().to_string())
            .filter(|s| !s.is_empty())
    }

    /// Trimmed attribute value of the first match carrying `attr`
    fn first_attr(&self, selector: &Selector, attr: &str) -> Option<String> {
        self.select_all(selector)
            .into_iter()
            .find_map(|el| el.value().attr(attr).map(|v| v.trim().to_string()))
    }

    /// Whitespace-collapsed text of the first match containing `needle`
    fn find_text(&self, selector: &Selector, needle: &str) -> Option<String> {
        self.select_all(selector)
            .into_iter()
            .map(|el| collapse_whitespace(&text_of(&el)))
            .find(|text| text.contains(needle))
    }
}

impl Query for Html {
    fn select_all<'a>(&'a self, selector: &Selector) -> Vec<ElementRef<'a>> {
        self.select(selector).collect()
    }
}

impl<'e> Query for ElementRef<'e> {
    fn select_all<'a>(&'a self, selector: &Selector) -> Vec<ElementRef<'a>> {
        self.select(selector).collect::<Vec<ElementRef<'e>>>()
    }
}

/// Concatenated text of an element and its descendants
pub fn text_of(element: &ElementRef<'_>) -> String {
    element.text().collect::<String>()
}

/// Collapses every whitespace run to a single space and trims the ends
pub fn collapse_whitespace(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}

//! URL handling for Quote-Scout
//!
//! List page URLs are built from a fixed template and author links are
//! resolved against the site root.

use crate::ScoutError;
use url::Url;

/// Builds the URL of list page `page` following the `{base}/page/{n}/` template
///
/// # Examples
///
/// ```
/// use quote_scout::url::page_url;
/// use url::Url;
///
/// let base = Url::parse("https://quotes.toscrape.com/").unwrap();
/// let url = page_url(&base, 2).unwrap();
/// assert_eq!(url.as_str(), "https://quotes.toscrape.com/page/2/");
/// ```
pub fn page_url(base_url: &Url, page: u32) -> Result<Url, ScoutError> {
    let root = base_url.as_str().trim_end_matches('/');
    let raw = format!("{}/page/{}/", root, page);
    Url::parse(&raw).map_err(|e| ScoutError::InvalidUrl(format!("{}: {}", raw, e)))
}

/// Resolves an href to an absolute URL and validates it
///
/// Returns None if the link should not be followed:
/// - empty hrefs
/// - javascript:, mailto:, tel: schemes
/// - data: URIs
/// - fragment-only links
/// - Invalid URLs
/// - Non-HTTP(S) URLs after resolution
pub fn resolve_link(href: &str, base_url: &Url) -> Option<Url> {
    let href = href.trim();

    // Skip empty hrefs
    if href.is_empty() {
        return None;
    }

    // Skip special schemes
    if href.starts_with("javascript:")
        || href.starts_with("mailto:")
        || href.starts_with("tel:")
        || href.starts_with("data:")
    {
        return None;
    }

    // Skip fragment-only links (same page anchors)
    if href.starts_with('#') {
        return None;
    }

    match base_url.join(href) {
        Ok(absolute_url) => {
            // Only accept HTTP and HTTPS URLs
            if absolute_url.scheme() == "http" || absolute_url.scheme() == "https" {
                Some(absolute_url)
            } else {
                None
            }
        }
        Err(_) => None,
    }
}

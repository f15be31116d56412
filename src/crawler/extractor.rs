//! Link extraction from page markup
//!
//! Extraction is deliberately shallow: every `href` and `src` attribute
//! value is reported in document order, without deduplication or filtering.
//! Scope filtering and dedup are the normalizer's and scheduler's job.

use scraper::{Html, Selector};

/// Extracts every candidate hyperlink string from a page body
///
/// Returns the raw attribute values of all `href="..."` and `src="..."`
/// attributes, in document order. Malformed markup never errors; the
/// parser recovers and extraction is best effort.
pub fn extract_links(body: &str) -> Vec<String> {
    let document = Html::parse_document(body);
    let mut links = Vec::new();

    if let Ok(selector) = Selector::parse("[href], [src]") {
        for element in document.select(&selector) {
            let value = element
                .value()
                .attr("href")
                .or_else(|| element.value().attr("src"));
            if let Some(value) = value {
                links.push(value.to_string());
            }
        }
    }

    links
}

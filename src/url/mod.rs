//! URL handling module for Sitegraph
//!
//! This module provides hyperlink normalization against a base domain,
//! page/asset classification, and helpers for the crawl's root URL.

mod classify;
mod normalize;

pub use classify::classify;
pub use normalize::normalize_link;

use crate::CrawlError;

/// Builds the root URL the crawl is seeded with
pub fn root_url(base_domain: &str) -> String {
    format!("http://{}", base_domain)
}

/// Cleans up a user-supplied domain argument
///
/// Accepts forms like `example.com`, `http://example.com` or
/// `https://example.com/` and reduces them to the bare domain used for
/// scope checks.
///
/// # Errors
///
/// Returns `CrawlError::InvalidDomain` if the remainder is empty or still
/// contains a path component.
pub fn sanitize_domain(input: &str) -> crate::Result<String> {
    let mut domain = input.trim();

    for prefix in ["http://", "https://"] {
        if let Some(rest) = domain.strip_prefix(prefix) {
            domain = rest;
            break;
        }
    }

    let domain = domain.trim_end_matches('/');

    if domain.is_empty() {
        return Err(CrawlError::InvalidDomain(
            "domain must not be empty".to_string(),
        ));
    }

    if domain.contains('/') {
        return Err(CrawlError::InvalidDomain(format!(
            "domain must not contain a path, got '{}'",
            input
        )));
    }

    Ok(domain.to_string())
}

//! Crawler module: fetching, extraction, and traversal
//!
//! This module contains the concurrent traversal engine and its
//! collaborators:
//! - HTTP fetching behind the [`Fetcher`] seam
//! - Raw link extraction from page markup
//! - The claim-driven scheduler and its termination accounting

mod extractor;
mod fetcher;
mod scheduler;

pub use extractor::extract_links;
pub use fetcher::{build_http_client, Fetcher, HttpFetcher};
pub use scheduler::{CancelToken, CrawlReport, RunOutcome, Scheduler};

use crate::config::Config;

/// Runs a complete crawl of one site
///
/// Builds the HTTP fetcher from the configuration, seeds the traversal at
/// `http://{domain}` and runs it to termination.
///
/// # Arguments
///
/// * `config` - The crawler configuration
/// * `domain` - The target domain (scheme and trailing slash tolerated)
///
/// # Returns
///
/// * `Ok(CrawlReport)` - The discovered graph and how the run ended
/// * `Err(CrawlError)` - Invalid domain or HTTP client construction failure
pub async fn crawl(config: &Config, domain: &str) -> crate::Result<CrawlReport> {
    let base_domain = crate::url::sanitize_domain(domain)?;
    let fetcher = HttpFetcher::new(&config.crawler)?;
    let scheduler = Scheduler::new(config.crawler.clone(), base_domain, fetcher);
    Ok(scheduler.run().await)
}

//! HTTP fetcher implementation
//!
//! This module defines the fetch seam the scheduler works against and the
//! production `reqwest` implementation:
//! - Building an HTTP client with a proper user agent and timeouts
//! - GET requests for page bodies
//! - Error classification (timeout vs transport vs status)

use crate::config::CrawlerConfig;
use crate::CrawlError;
use reqwest::Client;
use std::future::Future;
use std::time::Duration;

/// Retrieves the body of a URL
///
/// The scheduler is generic over this trait so tests can substitute an
/// in-memory page index and count invocations per URL. Implementations must
/// be shareable across worker tasks.
pub trait Fetcher: Send + Sync + 'static {
    /// Fetches the body of `url`
    ///
    /// Any error returned here is non-fatal to the run: the scheduler
    /// finalizes the page with no children and moves on.
    fn fetch(&self, url: &str) -> impl Future<Output = crate::Result<String>> + Send;
}

/// Builds an HTTP client configured from the crawler settings
///
/// The per-fetch timeout comes from `fetch-timeout-ms`; the user agent is
/// the crate name and version.
pub fn build_http_client(config: &CrawlerConfig) -> Result<Client, reqwest::Error> {
    let user_agent = format!("{}/{}", env!("CARGO_PKG_NAME"), env!("CARGO_PKG_VERSION"));

    Client::builder()
        .user_agent(user_agent)
        .timeout(Duration::from_millis(config.fetch_timeout_ms))
        .connect_timeout(Duration::from_secs(10))
        .gzip(true)
        .brotli(true)
        .build()
}

/// Production fetcher backed by `reqwest`
#[derive(Debug, Clone)]
pub struct HttpFetcher {
    client: Client,
}

impl HttpFetcher {
    /// Creates a fetcher from crawler configuration
    pub fn new(config: &CrawlerConfig) -> Result<Self, reqwest::Error> {
        Ok(Self {
            client: build_http_client(config)?,
        })
    }
}

impl Fetcher for HttpFetcher {
    fn fetch(&self, url: &str) -> impl Future<Output = crate::Result<String>> + Send {
        async move {
            let response = self
                .client
                .get(url)
                .send()
                .await
                .map_err(|e| classify_reqwest_error(url, e))?;

            let status = response.status();
            if !status.is_success() {
                return Err(CrawlError::HttpStatus {
                    url: url.to_string(),
                    status: status.as_u16(),
                });
            }

            response
                .text()
                .await
                .map_err(|e| classify_reqwest_error(url, e))
        }
    }
}

fn classify_reqwest_error(url: &str, source: reqwest::Error) -> CrawlError {
    if source.is_timeout() {
        CrawlError::Timeout {
            url: url.to_string(),
        }
    } else {
        CrawlError::Http {
            url: url.to_string(),
            source,
        }
    }
}

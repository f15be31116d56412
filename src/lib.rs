//! Sitegraph: a single-site link graph mapper
//!
//! This crate crawls one website starting from a root page, discovering every
//! reachable same-site resource (pages and static assets) exactly once and
//! recording the link graph between them. Many fetches run concurrently; an
//! atomic claim registry guarantees no URL is ever fetched twice.

pub mod config;
pub mod crawler;
pub mod output;
pub mod registry;
pub mod url;

use thiserror::Error;

/// Main error type for Sitegraph operations
#[derive(Debug, Error)]
pub enum CrawlError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("HTTP error for {url}: {source}")]
    Http { url: String, source: reqwest::Error },

    #[error("Request timeout for {url}")]
    Timeout { url: String },

    #[error("HTTP status {status} for {url}")]
    HttpStatus { url: String, status: u16 },

    #[error("Invalid domain: {0}")]
    InvalidDomain(String),

    #[error("URL parse error: {0}")]
    UrlParse(#[from] ::url::ParseError),

    #[error("HTTP client error: {0}")]
    Reqwest(#[from] reqwest::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl CrawlError {
    /// Returns true if a retry could plausibly succeed.
    ///
    /// Timeouts and 5xx responses are treated as transient; everything else
    /// (4xx, connection refused, TLS failures) fails immediately.
    pub fn is_transient(&self) -> bool {
        match self {
            Self::Timeout { .. } => true,
            Self::HttpStatus { status, .. } => *status >= 500,
            _ => false,
        }
    }
}

/// Configuration-specific errors
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to parse TOML: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Validation error: {0}")]
    Validation(String),
}

/// Result type alias for Sitegraph operations
pub type Result<T> = std::result::Result<T, CrawlError>;

/// Result type alias for configuration operations
pub type ConfigResult<T> = std::result::Result<T, ConfigError>;

// Re-export commonly used types
pub use config::Config;
pub use crawler::{CancelToken, CrawlReport, RunOutcome, Scheduler};
pub use registry::{Registry, Resource, ResourceKind};
pub use url::{classify, normalize_link};

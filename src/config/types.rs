use serde::Deserialize;

/// Main configuration structure for Sitegraph
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub crawler: CrawlerConfig,
}

/// Crawler behavior configuration
#[derive(Debug, Clone, Deserialize)]
pub struct CrawlerConfig {
    /// Maximum number of concurrent in-flight fetches
    #[serde(rename = "max-concurrent-fetches", default = "default_max_concurrent")]
    pub max_concurrent_fetches: u32,

    /// Timeout for a single fetch (milliseconds)
    #[serde(rename = "fetch-timeout-ms", default = "default_fetch_timeout")]
    pub fetch_timeout_ms: u64,

    /// Overall run timeout in milliseconds; 0 means unbounded
    #[serde(rename = "run-timeout-ms", default)]
    pub run_timeout_ms: u64,

    /// Number of retries for transient fetch failures
    #[serde(rename = "retry-count", default)]
    pub retry_count: u32,
}

fn default_max_concurrent() -> u32 {
    16
}

fn default_fetch_timeout() -> u64 {
    10_000
}

impl Default for CrawlerConfig {
    fn default() -> Self {
        Self {
            max_concurrent_fetches: default_max_concurrent(),
            fetch_timeout_ms: default_fetch_timeout(),
            run_timeout_ms: 0,
            retry_count: 0,
        }
    }
}

use crate::config::types::{Config, CrawlerConfig};
use crate::ConfigError;

/// Validates the entire configuration
pub fn validate(config: &Config) -> Result<(), ConfigError> {
    validate_crawler_config(&config.crawler)
}

/// Validates crawler configuration
fn validate_crawler_config(config: &CrawlerConfig) -> Result<(), ConfigError> {
    if config.max_concurrent_fetches < 1 || config.max_concurrent_fetches > 1024 {
        return Err(ConfigError::Validation(format!(
            "max-concurrent-fetches must be between 1 and 1024, got {}",
            config.max_concurrent_fetches
        )));
    }

    if config.fetch_timeout_ms < 1 {
        return Err(ConfigError::Validation(
            "fetch-timeout-ms must be >= 1".to_string(),
        ));
    }

    if config.retry_count > 10 {
        return Err(ConfigError::Validation(format!(
            "retry-count must be <= 10, got {}",
            config.retry_count
        )));
    }

    Ok(())
}

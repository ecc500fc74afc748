use crate::config::types::{CacheConfig, Config, CrawlerConfig, FetchConfig};
use crate::ConfigError;
use url::Url;

/// Validates the entire configuration
pub fn validate(config: &Config) -> Result<(), ConfigError> {
    validate_crawler_config(&config.crawler)?;
    validate_fetch_config(&config.fetch)?;
    validate_cache_config(&config.cache)?;
    Ok(())
}

/// Validates traversal configuration
fn validate_crawler_config(config: &CrawlerConfig) -> Result<(), ConfigError> {
    if config.concurrency < 1 {
        return Err(ConfigError::Validation(format!(
            "concurrency must be a positive integer, got {}",
            config.concurrency
        )));
    }

    if config.user_agent.is_empty() {
        return Err(ConfigError::Validation(
            "user-agent cannot be empty".to_string(),
        ));
    }

    if let Some(max_pages) = config.max_pages {
        if max_pages < 1 {
            return Err(ConfigError::Validation(format!(
                "max-pages must be >= 1 when set, got {}",
                max_pages
            )));
        }
    }

    Ok(())
}

/// Validates fetch configuration
fn validate_fetch_config(config: &FetchConfig) -> Result<(), ConfigError> {
    if config.timeout_ms < 1 {
        return Err(ConfigError::Validation(format!(
            "fetch timeout-ms must be >= 1, got {}",
            config.timeout_ms
        )));
    }

    Ok(())
}

/// Validates cache configuration
fn validate_cache_config(config: &CacheConfig) -> Result<(), ConfigError> {
    if let Some(url) = &config.url {
        let parsed = Url::parse(url)
            .map_err(|e| ConfigError::Validation(format!("Invalid cache url '{}': {}", url, e)))?;

        if parsed.scheme() != "redis" && parsed.scheme() != "rediss" {
            return Err(ConfigError::Validation(format!(
                "cache url must use the redis:// or rediss:// scheme, got '{}'",
                parsed.scheme()
            )));
        }
    }

    Ok(())
}

/// Validates a seed URL
///
/// The seed must parse and must use the http or https scheme; anything else
/// is a configuration error surfaced before any crawl work starts.
pub fn validate_seed_url(seed: &str) -> Result<Url, ConfigError> {
    let url = Url::parse(seed).map_err(|e| ConfigError::InvalidSeed {
        url: seed.to_string(),
        message: e.to_string(),
    })?;

    if url.scheme() != "http" && url.scheme() != "https" {
        return Err(ConfigError::InvalidSeed {
            url: seed.to_string(),
            message: format!("scheme must be \"http\" or \"https\", got \"{}\"", url.scheme()),
        });
    }

    if url.host_str().is_none() {
        return Err(ConfigError::InvalidSeed {
            url: seed.to_string(),
            message: "URL has no host".to_string(),
        });
    }

    Ok(url)
}

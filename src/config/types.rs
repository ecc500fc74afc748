use serde::Deserialize;

/// Main configuration structure for Contact-Scout
///
/// Every field has a default matching the crawler's documented behavior, so a
/// crawl can run without a config file at all.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct Config {
    pub crawler: CrawlerConfig,
    pub fetch: FetchConfig,
    pub render: RenderConfig,
    pub cache: CacheConfig,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            crawler: CrawlerConfig::default(),
            fetch: FetchConfig::default(),
            render: RenderConfig::default(),
            cache: CacheConfig::default(),
        }
    }
}

/// Traversal behavior configuration
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct CrawlerConfig {
    /// Maximum number of concurrently in-flight page fetches
    pub concurrency: u32,

    /// Fixed pause between dispatch batches (milliseconds)
    #[serde(rename = "batch-delay-ms")]
    pub batch_delay_ms: u64,

    /// Hard cap on the number of pages dispatched in one crawl
    #[serde(rename = "max-pages")]
    pub max_pages: Option<u32>,

    /// User-agent token sent with every request and matched against robots.txt
    #[serde(rename = "user-agent")]
    pub user_agent: String,
}

impl Default for CrawlerConfig {
    fn default() -> Self {
        Self {
            concurrency: 5,
            batch_delay_ms: 1000,
            max_pages: None,
            user_agent: "AggressiveCrawler".to_string(),
        }
    }
}

/// Fetch resilience configuration
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct FetchConfig {
    /// Request timeout (milliseconds)
    #[serde(rename = "timeout-ms")]
    pub timeout_ms: u64,

    /// Number of retries after the initial attempt
    pub retries: u32,

    /// Base retry delay; attempt N waits N times this long (milliseconds)
    #[serde(rename = "retry-delay-ms")]
    pub retry_delay_ms: u64,
}

impl Default for FetchConfig {
    fn default() -> Self {
        Self {
            timeout_ms: 10_000,
            retries: 3,
            retry_delay_ms: 1000,
        }
    }
}

/// Headless render fallback configuration
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct RenderConfig {
    /// Whether the render fallback is attempted at all
    pub enabled: bool,

    /// Total budget for a single render, launch included (milliseconds)
    #[serde(rename = "timeout-ms")]
    pub timeout_ms: u64,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            timeout_ms: 15_000,
        }
    }
}

/// Result cache configuration
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct CacheConfig {
    /// Redis connection URL; None disables the external store
    pub url: Option<String>,

    /// Time-to-live for cached crawl results (seconds)
    #[serde(rename = "ttl-seconds")]
    pub ttl_seconds: u64,
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            url: None,
            ttl_seconds: 3600,
        }
    }
}

//! Contact-Scout: a contact-harvesting site crawler
//!
//! This crate crawls a website breadth-first from a seed URL, extracting email
//! addresses and phone numbers while respecting robots.txt, a depth bound, and
//! a concurrency ceiling. Results are cached in an external store.

pub mod cache;
pub mod config;
pub mod crawler;
pub mod queue;
pub mod render;
pub mod robots;

use thiserror::Error;

/// Main error type for Contact-Scout operations
///
/// Only the failures that actually abort a crawl appear here. Fetch, render,
/// and cache failures never escape the engine: pages degrade to an empty
/// outcome and cache trouble is logged, so those errors stay local to their
/// modules ([`CacheError`], [`RenderError`]).
#[derive(Debug, Error)]
pub enum ScoutError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("Crawl aborted: seed URL {url} is disallowed by robots.txt")]
    CrawlAborted { url: String },

    #[error("HTTP client error: {0}")]
    Reqwest(#[from] reqwest::Error),
}

/// Configuration-specific errors
///
/// These are the only fatal-before-crawl failures besides a robots-denied
/// seed: a bad seed scheme, a zero concurrency value, and so on.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to parse TOML: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Invalid seed URL '{url}': {message}")]
    InvalidSeed { url: String, message: String },
}

/// Errors from the external cache store
///
/// Cache failures are always non-fatal to a crawl; the engine logs them and
/// continues without caching.
#[derive(Debug, Error)]
pub enum CacheError {
    #[error("Cache store unavailable: {0}")]
    Unavailable(String),

    #[error("Cache operation failed: {0}")]
    Operation(String),
}

/// Errors from the headless render fallback
#[derive(Debug, Error)]
pub enum RenderError {
    #[error("Failed to launch browser: {0}")]
    Launch(String),

    #[error("Navigation failed for {url}: {message}")]
    Navigation { url: String, message: String },

    #[error("Render timed out after {0:?}")]
    Timeout(std::time::Duration),
}

/// Result type alias for Contact-Scout operations
pub type Result<T> = std::result::Result<T, ScoutError>;

// Re-export commonly used types
pub use cache::{CacheStore, MemoryCache, RedisCache};
pub use config::Config;
pub use crawler::{CrawlEngine, CrawlReport, CrawlResult};
pub use queue::{CrawlJob, JobQueue, JobStatus};

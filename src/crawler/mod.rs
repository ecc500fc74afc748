//! Core crawl machinery
//!
//! This module contains the traversal and concurrency engine:
//! - The FIFO frontier and visited tracking
//! - The bounded-batch dispatcher and result aggregation
//! - HTTP fetching with retry and render fallback
//! - Contact and link extraction

mod engine;
mod extractor;
mod fetcher;
mod frontier;

pub use engine::{CrawlEngine, CrawlReport, CrawlResult};
pub use extractor::{extract_contacts, extract_links, ExtractedContacts};
pub use fetcher::{build_http_client, fetch_page, PageContent};
pub use frontier::{CrawlTask, Frontier};

use crate::cache::CacheStore;
use crate::config::Config;
use crate::ScoutError;
use std::sync::Arc;

/// Runs a complete crawl for one seed URL
///
/// Convenience wrapper over [`CrawlEngine`]: constructs the engine,
/// initializes it (robots policy, cache check), and drives the crawl loop to
/// completion.
///
/// # Arguments
///
/// * `seed` - The starting URL; must be http or https
/// * `max_depth` - Maximum link depth to follow from the seed
/// * `config` - Crawler configuration
/// * `cache` - The result cache store
///
/// # Returns
///
/// * `Ok(CrawlReport)` - The accumulated findings
/// * `Err(ScoutError)` - Configuration error or robots-denied seed
pub async fn crawl(
    seed: &str,
    max_depth: u32,
    config: Config,
    cache: Arc<dyn CacheStore>,
) -> Result<CrawlReport, ScoutError> {
    let mut engine = CrawlEngine::new(seed, max_depth, config, cache)?;
    engine.initialize().await?;
    engine.run().await
}

//! Contact-Scout main entry point
//!
//! Command-line interface for running a single contact-harvesting crawl.

use anyhow::Context;
use clap::Parser;
use contact_scout::cache::{CacheStore, MemoryCache, RedisCache};
use contact_scout::config::{load_config, Config};
use contact_scout::crawler::crawl;
use std::path::PathBuf;
use std::sync::Arc;
use tracing_subscriber::EnvFilter;

/// Contact-Scout: crawl a website for contact information
///
/// Crawls breadth-first from the seed URL, honoring robots.txt and the
/// configured depth/concurrency bounds, and prints the found email addresses
/// and phone numbers as JSON.
#[derive(Parser, Debug)]
#[command(name = "contact-scout")]
#[command(version)]
#[command(about = "Crawl a website for contact information", long_about = None)]
struct Cli {
    /// Seed URL to start crawling from (http or https)
    #[arg(value_name = "URL")]
    url: String,

    /// Maximum link depth to follow from the seed
    #[arg(long, default_value_t = 2)]
    max_depth: u32,

    /// Hard cap on the number of pages dispatched
    #[arg(long)]
    max_pages: Option<u32>,

    /// Path to TOML configuration file
    #[arg(short, long, value_name = "CONFIG")]
    config: Option<PathBuf>,

    /// Increase logging verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Suppress non-error output
    #[arg(short, long, conflicts_with = "verbose")]
    quiet: bool,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    setup_logging(cli.verbose, cli.quiet);

    let mut config = match &cli.config {
        Some(path) => {
            tracing::info!("Loading configuration from: {}", path.display());
            load_config(path).with_context(|| format!("loading {}", path.display()))?
        }
        None => Config::default(),
    };

    if cli.max_pages.is_some() {
        config.crawler.max_pages = cli.max_pages;
    }

    let cache = build_cache(&config)?;

    let report = crawl(&cli.url, cli.max_depth, config, cache)
        .await
        .context("crawl failed")?;

    println!("{}", serde_json::to_string_pretty(&report)?);
    Ok(())
}

/// Builds the cache store: Redis when configured, in-process otherwise
fn build_cache(config: &Config) -> anyhow::Result<Arc<dyn CacheStore>> {
    match &config.cache.url {
        Some(url) => {
            tracing::info!("Using Redis result cache at {}", url);
            let cache = RedisCache::new(url).context("creating Redis cache store")?;
            Ok(Arc::new(cache))
        }
        None => {
            tracing::debug!("No cache url configured, using in-process cache");
            Ok(Arc::new(MemoryCache::new()))
        }
    }
}

/// Sets up the logging/tracing subscriber based on verbosity level
fn setup_logging(verbose: u8, quiet: bool) {
    let filter = if quiet {
        EnvFilter::new("error")
    } else {
        match verbose {
            0 => EnvFilter::new("contact_scout=info,warn"),
            1 => EnvFilter::new("contact_scout=debug,info"),
            2 => EnvFilter::new("contact_scout=trace,debug"),
            _ => EnvFilter::new("trace"),
        }
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_thread_ids(false)
        .with_file(false)
        .init();
}

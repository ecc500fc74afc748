//! Crawl engine - frontier dispatch and result aggregation
//!
//! One engine instance drives a single logical crawl. The run loop drains
//! the frontier in batches no larger than the configured concurrency, runs
//! every task in a batch concurrently, waits for the whole batch to settle,
//! merges the outcomes, and pauses before the next batch. Page-local
//! failures are isolated; only a malformed seed or a robots-denied seed
//! aborts the operation.

use crate::cache::CacheStore;
use crate::config::{validate, validate_seed_url, Config};
use crate::crawler::extractor::{extract_contacts, extract_links};
use crate::crawler::fetcher::{build_http_client, fetch_page, PageContent};
use crate::crawler::frontier::{CrawlTask, Frontier};
use crate::robots::{fetch_robots, RobotsPolicy};
use crate::ScoutError;
use futures::future::join_all;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::sync::Arc;
use std::time::Duration;
use tokio_util::sync::CancellationToken;
use url::Url;

/// Accumulated crawl findings, also the cache wire format
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CrawlResult {
    pub emails: BTreeSet<String>,
    pub phones: BTreeSet<String>,
    pub pages_scanned: u64,
}

/// Caller-facing report shape
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CrawlReport {
    pub found_emails: Vec<String>,
    pub found_phones: Vec<String>,
    pub pages_scanned: u64,
}

impl From<CrawlResult> for CrawlReport {
    fn from(result: CrawlResult) -> Self {
        Self {
            found_emails: result.emails.into_iter().collect(),
            found_phones: result.phones.into_iter().collect(),
            pages_scanned: result.pages_scanned,
        }
    }
}

/// What one dispatched task produced
#[derive(Debug, Default)]
struct PageOutcome {
    /// Whether page content was actually obtained
    scanned: bool,
    emails: BTreeSet<String>,
    phones: BTreeSet<String>,
    /// Same-host links to enqueue at `depth + 1`
    links: Vec<Url>,
    depth: u32,
}

impl PageOutcome {
    fn empty(depth: u32) -> Self {
        Self {
            depth,
            ..Self::default()
        }
    }
}

/// Breadth-first crawl engine for a single seed
pub struct CrawlEngine {
    seed: Url,
    base_host: String,
    max_depth: u32,
    config: Config,
    client: Client,
    cache: Arc<dyn CacheStore>,
    frontier: Frontier,
    robots: Option<RobotsPolicy>,
    cached: Option<CrawlResult>,
    result: CrawlResult,
    cancel: CancellationToken,
}

impl CrawlEngine {
    /// Creates an engine for one crawl
    ///
    /// Fails with a configuration error if the seed URL is malformed or not
    /// http(s), or if any config value is out of range (e.g. concurrency 0).
    /// No network work happens here.
    pub fn new(
        seed: &str,
        max_depth: u32,
        config: Config,
        cache: Arc<dyn CacheStore>,
    ) -> Result<Self, ScoutError> {
        validate(&config)?;
        let seed = validate_seed_url(seed)?;
        let base_host = seed
            .host_str()
            .ok_or_else(|| crate::ConfigError::InvalidSeed {
                url: seed.to_string(),
                message: "URL has no host".to_string(),
            })?
            .to_string();

        let client = build_http_client(
            &config.crawler.user_agent,
            Duration::from_millis(config.fetch.timeout_ms),
        )?;

        let frontier = Frontier::new(max_depth, config.crawler.max_pages);

        Ok(Self {
            seed,
            base_host,
            max_depth,
            config,
            client,
            cache,
            frontier,
            robots: None,
            cached: None,
            result: CrawlResult::default(),
            cancel: CancellationToken::new(),
        })
    }

    /// Token that cancels the crawl at the next batch boundary
    ///
    /// Cancellation never corrupts results: the engine finishes the in-flight
    /// batch, merges it, and returns whatever was accumulated.
    pub fn cancellation_token(&self) -> CancellationToken {
        self.cancel.clone()
    }

    /// Fetches the robots policy and checks the cache
    ///
    /// Fails with `CrawlAborted` if robots.txt denies the seed URL itself; a
    /// robots.txt that cannot be fetched degrades to allow-all. A readable
    /// cached result for this seed is kept for `run` to return directly.
    pub async fn initialize(&mut self) -> Result<(), ScoutError> {
        let robots =
            fetch_robots(&self.client, &self.seed, &self.config.crawler.user_agent).await;

        if !robots.is_allowed(self.seed.as_str()) {
            return Err(ScoutError::CrawlAborted {
                url: self.seed.to_string(),
            });
        }
        self.robots = Some(robots);

        self.cached = self.check_cache().await;
        Ok(())
    }

    /// Runs the crawl to frontier exhaustion and returns the report
    ///
    /// A cached result from `initialize` short-circuits the crawl entirely.
    /// Otherwise the loop drains batches until the frontier empties (or the
    /// cancellation token fires), persists the result, and reports. A
    /// cancelled run still reports what it accumulated but is never cached.
    pub async fn run(&mut self) -> Result<CrawlReport, ScoutError> {
        if self.robots.is_none() {
            self.initialize().await?;
        }

        if let Some(cached) = self.cached.take() {
            tracing::info!("Cache hit for {}, skipping crawl", self.seed);
            return Ok(cached.into());
        }

        // Fetched in initialize; checked just above
        let robots = match self.robots.clone() {
            Some(robots) => robots,
            None => RobotsPolicy::allow_all(&self.config.crawler.user_agent),
        };

        let batch_size = self.config.crawler.concurrency as usize;
        let batch_delay = Duration::from_millis(self.config.crawler.batch_delay_ms);

        self.frontier.push(CrawlTask {
            url: self.seed.clone(),
            depth: 0,
        });

        tracing::info!(
            "Starting crawl of {} (max depth {}, concurrency {})",
            self.seed,
            self.max_depth,
            batch_size
        );

        while !self.frontier.is_empty() {
            if self.cancel.is_cancelled() {
                tracing::info!(
                    "Crawl of {} cancelled with {} tasks pending",
                    self.seed,
                    self.frontier.len()
                );
                break;
            }

            let batch = self.frontier.drain(batch_size, &robots);
            if batch.is_empty() {
                continue;
            }

            tracing::debug!("Dispatching batch of {} tasks", batch.len());
            let outcomes = join_all(batch.iter().map(|task| self.process_task(task))).await;
            for outcome in outcomes {
                self.merge(outcome);
            }

            // Fixed pause between batches bounds the request rate
            // independently of page count
            tokio::time::sleep(batch_delay).await;
        }

        // A cancelled run holds a truncated result; caching it would make
        // every later crawl of this seed short-circuit to it until the TTL
        // expires. Only frontier-exhausted results are persisted.
        if self.cancel.is_cancelled() {
            tracing::debug!("Skipping cache write for cancelled crawl of {}", self.seed);
        } else {
            self.persist().await;
        }

        tracing::info!(
            "Crawl of {} complete: {} pages, {} emails, {} phones",
            self.seed,
            self.result.pages_scanned,
            self.result.emails.len(),
            self.result.phones.len()
        );

        Ok(self.result.clone().into())
    }

    /// Fetches and scans one page; failures degrade to an empty outcome
    async fn process_task(&self, task: &CrawlTask) -> PageOutcome {
        tracing::debug!("Processing {} at depth {}", task.url, task.depth);

        let content = fetch_page(
            &self.client,
            task.url.as_str(),
            &self.config.fetch,
            &self.config.render,
            &self.config.crawler.user_agent,
        )
        .await;

        match content {
            PageContent::Html(html) => {
                let contacts = extract_contacts(&html);
                // Links from max-depth pages could never be dispatched, so
                // skip discovery there entirely
                let links = if task.depth < self.max_depth {
                    extract_links(&html, &task.url, &self.base_host)
                } else {
                    Vec::new()
                };

                PageOutcome {
                    scanned: true,
                    emails: contacts.emails,
                    phones: contacts.phones,
                    links,
                    depth: task.depth,
                }
            }
            PageContent::Unavailable => {
                tracing::warn!("No content obtained for {}", task.url);
                PageOutcome::empty(task.depth)
            }
        }
    }

    /// Folds one outcome into the result set and the frontier
    fn merge(&mut self, outcome: PageOutcome) {
        if outcome.scanned {
            self.result.pages_scanned += 1;
        }
        self.result.emails.extend(outcome.emails);
        self.result.phones.extend(outcome.phones);

        for url in outcome.links {
            self.frontier.push(CrawlTask {
                url,
                depth: outcome.depth + 1,
            });
        }
    }

    fn cache_key(&self) -> String {
        format!("crawl:{}", self.seed)
    }

    /// Reads a prior result for this seed; any failure means no cache hit
    async fn check_cache(&self) -> Option<CrawlResult> {
        match self.cache.get(&self.cache_key()).await {
            Ok(Some(raw)) => match serde_json::from_str(&raw) {
                Ok(result) => Some(result),
                Err(e) => {
                    tracing::warn!("Discarding unreadable cache entry for {}: {}", self.seed, e);
                    None
                }
            },
            Ok(None) => None,
            Err(e) => {
                tracing::warn!("Cache check failed for {}: {}", self.seed, e);
                None
            }
        }
    }

    /// Writes the final result to the cache; failures are logged only
    async fn persist(&self) {
        let payload = match serde_json::to_string(&self.result) {
            Ok(payload) => payload,
            Err(e) => {
                tracing::error!("Could not serialize result for {}: {}", self.seed, e);
                return;
            }
        };

        if let Err(e) = self
            .cache
            .set(&self.cache_key(), &payload, self.config.cache.ttl_seconds)
            .await
        {
            tracing::error!("Cache write failed for {}: {}", self.seed, e);
        }
    }
}

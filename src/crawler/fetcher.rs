//! HTTP fetcher with retry and headless-render fallback
//!
//! A page is first fetched with a plain GET. Network-layer failures and 5xx
//! responses are retried with linearly growing delays; when the retry budget
//! is spent (or the server answers with a non-retryable error status) the
//! page is handed to the headless render fallback. A page that fails both
//! paths yields no content at all, which the engine treats as a scan that
//! never happened.

use crate::config::{FetchConfig, RenderConfig};
use crate::render::render_page;
use reqwest::Client;
use std::time::Duration;

/// Content obtained for a single page
#[derive(Debug)]
pub enum PageContent {
    /// HTML obtained from the plain GET or the render fallback
    Html(String),
    /// Both the fetch and the fallback failed
    Unavailable,
}

/// Why a single fetch attempt failed
#[derive(Debug)]
enum FetchFailure {
    /// Network error or 5xx response; eligible for retry
    Retryable(String),
    /// Non-success response that a retry will not fix
    Terminal(String),
}

/// Builds the HTTP client shared by all fetches of one crawl
pub fn build_http_client(
    user_agent: &str,
    timeout: Duration,
) -> Result<Client, reqwest::Error> {
    Client::builder()
        .user_agent(user_agent.to_string())
        .timeout(timeout)
        .connect_timeout(Duration::from_secs(10))
        .gzip(true)
        .brotli(true)
        .build()
}

/// Fetches a page, retrying transient failures and falling back to a render
///
/// # Arguments
///
/// * `client` - The crawl's HTTP client (carries user-agent and timeout)
/// * `url` - The page URL
/// * `fetch` - Retry budget and backoff configuration
/// * `render` - Fallback configuration
/// * `user_agent` - User-agent for the render fallback
///
/// This function never fails the crawl; every failure path degrades to
/// `PageContent::Unavailable`.
pub async fn fetch_page(
    client: &Client,
    url: &str,
    fetch: &FetchConfig,
    render: &RenderConfig,
    user_agent: &str,
) -> PageContent {
    for attempt in 0..=fetch.retries {
        match try_fetch(client, url).await {
            Ok(body) => return PageContent::Html(body),
            Err(FetchFailure::Retryable(message)) => {
                if attempt < fetch.retries {
                    // Linear backoff: attempt N waits N times the base delay
                    let delay = Duration::from_millis(fetch.retry_delay_ms * (attempt as u64 + 1));
                    tracing::debug!(
                        "Fetch attempt {} for {} failed ({}), retrying in {:?}",
                        attempt + 1,
                        url,
                        message,
                        delay
                    );
                    tokio::time::sleep(delay).await;
                } else {
                    tracing::warn!("Fetch retries exhausted for {}: {}", url, message);
                }
            }
            Err(FetchFailure::Terminal(message)) => {
                tracing::debug!("Fetch for {} failed without retry: {}", url, message);
                break;
            }
        }
    }

    if !render.enabled {
        return PageContent::Unavailable;
    }

    tracing::info!("Falling back to headless render for {}", url);
    match render_page(url, user_agent, Duration::from_millis(render.timeout_ms)).await {
        Ok(html) => PageContent::Html(html),
        Err(e) => {
            tracing::warn!("Render fallback failed for {}: {}", url, e);
            PageContent::Unavailable
        }
    }
}

/// A single GET attempt, with failures classified for the retry loop
async fn try_fetch(client: &Client, url: &str) -> Result<String, FetchFailure> {
    let response = client.get(url).send().await.map_err(|e| {
        if e.is_timeout() {
            FetchFailure::Retryable("request timeout".to_string())
        } else if e.is_connect() {
            FetchFailure::Retryable(format!("connection error: {}", e))
        } else {
            FetchFailure::Retryable(e.to_string())
        }
    })?;

    let status = response.status();
    if status.is_server_error() {
        return Err(FetchFailure::Retryable(format!("HTTP {}", status)));
    }
    if !status.is_success() {
        return Err(FetchFailure::Terminal(format!("HTTP {}", status)));
    }

    response
        .text()
        .await
        .map_err(|e| FetchFailure::Retryable(format!("body read failed: {}", e)))
}

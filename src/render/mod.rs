//! Headless render fallback
//!
//! When the plain HTTP fetch for a page has exhausted its retries, the page
//! is rendered in a full browser engine instead. Each render launches its own
//! browser so a wedged page cannot poison later fetches; the whole call is
//! bounded by a single timeout covering launch, navigation, and DOM
//! serialization.

use crate::RenderError;
use chromiumoxide::browser::{Browser, BrowserConfig};
use futures::StreamExt;
use std::time::Duration;

/// Renders a page in a headless browser and returns the serialized DOM
///
/// # Arguments
///
/// * `url` - The page to render
/// * `user_agent` - User-agent override applied before navigation
/// * `timeout` - Total budget for the render, launch included
///
/// # Returns
///
/// * `Ok(String)` - The rendered page content
/// * `Err(RenderError)` - Launch, navigation, or timeout failure
pub async fn render_page(
    url: &str,
    user_agent: &str,
    timeout: Duration,
) -> Result<String, RenderError> {
    match tokio::time::timeout(timeout, render_once(url, user_agent)).await {
        Ok(result) => result,
        Err(_) => Err(RenderError::Timeout(timeout)),
    }
}

async fn render_once(url: &str, user_agent: &str) -> Result<String, RenderError> {
    let config = BrowserConfig::builder()
        .no_sandbox()
        .build()
        .map_err(RenderError::Launch)?;

    let (mut browser, mut handler) = Browser::launch(config)
        .await
        .map_err(|e| RenderError::Launch(e.to_string()))?;

    // The handler must be polled for the browser connection to make progress.
    let handler_task = tokio::spawn(async move { while handler.next().await.is_some() {} });

    let result = navigate_and_capture(&browser, url, user_agent).await;

    if let Err(e) = browser.close().await {
        tracing::debug!("Browser close failed for {}: {}", url, e);
    }
    let _ = browser.wait().await;
    handler_task.abort();

    result
}

async fn navigate_and_capture(
    browser: &Browser,
    url: &str,
    user_agent: &str,
) -> Result<String, RenderError> {
    let navigation = |message: String| RenderError::Navigation {
        url: url.to_string(),
        message,
    };

    let page = browser
        .new_page("about:blank")
        .await
        .map_err(|e| navigation(e.to_string()))?;

    page.set_user_agent(user_agent)
        .await
        .map_err(|e| navigation(e.to_string()))?;

    page.goto(url).await.map_err(|e| navigation(e.to_string()))?;

    page.wait_for_navigation()
        .await
        .map_err(|e| navigation(e.to_string()))?;

    page.content().await.map_err(|e| navigation(e.to_string()))
}

//! Robots.txt handling
//!
//! Fetches and parses the robots exclusion rules for the seed's origin. Any
//! failure to obtain robots.txt degrades to an allow-all policy; only an
//! explicit denial of the seed URL itself aborts a crawl.

mod policy;

pub use policy::RobotsPolicy;

use reqwest::Client;
use url::Url;

/// Fetches robots.txt at the origin of the given seed URL
///
/// The request uses the shared HTTP client, which carries the crawl's
/// user-agent and timeout. A network error, timeout, or non-success status
/// all yield an allow-all policy.
///
/// # Arguments
///
/// * `client` - The HTTP client to use
/// * `seed` - Any URL at the target origin
/// * `user_agent` - The user-agent token matched against robots.txt groups
pub async fn fetch_robots(client: &Client, seed: &Url, user_agent: &str) -> RobotsPolicy {
    let robots_url = match seed.join("/robots.txt") {
        Ok(url) => url,
        Err(e) => {
            tracing::warn!("Could not build robots.txt URL for {}: {}", seed, e);
            return RobotsPolicy::allow_all(user_agent);
        }
    };

    match client.get(robots_url.clone()).send().await {
        Ok(response) if response.status().is_success() => match response.text().await {
            Ok(content) => {
                tracing::debug!("Fetched robots.txt from {}", robots_url);
                RobotsPolicy::from_content(&content, user_agent)
            }
            Err(e) => {
                tracing::warn!("Failed to read robots.txt body from {}: {}", robots_url, e);
                RobotsPolicy::allow_all(user_agent)
            }
        },
        Ok(response) => {
            tracing::debug!(
                "robots.txt at {} returned HTTP {}, allowing all",
                robots_url,
                response.status()
            );
            RobotsPolicy::allow_all(user_agent)
        }
        Err(e) => {
            tracing::debug!("No robots.txt at {}: {}", robots_url, e);
            RobotsPolicy::allow_all(user_agent)
        }
    }
}

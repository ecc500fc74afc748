//! Robots exclusion policy, parsed on demand via the robotstxt crate.

use robotstxt::DefaultMatcher;

/// Parsed robots exclusion rules for one origin
///
/// Immutable once fetched for a crawl. An empty or missing robots.txt
/// degrades to an allow-all policy rather than blocking the crawl.
#[derive(Debug, Clone)]
pub struct RobotsPolicy {
    /// Raw robots.txt content (empty string means allow all)
    content: String,
    /// User-agent token checked against User-agent groups
    user_agent: String,
}

impl RobotsPolicy {
    /// Creates a policy from raw robots.txt content
    pub fn from_content(content: &str, user_agent: &str) -> Self {
        Self {
            content: content.to_string(),
            user_agent: user_agent.to_string(),
        }
    }

    /// Creates a permissive policy that allows everything
    ///
    /// Used whenever robots.txt cannot be fetched: network error, timeout,
    /// or a non-success response.
    pub fn allow_all(user_agent: &str) -> Self {
        Self {
            content: String::new(),
            user_agent: user_agent.to_string(),
        }
    }

    /// Checks whether a URL may be fetched under this policy
    pub fn is_allowed(&self, url: &str) -> bool {
        if self.content.is_empty() {
            return true;
        }

        let mut matcher = DefaultMatcher::default();
        matcher.one_agent_allowed_by_robots(&self.content, &self.user_agent, url)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_allow_all() {
        let policy = RobotsPolicy::allow_all("TestBot");
        assert!(policy.is_allowed("https://example.com/any/path"));
        assert!(policy.is_allowed("https://example.com/admin"));
    }

    #[test]
    fn test_disallow_all() {
        let policy = RobotsPolicy::from_content("User-agent: *\nDisallow: /", "TestBot");
        assert!(!policy.is_allowed("https://example.com/"));
        assert!(!policy.is_allowed("https://example.com/page"));
    }

    #[test]
    fn test_disallow_specific_path() {
        let policy = RobotsPolicy::from_content("User-agent: *\nDisallow: /admin", "TestBot");
        assert!(policy.is_allowed("https://example.com/"));
        assert!(policy.is_allowed("https://example.com/page"));
        assert!(!policy.is_allowed("https://example.com/admin"));
        assert!(!policy.is_allowed("https://example.com/admin/users"));
    }

    #[test]
    fn test_allow_overrides_disallow() {
        let policy = RobotsPolicy::from_content(
            "User-agent: *\nDisallow: /private\nAllow: /private/public",
            "TestBot",
        );
        assert!(!policy.is_allowed("https://example.com/private"));
        assert!(policy.is_allowed("https://example.com/private/public"));
    }

    #[test]
    fn test_specific_user_agent_group() {
        let content = "User-agent: AggressiveCrawler\nDisallow: /\n\nUser-agent: *\nAllow: /";
        let blocked = RobotsPolicy::from_content(content, "AggressiveCrawler");
        let free = RobotsPolicy::from_content(content, "FriendlyBot");
        assert!(!blocked.is_allowed("https://example.com/page"));
        assert!(free.is_allowed("https://example.com/page"));
    }

    #[test]
    fn test_empty_content_allows_all() {
        let policy = RobotsPolicy::from_content("", "TestBot");
        assert!(policy.is_allowed("https://example.com/any"));
    }

    #[test]
    fn test_garbage_content_allows_all() {
        let policy = RobotsPolicy::from_content("This is not valid robots.txt {{{", "TestBot");
        assert!(policy.is_allowed("https://example.com/any/path"));
    }
}

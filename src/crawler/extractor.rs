//! Contact and link extraction
//!
//! Contacts are found with two independent regex passes over the raw HTML.
//! Both patterns are deliberate heuristics: they trade RFC-grade precision
//! for simplicity, and false positives are expected. Links come from a
//! scraper pass over `a[href]` elements, restricted to the crawl's own host.

use regex::Regex;
use scraper::{Html, Selector};
use std::collections::{BTreeSet, HashSet};
use std::sync::LazyLock;
use unicode_normalization::UnicodeNormalization;
use url::Url;

/// Word/dot/hyphen local part and domain, TLD of length >= 2
static EMAIL_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"[\w.\-]+@[\w.\-]+\.\w{2,}").expect("hardcoded regex pattern is valid")
});

/// Optional leading '+', then a digit run of length >= 9 that may contain
/// interior spaces and hyphens
static PHONE_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\+?\d[\d\s-]{7,}\d").expect("hardcoded regex pattern is valid")
});

/// Contacts found on a single page
#[derive(Debug, Default, PartialEq, Eq)]
pub struct ExtractedContacts {
    pub emails: BTreeSet<String>,
    pub phones: BTreeSet<String>,
}

/// Extracts email addresses and phone numbers from page content
///
/// Phone matches are NFKC-normalized and stripped of interior whitespace and
/// hyphens before insertion, so `+1 555-123-4567` and `+1555 1234567` land as
/// the same value. Set semantics deduplicate within and across pages.
pub fn extract_contacts(html: &str) -> ExtractedContacts {
    let emails = EMAIL_RE
        .find_iter(html)
        .map(|m| m.as_str().to_string())
        .collect();

    let phones = PHONE_RE
        .find_iter(html)
        .map(|m| normalize_phone(m.as_str()))
        .collect();

    ExtractedContacts { emails, phones }
}

/// Compatibility-composes a phone match and drops spaces and hyphens
fn normalize_phone(raw: &str) -> String {
    raw.nfkc()
        .filter(|c| !c.is_whitespace() && *c != '-')
        .collect()
}

/// Extracts same-host links from page content
///
/// Each `a[href]` is resolved against `base_url`; only http(s) results whose
/// host equals `base_host` exactly (subdomains excluded) are kept, deduped in
/// page order. An href that fails to resolve is logged and skipped.
pub fn extract_links(html: &str, base_url: &Url, base_host: &str) -> Vec<Url> {
    let document = Html::parse_document(html);
    let mut links = Vec::new();
    let mut seen = HashSet::new();

    let Ok(selector) = Selector::parse("a[href]") else {
        return links;
    };

    for element in document.select(&selector) {
        let Some(href) = element.value().attr("href") else {
            continue;
        };

        let resolved = match base_url.join(href.trim()) {
            Ok(url) => url,
            Err(e) => {
                tracing::debug!("Skipping unresolvable link '{}': {}", href, e);
                continue;
            }
        };

        if resolved.scheme() != "http" && resolved.scheme() != "https" {
            continue;
        }
        if resolved.host_str() != Some(base_host) {
            continue;
        }

        if seen.insert(resolved.to_string()) {
            links.push(resolved);
        }
    }

    links
}

#[cfg(test)]
mod tests {
    use super::*;

    fn base_url() -> Url {
        Url::parse("https://example.com/page").unwrap()
    }

    #[test]
    fn test_extract_email_and_phone() {
        let contacts =
            extract_contacts("contact: jane.doe@example.com, call +1 555-123-4567");
        assert!(contacts.emails.contains("jane.doe@example.com"));
        assert!(contacts.phones.contains("+15551234567"));
    }

    #[test]
    fn test_phone_normalization_strips_separators() {
        let contacts = extract_contacts("tel: 020 7946-0958 99");
        assert!(contacts
            .phones
            .iter()
            .all(|p| !p.contains(' ') && !p.contains('-')));
    }

    #[test]
    fn test_phone_nfkc_normalization() {
        // Fullwidth digits compatibility-compose to ASCII
        let contacts = extract_contacts("call ０１２３４５６７８９");
        assert!(contacts.phones.contains("0123456789"));
    }

    #[test]
    fn test_short_digit_runs_ignored() {
        let contacts = extract_contacts("room 4021, ext 55");
        assert!(contacts.phones.is_empty());
    }

    #[test]
    fn test_no_contacts() {
        let contacts = extract_contacts("<html><body>nothing here</body></html>");
        assert!(contacts.emails.is_empty());
        assert!(contacts.phones.is_empty());
    }

    #[test]
    fn test_duplicate_contacts_deduplicated() {
        let contacts = extract_contacts(
            "a@example.com and a@example.com, +1 555-123-4567 or +1555 123 4567",
        );
        assert_eq!(contacts.emails.len(), 1);
        assert_eq!(contacts.phones.len(), 1);
    }

    #[test]
    fn test_extract_same_host_links() {
        let html = r#"<html><body>
            <a href="/about">About</a>
            <a href="https://example.com/contact">Contact</a>
            <a href="https://other.com/page">Elsewhere</a>
        </body></html>"#;

        let links = extract_links(html, &base_url(), "example.com");
        let paths: Vec<&str> = links.iter().map(|u| u.path()).collect();
        assert_eq!(paths, vec!["/about", "/contact"]);
    }

    #[test]
    fn test_subdomains_excluded() {
        let html = r#"<a href="https://blog.example.com/post">Blog</a>"#;
        let links = extract_links(html, &base_url(), "example.com");
        assert!(links.is_empty());
    }

    #[test]
    fn test_links_deduplicated_within_page() {
        let html = r#"
            <a href="/a">One</a>
            <a href="/a">One again</a>
            <a href="/b">Two</a>
        "#;
        let links = extract_links(html, &base_url(), "example.com");
        assert_eq!(links.len(), 2);
    }

    #[test]
    fn test_non_http_schemes_skipped() {
        let html = r#"
            <a href="mailto:jane@example.com">Mail</a>
            <a href="tel:+15551234567">Call</a>
            <a href="javascript:void(0)">Click</a>
            <a href="/real">Real</a>
        "#;
        let links = extract_links(html, &base_url(), "example.com");
        assert_eq!(links.len(), 1);
        assert_eq!(links[0].path(), "/real");
    }

    #[test]
    fn test_relative_links_resolved() {
        let html = r#"<a href="deeper/page">Deeper</a>"#;
        let links = extract_links(html, &base_url(), "example.com");
        assert_eq!(links[0].as_str(), "https://example.com/deeper/page");
    }
}

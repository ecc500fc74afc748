//! Frontier queue and visited tracking
//!
//! The frontier is a FIFO queue of (url, depth) pairs; appending discovered
//! links to the tail and draining batches from the head gives strict
//! breadth-first level order. The visited set records every URL that has
//! ever been admitted for dispatch.

use crate::robots::RobotsPolicy;
use std::collections::{HashSet, VecDeque};
use url::Url;

/// A single unit of pending crawl work
#[derive(Debug, Clone)]
pub struct CrawlTask {
    pub url: Url,
    pub depth: u32,
}

/// Pending-work queue plus the visited set for one crawl run
#[derive(Debug)]
pub struct Frontier {
    queue: VecDeque<CrawlTask>,
    visited: HashSet<String>,
    max_depth: u32,
    /// Total tasks admitted so far, checked against the page budget
    admitted: u32,
    max_pages: Option<u32>,
}

impl Frontier {
    pub fn new(max_depth: u32, max_pages: Option<u32>) -> Self {
        Self {
            queue: VecDeque::new(),
            visited: HashSet::new(),
            max_depth,
            admitted: 0,
            max_pages,
        }
    }

    /// Appends a task to the tail of the queue
    ///
    /// No filtering happens here; duplicates and over-depth tasks are cheap
    /// to hold and are discarded at drain time.
    pub fn push(&mut self, task: CrawlTask) {
        self.queue.push_back(task);
    }

    /// Removes up to `batch_size` tasks from the head and admits the survivors
    ///
    /// A removed task survives if its depth is within bounds, its URL has not
    /// been admitted before, robots.txt allows it, and the page budget is not
    /// exhausted. Survivors are marked visited *before* being returned, so a
    /// URL discovered twice within the same drain window is dispatched once.
    ///
    /// The returned batch may be smaller than `batch_size` even while the
    /// queue is non-empty; callers keep draining until the queue empties.
    pub fn drain(&mut self, batch_size: usize, robots: &RobotsPolicy) -> Vec<CrawlTask> {
        let mut admitted = Vec::new();

        for _ in 0..batch_size {
            let Some(task) = self.queue.pop_front() else {
                break;
            };

            if task.depth > self.max_depth {
                tracing::trace!("Dropping {} (depth {} exceeds limit)", task.url, task.depth);
                continue;
            }
            if self.visited.contains(task.url.as_str()) {
                continue;
            }
            if !robots.is_allowed(task.url.as_str()) {
                tracing::debug!("Skipping {} (disallowed by robots.txt)", task.url);
                continue;
            }
            if let Some(max_pages) = self.max_pages {
                if self.admitted >= max_pages {
                    tracing::debug!("Dropping {} (page budget of {} reached)", task.url, max_pages);
                    continue;
                }
            }

            self.visited.insert(task.url.to_string());
            self.admitted += 1;
            admitted.push(task);
        }

        admitted
    }

    pub fn is_empty(&self) -> bool {
        self.queue.is_empty()
    }

    pub fn len(&self) -> usize {
        self.queue.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn task(path: &str, depth: u32) -> CrawlTask {
        CrawlTask {
            url: Url::parse(&format!("https://example.com{}", path)).unwrap(),
            depth,
        }
    }

    fn allow_all() -> RobotsPolicy {
        RobotsPolicy::allow_all("TestBot")
    }

    #[test]
    fn test_fifo_order() {
        let mut frontier = Frontier::new(2, None);
        frontier.push(task("/a", 0));
        frontier.push(task("/b", 0));
        frontier.push(task("/c", 0));

        let batch = frontier.drain(2, &allow_all());
        assert_eq!(batch.len(), 2);
        assert_eq!(batch[0].url.path(), "/a");
        assert_eq!(batch[1].url.path(), "/b");
        assert_eq!(frontier.len(), 1);
    }

    #[test]
    fn test_depth_filter() {
        let mut frontier = Frontier::new(1, None);
        frontier.push(task("/shallow", 1));
        frontier.push(task("/deep", 2));

        let batch = frontier.drain(5, &allow_all());
        assert_eq!(batch.len(), 1);
        assert_eq!(batch[0].url.path(), "/shallow");
    }

    #[test]
    fn test_duplicates_admitted_once() {
        let mut frontier = Frontier::new(2, None);
        frontier.push(task("/page", 0));
        frontier.push(task("/page", 1));

        let batch = frontier.drain(5, &allow_all());
        assert_eq!(batch.len(), 1);

        // A later re-discovery is also dropped
        frontier.push(task("/page", 1));
        assert!(frontier.drain(5, &allow_all()).is_empty());
    }

    #[test]
    fn test_robots_denied_filtered() {
        let robots = RobotsPolicy::from_content("User-agent: *\nDisallow: /admin", "TestBot");
        let mut frontier = Frontier::new(2, None);
        frontier.push(task("/admin", 0));
        frontier.push(task("/public", 0));

        let batch = frontier.drain(5, &robots);
        assert_eq!(batch.len(), 1);
        assert_eq!(batch[0].url.path(), "/public");
    }

    #[test]
    fn test_page_budget_enforced() {
        let mut frontier = Frontier::new(2, Some(2));
        frontier.push(task("/a", 0));
        frontier.push(task("/b", 0));
        frontier.push(task("/c", 0));

        assert_eq!(frontier.drain(5, &allow_all()).len(), 2);
        // Budget spent; nothing more is admitted
        frontier.push(task("/d", 0));
        assert!(frontier.drain(5, &allow_all()).is_empty());
    }

    #[test]
    fn test_filtered_entries_do_not_refill_batch() {
        // Mirrors take-then-filter semantics: a drain takes batch_size queue
        // entries and filters them, it does not keep taking to fill the batch.
        let mut frontier = Frontier::new(0, None);
        frontier.push(task("/too-deep", 1));
        frontier.push(task("/ok", 0));

        let batch = frontier.drain(1, &allow_all());
        assert!(batch.is_empty());
        assert_eq!(frontier.len(), 1);

        let batch = frontier.drain(1, &allow_all());
        assert_eq!(batch.len(), 1);
        assert_eq!(batch[0].url.path(), "/ok");
    }
}

//! Async crawl job queue
//!
//! A list-backed job store used by submission surfaces that want to run
//! crawls out of band. Jobs are tagged records with an explicit status
//! lifecycle; the crawl engine itself never touches this queue.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::VecDeque;
use tokio::sync::Mutex;

/// Lifecycle state of a queued crawl job
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum JobStatus {
    Pending,
    Running,
    Done,
    Failed,
}

/// A queued crawl request
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CrawlJob {
    pub id: u64,
    pub url: String,
    pub max_depth: u32,
    pub status: JobStatus,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Default)]
struct QueueInner {
    next_id: u64,
    jobs: VecDeque<CrawlJob>,
}

/// FIFO job store
#[derive(Debug, Default)]
pub struct JobQueue {
    inner: Mutex<QueueInner>,
}

impl JobQueue {
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a pending job and returns it
    pub async fn add_job(&self, url: &str, max_depth: u32) -> CrawlJob {
        let mut inner = self.inner.lock().await;
        inner.next_id += 1;
        let job = CrawlJob {
            id: inner.next_id,
            url: url.to_string(),
            max_depth,
            status: JobStatus::Pending,
            created_at: Utc::now(),
        };
        inner.jobs.push_back(job.clone());
        tracing::info!("Job {} queued for {}", job.id, job.url);
        job
    }

    /// Pops the oldest pending job, marking it running
    pub async fn next_job(&self) -> Option<CrawlJob> {
        let mut inner = self.inner.lock().await;
        inner.jobs.pop_front().map(|mut job| {
            job.status = JobStatus::Running;
            job
        })
    }

    /// Number of jobs waiting in the queue
    pub async fn len(&self) -> usize {
        self.inner.lock().await.jobs.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.len().await == 0
    }

    /// Removes all queued jobs
    pub async fn clear(&self) {
        let mut inner = self.inner.lock().await;
        inner.jobs.clear();
        tracing::info!("Job queue cleared");
    }
}

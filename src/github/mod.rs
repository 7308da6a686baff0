pub mod client;
pub mod models;

use anyhow::Result;
use chrono::{DateTime, Utc};

pub use client::GithubClient;

/// Length of the abbreviated hash used as de-duplication key.
pub const SHORT_SHA_LEN: usize = 7;

pub fn short_sha(sha: &str) -> String {
    sha.chars().take(SHORT_SHA_LEN).collect()
}

/// A commit as reported to the operator and compared against the state file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommitRecord {
    pub short_sha: String,
    pub sha: String,
    pub message: String,
    pub author: String,
    pub date: DateTime<Utc>,
}

impl From<models::Commit> for CommitRecord {
    fn from(c: models::Commit) -> Self {
        Self {
            short_sha: short_sha(&c.sha),
            sha: c.sha,
            message: c.commit.message,
            author: c.commit.author.name,
            date: c.commit.author.date,
        }
    }
}

/// Anything able to list the newest commits of the watched branch,
/// newest first.
#[allow(async_fn_in_trait)]
pub trait CommitSource {
    async fn latest_commits(&self, limit: usize) -> Result<Vec<CommitRecord>>;
}

//! Payloads of the GitHub REST API, limited to the fields we read.

use chrono::{DateTime, Utc};
use serde::Deserialize;

/// `GET /repos/{owner}/{repo}`
#[derive(Debug, Clone, Deserialize)]
pub struct Repository {
    pub full_name: String,
    pub default_branch: String,
}

/// One entry of `GET /repos/{owner}/{repo}/commits`.
#[derive(Debug, Clone, Deserialize)]
pub struct Commit {
    pub sha: String,
    pub commit: CommitDetails,
}

#[derive(Debug, Clone, Deserialize)]
pub struct CommitDetails {
    pub author: AuthorDetails,
    pub message: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct AuthorDetails {
    pub name: String,
    pub date: DateTime<Utc>,
}

/// Error body returned alongside non-2xx statuses.
#[derive(Debug, Clone, Deserialize)]
pub struct ApiError {
    pub message: String,
}

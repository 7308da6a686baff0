#![allow(dead_code)]

use std::{
    path::{Path, PathBuf},
    sync::Mutex,
};

use anyhow::Result;
use chrono::{TimeZone, Utc};
use core_lib::github::{CommitRecord, CommitSource, short_sha};
use serde_json::json;

/// 40-char hash whose short form is `prefix` padded with zeros.
pub fn sha(prefix: &str) -> String {
    format!("{prefix:0<40}")
}

pub fn record(prefix: &str) -> CommitRecord {
    let full = sha(prefix);
    CommitRecord {
        short_sha: short_sha(&full),
        sha: full,
        message: format!("commit {prefix}\n"),
        author: "Jane Doe".to_string(),
        date: Utc.with_ymd_and_hms(2024, 3, 1, 12, 0, 0).unwrap(),
    }
}

/// Commit source returning a fixed list, or failing when `fail` is set.
pub struct StaticCommits {
    pub commits: Vec<CommitRecord>,
    pub fail: bool,
    pub calls: Mutex<usize>,
}

impl StaticCommits {
    pub fn new(prefixes: &[&str]) -> Self {
        Self {
            commits: prefixes.iter().map(|p| record(p)).collect(),
            fail: false,
            calls: Mutex::new(0),
        }
    }

    pub fn failing() -> Self {
        Self {
            commits: Vec::new(),
            fail: true,
            calls: Mutex::new(0),
        }
    }
}

impl CommitSource for StaticCommits {
    async fn latest_commits(&self, limit: usize) -> Result<Vec<CommitRecord>> {
        *self.calls.lock().unwrap() += 1;
        if self.fail {
            anyhow::bail!("connection refused");
        }
        Ok(self.commits.iter().take(limit).cloned().collect())
    }
}

/// Writes a deploy script that appends one line to `deploys.txt` next to it
/// and exits with `exit_code`.
pub fn deploy_script(dir: &Path, exit_code: i32) -> PathBuf {
    let script = dir.join("deploy.sh");
    let marker = dir.join("deploys.txt");
    std::fs::write(
        &script,
        format!(
            "echo \"building release\"\necho \"warning: cache cold\" >&2\necho run >> \"{}\"\nexit {exit_code}\n",
            marker.display()
        ),
    )
    .unwrap();
    script
}

pub fn deploy_count(dir: &Path) -> usize {
    std::fs::read_to_string(dir.join("deploys.txt"))
        .map(|s| s.lines().count())
        .unwrap_or(0)
}

pub fn commits_json(prefixes: &[&str]) -> String {
    let items: Vec<_> = prefixes
        .iter()
        .map(|p| {
            json!({
                "sha": sha(p),
                "commit": {
                    "author": {
                        "name": "Jane Doe",
                        "email": "jane@example.com",
                        "date": "2024-03-01T12:00:00Z"
                    },
                    "message": format!("commit {p}")
                }
            })
        })
        .collect();
    serde_json::Value::Array(items).to_string()
}

pub fn repo_json(full_name: &str, branch: &str) -> String {
    json!({ "full_name": full_name, "default_branch": branch }).to_string()
}

use std::path::PathBuf;

use anyhow::{Context, Result};

use crate::{
    core::{report::report_commits, state::SeenCommits},
    exec::{DeployOutcome, command::run_deploy},
    github::{CommitRecord, CommitSource},
    log::logger::Logger,
};

/// Number of commits fetched, compared and persisted per run.
pub const TRACKED_COMMITS: usize = 5;

pub const DEFAULT_STATE_FILE: &str = "existing_commits.txt";
pub const DEFAULT_DEPLOY_SCRIPT: &str = "/home/ubuntu/CICD_EC2_DEPLOY.sh";

/// Files a polling pass reads and writes.
#[derive(Debug, Clone)]
pub struct WatchContext {
    pub state_file: PathBuf,
    pub deploy_script: PathBuf,
    pub logger: Logger,
}

impl WatchContext {
    pub fn new(state_file: PathBuf, deploy_script: PathBuf, logger: Logger) -> Self {
        Self {
            state_file,
            deploy_script,
            logger,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Change {
    /// No state file existed.
    FirstRun,
    /// Short identifiers that were not in the state file.
    NewCommits(Vec<String>),
    Unchanged,
}

impl Change {
    pub fn triggers_deploy(&self) -> bool {
        !matches!(self, Change::Unchanged)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunOutcome {
    pub change: Change,
    pub deployment: Option<DeployOutcome>,
    pub commits: Vec<CommitRecord>,
}

/// Decides what a fetch means against the persisted state.
pub fn detect_change(previous: Option<&SeenCommits>, fetched: &[String]) -> Change {
    match previous {
        None => Change::FirstRun,
        Some(seen) => {
            let unseen: Vec<String> = seen.unseen(fetched).into_iter().cloned().collect();
            if unseen.is_empty() {
                Change::Unchanged
            } else {
                Change::NewCommits(unseen)
            }
        }
    }
}

/// One polling pass: fetch, compare, persist, deploy, report.
///
/// Fetch and state I/O errors are returned; a failed deployment is logged
/// and recorded in the outcome only.
pub async fn watch_once<S: CommitSource>(ctx: &WatchContext, source: &S) -> Result<RunOutcome> {
    let logger = &ctx.logger;

    let commits = source
        .latest_commits(TRACKED_COMMITS)
        .await
        .context("Failed to fetch commits")?;
    let fetched: Vec<String> = commits.iter().map(|c| c.short_sha.clone()).collect();

    let previous = SeenCommits::load(&ctx.state_file).await?;
    let change = detect_change(previous.as_ref(), &fetched);

    match &change {
        Change::FirstRun => {
            SeenCommits::new(fetched).save(&ctx.state_file).await?;
            logger.info("🆕 First run. Commit list saved.").await?;
        }
        Change::NewCommits(unseen) => {
            logger
                .info(&format!("New commits detected: {}", unseen.join(", ")))
                .await?;
            SeenCommits::new(fetched).save(&ctx.state_file).await?;
        }
        Change::Unchanged => {
            logger
                .info("✅ No new commits found. Deployment skipped.")
                .await?;
        }
    }

    let deployment = if change.triggers_deploy() {
        Some(run_deploy(&ctx.deploy_script, logger).await?)
    } else {
        None
    };

    report_commits(logger, &commits).await?;

    Ok(RunOutcome {
        change,
        deployment,
        commits,
    })
}

use anyhow::Result;

use crate::{github::CommitRecord, log::logger::Logger};

pub fn format_commit(commit: &CommitRecord) -> String {
    format!(
        "- Short SHA: {}\n  Full SHA : {}\n  Message  : {}\n  Author   : {}\n  Date     : {}\n",
        commit.short_sha,
        commit.sha,
        commit.message.trim(),
        commit.author,
        commit.date.format("%Y-%m-%d %H:%M:%S%:z"),
    )
}

/// Writes the fetched commits to the log for the operator.
pub async fn report_commits(logger: &Logger, commits: &[CommitRecord]) -> Result<()> {
    logger.raw("\n🔍 Recent Commits:").await?;
    for commit in commits {
        logger.raw(&format_commit(commit)).await?;
        logger.raw("").await?;
    }
    Ok(())
}

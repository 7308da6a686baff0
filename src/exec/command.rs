use std::{path::Path, process::Stdio};

use anyhow::Result;
use tokio::{
    io::{AsyncBufReadExt, AsyncRead, BufReader},
    process::{Child, Command},
};

use crate::{exec::DeployOutcome, log::logger::Logger};

pub const SHELL: &str = "/bin/bash";

/// Spawns `bash <script>` with both output streams piped. The child is
/// killed if its handle is dropped before it has been waited on.
pub fn spawn_script(script: &Path) -> std::io::Result<Child> {
    Command::new(SHELL)
        .arg(script)
        .stdin(Stdio::null())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .kill_on_drop(true)
        .spawn()
}

/// Runs the deployment script, relaying its output to the log line by line.
/// Failures of the script are reported through [`DeployOutcome`]; only log
/// write errors are returned as `Err`.
pub async fn run_deploy(script: &Path, logger: &Logger) -> Result<DeployOutcome> {
    logger.info("🚀 Starting deployment script...").await?;

    let mut child = match spawn_script(script) {
        Ok(child) => child,
        Err(e) => {
            logger.error(&format!("❌ Deployment failed: {e}")).await?;
            return Ok(DeployOutcome::SpawnFailed {
                reason: e.to_string(),
            });
        }
    };

    let (Some(stdout), Some(stderr)) = (child.stdout.take(), child.stderr.take()) else {
        anyhow::bail!("Deployment script output pipes were not captured");
    };
    relay_output(stdout, stderr, logger).await?;

    let outcome = match child.wait().await {
        Ok(status) if status.success() => DeployOutcome::Succeeded,
        Ok(status) => DeployOutcome::Failed {
            code: status.code(),
        },
        Err(e) => DeployOutcome::SpawnFailed {
            reason: e.to_string(),
        },
    };

    if outcome.is_success() {
        logger.info("✅ Deployment script finished.").await?;
    } else {
        logger
            .error(&format!("❌ Deployment script {outcome}"))
            .await?;
    }
    Ok(outcome)
}

/// Drains both pipes concurrently so a chatty stderr can't stall stdout.
async fn relay_output<O, E>(stdout: O, stderr: E, logger: &Logger) -> Result<()>
where
    O: AsyncRead + Unpin,
    E: AsyncRead + Unpin,
{
    let mut stdout = BufReader::new(stdout).split(b'\n');
    let mut stderr = BufReader::new(stderr).split(b'\n');
    let (mut out_open, mut err_open) = (true, true);

    while out_open || err_open {
        let (res, from_stdout) = tokio::select! {
            res = stdout.next_segment(), if out_open => (res, true),
            res = stderr.next_segment(), if err_open => (res, false),
        };
        match res {
            Ok(Some(bytes)) => {
                let line = String::from_utf8_lossy(&bytes);
                logger.raw(line.trim_end_matches('\r')).await?;
            }
            // EOF, or an unreadable stream: stop relaying that side
            Ok(None) | Err(_) => {
                if from_stdout {
                    out_open = false;
                } else {
                    err_open = false;
                }
            }
        }
    }
    Ok(())
}

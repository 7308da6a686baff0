use std::time::Duration;

use anyhow::Result;
use tokio::time::{MissedTickBehavior, interval};

use crate::{
    core::watcher::{WatchContext, watch_once},
    github::CommitSource,
};

/// Repeats [`watch_once`] every `interval_secs`, starting immediately.
/// A failing pass is logged and the loop carries on. Stops after
/// `max_passes` passes when given, otherwise runs forever.
pub async fn supervisor_loop<S: CommitSource>(
    ctx: &WatchContext,
    source: &S,
    interval_secs: u64,
    max_passes: Option<u64>,
) -> Result<()> {
    let mut ticker = interval(Duration::from_secs(interval_secs.max(1)));
    // a slow deployment must not cause a burst of catch-up passes
    ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

    let mut passes = 0;
    loop {
        if max_passes.is_some_and(|max| passes >= max) {
            return Ok(());
        }
        ticker.tick().await;
        passes += 1;

        if passes > 1 {
            ctx.logger.banner().await?;
        }
        if let Err(e) = watch_once(ctx, source).await {
            ctx.logger
                .error(&format!("❌ Watch pass failed: {e:#}"))
                .await?;
        }
    }
}

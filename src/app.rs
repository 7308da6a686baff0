use anyhow::{Context, Result};

use crate::{
    cli::{Cli, Commands, Paths},
    config::parser::load_config,
    core::{
        manager::supervisor_loop,
        state::SeenCommits,
        watcher::{WatchContext, watch_once},
    },
    github::GithubClient,
    log::logger::Logger,
};

/// Dispatches the parsed command line. Errors of `run` and `watch` have
/// already been written to the log when they are returned.
pub async fn handle(cli: &Cli) -> Result<()> {
    match cli.command() {
        Commands::Run => handle_run(&cli.paths).await,
        Commands::Watch { interval, passes } => handle_watch(&cli.paths, interval, passes).await,
        Commands::State => handle_state(&cli.paths).await,
        Commands::Logs { lines } => handle_logs(&cli.paths, lines).await,
    }
}

async fn handle_run(paths: &Paths) -> Result<()> {
    let logger = Logger::new(&paths.log_file).await?;
    logger.banner().await?;

    let result = async {
        let (ctx, client) = prepare(paths, logger.clone()).await?;
        watch_once(&ctx, &client).await?;
        anyhow::Ok(())
    }
    .await;

    log_failure(&logger, result).await
}

async fn handle_watch(paths: &Paths, interval: u64, passes: Option<u64>) -> Result<()> {
    let logger = Logger::new(&paths.log_file).await?;
    logger.banner().await?;
    logger
        .info(&format!("Watching every {interval}s"))
        .await?;

    let result = async {
        let (ctx, client) = prepare(paths, logger.clone()).await?;
        supervisor_loop(&ctx, &client, interval, passes).await
    }
    .await;

    log_failure(&logger, result).await
}

/// Loads the secrets file and connects to GitHub. Nothing is written to the
/// state file before this succeeds.
async fn prepare(paths: &Paths, logger: Logger) -> Result<(WatchContext, GithubClient)> {
    let config = load_config(&paths.env_file)?;

    let client = GithubClient::connect(&config)
        .await
        .context("Error connecting to GitHub")?;
    logger
        .info(&format!(
            "✅ Connected to GitHub Repo: {} (branch {})",
            client.full_name(),
            client.branch()
        ))
        .await?;

    let ctx = WatchContext::new(
        paths.state_file.clone(),
        paths.deploy_script.clone(),
        logger,
    );
    Ok((ctx, client))
}

async fn log_failure(logger: &Logger, result: Result<()>) -> Result<()> {
    if let Err(e) = &result {
        logger.error(&format!("❌ {e:#}")).await?;
    }
    result
}

async fn handle_state(paths: &Paths) -> Result<()> {
    match SeenCommits::load(&paths.state_file).await? {
        Some(seen) => {
            for id in &seen.ids {
                println!("{id}");
            }
        }
        None => println!(
            "No commits recorded yet ({} does not exist)",
            paths.state_file.display()
        ),
    }
    Ok(())
}

async fn handle_logs(paths: &Paths, lines: usize) -> Result<()> {
    for line in Logger::tail(&paths.log_file, lines).await? {
        println!("{line}");
    }
    Ok(())
}

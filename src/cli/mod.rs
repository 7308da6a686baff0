use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

use crate::core::watcher::{DEFAULT_DEPLOY_SCRIPT, DEFAULT_STATE_FILE};

pub const DEFAULT_ENV_FILE: &str = "secret_key.env";
pub const DEFAULT_LOG_FILE: &str = "CICD_EC2_PYTHON_LOGS";

#[derive(Parser, Debug, Clone)]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    #[command(flatten)]
    pub paths: Paths,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

impl Cli {
    /// `run` when no subcommand is given.
    pub fn command(&self) -> Commands {
        self.command.clone().unwrap_or(Commands::Run)
    }
}

#[derive(Args, Debug, Clone, PartialEq)]
pub struct Paths {
    /// Secrets file holding ACCESS_TOKEN and REPOSITORY_NAME
    #[arg(long, global = true, default_value = DEFAULT_ENV_FILE)]
    pub env_file: PathBuf,

    /// File recording the short hashes seen by the last run
    #[arg(long, global = true, default_value = DEFAULT_STATE_FILE)]
    pub state_file: PathBuf,

    /// Append-only log receiving all output
    #[arg(long, global = true, default_value = DEFAULT_LOG_FILE)]
    pub log_file: PathBuf,

    /// Script run with /bin/bash when new commits are found
    #[arg(long, global = true, default_value = DEFAULT_DEPLOY_SCRIPT)]
    pub deploy_script: PathBuf,
}

#[derive(Subcommand, Debug, Clone, PartialEq)]
pub enum Commands {
    /// Check once for new commits and deploy if needed
    Run,

    /// Keep checking at a fixed interval
    Watch {
        #[arg(short = 'i', long, default_value_t = 60)]
        interval: u64,

        /// Stop after this many passes
        #[arg(long)]
        passes: Option<u64>,
    },

    /// Print the recorded commit hashes
    State,

    /// Print the end of the log file
    Logs {
        #[arg(short = 'n', long, default_value_t = 20)]
        lines: usize,
    },
}

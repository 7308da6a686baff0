use std::{
    path::{Path, PathBuf},
    sync::Arc,
};

use chrono::Local;
use tokio::{fs::File, io::AsyncWriteExt, sync::Mutex};

/// Append-only run log. Every diagnostic, the relayed deploy output and the
/// commit report end up in the same file.
#[derive(Debug, Clone)]
pub struct Logger {
    file: Arc<Mutex<File>>,
    path: PathBuf,
    color_enable: bool,
}

const RESET: &str = "\x1b[0m";
const BG_BLUE: &str = "\x1b[44m"; // info
const BG_RED: &str = "\x1b[41m";
const FG_BOLD_WHITE: &str = "\x1b[97;1m";

const SEPARATOR: &str = "-------------------------------";

impl Logger {
    pub async fn new(path: &Path) -> anyhow::Result<Self> {
        if let Some(parent) = path.parent()
            && !parent.as_os_str().is_empty()
        {
            tokio::fs::create_dir_all(parent).await?;
        }
        let file = tokio::fs::OpenOptions::new()
            .append(true)
            .create(true)
            .open(path)
            .await?;
        let color = std::env::var("COMMITWATCH_COLOR").ok().as_deref() == Some("1");
        Ok(Self {
            file: Arc::new(Mutex::new(file)),
            path: path.to_path_buf(),
            color_enable: color,
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn paint_level(&self, level: &str) -> String {
        if !self.color_enable {
            return level.to_string();
        }
        match level {
            "INFO" => format!("{BG_BLUE}{FG_BOLD_WHITE} {level} {RESET}"),
            "ERROR" => format!("{BG_RED}{FG_BOLD_WHITE} {level} {RESET}"),
            _ => level.to_string(),
        }
    }

    async fn write(&self, text: &str) -> anyhow::Result<()> {
        let mut f = self.file.lock().await;
        f.write_all(text.as_bytes()).await?;
        f.flush().await?;
        Ok(())
    }

    pub async fn log(&self, level: &str, msg: &str) -> anyhow::Result<()> {
        let now = Local::now();
        let line = format!(
            "[{}] {}: {}\n",
            now.format("%Y-%m-%d %H:%M:%S"),
            self.paint_level(level),
            msg
        );
        self.write(&line).await
    }

    pub async fn info(&self, msg: &str) -> anyhow::Result<()> {
        self.log("INFO", msg).await
    }

    pub async fn error(&self, msg: &str) -> anyhow::Result<()> {
        self.log("ERROR", msg).await
    }

    /// Writes `line` as-is, without timestamp or level.
    pub async fn raw(&self, line: &str) -> anyhow::Result<()> {
        let mut text = line.to_string();
        if !text.ends_with('\n') {
            text.push('\n');
        }
        self.write(&text).await
    }

    /// Separator written once at the start of every run.
    pub async fn banner(&self) -> anyhow::Result<()> {
        let now = Local::now();
        let text = format!(
            "\n{SEPARATOR}\n📅 Trigger Time: {}\n{SEPARATOR}\n",
            now.format("%Y-%m-%d %H:%M:%S")
        );
        self.write(&text).await
    }

    /// Returns the last `n` non-empty lines of the log at `path`, oldest first.
    /// Lines are split on raw bytes and decoded one by one, so a multi-byte
    /// character is never cut in half.
    pub async fn tail(path: &Path, n: usize) -> anyhow::Result<Vec<String>> {
        if !tokio::fs::try_exists(path).await? {
            return Err(anyhow::anyhow!(
                "Failed to find log file {}",
                path.display()
            ));
        }

        let data = tokio::fs::read(path).await?;
        let mut collected: Vec<String> = data
            .split(|b| *b == b'\n')
            .rev()
            .filter(|line| !line.is_empty())
            .take(n)
            .map(|line| String::from_utf8_lossy(line).into_owned())
            .collect();
        collected.reverse();

        Ok(collected)
    }
}

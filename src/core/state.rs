use std::{collections::HashSet, path::Path};

use anyhow::{Context, Result};
use tokio::fs;

/// Short identifiers recorded by the last run that saw new commits,
/// newest first.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SeenCommits {
    pub ids: Vec<String>,
}

impl SeenCommits {
    pub fn new(ids: Vec<String>) -> Self {
        Self { ids }
    }

    pub fn parse(content: &str) -> Self {
        let ids = content
            .lines()
            .map(str::trim)
            .filter(|l| !l.is_empty())
            .map(String::from)
            .collect();
        Self { ids }
    }

    /// `None` when the state file does not exist yet (first run).
    pub async fn load(path: &Path) -> Result<Option<Self>> {
        if !fs::try_exists(path).await? {
            return Ok(None);
        }
        let data = fs::read_to_string(path)
            .await
            .with_context(|| format!("Error reading state file {}", path.display()))?;
        Ok(Some(Self::parse(&data)))
    }

    /// Replaces the whole file, one identifier per line.
    pub async fn save(&self, path: &Path) -> Result<()> {
        let mut content = String::new();
        for id in &self.ids {
            content.push_str(id);
            content.push('\n');
        }
        fs::write(path, content)
            .await
            .with_context(|| format!("Error writing state file {}", path.display()))?;
        Ok(())
    }

    /// Fetched identifiers absent from this state, in fetch order.
    /// Membership only: ordering of either side does not matter.
    pub fn unseen<'a>(&self, fetched: &'a [String]) -> Vec<&'a String> {
        let known: HashSet<&str> = self.ids.iter().map(String::as_str).collect();
        fetched
            .iter()
            .filter(|id| !known.contains(id.as_str()))
            .collect()
    }
}

use std::{collections::HashMap, fs, path::Path};

use anyhow::{Context, Result};

use crate::config::WatchConfig;

/// Parses `KEY=VALUE` lines. Lines starting with `#` and lines without `=`
/// are skipped; only the first `=` splits, so values may contain `=`.
pub fn parse_env(content: &str) -> HashMap<String, String> {
    let mut vars = HashMap::new();
    for line in content.lines() {
        let line = line.trim();
        if line.starts_with('#') {
            continue;
        }
        if let Some((key, value)) = line.split_once('=') {
            vars.insert(key.to_string(), value.to_string());
        }
    }
    vars
}

pub fn load_config(path: &Path) -> Result<WatchConfig> {
    if !path.exists() {
        anyhow::bail!("Environment file {} not found", path.display());
    }

    let content = fs::read_to_string(path)
        .with_context(|| format!("Error reading secrets file {}", path.display()))?;

    WatchConfig::from_vars(&parse_env(&content))
        .with_context(|| format!("Invalid secrets file {}", path.display()))
}

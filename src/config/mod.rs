pub mod parser;

use std::{collections::HashMap, fmt, str::FromStr};

use anyhow::Result;

pub const ACCESS_TOKEN_KEY: &str = "ACCESS_TOKEN";
pub const REPOSITORY_NAME_KEY: &str = "REPOSITORY_NAME";
pub const API_URL_KEY: &str = "GITHUB_API_URL";

pub const DEFAULT_API_URL: &str = "https://api.github.com";

/// Personal access token. Never printed by `Debug`.
#[derive(Clone, PartialEq, Eq)]
pub struct AccessToken(String);

impl AccessToken {
    pub fn new(token: impl Into<String>) -> Self {
        Self(token.into())
    }

    pub fn expose(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for AccessToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("AccessToken(***)")
    }
}

/// A repository identifier in `owner/name` form.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RepoName {
    pub owner: String,
    pub name: String,
}

impl FromStr for RepoName {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        let s = s.trim();
        match s.split_once('/') {
            Some((owner, name))
                if !owner.is_empty() && !name.is_empty() && !name.contains('/') =>
            {
                Ok(Self {
                    owner: owner.to_string(),
                    name: name.to_string(),
                })
            }
            _ => Err(anyhow::anyhow!(
                "Invalid repository name `{s}`, expected `owner/name`"
            )),
        }
    }
}

impl fmt::Display for RepoName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.owner, self.name)
    }
}

/// Everything read from the secrets file, built once per process.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WatchConfig {
    pub access_token: AccessToken,
    pub repository: RepoName,
    pub api_url: String,
}

impl WatchConfig {
    pub fn from_vars(vars: &HashMap<String, String>) -> Result<Self> {
        let token = vars.get(ACCESS_TOKEN_KEY).filter(|v| !v.is_empty());
        let repo = vars.get(REPOSITORY_NAME_KEY).filter(|v| !v.is_empty());

        let (token, repo) = match (token, repo) {
            (Some(t), Some(r)) => (t, r),
            (t, r) => {
                let missing: Vec<&str> = [
                    (t.is_none(), ACCESS_TOKEN_KEY),
                    (r.is_none(), REPOSITORY_NAME_KEY),
                ]
                .into_iter()
                .filter_map(|(absent, key)| absent.then_some(key))
                .collect();
                anyhow::bail!("Missing {} in secrets file", missing.join(" and "));
            }
        };

        let api_url = vars
            .get(API_URL_KEY)
            .filter(|v| !v.is_empty())
            .map(|v| v.trim_end_matches('/').to_string())
            .unwrap_or_else(|| DEFAULT_API_URL.to_string());

        Ok(Self {
            access_token: AccessToken::new(token.clone()),
            repository: repo.parse()?,
            api_url,
        })
    }
}

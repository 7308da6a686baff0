use anyhow::{Context, Result};
use reqwest::{Client, RequestBuilder, Response, StatusCode, header};
use serde::de::DeserializeOwned;

use crate::{
    config::{AccessToken, RepoName, WatchConfig},
    github::{
        CommitRecord, CommitSource,
        models::{ApiError, Commit, Repository},
    },
};

pub const USER_AGENT: &str = concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION"));

const API_VERSION: &str = "2022-11-28";

/// Read-only GitHub client bound to one repository and its default branch.
#[derive(Debug, Clone)]
pub struct GithubClient {
    http: Client,
    api_url: String,
    repository: RepoName,
    token: AccessToken,
    full_name: String,
    branch: String,
}

impl GithubClient {
    /// Resolves the repository, which both checks the token and yields the
    /// default branch the commit listing is read from.
    pub async fn connect(config: &WatchConfig) -> Result<Self> {
        let http = Client::builder().user_agent(USER_AGENT).build()?;
        let mut client = Self {
            http,
            api_url: config.api_url.clone(),
            repository: config.repository.clone(),
            token: config.access_token.clone(),
            full_name: config.repository.to_string(),
            branch: String::new(),
        };

        let repo = client.repository().await?;
        client.full_name = repo.full_name;
        client.branch = repo.default_branch;
        Ok(client)
    }

    /// `owner/name` as spelled by GitHub.
    pub fn full_name(&self) -> &str {
        &self.full_name
    }

    pub fn branch(&self) -> &str {
        &self.branch
    }

    pub async fn repository(&self) -> Result<Repository> {
        let url = format!("{}/repos/{}", self.api_url, self.repository);
        self.get_json(self.http.get(url)).await
    }

    pub async fn commits(&self, limit: usize) -> Result<Vec<Commit>> {
        let url = format!("{}/repos/{}/commits", self.api_url, self.repository);
        let per_page = limit.to_string();
        let mut request = self.http.get(url).query(&[("per_page", per_page.as_str())]);
        if !self.branch.is_empty() {
            request = request.query(&[("sha", self.branch.as_str())]);
        }
        self.get_json(request).await
    }

    async fn get_json<T: DeserializeOwned>(&self, request: RequestBuilder) -> Result<T> {
        let resp = request
            .bearer_auth(self.token.expose())
            .header(header::ACCEPT, "application/vnd.github+json")
            .header("X-GitHub-Api-Version", API_VERSION)
            .send()
            .await
            .context("GitHub request failed")?;

        let resp = self.check_status(resp).await?;
        resp.json::<T>()
            .await
            .context("Failed to decode GitHub response")
    }

    async fn check_status(&self, resp: Response) -> Result<Response> {
        let status = resp.status();
        if status.is_success() {
            return Ok(resp);
        }

        let body = resp.text().await.unwrap_or_default();
        let detail = serde_json::from_str::<ApiError>(&body)
            .map(|e| e.message)
            .unwrap_or(body);

        match status {
            StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => Err(anyhow::anyhow!(
                "Authentication failed ({status}): {detail}"
            )),
            StatusCode::NOT_FOUND => Err(anyhow::anyhow!(
                "Repository {} not found or not accessible: {detail}",
                self.repository
            )),
            _ => Err(anyhow::anyhow!("GitHub error: {status}: {detail}")),
        }
    }
}

impl CommitSource for GithubClient {
    async fn latest_commits(&self, limit: usize) -> Result<Vec<CommitRecord>> {
        let commits = self.commits(limit).await?;
        Ok(commits
            .into_iter()
            .take(limit)
            .map(CommitRecord::from)
            .collect())
    }
}

use async_trait::async_trait;
use chrono::{DateTime, SecondsFormat, Utc};
use octocrab::service::middleware::retry::RetryConfig;
use octocrab::Octocrab;
use serde::Serialize;

use super::error::GitHubError;
use super::types::{RateLimit, RawCommit, RawIssue, RawRateLimitResponse, RawRepository};
use crate::config::GithubConfig;

/// One page request against the commits listing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CommitQuery {
    pub since: Option<DateTime<Utc>>,
    pub until: Option<DateTime<Utc>>,
    pub per_page: u8,
    pub page: u32,
}

/// One page request against the closed issues listing. The endpoint has no
/// upper date bound.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct IssueQuery {
    pub since: Option<DateTime<Utc>>,
    pub per_page: u8,
    pub page: u32,
}

/// The read-only slice of the GitHub REST API the release notes pipeline needs.
#[async_trait]
pub trait RepositoryApi: Send + Sync {
    /// Whether requests carry a personal access token.
    fn is_authenticated(&self) -> bool;

    async fn get_repository(&self, owner: &str, repo: &str) -> Result<RawRepository, GitHubError>;

    async fn list_commits(
        &self,
        owner: &str,
        repo: &str,
        query: CommitQuery,
    ) -> Result<Vec<RawCommit>, GitHubError>;

    /// Lists `state=closed` issues, pull requests included.
    async fn list_closed_issues(
        &self,
        owner: &str,
        repo: &str,
        query: IssueQuery,
    ) -> Result<Vec<RawIssue>, GitHubError>;

    async fn get_rate_limit(&self) -> Result<RateLimit, GitHubError>;
}

#[derive(Serialize)]
struct CommitParams {
    #[serde(skip_serializing_if = "Option::is_none")]
    since: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    until: Option<String>,
    per_page: u8,
    page: u32,
}

#[derive(Serialize)]
struct IssueParams {
    state: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    since: Option<String>,
    per_page: u8,
    page: u32,
}

/// ISO-8601 with millisecond precision, e.g. `2024-01-15T00:00:00.000Z`.
pub fn iso_timestamp(instant: DateTime<Utc>) -> String {
    instant.to_rfc3339_opts(SecondsFormat::Millis, true)
}

/// Octocrab-backed [`RepositoryApi`]. Built once at start-up and shared by
/// reference for every request.
pub struct GitHubClient {
    client: Octocrab,
    authenticated: bool,
}

impl GitHubClient {
    pub fn new(config: &GithubConfig) -> Result<Self, GitHubError> {
        // A failed call must surface on the first attempt.
        let mut builder = Octocrab::builder();
        builder.add_retry_config(RetryConfig::None);

        let token = config.token.as_deref().filter(|t| !t.trim().is_empty());
        if let Some(token) = token {
            builder = builder.personal_token(token.to_string());
        }
        if let Some(api_url) = config.api_url.as_deref() {
            builder = builder.base_uri(api_url)?;
        }

        let client = builder.build()?;
        tracing::debug!(authenticated = token.is_some(), "GitHub client ready");

        Ok(Self {
            client,
            authenticated: token.is_some(),
        })
    }
}

#[async_trait]
impl RepositoryApi for GitHubClient {
    fn is_authenticated(&self) -> bool {
        self.authenticated
    }

    async fn get_repository(&self, owner: &str, repo: &str) -> Result<RawRepository, GitHubError> {
        let repository = self
            .client
            .get(format!("/repos/{}/{}", owner, repo), None::<&()>)
            .await?;
        Ok(repository)
    }

    async fn list_commits(
        &self,
        owner: &str,
        repo: &str,
        query: CommitQuery,
    ) -> Result<Vec<RawCommit>, GitHubError> {
        let params = CommitParams {
            since: query.since.map(iso_timestamp),
            until: query.until.map(iso_timestamp),
            per_page: query.per_page,
            page: query.page,
        };
        let commits = self
            .client
            .get(format!("/repos/{}/{}/commits", owner, repo), Some(&params))
            .await?;
        Ok(commits)
    }

    async fn list_closed_issues(
        &self,
        owner: &str,
        repo: &str,
        query: IssueQuery,
    ) -> Result<Vec<RawIssue>, GitHubError> {
        let params = IssueParams {
            state: "closed",
            since: query.since.map(iso_timestamp),
            per_page: query.per_page,
            page: query.page,
        };
        let issues = self
            .client
            .get(format!("/repos/{}/{}/issues", owner, repo), Some(&params))
            .await?;
        Ok(issues)
    }

    async fn get_rate_limit(&self) -> Result<RateLimit, GitHubError> {
        let response: RawRateLimitResponse = self.client.get("/rate_limit", None::<&()>).await?;
        Ok(response.rate)
    }
}

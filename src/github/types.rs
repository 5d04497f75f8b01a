//! Raw GitHub REST payloads.
//!
//! These mirror only the fields the release notes pipeline reads. Every field
//! GitHub may omit or send as `null` is an `Option`, so decoding never depends
//! on implicit coercion; the normalizer decides what the defaults are.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// `GET /repos/{owner}/{repo}`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RawRepository {
    #[serde(default)]
    pub private: bool,
}

/// A GitHub account reference (`author`, `user`).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RawUser {
    pub login: Option<String>,
}

/// Git-level author/committer signature inside a commit.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RawSignature {
    pub name: Option<String>,
    pub date: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RawCommitDetail {
    pub message: Option<String>,
    pub author: Option<RawSignature>,
}

/// One entry of `GET /repos/{owner}/{repo}/commits`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RawCommit {
    pub sha: String,
    pub commit: RawCommitDetail,
    pub author: Option<RawUser>,
    pub html_url: Option<String>,
}

/// Labels come back either as bare names or as label objects.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(untagged)]
pub enum RawLabel {
    Name(String),
    Detailed { name: Option<String> },
}

impl RawLabel {
    pub fn name(&self) -> Option<&str> {
        match self {
            RawLabel::Name(name) => Some(name.as_str()),
            RawLabel::Detailed { name } => name.as_deref(),
        }
    }
}

/// One entry of `GET /repos/{owner}/{repo}/issues`. GitHub serves pull
/// requests from the same endpoint, marked by a `pull_request` object.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RawIssue {
    pub number: u64,
    pub title: Option<String>,
    pub state: Option<String>,
    #[serde(default)]
    pub labels: Vec<RawLabel>,
    pub user: Option<RawUser>,
    pub closed_at: Option<DateTime<Utc>>,
    pub updated_at: Option<DateTime<Utc>>,
    pub created_at: Option<DateTime<Utc>>,
    pub html_url: Option<String>,
    pub pull_request: Option<serde_json::Value>,
}

impl RawIssue {
    pub fn is_pull_request(&self) -> bool {
        self.pull_request.is_some()
    }
}

/// Core request quota as reported by `GET /rate_limit`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RateLimit {
    pub limit: u64,
    pub remaining: u64,
    /// Unix timestamp when the quota resets.
    pub reset: u64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RawRateLimitResponse {
    pub rate: RateLimit,
}

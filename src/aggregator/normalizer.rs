use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::github::types::{RawCommit, RawIssue, RawLabel};

const UNKNOWN_AUTHOR: &str = "Unknown";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Commit {
    pub sha: String,
    /// Full message; only the first line is rendered.
    pub message: String,
    pub author: String,
    pub date: DateTime<Utc>,
    pub url: String,
}

impl Commit {
    pub fn short_sha(&self) -> &str {
        match self.sha.char_indices().nth(7) {
            Some((idx, _)) => &self.sha[..idx],
            None => &self.sha,
        }
    }

    pub fn summary(&self) -> &str {
        self.message.split('\n').next().unwrap_or("")
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ItemKind {
    Issue,
    PullRequest,
}

/// An issue or a pull request. Both share GitHub's numbering space and shape.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WorkItem {
    pub kind: ItemKind,
    pub number: u64,
    pub title: String,
    pub state: String,
    pub labels: Vec<String>,
    pub author: String,
    pub date: DateTime<Utc>,
    pub url: String,
}

impl WorkItem {
    pub fn is_closed(&self) -> bool {
        self.state == "closed"
    }
}

/// Normalized repository activity for one request.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Activity {
    pub commits: Vec<Commit>,
    pub issues: Vec<WorkItem>,
    pub pull_requests: Vec<WorkItem>,
}

fn non_empty(value: Option<&str>) -> Option<&str> {
    value.filter(|v| !v.is_empty())
}

pub struct Normalizer;

impl Normalizer {
    pub fn normalize(commits: Vec<RawCommit>, items: Vec<RawIssue>) -> Activity {
        let commits = commits.into_iter().map(Self::commit).collect();

        let mut issues = Vec::new();
        let mut pull_requests = Vec::new();
        for item in items.into_iter().map(Self::work_item) {
            match item.kind {
                ItemKind::Issue => issues.push(item),
                ItemKind::PullRequest => pull_requests.push(item),
            }
        }

        Activity {
            commits,
            issues,
            pull_requests,
        }
    }

    pub fn commit(raw: RawCommit) -> Commit {
        let signature = raw.commit.author.as_ref();

        let author = non_empty(signature.and_then(|s| s.name.as_deref()))
            .or_else(|| non_empty(raw.author.as_ref().and_then(|a| a.login.as_deref())))
            .unwrap_or(UNKNOWN_AUTHOR)
            .to_string();
        let date = signature.and_then(|s| s.date).unwrap_or_else(Utc::now);

        Commit {
            sha: raw.sha,
            message: raw.commit.message.unwrap_or_default(),
            author,
            date,
            url: raw.html_url.unwrap_or_default(),
        }
    }

    pub fn work_item(raw: RawIssue) -> WorkItem {
        let kind = if raw.is_pull_request() {
            ItemKind::PullRequest
        } else {
            ItemKind::Issue
        };

        let labels = raw
            .labels
            .iter()
            .filter_map(RawLabel::name)
            .filter(|name| !name.is_empty())
            .map(str::to_string)
            .collect();

        let author = non_empty(raw.user.as_ref().and_then(|u| u.login.as_deref()))
            .unwrap_or(UNKNOWN_AUTHOR)
            .to_string();

        let date = raw
            .closed_at
            .or(raw.updated_at)
            .or(raw.created_at)
            .unwrap_or_else(Utc::now);

        WorkItem {
            kind,
            number: raw.number,
            title: raw.title.unwrap_or_default(),
            state: raw.state.unwrap_or_default(),
            labels,
            author,
            date,
            url: raw.html_url.unwrap_or_default(),
        }
    }
}

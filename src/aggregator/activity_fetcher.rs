use chrono::{DateTime, Utc};
use std::future::Future;

use super::RepoSlug;
use crate::error::ReleaseNotesError;
use crate::github::client::{CommitQuery, IssueQuery, RepositoryApi};
use crate::github::error::GitHubError;
use crate::github::types::{RawCommit, RawIssue};

pub const PAGE_SIZE: u8 = 100;

/// Collection stops once this many items of one kind have been gathered.
pub const MAX_ITEMS_PER_KIND: usize = 500;

/// Optional bounds of the requested period.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DateWindow {
    pub since: Option<DateTime<Utc>>,
    pub until: Option<DateTime<Utc>>,
}

/// Raw payloads exactly as GitHub returned them, pages concatenated in order.
#[derive(Debug, Clone, Default)]
pub struct RawActivity {
    pub commits: Vec<RawCommit>,
    pub issues: Vec<RawIssue>,
}

/// Requests pages 1, 2, ... one at a time until a page comes back empty or
/// at least `MAX_ITEMS_PER_KIND` items are collected.
async fn paginate<T, F, Fut>(mut fetch_page: F) -> Result<Vec<T>, GitHubError>
where
    F: FnMut(u32) -> Fut,
    Fut: Future<Output = Result<Vec<T>, GitHubError>>,
{
    let mut items = Vec::new();
    let mut page = 1;

    loop {
        let batch = fetch_page(page).await?;
        if batch.is_empty() {
            break;
        }
        tracing::debug!(page, count = batch.len(), "fetched page");
        items.extend(batch);

        if items.len() >= MAX_ITEMS_PER_KIND {
            tracing::debug!(total = items.len(), "item cap reached, stopping pagination");
            break;
        }
        page += 1;
    }

    Ok(items)
}

pub struct ActivityFetcher<'a, A: ?Sized> {
    api: &'a A,
}

impl<'a, A: RepositoryApi + ?Sized> ActivityFetcher<'a, A> {
    pub fn new(api: &'a A) -> Self {
        Self { api }
    }

    /// Fails unless the repository exists and is public.
    pub async fn ensure_public(&self, slug: &RepoSlug) -> Result<(), ReleaseNotesError> {
        let repository = self
            .api
            .get_repository(&slug.owner, &slug.name)
            .await
            .map_err(|err| {
                tracing::warn!(repo = %slug, error = %err, "repository lookup failed");
                ReleaseNotesError::from_metadata_failure(&slug.to_string(), &err)
            })?;

        if repository.private {
            return Err(ReleaseNotesError::PrivateRepository(slug.to_string()));
        }
        Ok(())
    }

    pub async fn fetch(&self, slug: &RepoSlug, window: DateWindow) -> Result<RawActivity, ReleaseNotesError> {
        let into_error = |err: GitHubError| {
            tracing::warn!(repo = %slug, error = %err, "failed to fetch repository activity");
            ReleaseNotesError::from_fetch_failure(&slug.to_string(), &err)
        };

        let commits = paginate(|page| {
            self.api.list_commits(
                &slug.owner,
                &slug.name,
                CommitQuery {
                    since: window.since,
                    until: window.until,
                    per_page: PAGE_SIZE,
                    page,
                },
            )
        })
        .await
        .map_err(into_error)?;

        let issues = paginate(|page| {
            self.api.list_closed_issues(
                &slug.owner,
                &slug.name,
                IssueQuery {
                    since: window.since,
                    per_page: PAGE_SIZE,
                    page,
                },
            )
        })
        .await
        .map_err(into_error)?;

        tracing::info!(
            repo = %slug,
            commits = commits.len(),
            issues = issues.len(),
            "fetched repository activity"
        );

        Ok(RawActivity { commits, issues })
    }
}

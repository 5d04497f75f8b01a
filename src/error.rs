//! User-facing failures of release note generation.

use thiserror::Error;

use crate::github::GitHubError;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ReleaseNotesError {
    /// Rejected before any request was made.
    #[error("{0}")]
    Validation(String),

    #[error("Repository {0} not found. Please check the repository name.")]
    NotFound(String),

    #[error("Repository {0} is private. This tool only supports public repositories.")]
    PrivateRepository(String),

    #[error("GitHub API authentication failed. Please check your GitHub token.")]
    Authentication,

    #[error("GitHub API rate limit exceeded. Please try again later or use a valid GitHub token.")]
    RateLimited,

    #[error("Failed to fetch data from GitHub: {0}")]
    Upstream(String),
}

impl ReleaseNotesError {
    pub fn is_private_repository(&self) -> bool {
        matches!(self, ReleaseNotesError::PrivateRepository(_))
    }

    /// Translates a failed repository metadata lookup.
    pub(crate) fn from_metadata_failure(repo: &str, err: &GitHubError) -> Self {
        match err.status() {
            Some(404) => ReleaseNotesError::NotFound(repo.to_string()),
            Some(401) => ReleaseNotesError::Authentication,
            Some(403) | Some(429) => ReleaseNotesError::RateLimited,
            _ => ReleaseNotesError::Upstream(err.to_string()),
        }
    }

    /// Translates a failed commit or issue page request. GitHub answers 403
    /// both for exhausted quotas and for repositories it will not expose.
    pub(crate) fn from_fetch_failure(repo: &str, err: &GitHubError) -> Self {
        match err.status() {
            Some(401) => ReleaseNotesError::Authentication,
            Some(403) if err.message().to_lowercase().contains("private") => {
                ReleaseNotesError::PrivateRepository(repo.to_string())
            }
            Some(403) | Some(429) => ReleaseNotesError::RateLimited,
            Some(404) => ReleaseNotesError::NotFound(repo.to_string()),
            _ => ReleaseNotesError::Upstream(err.to_string()),
        }
    }
}

//! Transport-level errors from the GitHub REST API.

use thiserror::Error;

/// Errors returned by a [`RepositoryApi`](super::client::RepositoryApi) call.
#[derive(Debug, Clone, Error)]
pub enum GitHubError {
    /// GitHub answered with a non-success status.
    #[error("{message} (HTTP {status})")]
    Response { status: u16, message: String },

    /// The request never produced an API response (connection, TLS, decoding).
    #[error("{0}")]
    Transport(String),
}

impl GitHubError {
    pub fn status(&self) -> Option<u16> {
        match self {
            GitHubError::Response { status, .. } => Some(*status),
            GitHubError::Transport(_) => None,
        }
    }

    /// The message GitHub attached to the response, or the transport failure text.
    pub fn message(&self) -> &str {
        match self {
            GitHubError::Response { message, .. } => message,
            GitHubError::Transport(message) => message,
        }
    }
}

impl From<octocrab::Error> for GitHubError {
    fn from(err: octocrab::Error) -> Self {
        match err {
            octocrab::Error::GitHub { source, .. } => GitHubError::Response {
                status: source.status_code.as_u16(),
                message: source.message.clone(),
            },
            other => GitHubError::Transport(other.to_string()),
        }
    }
}

pub mod client;
pub mod error;
pub mod status;
pub mod types;

pub use client::{CommitQuery, GitHubClient, IssueQuery, RepositoryApi};
pub use error::GitHubError;
pub use status::{check_status, StatusReport};

//! Release notes for public GitHub repositories.
//!
//! Commits and closed issues/pull requests in a date range are fetched page by
//! page, sorted into change categories from their labels and titles, and
//! rendered as plain text or markdown.

pub mod aggregator;
pub mod config;
pub mod error;
pub mod github;

pub use aggregator::{OutputFormat, ReleaseNotesGenerator, ReleaseNotesRequest};
pub use config::Config;
pub use error::ReleaseNotesError;
pub use github::{GitHubClient, RepositoryApi};

pub mod activity_fetcher;
pub mod changelog_generator;
pub mod classifier;
pub mod normalizer;

pub use activity_fetcher::{ActivityFetcher, DateWindow, MAX_ITEMS_PER_KIND};
pub use changelog_generator::{ChangelogGenerator, OutputFormat};
pub use classifier::{classify, Category, ItemClassifier, ProcessedData};
pub use normalizer::{Commit, ItemKind, Normalizer, WorkItem};

use chrono::{DateTime, NaiveDate, Utc};
use regex::Regex;
use std::fmt;
use std::sync::LazyLock;

use crate::error::ReleaseNotesError;
use crate::github::client::RepositoryApi;

static SLUG_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^([^/\s]+)/([^/\s]+)$").expect("valid slug pattern"));

/// A repository identifier of the form `owner/name`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RepoSlug {
    pub owner: String,
    pub name: String,
}

impl RepoSlug {
    pub fn parse(input: &str) -> Result<Self, ReleaseNotesError> {
        let input = input.trim();
        if input.is_empty() {
            return Err(ReleaseNotesError::Validation(
                "Repository is required".to_string(),
            ));
        }

        let caps = SLUG_PATTERN.captures(input).ok_or_else(|| {
            ReleaseNotesError::Validation("Invalid repository format. Use 'owner/repo'".to_string())
        })?;

        Ok(Self {
            owner: caps[1].to_string(),
            name: caps[2].to_string(),
        })
    }
}

impl fmt::Display for RepoSlug {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.owner, self.name)
    }
}

/// Parses a `YYYY-MM-DD` day (midnight UTC) or an RFC 3339 instant. Blank
/// input means the bound was not supplied.
pub fn parse_date(input: Option<&str>) -> Result<Option<DateTime<Utc>>, ReleaseNotesError> {
    let Some(input) = input.map(str::trim).filter(|s| !s.is_empty()) else {
        return Ok(None);
    };

    if let Ok(day) = NaiveDate::parse_from_str(input, "%Y-%m-%d") {
        return Ok(day.and_hms_opt(0, 0, 0).map(|dt| dt.and_utc()));
    }

    DateTime::parse_from_rfc3339(input)
        .map(|dt| Some(dt.with_timezone(&Utc)))
        .map_err(|_| ReleaseNotesError::Validation(format!("Invalid date: {}", input)))
}

/// Inputs of one release notes generation.
#[derive(Debug, Clone, Default)]
pub struct ReleaseNotesRequest {
    pub repo: String,
    pub start_date: Option<String>,
    pub end_date: Option<String>,
    pub format: OutputFormat,
}

/// Runs the whole pipeline: check, fetch, normalize, classify, render.
pub struct ReleaseNotesGenerator<A> {
    api: A,
}

impl<A: RepositoryApi> ReleaseNotesGenerator<A> {
    pub fn new(api: A) -> Self {
        Self { api }
    }

    pub async fn generate(&self, request: &ReleaseNotesRequest) -> Result<String, ReleaseNotesError> {
        self.try_generate(request).await.inspect_err(|err| {
            tracing::error!(repo = %request.repo, error = %err, "error generating release notes");
        })
    }

    async fn try_generate(&self, request: &ReleaseNotesRequest) -> Result<String, ReleaseNotesError> {
        let slug = RepoSlug::parse(&request.repo)?;
        let window = DateWindow {
            since: parse_date(request.start_date.as_deref())?,
            until: parse_date(request.end_date.as_deref())?,
        };

        let fetcher = ActivityFetcher::new(&self.api);
        fetcher.ensure_public(&slug).await?;
        let raw = fetcher.fetch(&slug, window).await?;

        let activity = Normalizer::normalize(raw.commits, raw.issues);
        let data = ItemClassifier::process(activity);

        let generator = ChangelogGenerator::new(request.format);
        Ok(generator.generate(
            &data,
            &slug.to_string(),
            &changelog_generator::display_date(window.since),
            &changelog_generator::display_date(window.until),
        ))
    }
}

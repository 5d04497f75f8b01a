use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::convert::Infallible;

use super::classifier::{Category, ProcessedData};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase", from = "String")]
pub enum OutputFormat {
    #[default]
    PlainText,
    Markdown,
}

impl From<&str> for OutputFormat {
    /// Only the literal `markdown` selects markdown; anything else is plain text.
    fn from(s: &str) -> Self {
        if s == "markdown" {
            OutputFormat::Markdown
        } else {
            OutputFormat::PlainText
        }
    }
}

impl From<String> for OutputFormat {
    fn from(s: String) -> Self {
        OutputFormat::from(s.as_str())
    }
}

impl std::str::FromStr for OutputFormat {
    type Err = Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(OutputFormat::from(s))
    }
}

/// Header date: US short date of the UTC day, or `N/A`.
pub fn display_date(date: Option<DateTime<Utc>>) -> String {
    date.map(|d| d.format("%-m/%-d/%Y").to_string())
        .unwrap_or_else(|| "N/A".to_string())
}

pub struct ChangelogGenerator {
    format: OutputFormat,
}

impl ChangelogGenerator {
    pub fn new(format: OutputFormat) -> Self {
        Self { format }
    }

    pub fn generate(&self, data: &ProcessedData, repo: &str, start_date: &str, end_date: &str) -> String {
        match self.format {
            OutputFormat::Markdown => Self::generate_markdown(data, repo, start_date, end_date),
            OutputFormat::PlainText => Self::generate_plain_text(data, repo, start_date, end_date),
        }
    }

    fn generate_plain_text(data: &ProcessedData, repo: &str, start_date: &str, end_date: &str) -> String {
        let mut output = String::new();

        output.push_str(&format!("RELEASE NOTES FOR {}\n\n", repo));
        output.push_str(&format!("Period: {} to {}\n\n", start_date, end_date));

        for category in Category::ALL {
            let items = data.bucket(category);
            if items.is_empty() {
                continue;
            }
            output.push_str(&format!(
                "{} {}:\n\n",
                category.emoji(),
                category.to_string().to_uppercase()
            ));
            for item in items {
                output.push_str(&format!("- {} (#{}) by {}\n", item.title, item.number, item.author));
            }
            output.push('\n');
        }

        if !data.commits.is_empty() {
            output.push_str("📝 COMMITS:\n\n");
            for commit in &data.commits {
                output.push_str(&format!(
                    "- {} ({}) by {}\n",
                    commit.summary(),
                    commit.short_sha(),
                    commit.author
                ));
            }
        }

        output
    }

    fn generate_markdown(data: &ProcessedData, repo: &str, start_date: &str, end_date: &str) -> String {
        let mut output = String::new();

        output.push_str(&format!("# Release Notes for {}\n\n", repo));
        output.push_str(&format!("**Period:** {} to {}\n\n", start_date, end_date));

        for category in Category::ALL {
            let items = data.bucket(category);
            if items.is_empty() {
                continue;
            }
            output.push_str(&format!("## {} {}\n\n", category.emoji(), category));
            for item in items {
                output.push_str(&format!(
                    "- {} ([#{}]({})) by {}\n",
                    item.title, item.number, item.url, item.author
                ));
            }
            output.push('\n');
        }

        if !data.commits.is_empty() {
            output.push_str("## 📝 Commits\n\n");
            for commit in &data.commits {
                output.push_str(&format!(
                    "- {} ([{}]({})) by {}\n",
                    commit.summary(),
                    commit.short_sha(),
                    commit.url,
                    commit.author
                ));
            }
        }

        output
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::aggregator::normalizer::{Commit, ItemKind, WorkItem};
    use chrono::TimeZone;
    use pretty_assertions::assert_eq;

    fn work_item(number: u64, title: &str) -> WorkItem {
        WorkItem {
            kind: ItemKind::PullRequest,
            number,
            title: title.to_string(),
            state: "closed".to_string(),
            labels: vec![],
            author: "mona".to_string(),
            date: Utc::now(),
            url: format!("https://github.com/octo/demo/pull/{}", number),
        }
    }

    fn commit(sha: &str, message: &str) -> Commit {
        Commit {
            sha: sha.to_string(),
            message: message.to_string(),
            author: "Mona Lisa".to_string(),
            date: Utc::now(),
            url: format!("https://github.com/octo/demo/commit/{}", sha),
        }
    }

    fn sample() -> ProcessedData {
        ProcessedData {
            features: vec![work_item(3, "Add dark mode")],
            other: vec![work_item(7, "Release prep")],
            commits: vec![commit("0123456789abcdef", "Add dark mode\n\nCloses #3")],
            ..ProcessedData::default()
        }
    }

    #[test]
    fn test_format_selector() {
        assert_eq!(OutputFormat::from("markdown"), OutputFormat::Markdown);
        assert_eq!(OutputFormat::from("plaintext"), OutputFormat::PlainText);
        assert_eq!(OutputFormat::from("Markdown"), OutputFormat::PlainText);
        assert_eq!(OutputFormat::from("html"), OutputFormat::PlainText);
        assert_eq!("".parse::<OutputFormat>().unwrap(), OutputFormat::PlainText);
    }

    #[test]
    fn test_display_date() {
        let date = Utc.with_ymd_and_hms(2024, 1, 5, 0, 0, 0).unwrap();
        assert_eq!(display_date(Some(date)), "1/5/2024");
        assert_eq!(display_date(None), "N/A");
    }

    #[test]
    fn test_plain_text() {
        let output = ChangelogGenerator::new(OutputFormat::PlainText).generate(
            &sample(),
            "octo/demo",
            "1/1/2024",
            "N/A",
        );

        let expected = "RELEASE NOTES FOR octo/demo\n\n\
Period: 1/1/2024 to N/A\n\n\
✨ NEW FEATURES:\n\n\
- Add dark mode (#3) by mona\n\n\
🔄 OTHER CHANGES:\n\n\
- Release prep (#7) by mona\n\n\
📝 COMMITS:\n\n\
- Add dark mode (0123456) by Mona Lisa\n";
        assert_eq!(output, expected);
    }

    #[test]
    fn test_markdown() {
        let output = ChangelogGenerator::new(OutputFormat::Markdown).generate(
            &sample(),
            "octo/demo",
            "N/A",
            "N/A",
        );

        let expected = "# Release Notes for octo/demo\n\n\
**Period:** N/A to N/A\n\n\
## ✨ New Features\n\n\
- Add dark mode ([#3](https://github.com/octo/demo/pull/3)) by mona\n\n\
## 🔄 Other Changes\n\n\
- Release prep ([#7](https://github.com/octo/demo/pull/7)) by mona\n\n\
## 📝 Commits\n\n\
- Add dark mode ([0123456](https://github.com/octo/demo/commit/0123456789abcdef)) by Mona Lisa\n";
        assert_eq!(output, expected);
    }

    #[test]
    fn test_empty_data_renders_header_only() {
        let output = ChangelogGenerator::new(OutputFormat::PlainText).generate(
            &ProcessedData::default(),
            "octo/demo",
            "N/A",
            "N/A",
        );
        assert_eq!(output, "RELEASE NOTES FOR octo/demo\n\nPeriod: N/A to N/A\n\n");
    }

    #[test]
    fn test_titles_are_not_escaped() {
        let data = ProcessedData {
            bugfixes: vec![work_item(1, "Fix `*bold*` [link] handling")],
            ..ProcessedData::default()
        };
        let output = ChangelogGenerator::new(OutputFormat::Markdown).generate(&data, "o/r", "N/A", "N/A");
        assert!(output.contains("- Fix `*bold*` [link] handling ([#1]"));
    }
}

use serde::{Deserialize, Serialize};
use std::fmt;

use super::normalizer::{Activity, Commit, WorkItem};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Category {
    Features,
    Bugfixes,
    Enhancements,
    Documentation,
    Other,
}

impl Category {
    /// Rendering order.
    pub const ALL: [Category; 5] = [
        Category::Features,
        Category::Bugfixes,
        Category::Enhancements,
        Category::Documentation,
        Category::Other,
    ];

    pub fn emoji(self) -> &'static str {
        match self {
            Category::Features => "✨",
            Category::Bugfixes => "🐛",
            Category::Enhancements => "🔧",
            Category::Documentation => "📚",
            Category::Other => "🔄",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Category::Features => write!(f, "New Features"),
            Category::Bugfixes => write!(f, "Bug Fixes"),
            Category::Enhancements => write!(f, "Enhancements"),
            Category::Documentation => write!(f, "Documentation"),
            Category::Other => write!(f, "Other Changes"),
        }
    }
}

/// Ordered label rules; the first rule with any matching label wins.
const LABEL_RULES: [(Category, &[&str]); 4] = [
    (Category::Bugfixes, &["bug", "fix"]),
    (Category::Features, &["feature"]),
    (Category::Enhancements, &["enhancement", "improve"]),
    (Category::Documentation, &["documentation", "docs"]),
];

/// Ordered title rules, consulted only when no label rule matched.
const TITLE_RULES: [(Category, &[&str]); 4] = [
    (Category::Bugfixes, &["fix", "bug"]),
    (Category::Features, &["feature", "add"]),
    (Category::Enhancements, &["enhance", "improve", "update"]),
    (Category::Documentation, &["doc"]),
];

fn contains_any(haystack: &str, needles: &[&str]) -> bool {
    let haystack = haystack.to_lowercase();
    needles.iter().any(|needle| haystack.contains(needle))
}

/// Assigns exactly one category from an item's labels, then its title.
pub fn classify(labels: &[String], title: &str) -> Category {
    for (category, keywords) in LABEL_RULES {
        if labels.iter().any(|label| contains_any(label, keywords)) {
            return category;
        }
    }

    TITLE_RULES
        .into_iter()
        .find(|(_, keywords)| contains_any(title, keywords))
        .map(|(category, _)| category)
        .unwrap_or(Category::Other)
}

/// Issues and pull requests partitioned into categories, plus every commit.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProcessedData {
    pub features: Vec<WorkItem>,
    pub bugfixes: Vec<WorkItem>,
    pub enhancements: Vec<WorkItem>,
    pub documentation: Vec<WorkItem>,
    pub other: Vec<WorkItem>,
    pub commits: Vec<Commit>,
}

impl ProcessedData {
    pub fn bucket(&self, category: Category) -> &[WorkItem] {
        match category {
            Category::Features => &self.features,
            Category::Bugfixes => &self.bugfixes,
            Category::Enhancements => &self.enhancements,
            Category::Documentation => &self.documentation,
            Category::Other => &self.other,
        }
    }

    fn bucket_mut(&mut self, category: Category) -> &mut Vec<WorkItem> {
        match category {
            Category::Features => &mut self.features,
            Category::Bugfixes => &mut self.bugfixes,
            Category::Enhancements => &mut self.enhancements,
            Category::Documentation => &mut self.documentation,
            Category::Other => &mut self.other,
        }
    }

    pub fn categorized_count(&self) -> usize {
        Category::ALL.iter().map(|c| self.bucket(*c).len()).sum()
    }
}

pub struct ItemClassifier;

impl ItemClassifier {
    /// Buckets every pull request, then every closed issue. Issues in any
    /// other state are dropped; pull requests are taken regardless of state.
    pub fn process(activity: Activity) -> ProcessedData {
        let Activity {
            commits,
            issues,
            pull_requests,
        } = activity;

        let mut data = ProcessedData {
            commits,
            ..ProcessedData::default()
        };

        let closed_issues = issues.into_iter().filter(WorkItem::is_closed);
        for item in pull_requests.into_iter().chain(closed_issues) {
            let category = classify(&item.labels, &item.title);
            data.bucket_mut(category).push(item);
        }

        tracing::debug!(
            features = data.features.len(),
            bugfixes = data.bugfixes.len(),
            enhancements = data.enhancements.len(),
            documentation = data.documentation.len(),
            other = data.other.len(),
            commits = data.commits.len(),
            "categorized repository activity"
        );

        data
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::aggregator::normalizer::ItemKind;
    use chrono::Utc;

    fn labels(names: &[&str]) -> Vec<String> {
        names.iter().map(|n| n.to_string()).collect()
    }

    fn item(kind: ItemKind, number: u64, title: &str, state: &str, label_names: &[&str]) -> WorkItem {
        WorkItem {
            kind,
            number,
            title: title.to_string(),
            state: state.to_string(),
            labels: labels(label_names),
            author: "octocat".to_string(),
            date: Utc::now(),
            url: format!("https://github.com/octo/demo/issues/{}", number),
        }
    }

    #[test]
    fn test_bug_label_wins_regardless_of_title() {
        assert_eq!(classify(&labels(&["bug", "ui"]), "Add dark mode"), Category::Bugfixes);
    }

    #[test]
    fn test_labels_precede_title() {
        assert_eq!(
            classify(&labels(&["documentation"]), "Fix typo"),
            Category::Documentation
        );
    }

    #[test]
    fn test_label_rule_order_is_fixed() {
        assert_eq!(classify(&labels(&["feature", "bug"]), ""), Category::Bugfixes);
        assert_eq!(
            classify(&labels(&["docs", "Enhancement"]), ""),
            Category::Enhancements
        );
    }

    #[test]
    fn test_label_matching_is_case_insensitive_substring() {
        assert_eq!(classify(&labels(&["Type: BugFix"]), ""), Category::Bugfixes);
        assert_eq!(classify(&labels(&["New-Feature"]), ""), Category::Features);
        assert_eq!(classify(&labels(&["perf-improvement"]), ""), Category::Enhancements);
        assert_eq!(classify(&labels(&["area/docs"]), ""), Category::Documentation);
    }

    #[test]
    fn test_unmatched_labels_fall_back_to_title() {
        assert_eq!(classify(&labels(&["ui"]), "Fix crash on startup"), Category::Bugfixes);
        assert_eq!(classify(&[], "Add dark mode"), Category::Features);
        assert_eq!(classify(&[], "Improve startup time"), Category::Enhancements);
        assert_eq!(classify(&[], "Update dependencies"), Category::Enhancements);
        assert_eq!(classify(&[], "README doc tweaks"), Category::Documentation);
        assert_eq!(classify(&[], "Release 1.2.0"), Category::Other);
    }

    #[test]
    fn test_title_rule_order_is_fixed() {
        // "fix" outranks "add", and "add" outranks "update"
        assert_eq!(classify(&[], "Add fix for login"), Category::Bugfixes);
        assert_eq!(classify(&[], "Update and add docs"), Category::Features);
    }

    #[test]
    fn test_process_filters_open_issues_only() {
        let activity = Activity {
            commits: vec![],
            issues: vec![
                item(ItemKind::Issue, 1, "Crash", "open", &["bug"]),
                item(ItemKind::Issue, 2, "Crash", "closed", &["bug"]),
            ],
            pull_requests: vec![item(ItemKind::PullRequest, 3, "Add dark mode", "open", &[])],
        };

        let data = ItemClassifier::process(activity);
        assert_eq!(data.categorized_count(), 2);
        assert_eq!(data.bugfixes.iter().map(|i| i.number).collect::<Vec<_>>(), vec![2]);
        assert_eq!(data.features.iter().map(|i| i.number).collect::<Vec<_>>(), vec![3]);
    }

    #[test]
    fn test_every_item_lands_in_exactly_one_bucket() {
        let titles = [
            "Fix crash",
            "Add search",
            "Improve speed",
            "Docs cleanup",
            "Bump version",
            "Feature flag rework",
        ];
        let pull_requests: Vec<WorkItem> = titles
            .iter()
            .enumerate()
            .map(|(i, title)| item(ItemKind::PullRequest, i as u64 + 1, title, "closed", &[]))
            .collect();

        let data = ItemClassifier::process(Activity {
            commits: vec![],
            issues: vec![],
            pull_requests,
        });

        assert_eq!(data.categorized_count(), titles.len());
        let mut numbers: Vec<u64> = Category::ALL
            .iter()
            .flat_map(|c| data.bucket(*c).iter().map(|i| i.number))
            .collect();
        numbers.sort_unstable();
        assert_eq!(numbers, vec![1, 2, 3, 4, 5, 6]);
    }

    #[test]
    fn test_pull_requests_bucketed_before_issues() {
        let data = ItemClassifier::process(Activity {
            commits: vec![],
            issues: vec![item(ItemKind::Issue, 10, "Fix leak", "closed", &[])],
            pull_requests: vec![item(ItemKind::PullRequest, 11, "Fix race", "closed", &[])],
        });
        assert_eq!(
            data.bugfixes.iter().map(|i| i.number).collect::<Vec<_>>(),
            vec![11, 10]
        );
    }
}

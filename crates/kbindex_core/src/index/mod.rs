//! Generated navigation pages.
//!
//! # Responsibility
//! - Group summaries by topic label and by type directory.
//! - Render topic pages, type pages and the root dashboard.
//!
//! # Invariants
//! - Renderers are pure: same summaries in, byte-identical page out.
//! - Pages are fully overwritten; nothing is patched incrementally.
//! - Entries are listed by date descending; groups by key ascending.

pub mod dashboard;
pub mod topic_page;
pub mod type_page;

use crate::error::{IndexError, IndexResult};
use crate::model::summary::{sort_by_date_desc, Summary};
use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

/// Summaries grouped by topic label, each group sorted by date descending.
pub fn group_by_topic(summaries: &[Summary]) -> BTreeMap<&str, Vec<&Summary>> {
    group_by(summaries, |summary| summary.topic.as_deref())
}

/// Summaries grouped by type directory, each group sorted by date descending.
pub fn group_by_type(summaries: &[Summary]) -> BTreeMap<&str, Vec<&Summary>> {
    group_by(summaries, |summary| summary.doc_type_dir.as_deref())
}

fn group_by<'a, F>(summaries: &'a [Summary], key: F) -> BTreeMap<&'a str, Vec<&'a Summary>>
where
    F: Fn(&'a Summary) -> Option<&'a str>,
{
    let mut groups: BTreeMap<&str, Vec<&Summary>> = BTreeMap::new();
    for summary in summaries {
        if let Some(label) = key(summary) {
            groups.entry(label).or_default().push(summary);
        }
    }
    for items in groups.values_mut() {
        sort_by_date_desc(items);
    }
    groups
}

/// Overwrites one generated page, creating its parent folder on demand.
pub fn write_page(path: &Path, content: &str) -> IndexResult<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).map_err(|err| IndexError::io(parent, err))?;
    }
    fs::write(path, content).map_err(|err| IndexError::io(path, err))
}

/// List item label: `date [topic] title`, topic omitted when absent.
pub(crate) fn entry_label(summary: &Summary) -> String {
    match summary.topic.as_deref() {
        Some(topic) => format!("{} [{}] {}", summary.date, topic, summary.title),
        None => format!("{} {}", summary.date, summary.title),
    }
}


#[cfg(test)]
mod tests {
    use super::test_support::summary;
    use super::{entry_label, group_by_topic, group_by_type};

    #[test]
    fn groups_skip_missing_keys_and_sort_desc() {
        let items = vec![
            summary("/kb/archives/aws/a.md", Some("aws"), "2025-01-01", Some("Cloud")),
            summary("/kb/archives/aws/b.md", Some("aws"), "2025-03-01", None),
            summary("/kb/archives/loose.md", None, "2025-02-01", Some("Cloud")),
        ];

        let by_type = group_by_type(&items);
        assert_eq!(by_type.len(), 1);
        let aws: Vec<&str> = by_type["aws"].iter().map(|s| s.title.as_str()).collect();
        assert_eq!(aws, vec!["b", "a"]);

        let by_topic = group_by_topic(&items);
        let cloud: Vec<&str> = by_topic["Cloud"].iter().map(|s| s.title.as_str()).collect();
        assert_eq!(cloud, vec!["loose", "a"]);
    }

    #[test]
    fn entry_label_omits_missing_topic() {
        let with_topic = summary("/kb/archives/aws/a.md", Some("aws"), "2025-01-01", Some("Cloud"));
        let without = summary("/kb/archives/aws/b.md", Some("aws"), "2025-01-02", None);
        assert_eq!(entry_label(&with_topic), "2025-01-01 [Cloud] a");
        assert_eq!(entry_label(&without), "2025-01-02 b");
    }
}

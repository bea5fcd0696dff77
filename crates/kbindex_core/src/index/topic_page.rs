//! Per-topic listing pages under `topics/`.

use super::{group_by_topic, write_page};
use crate::config::IndexerConfig;
use crate::error::IndexResult;
use crate::layout::relative_link;
use crate::model::summary::Summary;
use log::info;
use std::path::Path;

/// File-name slug for a topic: lowercase, spaces and separators as `-`.
pub fn topic_slug(topic: &str) -> String {
    topic
        .to_lowercase()
        .chars()
        .map(|c| if c == ' ' || c == '/' || c == '\\' { '-' } else { c })
        .collect()
}

/// Page path for `topic`.
pub fn topic_page_path(config: &IndexerConfig, topic: &str) -> std::path::PathBuf {
    config.topics_dir().join(format!("{}.md", topic_slug(topic)))
}

/// Renders one topic page. `items` must already be sorted.
pub fn render_topic_page(
    topic: &str,
    items: &[&Summary],
    page_path: &Path,
    dashboard_path: &Path,
) -> String {
    let page_dir = page_path.parent().unwrap_or(Path::new(""));
    let mut out = format!(
        "# {topic}\n\n[← Dashboard]({})\n\n## 📚 학습 로그\n",
        relative_link(page_dir, dashboard_path)
    );
    for item in items {
        out.push_str(&format!(
            "- [{} {}]({})\n",
            item.date,
            item.title,
            relative_link(page_dir, &item.path)
        ));
    }
    out
}

/// Writes every topic page and returns the sorted topic labels.
pub fn write_topic_pages(config: &IndexerConfig, summaries: &[Summary]) -> IndexResult<Vec<String>> {
    let groups = group_by_topic(summaries);
    let dashboard = config.readme_path();
    for (topic, items) in &groups {
        let path = topic_page_path(config, topic);
        write_page(&path, &render_topic_page(topic, items, &path, &dashboard))?;
    }
    info!(
        "event=topic_pages module=index status=ok count={}",
        groups.len()
    );
    Ok(groups.keys().map(|topic| topic.to_string()).collect())
}

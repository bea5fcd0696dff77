//! Per-type `README.md` pages inside each archive type directory.

use super::{entry_label, group_by_type, write_page};
use crate::config::IndexerConfig;
use crate::error::IndexResult;
use crate::layout::relative_link;
use crate::model::summary::Summary;
use log::info;
use std::path::Path;

/// Renders one type page. `items` must already be sorted.
pub fn render_type_page(
    doc_type: &str,
    items: &[&Summary],
    page_path: &Path,
    dashboard_path: &Path,
) -> String {
    let page_dir = page_path.parent().unwrap_or(Path::new(""));
    let mut out = format!(
        "# {doc_type}\n\n[← Dashboard]({})\n\n## 🗂️ 목록\n",
        relative_link(page_dir, dashboard_path)
    );
    for item in items {
        out.push_str(&format!(
            "- [{}]({})\n",
            entry_label(item),
            relative_link(page_dir, &item.path)
        ));
    }
    out
}

/// Writes every type page and returns the sorted type labels.
pub fn write_type_pages(config: &IndexerConfig, summaries: &[Summary]) -> IndexResult<Vec<String>> {
    let groups = group_by_type(summaries);
    let dashboard = config.readme_path();
    for (doc_type, items) in &groups {
        let path = config.type_readme_path(doc_type);
        write_page(&path, &render_type_page(doc_type, items, &path, &dashboard))?;
    }
    info!(
        "event=type_pages module=index status=ok count={}",
        groups.len()
    );
    Ok(groups.keys().map(|doc_type| doc_type.to_string()).collect())
}

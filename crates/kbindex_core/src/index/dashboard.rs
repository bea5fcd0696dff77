//! Root `README.md` dashboard.
//!
//! Sections: most recent summaries, one link per type page, one link per
//! topic page. The legacy year/month archive section is not generated;
//! type pages replace it.

use super::topic_page::topic_page_path;
use super::{entry_label, write_page};
use crate::config::IndexerConfig;
use crate::error::IndexResult;
use crate::layout::relative_link;
use crate::model::summary::{sort_by_date_desc, Summary};
use log::info;

/// Renders the dashboard for `summaries` and the known group labels.
pub fn render_dashboard(
    config: &IndexerConfig,
    summaries: &[Summary],
    types: &[String],
    topics: &[String],
) -> String {
    let root = config.root();
    let mut recent: Vec<&Summary> = summaries.iter().collect();
    sort_by_date_desc(&mut recent);

    let mut out = String::from("# 💡 메인 대시보드\n\n### ⚡ 최신 요약\n");
    for item in recent.iter().take(config.recent_limit) {
        out.push_str(&format!(
            "- [{}]({})\n",
            entry_label(item),
            relative_link(root, &item.path)
        ));
    }

    out.push_str("\n### 📂 타입별 모아보기\n");
    for doc_type in types {
        out.push_str(&format!(
            "- [{doc_type}]({})\n",
            relative_link(root, &config.type_readme_path(doc_type))
        ));
    }

    out.push_str("\n### 🏷️ 토픽별 모아보기\n");
    for topic in topics {
        out.push_str(&format!(
            "- [{topic}]({})\n",
            relative_link(root, &topic_page_path(config, topic))
        ));
    }
    out
}

/// Overwrites the root dashboard.
pub fn write_dashboard(
    config: &IndexerConfig,
    summaries: &[Summary],
    types: &[String],
    topics: &[String],
) -> IndexResult<()> {
    let path = config.readme_path();
    write_page(&path, &render_dashboard(config, summaries, types, topics))?;
    info!(
        "event=dashboard module=index status=ok path={} recent={}",
        path.display(),
        summaries.len().min(config.recent_limit)
    );
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::render_dashboard;
    use crate::config::IndexerConfig;
    use crate::index::test_support::summary;

    #[test]
    fn lists_recent_then_groups() {
        let mut config = IndexerConfig::new("/kb");
        config.recent_limit = 2;
        let items = vec![
            summary("/kb/archives/aws/a.md", Some("aws"), "2025-01-01", Some("Cloud")),
            summary("/kb/archives/aws/b.md", Some("aws"), "2025-03-01", None),
            summary("/kb/archives/gcp/c.md", Some("gcp"), "2025-02-01", Some("Cloud")),
        ];
        let page = render_dashboard(
            &config,
            &items,
            &["aws".to_string(), "gcp".to_string()],
            &["Cloud".to_string()],
        );
        assert_eq!(
            page,
            "# 💡 메인 대시보드\n\n### ⚡ 최신 요약\n\
             - [2025-03-01 b](archives/aws/b.md)\n\
             - [2025-02-01 [Cloud] c](archives/gcp/c.md)\n\
             \n### 📂 타입별 모아보기\n\
             - [aws](archives/aws/README.md)\n\
             - [gcp](archives/gcp/README.md)\n\
             \n### 🏷️ 토픽별 모아보기\n\
             - [Cloud](topics/cloud.md)\n"
        );
    }

    #[test]
    fn empty_knowledge_base_still_renders_sections() {
        let config = IndexerConfig::new("/kb");
        let page = render_dashboard(&config, &[], &[], &[]);
        assert!(page.contains("### ⚡ 최신 요약\n"));
        assert!(page.contains("### 📂 타입별 모아보기\n"));
        assert!(page.ends_with("### 🏷️ 토픽별 모아보기\n"));
    }
}

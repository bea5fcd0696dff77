//! Summary header and front-matter extraction.
//!
//! # Responsibility
//! - Find the first `## YYYY-MM-DD [Topic] Title` line in a document.
//! - Pick up loose `type:`, `number:` and `origin-doc:` lines anywhere in it.
//!
//! # Invariants
//! - Header matching is single-line; whitespace never spans a newline.
//! - For repeated front-matter keys the first line wins.

use crate::model::summary::{FrontMatter, Summary, SummaryHeader};
use once_cell::sync::Lazy;
use regex::Regex;
use std::path::Path;

static HEADER_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?m)^##[ \t]+(\d{4}-\d{2}-\d{2})[ \t]+(?:\[(.*?)\][ \t]*)?(.*)$")
        .expect("valid header regex")
});
static TYPE_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?m)^type:[ \t]*(.+)$").expect("valid type regex"));
static NUMBER_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?m)^number:[ \t]*(\d+)[ \t]*\r?$").expect("valid number regex"));
static ORIGIN_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r#"(?m)^origin-doc:[ \t]*['"]?(.*?)['"]?[ \t]*\r?$"#).expect("valid origin regex")
});

/// Extracts the first date header line.
///
/// Returns `None` when no line matches; callers drop such documents from
/// every index.
pub fn parse_header(content: &str) -> Option<SummaryHeader> {
    let caps = HEADER_RE.captures(content)?;
    let date = caps.get(1)?.as_str().to_string();
    let topic = caps
        .get(2)
        .map(|m| m.as_str().trim().to_string())
        .filter(|value| !value.is_empty());
    let title = caps
        .get(3)
        .map(|m| m.as_str().trim().to_string())
        .unwrap_or_default();
    Some(SummaryHeader { date, topic, title })
}

/// Extracts origin hints from loose `key: value` lines.
pub fn parse_front_matter(content: &str) -> FrontMatter {
    let doc_type = first_capture(&TYPE_RE, content);
    let number = first_capture(&NUMBER_RE, content).and_then(|raw| raw.parse::<u32>().ok());
    let origin_doc = first_capture(&ORIGIN_RE, content);
    FrontMatter {
        doc_type,
        number,
        origin_doc,
    }
}

/// Parses one summary file's text into a record.
///
/// Returns `None` for documents without a date header.
pub fn parse_summary(
    path: impl AsRef<Path>,
    doc_type_dir: Option<String>,
    content: &str,
) -> Option<Summary> {
    let header = parse_header(content)?;
    Some(Summary::new(
        path,
        doc_type_dir,
        header,
        parse_front_matter(content),
    ))
}

fn first_capture(re: &Regex, content: &str) -> Option<String> {
    re.captures(content)
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str().trim().to_string())
        .filter(|value| !value.is_empty())
}

#[cfg(test)]
mod tests {
    use super::{parse_front_matter, parse_header, parse_summary};

    #[test]
    fn header_with_topic() {
        let header = parse_header("intro\n## 2025-12-19 [Marketing] Brand Story\nbody")
            .expect("header should parse");
        assert_eq!(header.date, "2025-12-19");
        assert_eq!(header.topic.as_deref(), Some("Marketing"));
        assert_eq!(header.title, "Brand Story");
    }

    #[test]
    fn header_without_topic() {
        let header = parse_header("## 2025-01-02 VPC basics  \n").expect("header should parse");
        assert_eq!(header.date, "2025-01-02");
        assert!(header.topic.is_none());
        assert_eq!(header.title, "VPC basics");
    }

    #[test]
    fn topic_without_following_space_is_still_a_topic() {
        let header =
            parse_header("## 2025-01-01 [Topic]Title\n").expect("header should parse");
        assert_eq!(header.topic.as_deref(), Some("Topic"));
        assert_eq!(header.title, "Title");
    }

    #[test]
    fn first_matching_header_wins() {
        let content = "## Overview\n## 2025-02-01 [A] First\n## 2025-03-01 [B] Second\n";
        let header = parse_header(content).expect("header should parse");
        assert_eq!(header.date, "2025-02-01");
        assert_eq!(header.title, "First");
    }

    #[test]
    fn header_does_not_span_lines() {
        assert!(parse_header("##\n2025-01-01 Title\n").is_none());
        assert!(parse_header("# 2025-01-01 Title\n").is_none());
        assert!(parse_header("text ## 2025-01-01 Title\n").is_none());
    }

    #[test]
    fn front_matter_fields_are_extracted() {
        let content = "---\ntype: terraform\nnumber: 7\norigin-doc: \"007. Intro.md\"\n---\n";
        let fm = parse_front_matter(content);
        assert_eq!(fm.doc_type.as_deref(), Some("terraform"));
        assert_eq!(fm.number, Some(7));
        assert_eq!(fm.origin_doc.as_deref(), Some("007. Intro.md"));
    }

    #[test]
    fn front_matter_handles_single_quotes_and_crlf() {
        let content = "origin-doc: 'guide.md'\r\nnumber: 12\r\n";
        let fm = parse_front_matter(content);
        assert_eq!(fm.origin_doc.as_deref(), Some("guide.md"));
        assert_eq!(fm.number, Some(12));
    }

    #[test]
    fn front_matter_first_key_wins_and_non_numeric_is_ignored() {
        let content = "type: aws\ntype: gcp\nnumber: twelve\n";
        let fm = parse_front_matter(content);
        assert_eq!(fm.doc_type.as_deref(), Some("aws"));
        assert!(fm.number.is_none());
        assert!(fm.origin_doc.is_none());
    }

    #[test]
    fn key_must_start_the_line() {
        let fm = parse_front_matter("the type: nested\n  number: 3\n");
        assert!(fm.is_empty());
    }

    #[test]
    fn summary_requires_header() {
        assert!(parse_summary("a.md", None, "no header here").is_none());
        let summary = parse_summary(
            "archives/aws/a.md",
            Some("aws".to_string()),
            "## 2025-01-01 [Cloud] Title\nnumber: 3\n",
        )
        .expect("summary should parse");
        assert_eq!(summary.file_name, "a.md");
        assert_eq!(summary.front_matter.number, Some(3));
    }
}

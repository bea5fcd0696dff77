//! Back-link rewriting from a summary to its raw original.
//!
//! # Responsibility
//! - Decide how a summary's text must change to link `raw/<name>`.
//!
//! # Invariants
//! - Content that already holds the encoded link is never touched.
//! - At most one link line is ever inserted.
//! - Pure: the caller owns reading and writing the file.

use crate::layout::{encode_link_segment, RAW_DIR};
use once_cell::sync::Lazy;
use regex::Regex;

/// Visible text of the injected link.
pub const LINK_LABEL: &str = "📄 원본 파일 보기";

static PLACEHOLDER_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"\(raw/[^()\n]*?-original\.md\)").expect("valid placeholder regex")
});
static H2_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?m)^##[ \t]+.*$").expect("valid h2 regex"));

/// Outcome of linking one summary.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LinkChange {
    /// Encoded link already present.
    AlreadyLinked,
    /// No `##` header to anchor a new link after.
    NoHeader,
    /// Unencoded link rewritten to its encoded form.
    Reencoded(String),
    /// Legacy `(raw/...-original.md)` target replaced.
    ReplacedPlaceholder(String),
    /// New link line inserted after the first header.
    Inserted(String),
}

impl LinkChange {
    /// New content when the summary must be rewritten.
    pub fn into_content(self) -> Option<String> {
        match self {
            Self::AlreadyLinked | Self::NoHeader => None,
            Self::Reencoded(content) | Self::ReplacedPlaceholder(content) | Self::Inserted(content) => {
                Some(content)
            }
        }
    }

    /// Short label for logging.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::AlreadyLinked => "already_linked",
            Self::NoHeader => "no_header",
            Self::Reencoded(_) => "reencoded",
            Self::ReplacedPlaceholder(_) => "replaced_placeholder",
            Self::Inserted(_) => "inserted",
        }
    }
}

/// Markdown link target for a raw file: `(raw/<encoded>)`.
pub fn raw_link_target(raw_name: &str) -> String {
    format!("({RAW_DIR}/{})", encode_link_segment(raw_name))
}

/// Computes the change needed for `content` to link `raw/<raw_name>`.
pub fn link_raw_file(content: &str, raw_name: &str) -> LinkChange {
    let target = raw_link_target(raw_name);
    if content.contains(target.as_str()) {
        return LinkChange::AlreadyLinked;
    }

    let unencoded = format!("({RAW_DIR}/{raw_name})");
    if content.contains(unencoded.as_str()) {
        return LinkChange::Reencoded(content.replace(unencoded.as_str(), target.as_str()));
    }

    if PLACEHOLDER_RE.is_match(content) {
        let replaced = PLACEHOLDER_RE.replace_all(content, regex::NoExpand(target.as_str()));
        return LinkChange::ReplacedPlaceholder(replaced.into_owned());
    }

    let Some(header) = H2_RE.find(content) else {
        return LinkChange::NoHeader;
    };
    let end = header.end();
    let mut updated = String::with_capacity(content.len() + target.len() + LINK_LABEL.len() + 8);
    updated.push_str(&content[..end]);
    updated.push_str(&format!("\n> [{LINK_LABEL}]{target}\n"));
    updated.push_str(&content[end..]);
    LinkChange::Inserted(updated)
}

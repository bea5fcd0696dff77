//! Summary document model.
//!
//! # Responsibility
//! - Define the parsed record for one summary note.
//! - Hold header and front-matter fields parsed exactly once.
//!
//! # Invariants
//! - A `Summary` always carries a `YYYY-MM-DD` date; dateless documents
//!   never become a `Summary`.
//! - `doc_type_dir` is the top-level directory under the archive root, or
//!   `None` for files stored directly in the archive root.

use std::path::{Path, PathBuf};

/// Header line fields: `## YYYY-MM-DD [Topic] Title`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SummaryHeader {
    /// ISO date, compared lexicographically.
    pub date: String,
    /// Bracketed label, trimmed.
    pub topic: Option<String>,
    /// Remaining header text, trimmed.
    pub title: String,
}

/// `key: value` lines used to locate the original document.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FrontMatter {
    /// `type:` value, e.g. `terraform`.
    pub doc_type: Option<String>,
    /// `number:` value.
    pub number: Option<u32>,
    /// `origin-doc:` value with surrounding quotes stripped.
    pub origin_doc: Option<String>,
}

impl FrontMatter {
    /// Returns whether no origin hint is present.
    pub fn is_empty(&self) -> bool {
        self.doc_type.is_none() && self.number.is_none() && self.origin_doc.is_none()
    }
}

/// One indexed summary note.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Summary {
    pub path: PathBuf,
    pub file_name: String,
    /// Type group key derived from the archive layout.
    pub doc_type_dir: Option<String>,
    pub date: String,
    pub topic: Option<String>,
    pub title: String,
    pub front_matter: FrontMatter,
}

impl Summary {
    /// Builds a summary from parsed parts.
    pub fn new(
        path: impl AsRef<Path>,
        doc_type_dir: Option<String>,
        header: SummaryHeader,
        front_matter: FrontMatter,
    ) -> Self {
        let path = path.as_ref().to_path_buf();
        let file_name = path
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_default();
        Self {
            path,
            file_name,
            doc_type_dir,
            date: header.date,
            topic: header.topic,
            title: header.title,
            front_matter,
        }
    }

    /// Sort key for date-descending listings.
    pub fn sort_key(&self) -> &str {
        self.date.as_str()
    }
}

/// Sorts summaries by date descending; equal dates keep input order.
pub fn sort_by_date_desc(items: &mut [&Summary]) {
    items.sort_by(|a, b| b.sort_key().cmp(a.sort_key()));
}

//! Knowledge-base layout conventions and link path helpers.
//!
//! # Responsibility
//! - Name the files and folders the indexer recognises.
//! - Build relative, `/`-separated Markdown link targets.
//!
//! # Invariants
//! - `raw/` folders never hold summaries.
//! - Link targets never contain platform separators.

use percent_encoding::{utf8_percent_encode, AsciiSet, NON_ALPHANUMERIC};
use std::path::{Component, Path};

/// Sibling folder holding original documents.
pub const RAW_DIR: &str = "raw";
/// Legacy suffix for originals stored next to their summary.
pub const ORIGINAL_SUFFIX: &str = "-original.md";
/// Generated index page name.
pub const README_FILE: &str = "README.md";

const MARKDOWN_EXT: &str = ".md";

/// Characters kept verbatim when encoding a file name for a link.
const LINK_SEGMENT: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'_')
    .remove(b'.')
    .remove(b'~');

/// Returns whether `name` is a summary note file name.
pub fn is_summary_file_name(name: &str) -> bool {
    name.ends_with(MARKDOWN_EXT) && !name.ends_with(ORIGINAL_SUFFIX) && name != README_FILE
}

/// Returns whether `name` is a legacy original stored beside summaries.
pub fn is_legacy_original(name: &str) -> bool {
    name.ends_with(ORIGINAL_SUFFIX)
}

/// Returns whether a directory name marks an originals folder.
pub fn is_raw_dir_name(name: &str) -> bool {
    name == RAW_DIR
}

/// Default original name for a summary: `<stem>-original.md`.
pub fn default_original_name(summary_file_name: &str) -> String {
    let stem = Path::new(summary_file_name)
        .file_stem()
        .map(|stem| stem.to_string_lossy().into_owned())
        .unwrap_or_else(|| summary_file_name.to_string());
    format!("{stem}{ORIGINAL_SUFFIX}")
}

/// Returns whether `name` is usable as a single file name inside `raw/`.
pub fn is_plain_file_name(name: &str) -> bool {
    !name.is_empty()
        && name != "."
        && name != ".."
        && !name.contains('/')
        && !name.contains('\\')
}

/// Percent-encodes one file name for use in a Markdown link.
pub fn encode_link_segment(name: &str) -> String {
    utf8_percent_encode(name, LINK_SEGMENT).to_string()
}

/// Relative link from directory `from_dir` to `target`.
///
/// Both paths must share the same base (both under the same root).
pub fn relative_link(from_dir: &Path, target: &Path) -> String {
    let from = normal_components(from_dir);
    let to = normal_components(target);
    let common = from
        .iter()
        .zip(to.iter())
        .take_while(|(a, b)| a == b)
        .count();

    let mut parts: Vec<String> = Vec::with_capacity(from.len() - common + to.len() - common);
    parts.extend(std::iter::repeat("..".to_string()).take(from.len() - common));
    parts.extend(
        to[common..]
            .iter()
            .map(|part| part.as_os_str().to_string_lossy().into_owned()),
    );

    if parts.is_empty() {
        ".".to_string()
    } else {
        parts.join("/")
    }
}

fn normal_components(path: &Path) -> Vec<Component<'_>> {
    path.components()
        .filter(|part| !matches!(part, Component::CurDir))
        .collect()
}

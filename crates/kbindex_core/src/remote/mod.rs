//! Original-document lookup against a private repository.
//!
//! # Responsibility
//! - Define the `OriginSource` contract used by the organizer.
//! - Keep filename matching rules pure so local and remote lookups agree.
//!
//! # Invariants
//! - Lookups never panic and never abort a run; failures come back as
//!   `FetchOutcome::Failed`.
//! - Matching is first-wins in listing order; prefixes are tried as
//!   3-digit, 2-digit, then unpadded.

use log::debug;
use std::error::Error;
use std::fmt::{Display, Formatter};

pub mod github;

pub use github::GithubSource;

/// Result of one remote lookup.
#[derive(Debug)]
pub enum FetchOutcome<T> {
    /// Document resolved and downloaded.
    Found(T),
    /// Nothing matched, or remote access is not configured.
    NotFound,
    /// Transport or decoding failure.
    Failed(RemoteError),
}

/// Document resolved by type and number.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FetchedDocument {
    /// Remote file name, used as the local raw file name.
    pub file_name: String,
    pub content: String,
}

/// Remote access failure.
#[derive(Debug)]
pub enum RemoteError {
    /// Request could not be sent or the body could not be read.
    Http(reqwest::Error),
    /// Server answered with a non-success status.
    Status { url: String, status: u16 },
    /// Body was not valid UTF-8 or not the expected JSON shape.
    Decode(String),
    /// Directory entry had no direct download link.
    MissingDownloadUrl(String),
}

impl Display for RemoteError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Http(err) => write!(f, "http error: {err}"),
            Self::Status { url, status } => write!(f, "unexpected status {status} from {url}"),
            Self::Decode(details) => write!(f, "decode error: {details}"),
            Self::MissingDownloadUrl(name) => write!(f, "entry `{name}` has no download url"),
        }
    }
}

impl Error for RemoteError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Http(err) => Some(err),
            _ => None,
        }
    }
}

impl From<reqwest::Error> for RemoteError {
    fn from(value: reqwest::Error) -> Self {
        Self::Http(value)
    }
}

/// Source of original documents.
pub trait OriginSource {
    /// Resolves a document whose repository path ends with `file_name`.
    fn fetch_by_name(&self, file_name: &str) -> FetchOutcome<String>;

    /// Resolves the numbered document `number` in the directory for `doc_type`.
    fn fetch_by_type_and_number(&self, doc_type: &str, number: u32)
        -> FetchOutcome<FetchedDocument>;
}

/// Source used when remote access is not configured.
#[derive(Debug, Default, Clone, Copy)]
pub struct DisabledSource;

impl OriginSource for DisabledSource {
    fn fetch_by_name(&self, file_name: &str) -> FetchOutcome<String> {
        debug!(
            "event=remote_fetch module=remote status=skipped mode=name reason=not_configured file={file_name}"
        );
        FetchOutcome::NotFound
    }

    fn fetch_by_type_and_number(
        &self,
        doc_type: &str,
        number: u32,
    ) -> FetchOutcome<FetchedDocument> {
        debug!(
            "event=remote_fetch module=remote status=skipped mode=type_number reason=not_configured type={doc_type} number={number}"
        );
        FetchOutcome::NotFound
    }
}

/// Numbered-file prefixes in match precedence order.
pub fn number_prefixes(number: u32) -> [String; 3] {
    [
        format!("{number:03}."),
        format!("{number:02}."),
        format!("{number}."),
    ]
}

/// Returns whether `name` carries one of the numbered prefixes for `number`.
pub fn has_number_prefix(name: &str, number: u32) -> bool {
    number_prefixes(number)
        .iter()
        .any(|prefix| name.starts_with(prefix.as_str()))
}

/// First name (in iteration order) carrying a numbered prefix for `number`.
pub fn select_by_number_prefix<'a, I>(names: I, number: u32) -> Option<&'a str>
where
    I: IntoIterator<Item = &'a str>,
{
    names
        .into_iter()
        .find(|name| has_number_prefix(name, number))
}

/// First path (in iteration order) ending with `file_name`.
///
/// Plain suffix match: `notes/my-guide.md` also matches `guide.md`.
pub fn select_by_suffix<'a, I>(paths: I, file_name: &str) -> Option<&'a str>
where
    I: IntoIterator<Item = &'a str>,
{
    paths.into_iter().find(|path| path.ends_with(file_name))
}

//! GitHub REST-backed origin source.
//!
//! # Responsibility
//! - Resolve original documents in a private repository by file name or by
//!   numbered position inside a type directory.
//! - Translate transport/status/decoding problems into `RemoteError`.
//!
//! # Invariants
//! - Every request carries the bearer token and an explicit user agent.
//! - One attempt per lookup; no retries.
//! - A missing type directory (HTTP 404) is a lookup miss, not a failure.

use super::{
    select_by_number_prefix, select_by_suffix, FetchOutcome, FetchedDocument, OriginSource,
    RemoteError,
};
use crate::config::RemoteConfig;
use crate::layout::encode_link_segment;
use log::{info, warn};
use reqwest::blocking::{Client, Response};
use reqwest::header::ACCEPT;
use reqwest::StatusCode;
use serde::de::DeserializeOwned;
use serde::Deserialize;

const ACCEPT_JSON: &str = "application/vnd.github+json";
const ACCEPT_RAW: &str = "application/vnd.github.raw";
const USER_AGENT: &str = concat!("kbindex/", env!("CARGO_PKG_VERSION"));

/// Response of the recursive git tree endpoint.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct TreeListing {
    #[serde(default)]
    pub tree: Vec<TreeEntry>,
    /// Set by GitHub when the listing was cut short.
    #[serde(default)]
    pub truncated: bool,
}

#[derive(Debug, Clone, Deserialize)]
pub struct TreeEntry {
    pub path: String,
    /// `blob` or `tree`.
    #[serde(rename = "type", default)]
    pub kind: String,
}

impl TreeEntry {
    pub fn is_blob(&self) -> bool {
        self.kind == "blob"
    }
}

/// One item of a directory contents listing.
#[derive(Debug, Clone, Deserialize)]
pub struct ContentEntry {
    pub name: String,
    #[serde(default)]
    pub download_url: Option<String>,
}

impl TreeListing {
    /// First listed file path ending with `file_name`; directories are ignored.
    pub fn find_path(&self, file_name: &str) -> Option<&str> {
        let blobs = self
            .tree
            .iter()
            .filter(|entry| entry.is_blob())
            .map(|entry| entry.path.as_str());
        select_by_suffix(blobs, file_name)
    }
}

/// First listed entry carrying a numbered prefix for `number`.
pub fn find_numbered_entry(entries: &[ContentEntry], number: u32) -> Option<&ContentEntry> {
    let name = select_by_number_prefix(entries.iter().map(|entry| entry.name.as_str()), number)?;
    entries.iter().find(|entry| entry.name == name)
}

/// Percent-encodes each `/`-separated segment of a repository path.
pub fn encode_repo_path(path: &str) -> String {
    path.split('/')
        .map(encode_link_segment)
        .collect::<Vec<_>>()
        .join("/")
}

/// Origin source backed by the GitHub REST API.
pub struct GithubSource {
    config: RemoteConfig,
    client: Client,
}

impl GithubSource {
    /// Builds a blocking HTTP client for `config`.
    ///
    /// # Errors
    /// - Returns `RemoteError::Http` when the TLS backend cannot initialize.
    pub fn new(config: RemoteConfig) -> Result<Self, RemoteError> {
        let client = Client::builder().user_agent(USER_AGENT).build()?;
        Ok(Self { config, client })
    }

    fn tree_url(&self) -> String {
        format!(
            "{}/repos/{}/git/trees/{}?recursive=1",
            self.config.api_base,
            self.config.repository,
            encode_repo_path(&self.config.branch)
        )
    }

    /// Contents endpoint for `repo_path`, pinned to the configured branch.
    fn contents_url(&self, repo_path: &str) -> String {
        format!(
            "{}/repos/{}/contents/{}?ref={}",
            self.config.api_base,
            self.config.repository,
            encode_repo_path(repo_path),
            encode_link_segment(&self.config.branch)
        )
    }

    fn get(&self, url: &str, accept: &str) -> Result<Response, RemoteError> {
        let response = self
            .client
            .get(url)
            .bearer_auth(&self.config.token)
            .header(ACCEPT, accept)
            .send()?;
        let status = response.status();
        if !status.is_success() {
            return Err(RemoteError::Status {
                url: url.to_string(),
                status: status.as_u16(),
            });
        }
        Ok(response)
    }

    fn get_json<T: DeserializeOwned>(&self, url: &str) -> Result<T, RemoteError> {
        self.get(url, ACCEPT_JSON)?
            .json::<T>()
            .map_err(|err| RemoteError::Decode(format!("{url}: {err}")))
    }

    fn get_text(&self, url: &str) -> Result<String, RemoteError> {
        let bytes = self.get(url, ACCEPT_RAW)?.bytes()?;
        String::from_utf8(bytes.to_vec())
            .map_err(|err| RemoteError::Decode(format!("{url}: {err}")))
    }

    fn lookup_by_name(&self, file_name: &str) -> Result<Option<String>, RemoteError> {
        let listing: TreeListing = self.get_json(&self.tree_url())?;
        if listing.truncated {
            warn!(
                "event=remote_tree module=remote status=truncated repo={}",
                self.config.repository
            );
        }
        let Some(repo_path) = listing.find_path(file_name) else {
            return Ok(None);
        };
        self.get_text(&self.contents_url(repo_path)).map(Some)
    }

    fn lookup_by_type_and_number(
        &self,
        doc_type: &str,
        number: u32,
    ) -> Result<Option<FetchedDocument>, RemoteError> {
        let directory = self.config.type_directory(doc_type);
        let entries: Vec<ContentEntry> = match self.get_json(&self.contents_url(&directory)) {
            Ok(entries) => entries,
            Err(RemoteError::Status { status, .. }) if status == StatusCode::NOT_FOUND.as_u16() => {
                return Ok(None);
            }
            Err(err) => return Err(err),
        };

        let Some(entry) = find_numbered_entry(&entries, number) else {
            return Ok(None);
        };
        let url = entry
            .download_url
            .as_deref()
            .ok_or_else(|| RemoteError::MissingDownloadUrl(entry.name.clone()))?;
        let content = self.get_text(url)?;
        Ok(Some(FetchedDocument {
            file_name: entry.name.clone(),
            content,
        }))
    }
}

impl OriginSource for GithubSource {
    fn fetch_by_name(&self, file_name: &str) -> FetchOutcome<String> {
        match self.lookup_by_name(file_name) {
            Ok(Some(content)) => FetchOutcome::Found(content),
            Ok(None) => {
                info!(
                    "event=remote_fetch module=remote status=not_found mode=name file={} repo={}",
                    file_name, self.config.repository
                );
                FetchOutcome::NotFound
            }
            Err(err) => {
                warn!(
                    "event=remote_fetch module=remote status=error mode=name file={} error={}",
                    file_name, err
                );
                FetchOutcome::Failed(err)
            }
        }
    }

    fn fetch_by_type_and_number(
        &self,
        doc_type: &str,
        number: u32,
    ) -> FetchOutcome<FetchedDocument> {
        match self.lookup_by_type_and_number(doc_type, number) {
            Ok(Some(document)) => FetchOutcome::Found(document),
            Ok(None) => {
                info!(
                    "event=remote_fetch module=remote status=not_found mode=type_number type={} number={} dir={}",
                    doc_type,
                    number,
                    self.config.type_directory(doc_type)
                );
                FetchOutcome::NotFound
            }
            Err(err) => {
                warn!(
                    "event=remote_fetch module=remote status=error mode=type_number type={} number={} error={}",
                    doc_type, number, err
                );
                FetchOutcome::Failed(err)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{encode_repo_path, find_numbered_entry, ContentEntry, GithubSource, TreeListing};
    use crate::config::RemoteConfig;

    #[test]
    fn tree_listing_deserializes_and_matches_suffix() {
        let json = r#"{
            "sha": "abc",
            "tree": [
                {"path": "files", "type": "tree"},
                {"path": "files/udemy_aws/markdowns/001. VPC.md", "type": "blob"},
                {"path": "notes/guide.md", "type": "blob"}
            ],
            "truncated": false
        }"#;
        let listing: TreeListing = serde_json::from_str(json).expect("tree json should parse");
        assert_eq!(listing.tree.len(), 3);
        assert_eq!(listing.find_path("guide.md"), Some("notes/guide.md"));
        assert_eq!(
            listing.find_path("001. VPC.md"),
            Some("files/udemy_aws/markdowns/001. VPC.md")
        );
        assert!(listing.find_path("absent.md").is_none());
    }

    #[test]
    fn tree_lookup_skips_directories() {
        let json = r#"{"tree": [
            {"path": "old/guide.md", "type": "tree"},
            {"path": "old/guide.md/readme.txt", "type": "blob"},
            {"path": "new/guide.md", "type": "blob"}
        ]}"#;
        let listing: TreeListing = serde_json::from_str(json).expect("tree json should parse");
        assert_eq!(listing.find_path("guide.md"), Some("new/guide.md"));
    }

    #[test]
    fn numbered_entry_resolves_padded_name() {
        let json = r#"[
            {"name": "006. Setup.md", "path": "x/006. Setup.md", "download_url": "https://raw/6"},
            {"name": "007. Intro.md", "path": "x/007. Intro.md", "download_url": "https://raw/7"}
        ]"#;
        let entries: Vec<ContentEntry> =
            serde_json::from_str(json).expect("contents json should parse");
        let entry = find_numbered_entry(&entries, 7).expect("entry should match");
        assert_eq!(entry.name, "007. Intro.md");
        assert_eq!(entry.download_url.as_deref(), Some("https://raw/7"));
        assert!(find_numbered_entry(&entries, 8).is_none());
    }

    #[test]
    fn repo_paths_are_encoded_per_segment() {
        assert_eq!(
            encode_repo_path("files/udemy_aws/markdowns/007. Intro.md"),
            "files/udemy_aws/markdowns/007.%20Intro.md"
        );
        assert_eq!(encode_repo_path("feature/x"), "feature/x");
    }

    #[test]
    fn urls_follow_config() {
        let mut config = RemoteConfig::new("me/notes", "token");
        config.api_base = "https://ghe.local/api/v3".to_string();
        let source = GithubSource::new(config).expect("client should build");
        assert_eq!(
            source.tree_url(),
            "https://ghe.local/api/v3/repos/me/notes/git/trees/main?recursive=1"
        );
        assert_eq!(
            source.contents_url("files/udemy_aws/markdowns"),
            "https://ghe.local/api/v3/repos/me/notes/contents/files/udemy_aws/markdowns?ref=main"
        );
    }
}

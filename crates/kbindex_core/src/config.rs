//! Run configuration value objects.
//!
//! # Responsibility
//! - Describe the knowledge-base layout and remote repository access.
//! - Read process environment once, at the entry point.
//!
//! # Invariants
//! - `RemoteConfig` exists only when both repository and token are present.
//! - Deep call paths receive configuration by parameter, never from the
//!   environment.

use crate::layout::README_FILE;
use std::path::{Path, PathBuf};

/// Environment variable holding the `owner/repo` identifier.
pub const ENV_PRIVATE_REPO: &str = "PRIVATE_REPO";
/// Environment variable holding the access token.
pub const ENV_TOKEN: &str = "GH_PAT";
/// Optional branch override for tree lookups.
pub const ENV_BRANCH: &str = "PRIVATE_REPO_BRANCH";
/// Optional override for the type directory template.
pub const ENV_TYPE_DIR: &str = "PRIVATE_REPO_TYPE_DIR";
/// Optional API base URL override (GitHub Enterprise).
pub const ENV_API_URL: &str = "GITHUB_API_URL";

pub const DEFAULT_ARCHIVES_DIR: &str = "archives";
pub const DEFAULT_RECENT_LIMIT: usize = 5;
pub const DEFAULT_BRANCH: &str = "main";
pub const DEFAULT_API_BASE: &str = "https://api.github.com";
/// `{type}` is replaced by the summary's type label.
pub const DEFAULT_TYPE_DIR_TEMPLATE: &str = "files/udemy_{type}/markdowns";

const TOPICS_DIR: &str = "topics";

/// Local knowledge-base layout and dashboard options.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IndexerConfig {
    /// Knowledge-base root holding the dashboard.
    pub root: PathBuf,
    /// Archive directory name under `root`.
    pub archives_dir_name: String,
    /// Number of entries in the dashboard's recent section.
    pub recent_limit: usize,
}

impl IndexerConfig {
    /// Creates a config with default layout under `root`.
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self {
            root: root.into(),
            archives_dir_name: DEFAULT_ARCHIVES_DIR.to_string(),
            recent_limit: DEFAULT_RECENT_LIMIT,
        }
    }

    pub fn archives_dir(&self) -> PathBuf {
        self.root.join(&self.archives_dir_name)
    }

    pub fn topics_dir(&self) -> PathBuf {
        self.root.join(TOPICS_DIR)
    }

    /// Root dashboard path.
    pub fn readme_path(&self) -> PathBuf {
        self.root.join(README_FILE)
    }

    /// Index page path for one type directory.
    pub fn type_readme_path(&self, doc_type: &str) -> PathBuf {
        self.archives_dir().join(doc_type).join(README_FILE)
    }

    pub fn root(&self) -> &Path {
        &self.root
    }
}

/// Private repository access settings.
#[derive(Clone, PartialEq, Eq)]
pub struct RemoteConfig {
    /// `owner/repo`.
    pub repository: String,
    pub token: String,
    pub branch: String,
    pub api_base: String,
    pub type_dir_template: String,
}

impl std::fmt::Debug for RemoteConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RemoteConfig")
            .field("repository", &self.repository)
            .field("token", &"<redacted>")
            .field("branch", &self.branch)
            .field("api_base", &self.api_base)
            .field("type_dir_template", &self.type_dir_template)
            .finish()
    }
}

impl RemoteConfig {
    /// Creates a config with default branch, API base and type directory.
    pub fn new(repository: impl Into<String>, token: impl Into<String>) -> Self {
        Self {
            repository: repository.into(),
            token: token.into(),
            branch: DEFAULT_BRANCH.to_string(),
            api_base: DEFAULT_API_BASE.to_string(),
            type_dir_template: DEFAULT_TYPE_DIR_TEMPLATE.to_string(),
        }
    }

    /// Reads remote settings from the process environment.
    ///
    /// Returns `None` unless both `PRIVATE_REPO` and `GH_PAT` are set and
    /// non-blank.
    pub fn from_env() -> Option<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Reads remote settings through an arbitrary key lookup.
    pub fn from_lookup<F>(lookup: F) -> Option<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let read = |key: &str| {
            lookup(key)
                .map(|raw| raw.trim().to_string())
                .filter(|value| !value.is_empty())
        };

        let repository = read(ENV_PRIVATE_REPO)?;
        let token = read(ENV_TOKEN)?;
        let mut config = Self::new(repository, token);
        if let Some(branch) = read(ENV_BRANCH) {
            config.branch = branch;
        }
        if let Some(api_base) = read(ENV_API_URL) {
            config.api_base = api_base.trim_end_matches('/').to_string();
        }
        if let Some(template) = read(ENV_TYPE_DIR) {
            config.type_dir_template = template.trim_matches('/').to_string();
        }
        Some(config)
    }

    /// Remote directory holding numbered documents for `doc_type`.
    pub fn type_directory(&self, doc_type: &str) -> String {
        self.type_dir_template.replace("{type}", doc_type)
    }
}

#[cfg(test)]
mod tests {
    use super::{IndexerConfig, RemoteConfig, ENV_API_URL, ENV_BRANCH, ENV_PRIVATE_REPO, ENV_TOKEN};
    use std::collections::HashMap;
    use std::path::PathBuf;

    fn lookup(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn remote_requires_repo_and_token() {
        assert!(RemoteConfig::from_lookup(lookup(&[])).is_none());
        assert!(RemoteConfig::from_lookup(lookup(&[(ENV_PRIVATE_REPO, "me/notes")])).is_none());
        assert!(RemoteConfig::from_lookup(lookup(&[(ENV_TOKEN, "secret")])).is_none());
        assert!(RemoteConfig::from_lookup(lookup(&[
            (ENV_PRIVATE_REPO, "me/notes"),
            (ENV_TOKEN, "   ")
        ]))
        .is_none());
    }

    #[test]
    fn remote_applies_defaults_and_overrides() {
        let config = RemoteConfig::from_lookup(lookup(&[
            (ENV_PRIVATE_REPO, " me/notes "),
            (ENV_TOKEN, "secret"),
        ]))
        .expect("config should load");
        assert_eq!(config.repository, "me/notes");
        assert_eq!(config.branch, "main");
        assert_eq!(
            config.type_directory("terraform"),
            "files/udemy_terraform/markdowns"
        );

        let config = RemoteConfig::from_lookup(lookup(&[
            (ENV_PRIVATE_REPO, "me/notes"),
            (ENV_TOKEN, "secret"),
            (ENV_BRANCH, "master"),
            (ENV_API_URL, "https://ghe.example.com/api/v3/"),
        ]))
        .expect("config should load");
        assert_eq!(config.branch, "master");
        assert_eq!(config.api_base, "https://ghe.example.com/api/v3");
    }

    #[test]
    fn debug_output_redacts_token() {
        let config = RemoteConfig::new("me/notes", "super-secret");
        let rendered = format!("{config:?}");
        assert!(!rendered.contains("super-secret"));
    }

    #[test]
    fn indexer_layout_paths() {
        let config = IndexerConfig::new("/kb");
        assert_eq!(config.archives_dir(), PathBuf::from("/kb/archives"));
        assert_eq!(config.topics_dir(), PathBuf::from("/kb/topics"));
        assert_eq!(config.readme_path(), PathBuf::from("/kb/README.md"));
        assert_eq!(
            config.type_readme_path("aws"),
            PathBuf::from("/kb/archives/aws/README.md")
        );
    }
}

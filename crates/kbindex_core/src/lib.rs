//! Core logic for kbindex.
//! Organizes original documents and regenerates knowledge-base index pages.

pub mod config;
pub mod error;
pub mod index;
pub mod layout;
pub mod logging;
pub mod model;
pub mod organizer;
pub mod parser;
pub mod remote;
pub mod service;

pub use config::{IndexerConfig, RemoteConfig};
pub use error::{IndexError, IndexResult};
pub use logging::{default_log_level, init_logging, logging_status};
pub use model::summary::{FrontMatter, Summary, SummaryHeader};
pub use organizer::{OrganizeReport, RawOrganizer};
pub use parser::{parse_front_matter, parse_header, parse_summary};
pub use remote::{
    DisabledSource, FetchOutcome, FetchedDocument, GithubSource, OriginSource, RemoteError,
};
pub use service::index_service::{collect_summaries, IndexService, RunReport};

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}

#[cfg(test)]
mod tests {
    use super::core_version;

    #[test]
    fn version_is_not_empty() {
        assert!(!core_version().is_empty());
    }
}

//! Index regeneration use-case.
//!
//! # Responsibility
//! - Run the organizer, collect summaries, then write topic pages, type
//!   pages and the dashboard, strictly in that order.
//!
//! # Invariants
//! - Collection starts only after the organizer finished.
//! - No page is written before every summary has been collected.
//! - Dateless documents never reach any index.

use crate::config::IndexerConfig;
use crate::error::{IndexError, IndexResult};
use crate::index::dashboard::write_dashboard;
use crate::index::topic_page::write_topic_pages;
use crate::index::type_page::write_type_pages;
use crate::layout::{is_raw_dir_name, is_summary_file_name};
use crate::model::summary::Summary;
use crate::organizer::{type_dir_for, OrganizeReport, RawOrganizer};
use crate::parser::parse_summary;
use crate::remote::OriginSource;
use log::{debug, info};
use std::fs;
use std::path::Path;
use std::time::Instant;
use walkdir::WalkDir;

/// Outcome of one full regeneration.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RunReport {
    pub organize: OrganizeReport,
    /// Summaries with a parsed date.
    pub summaries: usize,
    /// Topic labels with a generated page.
    pub topics: Vec<String>,
    /// Type directories with a generated page.
    pub types: Vec<String>,
}

/// Regeneration facade over an origin source.
pub struct IndexService<'s, S: OriginSource + ?Sized> {
    config: IndexerConfig,
    source: &'s S,
}

impl<'s, S: OriginSource + ?Sized> IndexService<'s, S> {
    pub fn new(config: IndexerConfig, source: &'s S) -> Self {
        Self { config, source }
    }

    /// Runs organizer, collection and all page builders.
    ///
    /// # Errors
    /// - Returns `IndexError` on the first filesystem failure; the tree may
    ///   then be partially organized.
    pub fn run(&self) -> IndexResult<RunReport> {
        let started_at = Instant::now();
        let archives_dir = self.config.archives_dir();
        info!(
            "event=index_run module=service status=start root={}",
            self.config.root().display()
        );

        let organize = RawOrganizer::new(&archives_dir, self.source).organize()?;
        let summaries = collect_summaries(&archives_dir)?;
        info!(
            "event=collect module=service status=ok summaries={}",
            summaries.len()
        );

        let topics = write_topic_pages(&self.config, &summaries)?;
        let types = write_type_pages(&self.config, &summaries)?;
        write_dashboard(&self.config, &summaries, &types, &topics)?;

        info!(
            "event=index_run module=service status=ok duration_ms={} summaries={} topics={} types={}",
            started_at.elapsed().as_millis(),
            summaries.len(),
            topics.len(),
            types.len()
        );
        Ok(RunReport {
            organize,
            summaries: summaries.len(),
            topics,
            types,
        })
    }
}

/// Parses every dated summary under `archives_dir`, in sorted path order.
///
/// `raw/` folders, `README.md` pages and `*-original.md` files are ignored.
pub fn collect_summaries(archives_dir: &Path) -> IndexResult<Vec<Summary>> {
    let mut summaries = Vec::new();
    if !archives_dir.is_dir() {
        return Ok(summaries);
    }

    let walker = WalkDir::new(archives_dir)
        .sort_by_file_name()
        .into_iter()
        .filter_entry(|entry| {
            entry.depth() == 0
                || !(entry.file_type().is_dir()
                    && is_raw_dir_name(&entry.file_name().to_string_lossy()))
        });
    for entry in walker {
        let entry = entry?;
        if !entry.file_type().is_file()
            || !is_summary_file_name(&entry.file_name().to_string_lossy())
        {
            continue;
        }

        let path = entry.path();
        let content = fs::read_to_string(path).map_err(|err| IndexError::io(path, err))?;
        let doc_type_dir = path
            .parent()
            .and_then(|parent| type_dir_for(archives_dir, parent));
        match parse_summary(path, doc_type_dir, &content) {
            Some(summary) => summaries.push(summary),
            None => debug!(
                "event=collect module=service status=skipped reason=no_date_header file={}",
                path.display()
            ),
        }
    }
    Ok(summaries)
}

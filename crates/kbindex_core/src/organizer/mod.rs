//! Raw-file organizer.
//!
//! # Responsibility
//! - Move legacy `*-original.md` files into a sibling `raw/` folder.
//! - Resolve, fetch and persist each summary's original document.
//! - Keep every summary linked to its original.
//!
//! # Invariants
//! - Never overwrites an existing raw file and never deletes a summary.
//! - A second run over an unchanged tree moves, fetches and rewrites nothing.
//! - Remote lookups happen only when the raw file is not already present.

pub mod link;

use crate::error::{IndexError, IndexResult};
use crate::layout::{
    default_original_name, is_legacy_original, is_plain_file_name, is_raw_dir_name,
    is_summary_file_name, RAW_DIR,
};
use crate::parser::parse_front_matter;
use crate::remote::{select_by_number_prefix, FetchOutcome, OriginSource};
use link::link_raw_file;
use log::{debug, info, warn};
use std::fs;
use std::io::{ErrorKind, Write};
use std::path::{Component, Path, PathBuf};
use walkdir::WalkDir;

/// Counters for one organizer pass.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct OrganizeReport {
    /// Legacy originals moved into `raw/`.
    pub moved: usize,
    /// Originals downloaded and saved.
    pub fetched: usize,
    /// Summaries whose link was inserted or rewritten.
    pub linked: usize,
    /// Remote lookups that failed with a transport/decoding error.
    pub fetch_failures: usize,
}

/// Organizer over one archive tree.
pub struct RawOrganizer<'s, S: OriginSource + ?Sized> {
    archives_dir: PathBuf,
    source: &'s S,
}

impl<'s, S: OriginSource + ?Sized> RawOrganizer<'s, S> {
    pub fn new(archives_dir: impl Into<PathBuf>, source: &'s S) -> Self {
        Self {
            archives_dir: archives_dir.into(),
            source,
        }
    }

    /// Runs one pass over every non-`raw` directory of the archive.
    ///
    /// # Errors
    /// - Returns `IndexError` on traversal or filesystem failures; remote
    ///   failures are counted, never returned.
    pub fn organize(&self) -> IndexResult<OrganizeReport> {
        let mut report = OrganizeReport::default();
        if !self.archives_dir.is_dir() {
            info!(
                "event=organize module=organizer status=skipped reason=missing_archives dir={}",
                self.archives_dir.display()
            );
            return Ok(report);
        }

        let walker = WalkDir::new(&self.archives_dir)
            .sort_by_file_name()
            .into_iter()
            .filter_entry(|entry| {
                entry.depth() == 0
                    || !(entry.file_type().is_dir()
                        && is_raw_dir_name(&entry.file_name().to_string_lossy()))
            });
        for entry in walker {
            let entry = entry?;
            if entry.file_type().is_dir() {
                self.organize_dir(entry.path(), &mut report)?;
            }
        }

        info!(
            "event=organize module=organizer status=ok moved={} fetched={} linked={} fetch_failures={}",
            report.moved, report.fetched, report.linked, report.fetch_failures
        );
        Ok(report)
    }

    fn organize_dir(&self, dir: &Path, report: &mut OrganizeReport) -> IndexResult<()> {
        let raw_dir = dir.join(RAW_DIR);
        let names = list_file_names(dir)?;

        for name in names.iter().filter(|name| is_legacy_original(name)) {
            move_into_raw(dir, &raw_dir, name, report)?;
        }

        let type_dir = self.type_dir_of(dir);
        for name in names.iter().filter(|name| is_summary_file_name(name)) {
            self.organize_summary(dir, &raw_dir, name, type_dir.as_deref(), report)?;
        }
        Ok(())
    }

    fn organize_summary(
        &self,
        dir: &Path,
        raw_dir: &Path,
        file_name: &str,
        type_dir: Option<&str>,
        report: &mut OrganizeReport,
    ) -> IndexResult<()> {
        let summary_path = dir.join(file_name);
        let content =
            fs::read_to_string(&summary_path).map_err(|err| IndexError::io(&summary_path, err))?;
        let front_matter = parse_front_matter(&content);
        let default_name = default_original_name(file_name);

        let raw_name = if let Some(origin) = front_matter.origin_doc.as_deref() {
            if !is_plain_file_name(origin) {
                warn!(
                    "event=raw_resolve module=organizer status=rejected reason=invalid_origin_doc summary={} origin={}",
                    summary_path.display(),
                    origin
                );
                return Ok(());
            }
            self.ensure_by_name(raw_dir, origin, origin, report)?;
            Some(origin.to_string())
        } else if raw_dir.join(&default_name).is_file() {
            Some(default_name)
        } else if let (Some(number), Some(doc_type)) = (
            front_matter.number,
            front_matter.doc_type.as_deref().or(type_dir),
        ) {
            match find_local_numbered(raw_dir, number)? {
                Some(local) => Some(local),
                None => self.fetch_numbered(raw_dir, doc_type, number, report)?,
            }
        } else {
            self.ensure_by_name(raw_dir, &default_name, file_name, report)?;
            Some(default_name)
        };

        let Some(raw_name) = raw_name else {
            return Ok(());
        };
        if !raw_dir.join(&raw_name).is_file() {
            debug!(
                "event=raw_link module=organizer status=skipped reason=raw_missing summary={} raw={}",
                summary_path.display(),
                raw_name
            );
            return Ok(());
        }

        let change = link_raw_file(&content, &raw_name);
        let kind = change.as_str();
        match change.into_content() {
            Some(updated) => {
                fs::write(&summary_path, updated).map_err(|err| IndexError::io(&summary_path, err))?;
                report.linked += 1;
                info!(
                    "event=raw_link module=organizer status=ok change={} summary={} raw={}",
                    kind,
                    summary_path.display(),
                    raw_name
                );
            }
            None => debug!(
                "event=raw_link module=organizer status=unchanged reason={} summary={}",
                kind,
                summary_path.display()
            ),
        }
        Ok(())
    }

    /// Fetches `remote_name` into `raw/<local_name>` when not present locally.
    fn ensure_by_name(
        &self,
        raw_dir: &Path,
        local_name: &str,
        remote_name: &str,
        report: &mut OrganizeReport,
    ) -> IndexResult<()> {
        if raw_dir.join(local_name).exists() {
            return Ok(());
        }

        info!(
            "event=raw_fetch module=organizer status=start mode=name remote={} local={}",
            remote_name, local_name
        );
        match self.source.fetch_by_name(remote_name) {
            FetchOutcome::Found(content) => {
                if persist_raw(raw_dir, local_name, &content)? {
                    report.fetched += 1;
                }
            }
            FetchOutcome::NotFound => {}
            FetchOutcome::Failed(err) => {
                report.fetch_failures += 1;
                debug!(
                    "event=raw_fetch module=organizer status=treated_as_missing mode=name remote={} error={}",
                    remote_name, err
                );
            }
        }
        Ok(())
    }

    /// Fetches the numbered original and returns its remote file name.
    fn fetch_numbered(
        &self,
        raw_dir: &Path,
        doc_type: &str,
        number: u32,
        report: &mut OrganizeReport,
    ) -> IndexResult<Option<String>> {
        info!(
            "event=raw_fetch module=organizer status=start mode=type_number type={} number={}",
            doc_type, number
        );
        match self.source.fetch_by_type_and_number(doc_type, number) {
            FetchOutcome::Found(document) => {
                if !is_plain_file_name(&document.file_name) {
                    warn!(
                        "event=raw_fetch module=organizer status=rejected reason=invalid_name name={}",
                        document.file_name
                    );
                    return Ok(None);
                }
                if persist_raw(raw_dir, &document.file_name, &document.content)? {
                    report.fetched += 1;
                }
                Ok(Some(document.file_name))
            }
            FetchOutcome::NotFound => Ok(None),
            FetchOutcome::Failed(err) => {
                report.fetch_failures += 1;
                debug!(
                    "event=raw_fetch module=organizer status=treated_as_missing mode=type_number type={} number={} error={}",
                    doc_type, number, err
                );
                Ok(None)
            }
        }
    }

    /// Top-level directory under the archive root containing `dir`.
    fn type_dir_of(&self, dir: &Path) -> Option<String> {
        type_dir_for(&self.archives_dir, dir)
    }
}

/// First component of `dir` relative to `archives_dir`, if any.
pub(crate) fn type_dir_for(archives_dir: &Path, dir: &Path) -> Option<String> {
    match dir.strip_prefix(archives_dir).ok()?.components().next()? {
        Component::Normal(name) => Some(name.to_string_lossy().into_owned()),
        _ => None,
    }
}

/// Sorted UTF-8 names of regular files directly inside `dir`.
fn list_file_names(dir: &Path) -> IndexResult<Vec<String>> {
    let mut names = Vec::new();
    for entry in fs::read_dir(dir).map_err(|err| IndexError::io(dir, err))? {
        let entry = entry.map_err(|err| IndexError::io(dir, err))?;
        let file_type = entry.file_type().map_err(|err| IndexError::io(entry.path(), err))?;
        if !file_type.is_file() {
            continue;
        }
        match entry.file_name().into_string() {
            Ok(name) => names.push(name),
            Err(raw) => warn!(
                "event=organize module=organizer status=skipped reason=non_utf8_name file={}",
                dir.join(raw).display()
            ),
        }
    }
    names.sort();
    Ok(names)
}

fn move_into_raw(
    dir: &Path,
    raw_dir: &Path,
    name: &str,
    report: &mut OrganizeReport,
) -> IndexResult<()> {
    fs::create_dir_all(raw_dir).map_err(|err| IndexError::io(raw_dir, err))?;
    let src = dir.join(name);
    let dst = raw_dir.join(name);
    if dst.exists() {
        debug!(
            "event=raw_move module=organizer status=skipped reason=exists file={}",
            dst.display()
        );
        return Ok(());
    }
    fs::rename(&src, &dst).map_err(|err| IndexError::io(&src, err))?;
    report.moved += 1;
    info!(
        "event=raw_move module=organizer status=ok file={} dest={}",
        src.display(),
        dst.display()
    );
    Ok(())
}

/// First raw file (sorted by name) carrying a numbered prefix for `number`.
fn find_local_numbered(raw_dir: &Path, number: u32) -> IndexResult<Option<String>> {
    if !raw_dir.is_dir() {
        return Ok(None);
    }
    let names = list_file_names(raw_dir)?;
    Ok(select_by_number_prefix(names.iter().map(String::as_str), number).map(str::to_string))
}

/// Writes `raw/<name>` unless it already exists. Returns whether it wrote.
fn persist_raw(raw_dir: &Path, name: &str, content: &str) -> IndexResult<bool> {
    fs::create_dir_all(raw_dir).map_err(|err| IndexError::io(raw_dir, err))?;
    let path = raw_dir.join(name);
    let mut file = match fs::OpenOptions::new()
        .write(true)
        .create_new(true)
        .open(&path)
    {
        Ok(file) => file,
        Err(err) if err.kind() == ErrorKind::AlreadyExists => {
            debug!(
                "event=raw_save module=organizer status=skipped reason=exists file={}",
                path.display()
            );
            return Ok(false);
        }
        Err(err) => return Err(IndexError::io(&path, err)),
    };
    file.write_all(content.as_bytes())
        .map_err(|err| IndexError::io(&path, err))?;
    info!(
        "event=raw_save module=organizer status=ok file={}",
        path.display()
    );
    Ok(true)
}

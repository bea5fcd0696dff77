#![allow(dead_code)]

use kbindex_core::{FetchOutcome, FetchedDocument, OriginSource, RemoteError};
use std::cell::Cell;
use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

/// In-memory origin source that records how often it is asked.
#[derive(Default)]
pub struct FakeSource {
    pub by_name: BTreeMap<String, String>,
    /// type -> listing in remote order: (file name, content)
    pub by_type: BTreeMap<String, Vec<(String, String)>>,
    pub fail_names: Vec<String>,
    pub name_calls: Cell<usize>,
    pub number_calls: Cell<usize>,
}

impl FakeSource {
    pub fn with_name(mut self, file_name: &str, content: &str) -> Self {
        self.by_name
            .insert(file_name.to_string(), content.to_string());
        self
    }

    pub fn with_numbered(mut self, doc_type: &str, file_name: &str, content: &str) -> Self {
        self.by_type
            .entry(doc_type.to_string())
            .or_default()
            .push((file_name.to_string(), content.to_string()));
        self
    }

    pub fn failing(mut self, file_name: &str) -> Self {
        self.fail_names.push(file_name.to_string());
        self
    }

    pub fn calls(&self) -> usize {
        self.name_calls.get() + self.number_calls.get()
    }
}

impl OriginSource for FakeSource {
    fn fetch_by_name(&self, file_name: &str) -> FetchOutcome<String> {
        self.name_calls.set(self.name_calls.get() + 1);
        if self.fail_names.iter().any(|name| name == file_name) {
            return FetchOutcome::Failed(RemoteError::Decode("simulated".to_string()));
        }
        match self
            .by_name
            .iter()
            .find(|(path, _)| path.ends_with(file_name))
        {
            Some((_, content)) => FetchOutcome::Found(content.clone()),
            None => FetchOutcome::NotFound,
        }
    }

    fn fetch_by_type_and_number(
        &self,
        doc_type: &str,
        number: u32,
    ) -> FetchOutcome<FetchedDocument> {
        self.number_calls.set(self.number_calls.get() + 1);
        let Some(entries) = self.by_type.get(doc_type) else {
            return FetchOutcome::NotFound;
        };
        let names = entries.iter().map(|(name, _)| name.as_str());
        match kbindex_core::remote::select_by_number_prefix(names, number) {
            Some(name) => {
                let content = entries
                    .iter()
                    .find(|(candidate, _)| candidate == name)
                    .map(|(_, content)| content.clone())
                    .unwrap_or_default();
                FetchOutcome::Found(FetchedDocument {
                    file_name: name.to_string(),
                    content,
                })
            }
            None => FetchOutcome::NotFound,
        }
    }
}

pub fn write(root: &Path, relative: &str, content: &str) -> PathBuf {
    let path = root.join(relative);
    fs::create_dir_all(path.parent().unwrap()).unwrap();
    fs::write(&path, content).unwrap();
    path
}

pub fn read(root: &Path, relative: &str) -> String {
    fs::read_to_string(root.join(relative)).unwrap()
}

/// Every file under `root` with its content, sorted by relative path.
pub fn snapshot(root: &Path) -> Vec<(String, String)> {
    let mut files = Vec::new();
    collect(root, root, &mut files);
    files.sort();
    files
}

fn collect(root: &Path, dir: &Path, out: &mut Vec<(String, String)>) {
    for entry in fs::read_dir(dir).unwrap() {
        let path = entry.unwrap().path();
        if path.is_dir() {
            collect(root, &path, out);
        } else {
            let relative = path
                .strip_prefix(root)
                .unwrap()
                .to_string_lossy()
                .replace('\\', "/");
            out.push((relative, fs::read_to_string(&path).unwrap()));
        }
    }
}

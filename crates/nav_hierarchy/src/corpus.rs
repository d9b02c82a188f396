//! Directory scan and the immutable corpus snapshot it produces.

use crate::document::{Conventions, Document};
use serde::Serialize;
use std::collections::BTreeMap;
use std::fs;
use std::io;
use std::path::{Component, Path, PathBuf};
use thiserror::Error;

/// Directory names skipped by default: generated site output and version control metadata.
pub const DEFAULT_EXCLUDED_DIRS: &[&str] = &["_site", ".git"];

/// Failure that prevents a scan from starting.
#[derive(Debug, Error)]
pub enum ScanError {
    /// The scan root itself could not be listed.
    #[error("failed to read directory {}: {source}", .path.display())]
    ReadDir {
        /// Directory that failed.
        path: PathBuf,
        /// Underlying I/O error.
        source: io::Error,
    },
}

/// Inputs of a directory scan.
#[derive(Debug, Clone)]
pub struct ScanOptions {
    /// Corpus root. Document paths are reported relative to it.
    pub root: PathBuf,
    /// Directory names whose subtrees are skipped wherever they appear.
    pub excluded_dirs: Vec<String>,
    /// Landing page and extension conventions.
    pub conventions: Conventions,
}

impl ScanOptions {
    /// Options with the default denylist and conventions.
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self {
            root: root.into(),
            excluded_dirs: DEFAULT_EXCLUDED_DIRS.iter().map(|s| s.to_string()).collect(),
            conventions: Conventions::default(),
        }
    }

    /// True when a directory named `name` is on the denylist.
    pub fn is_excluded(&self, name: &str) -> bool {
        self.excluded_dirs.iter().any(|excluded| excluded == name)
    }
}

/// A document or directory that could not be read during a scan.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ScanFailure {
    /// Root-relative path.
    pub path: String,
    /// Human-readable reason.
    pub message: String,
}

/// Documents that loaded plus everything that failed to load.
#[derive(Debug, Clone)]
pub struct ScanOutcome {
    /// Snapshot of every readable document.
    pub corpus: Corpus,
    /// Per-path read failures, in traversal order.
    pub failures: Vec<ScanFailure>,
}

/// Path-ordered set of documents with a title index.
#[derive(Debug, Clone, Default)]
pub struct Corpus {
    documents: Vec<Document>,
    title_index: BTreeMap<String, Vec<String>>,
}

impl Corpus {
    /// Build a corpus. Documents are sorted by path so that every downstream ordering is
    /// reproducible regardless of how they were collected.
    pub fn from_documents(mut documents: Vec<Document>) -> Self {
        documents.sort_by(|a, b| a.path.cmp(&b.path));
        let mut title_index: BTreeMap<String, Vec<String>> = BTreeMap::new();
        for document in &documents {
            if let Some(title) = &document.title {
                title_index
                    .entry(title.clone())
                    .or_default()
                    .push(document.path.clone());
            }
        }
        Self {
            documents,
            title_index,
        }
    }

    /// Documents in path order.
    pub fn documents(&self) -> &[Document] {
        &self.documents
    }

    /// Title to declaring paths, each list in path order.
    pub fn title_index(&self) -> &BTreeMap<String, Vec<String>> {
        &self.title_index
    }

    /// Paths declaring `title`; empty when nothing does.
    pub fn definitions(&self, title: &str) -> &[String] {
        self.title_index
            .get(title)
            .map(Vec::as_slice)
            .unwrap_or_default()
    }

    /// Document at `path`.
    pub fn get(&self, path: &str) -> Option<&Document> {
        self.documents
            .binary_search_by(|document| document.path.as_str().cmp(path))
            .ok()
            .map(|idx| &self.documents[idx])
    }

    /// Number of documents.
    pub fn len(&self) -> usize {
        self.documents.len()
    }

    /// True when the corpus holds no documents.
    pub fn is_empty(&self) -> bool {
        self.documents.is_empty()
    }
}

/// Walk `options.root` and load every Markdown document.
///
/// Directory entries are visited in sorted order. Symlinked directories are not descended
/// into; symlinked files are read like regular files. Unreadable documents and unreadable
/// subdirectories are recorded in [`ScanOutcome::failures`] and the scan continues; only an
/// unreadable root is an error.
pub fn scan_corpus(options: &ScanOptions) -> Result<ScanOutcome, ScanError> {
    let mut files = Vec::new();
    let mut failures = Vec::new();
    collect_markdown_files(&options.root, options, &mut files, &mut failures)?;
    files.sort();

    let mut documents = Vec::with_capacity(files.len());
    for path in files {
        let rel = rel_posix(&options.root, &path);
        match Document::load(&options.root, &rel) {
            Ok(document) => {
                if !document.header_state.is_complete() {
                    tracing::debug!(path = %rel, state = ?document.header_state, "degenerate header");
                }
                documents.push(document);
            }
            Err(err) => {
                tracing::warn!(path = %rel, "{err}");
                failures.push(ScanFailure {
                    path: rel,
                    message: err.to_string(),
                });
            }
        }
    }

    tracing::info!(
        documents = documents.len(),
        failures = failures.len(),
        root = %options.root.display(),
        "scan complete"
    );
    Ok(ScanOutcome {
        corpus: Corpus::from_documents(documents),
        failures,
    })
}

fn collect_markdown_files(
    root: &Path,
    options: &ScanOptions,
    out: &mut Vec<PathBuf>,
    failures: &mut Vec<ScanFailure>,
) -> Result<(), ScanError> {
    let entries = read_dir_sorted(root).map_err(|source| ScanError::ReadDir {
        path: root.to_path_buf(),
        source,
    })?;

    for path in entries {
        let name = path
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_default();
        let is_symlink = fs::symlink_metadata(&path)
            .map(|meta| meta.file_type().is_symlink())
            .unwrap_or(false);
        if path.is_dir() {
            if is_symlink {
                tracing::debug!(path = %path.display(), "not following symlinked directory");
                continue;
            }
            if options.is_excluded(&name) {
                tracing::debug!(path = %path.display(), "skipping excluded directory");
                continue;
            }
            if let Err(err) = collect_markdown_files(&path, options, out, failures) {
                tracing::warn!("{err}");
                failures.push(ScanFailure {
                    path: rel_posix(&options.root, &path),
                    message: err.to_string(),
                });
            }
        } else if path.is_file() && options.conventions.is_markdown(&name) {
            out.push(path);
        }
    }

    Ok(())
}

/// List a directory's immediate children, sorted by path.
pub(crate) fn read_dir_sorted(dir: &Path) -> io::Result<Vec<PathBuf>> {
    let mut entries = fs::read_dir(dir)?
        .map(|entry| entry.map(|entry| entry.path()))
        .collect::<Result<Vec<_>, _>>()?;
    entries.sort();
    Ok(entries)
}

/// Root-relative path with `/` separators.
pub(crate) fn rel_posix(root: &Path, path: &Path) -> String {
    let rel = path.strip_prefix(root).unwrap_or(path);
    rel.components()
        .filter_map(|c| match c {
            Component::Normal(part) => Some(part.to_string_lossy().into_owned()),
            Component::CurDir => Some(".".to_string()),
            Component::ParentDir => Some("..".to_string()),
            Component::RootDir | Component::Prefix(_) => None,
        })
        .collect::<Vec<_>>()
        .join("/")
}

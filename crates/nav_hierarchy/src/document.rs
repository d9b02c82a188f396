//! One Markdown document's declared place in the navigation hierarchy.

use crate::header::{extract, HeaderState, NavOrder};
use serde::{Deserialize, Serialize};
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Per-document I/O failures.
#[derive(Debug, Error)]
pub enum DocumentError {
    /// The document could not be read (missing, permissions, or not UTF-8).
    #[error("failed to read {}: {source}", .path.display())]
    Read {
        /// File that failed.
        path: PathBuf,
        /// Underlying I/O error.
        source: io::Error,
    },
    /// The updated document could not be written back.
    #[error("failed to write {}: {source}", .path.display())]
    Write {
        /// File that failed.
        path: PathBuf,
        /// Underlying I/O error.
        source: io::Error,
    },
}

/// File naming conventions of a documentation tree.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Conventions {
    /// File stem of a section landing page (`index` for `index.md`).
    pub landing_page: String,
    /// Markdown file extension without the dot, matched case-insensitively.
    pub markdown_extension: String,
}

impl Default for Conventions {
    fn default() -> Self {
        Self {
            landing_page: "index".to_string(),
            markdown_extension: "md".to_string(),
        }
    }
}

impl Conventions {
    /// True when `file_name` carries the Markdown extension.
    pub fn is_markdown(&self, file_name: &str) -> bool {
        file_name
            .rsplit_once('.')
            .is_some_and(|(stem, ext)| {
                !stem.is_empty() && ext.eq_ignore_ascii_case(&self.markdown_extension)
            })
    }

    /// True when `file_name` is the reserved landing page name.
    pub fn is_landing_file(&self, file_name: &str) -> bool {
        self.is_markdown(file_name)
            && file_name
                .rsplit_once('.')
                .is_some_and(|(stem, _)| stem == self.landing_page)
    }

    /// Landing page file name, e.g. `index.md`.
    pub fn landing_file_name(&self) -> String {
        format!("{}.{}", self.landing_page, self.markdown_extension)
    }
}

/// Hierarchy placement of one document, built once per scan.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Document {
    /// Root-relative path with `/` separators. Unique within a corpus.
    pub path: String,
    /// Title other documents reference as `parent`.
    pub title: Option<String>,
    /// Parent title.
    pub parent: Option<String>,
    /// Grand-parent title.
    pub grand_parent: Option<String>,
    /// Sibling sort value.
    pub nav_order: Option<NavOrder>,
    /// Whether the header was closed, unterminated, or missing.
    pub header_state: HeaderState,
}

impl Document {
    /// Build a document from its text.
    pub fn from_text(path: impl Into<String>, text: &str) -> Self {
        let extraction = extract(text);
        Self {
            path: path.into(),
            title: extraction.fields.title,
            parent: extraction.fields.parent,
            grand_parent: extraction.fields.grand_parent,
            nav_order: extraction.fields.nav_order,
            header_state: extraction.state,
        }
    }

    /// Read and parse `root/rel_path`.
    pub fn load(root: &Path, rel_path: &str) -> Result<Self, DocumentError> {
        let path = root.join(rel_path);
        let text = fs::read_to_string(&path).map_err(|source| DocumentError::Read {
            path: path.clone(),
            source,
        })?;
        Ok(Self::from_text(rel_path, &text))
    }

    /// Last path segment.
    pub fn file_name(&self) -> &str {
        self.path
            .rsplit_once('/')
            .map_or(self.path.as_str(), |(_, name)| name)
    }

    /// True for the corpus root's own landing page.
    pub fn is_root_page(&self, conventions: &Conventions) -> bool {
        !self.path.contains('/') && conventions.is_landing_file(&self.path)
    }

    /// True for a section landing page: a landing file below the corpus root.
    pub fn is_landing_page(&self, conventions: &Conventions) -> bool {
        !self.is_root_page(conventions) && conventions.is_landing_file(self.file_name())
    }
}

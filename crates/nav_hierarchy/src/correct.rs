//! Targeted header field rewrites.
//!
//! A correction only touches header lines whose key is being updated. Every other byte of the
//! file, including the body, unknown keys and line terminators, is written back unchanged.

use crate::document::DocumentError;
use crate::header::HeaderDocument;
use serde::Serialize;
use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

/// Field updates for one document.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Correction {
    /// Root-relative path with `/` separators.
    pub path: String,
    /// Header key to replacement literal text.
    pub updates: BTreeMap<String, String>,
}

impl Correction {
    /// Correction for `path` with no updates yet.
    pub fn new(path: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            updates: BTreeMap::new(),
        }
    }

    /// Add or replace one field update.
    pub fn set(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.updates.insert(key.into(), value.into());
        self
    }
}

/// What happened to one correction.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum CorrectionStatus {
    /// The file was rewritten (or would be, on a dry run).
    Applied {
        /// Keys whose header lines changed value.
        fields: Vec<String>,
    },
    /// The update produced identical content; nothing was written.
    Unchanged,
    /// The target file does not exist.
    NotFound,
    /// Reading or writing the file failed.
    Failed {
        /// Failure description.
        message: String,
    },
}

/// Per-document result of a correction batch.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CorrectionOutcome {
    /// Root-relative path of the target.
    pub path: String,
    /// Result.
    #[serde(flatten)]
    pub status: CorrectionStatus,
    /// Requested keys the header does not declare. Nothing is inserted for them.
    pub missing_fields: Vec<String>,
}

impl CorrectionOutcome {
    fn new(path: &str, status: CorrectionStatus) -> Self {
        Self {
            path: path.to_string(),
            status,
            missing_fields: Vec::new(),
        }
    }

    /// True when the correction hit an I/O failure.
    pub fn is_failure(&self) -> bool {
        matches!(self.status, CorrectionStatus::Failed { .. })
    }
}

/// Apply `updates` to document text.
///
/// Returns the rewritten text and the requested keys that the header does not declare.
pub fn correct_text(text: &str, updates: &BTreeMap<String, String>) -> (String, Vec<String>) {
    let mut document = HeaderDocument::parse(text);
    let mut missing = Vec::new();
    for (key, value) in updates {
        if document.set_field(key, value) == 0 {
            missing.push(key.clone());
        }
    }
    (document.render(), missing)
}

/// Apply one correction under `root`.
///
/// Never returns an error: a missing file or an I/O failure is reported in the outcome so that
/// a batch can continue with the next document.
pub fn apply_correction(root: &Path, correction: &Correction, dry_run: bool) -> CorrectionOutcome {
    let path = root.join(&correction.path);
    if !path.is_file() {
        tracing::warn!(path = %correction.path, "correction target not found");
        return CorrectionOutcome::new(&correction.path, CorrectionStatus::NotFound);
    }

    let original = match fs::read_to_string(&path) {
        Ok(text) => text,
        Err(source) => {
            let err = DocumentError::Read { path, source };
            tracing::warn!("{err}");
            return CorrectionOutcome::new(
                &correction.path,
                CorrectionStatus::Failed {
                    message: err.to_string(),
                },
            );
        }
    };

    let (updated, missing_fields) = correct_text(&original, &correction.updates);
    if !missing_fields.is_empty() {
        tracing::debug!(path = %correction.path, ?missing_fields, "header does not declare fields");
    }

    let status = if updated == original {
        CorrectionStatus::Unchanged
    } else {
        let fields = changed_fields(&original, &correction.updates, &missing_fields);
        if dry_run {
            CorrectionStatus::Applied { fields }
        } else {
            match fs::write(&path, &updated) {
                Ok(()) => {
                    tracing::info!(path = %correction.path, ?fields, "header updated");
                    CorrectionStatus::Applied { fields }
                }
                Err(source) => {
                    let err = DocumentError::Write { path, source };
                    tracing::warn!("{err}");
                    CorrectionStatus::Failed {
                        message: err.to_string(),
                    }
                }
            }
        }
    };

    CorrectionOutcome {
        path: correction.path.clone(),
        status,
        missing_fields,
    }
}

/// Apply every correction in order. One outcome per correction; failures never stop the batch.
pub fn apply_corrections(
    root: &Path,
    corrections: &[Correction],
    dry_run: bool,
) -> Vec<CorrectionOutcome> {
    corrections
        .iter()
        .map(|correction| apply_correction(root, correction, dry_run))
        .collect()
}

/// Keys whose single-field rewrite alters the text.
fn changed_fields(
    original: &str,
    updates: &BTreeMap<String, String>,
    missing: &[String],
) -> Vec<String> {
    updates
        .iter()
        .filter(|(key, _)| !missing.contains(key))
        .filter(|(key, value)| {
            let mut document = HeaderDocument::parse(original);
            document.set_field(key, value);
            document.render() != original
        })
        .map(|(key, _)| key.clone())
        .collect()
}

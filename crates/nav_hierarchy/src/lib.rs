//! Navigation hierarchy model for Markdown trees that carry `title` / `parent` / `grand_parent` /
//! `nav_order` front matter.
//!
//! The crate is split along the life of an audit run:
//!
//! - [`header`] owns the front matter boundary state machine. Both the read path
//!   ([`header::extract`]) and the write path ([`header::HeaderDocument::set_field`]) go through
//!   the same line classification, so a key in body text is never treated as a header field.
//! - [`document`] and [`corpus`] turn a directory tree into an immutable, path-ordered snapshot
//!   with a title index.
//! - [`validate`] and [`audit`] run the hierarchy checks and produce findings plus the root
//!   ordering table.
//! - [`correct`] and [`renumber`] rewrite targeted header fields on disk.
//!
//! Structural problems are always returned as data ([`validate::Finding`]); only per-document
//! I/O failures are errors, and those are isolated per document.

#![warn(missing_docs, rustdoc::broken_intra_doc_links)]

pub mod audit;
pub mod corpus;
pub mod correct;
pub mod document;
pub mod header;
pub mod renumber;
pub mod validate;

pub use audit::{audit, AuditReport};
pub use corpus::{scan_corpus, Corpus, ScanError, ScanFailure, ScanOptions, ScanOutcome};
pub use correct::{
    apply_correction, apply_corrections, correct_text, Correction, CorrectionOutcome,
    CorrectionStatus,
};
pub use document::{Conventions, Document, DocumentError};
pub use header::{extract, Extraction, HeaderDocument, HeaderFields, HeaderState, NavOrder};
pub use renumber::{plan_renumbering, RenumberPolicy};
pub use validate::{
    root_ordering, validate, Finding, FindingKind, RootEntry, Severity, ValidationPolicy,
};

//! Whole-run audit result: findings, root ordering, and unreadable paths.

use crate::corpus::{ScanFailure, ScanOutcome};
use crate::validate::{root_ordering, validate, Finding, RootEntry, Severity, ValidationPolicy};
use serde::Serialize;
use std::collections::BTreeMap;

/// Everything a single audit run produced.
#[derive(Debug, Clone, Serialize)]
pub struct AuditReport {
    /// Number of documents that were read and modeled.
    pub scanned: usize,
    /// Top-level section ordering, for human review.
    pub root_order: Vec<RootEntry>,
    /// Structural findings in document path order.
    pub findings: Vec<Finding>,
    /// Paths that could not be read.
    pub failures: Vec<ScanFailure>,
}

impl AuditReport {
    /// Clean means no findings of any severity.
    pub fn is_clean(&self) -> bool {
        self.findings.is_empty()
    }

    /// True when at least one hierarchy edge is broken.
    pub fn has_errors(&self) -> bool {
        self.count(Severity::Error) > 0
    }

    /// Number of findings with `severity`.
    pub fn count(&self, severity: Severity) -> usize {
        self.findings
            .iter()
            .filter(|finding| finding.severity == severity)
            .count()
    }

    /// Finding counts keyed by [`FindingKind::as_str`](crate::validate::FindingKind::as_str).
    pub fn counts_by_kind(&self) -> BTreeMap<&'static str, usize> {
        let mut counts = BTreeMap::new();
        for finding in &self.findings {
            *counts.entry(finding.kind.as_str()).or_default() += 1;
        }
        counts
    }
}

/// Validate a scanned corpus.
///
/// Runs only after the whole scan has finished: every check needs the complete title index.
pub fn audit(outcome: &ScanOutcome, policy: &ValidationPolicy) -> AuditReport {
    let findings = validate(&outcome.corpus, policy);
    tracing::debug!(findings = findings.len(), "validation complete");
    AuditReport {
        scanned: outcome.corpus.len(),
        root_order: root_ordering(&outcome.corpus, policy),
        findings,
        failures: outcome.failures.clone(),
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;
    use crate::corpus::Corpus;
    use crate::document::Document;

    #[test]
    fn counts_split_by_severity_and_kind() {
        let outcome = ScanOutcome {
            corpus: Corpus::from_documents(vec![
                Document::from_text("a.md", "---\nparent: Ghost\nnav_order: x\n---\n"),
                Document::from_text("b.md", "---\nparent: Ghost\n---\n"),
            ]),
            failures: vec![ScanFailure {
                path: "c.md".into(),
                message: "failed to read c.md".into(),
            }],
        };

        let report = audit(&outcome, &ValidationPolicy::default());
        assert_eq!(report.scanned, 2);
        assert!(!report.is_clean());
        assert!(report.has_errors());
        assert_eq!(report.count(Severity::Error), 2);
        assert_eq!(report.count(Severity::Warning), 1);
        assert_eq!(
            report.counts_by_kind().into_iter().collect::<Vec<_>>(),
            vec![("malformed_order", 1), ("orphan_reference", 2)]
        );
        assert_eq!(report.failures.len(), 1);
    }

    #[test]
    fn warnings_alone_are_not_clean_but_not_broken() {
        let outcome = ScanOutcome {
            corpus: Corpus::from_documents(vec![Document::from_text(
                "a.md",
                "---\nnav_order: later\n---\n",
            )]),
            failures: Vec::new(),
        };

        let report = audit(&outcome, &ValidationPolicy::default());
        assert!(!report.is_clean());
        assert!(!report.has_errors());
    }
}

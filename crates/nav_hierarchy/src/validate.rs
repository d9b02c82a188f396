//! Hierarchy consistency checks and the root ordering report.

use crate::corpus::Corpus;
use crate::document::{Conventions, Document};
use crate::header::NavOrder;
use serde::Serialize;
use std::fmt::{self, Display, Formatter};

/// Default sort key for roots whose order is missing or not numeric.
pub const DEFAULT_MISSING_ORDER_SENTINEL: f64 = 999.0;

/// Finding severity. Only errors mean a hierarchy edge is broken.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Severity {
    /// Broken hierarchy edge.
    Error,
    /// Suspicious but navigable.
    Warning,
}

impl Severity {
    /// Tag used in text reports.
    pub fn label(self) -> &'static str {
        match self {
            Self::Error => "ERROR",
            Self::Warning => "WARNING",
        }
    }
}

impl Display for Severity {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Kind of structural defect.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum FindingKind {
    /// Landing page title shared with other documents; unusable as a parent key.
    AmbiguousLandingTitle,
    /// `parent` names a title no document declares.
    OrphanReference,
    /// `parent` names a title declared by several documents.
    AmbiguousReference,
    /// `nav_order` is present but not a number.
    MalformedOrder,
    /// `grand_parent` disagrees with the resolved parent's own `parent`.
    GrandParentMismatch,
}

impl FindingKind {
    /// Severity attached to every finding of this kind.
    pub fn severity(self) -> Severity {
        match self {
            Self::OrphanReference | Self::AmbiguousReference => Severity::Error,
            Self::AmbiguousLandingTitle | Self::MalformedOrder | Self::GrandParentMismatch => {
                Severity::Warning
            }
        }
    }

    /// Stable identifier used in JSON reports.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::AmbiguousLandingTitle => "ambiguous_landing_title",
            Self::OrphanReference => "orphan_reference",
            Self::AmbiguousReference => "ambiguous_reference",
            Self::MalformedOrder => "malformed_order",
            Self::GrandParentMismatch => "grand_parent_mismatch",
        }
    }
}

/// One structural defect.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Finding {
    /// Severity derived from [`Finding::kind`].
    pub severity: Severity,
    /// Defect kind.
    pub kind: FindingKind,
    /// Document the finding is about.
    pub path: String,
    /// Other documents involved (duplicate definitions, resolved parent).
    pub related: Vec<String>,
    /// Human-readable description.
    pub message: String,
}

impl Finding {
    fn new(
        kind: FindingKind,
        path: impl Into<String>,
        related: Vec<String>,
        message: impl Into<String>,
    ) -> Self {
        Self {
            severity: kind.severity(),
            kind,
            path: path.into(),
            related,
            message: message.into(),
        }
    }
}

impl Display for Finding {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "[{}] {}", self.severity, self.message)
    }
}

/// Knobs of a validation run.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ValidationPolicy {
    /// Landing page and extension conventions.
    pub conventions: Conventions,
    /// Title of the site home page, excluded from the root ordering report.
    pub home_title: String,
    /// Sort key for roots with a missing or non-numeric order.
    pub missing_order_sentinel: f64,
    /// Also check `grand_parent` against the resolved parent's `parent`.
    pub check_grand_parent: bool,
}

impl Default for ValidationPolicy {
    fn default() -> Self {
        Self {
            conventions: Conventions::default(),
            home_title: "Home".to_string(),
            missing_order_sentinel: DEFAULT_MISSING_ORDER_SENTINEL,
            check_grand_parent: false,
        }
    }
}

/// Run every check against every document, in path order.
///
/// Per document the checks run in a fixed order: duplicate landing title, parent resolution,
/// grand-parent consistency (when enabled), order format.
pub fn validate(corpus: &Corpus, policy: &ValidationPolicy) -> Vec<Finding> {
    let mut findings = Vec::new();
    for document in corpus.documents() {
        check_landing_title(corpus, policy, document, &mut findings);
        check_parent(corpus, document, &mut findings);
        if policy.check_grand_parent {
            check_grand_parent(corpus, document, &mut findings);
        }
        check_nav_order(document, &mut findings);
    }
    findings
}

fn check_landing_title(
    corpus: &Corpus,
    policy: &ValidationPolicy,
    document: &Document,
    findings: &mut Vec<Finding>,
) {
    let Some(title) = document.title.as_deref() else {
        return;
    };
    let definitions = corpus.definitions(title);
    if definitions.len() < 2 || !document.is_landing_page(&policy.conventions) {
        return;
    }
    findings.push(Finding::new(
        FindingKind::AmbiguousLandingTitle,
        document.path.clone(),
        others(definitions, &document.path),
        format!(
            "duplicate title `{title}` on landing page `{}` is declared in {} files: {}",
            document.path,
            definitions.len(),
            definitions.join(", ")
        ),
    ));
}

fn check_parent(corpus: &Corpus, document: &Document, findings: &mut Vec<Finding>) {
    let Some(parent) = document.parent.as_deref() else {
        return;
    };
    let definitions = corpus.definitions(parent);
    match definitions.len() {
        0 => findings.push(Finding::new(
            FindingKind::OrphanReference,
            document.path.clone(),
            Vec::new(),
            format!(
                "orphan: `{}` refers to non-existent parent `{parent}`",
                document.path
            ),
        )),
        1 => {}
        count => findings.push(Finding::new(
            FindingKind::AmbiguousReference,
            document.path.clone(),
            definitions.to_vec(),
            format!(
                "ambiguous parent: `{}` refers to `{parent}`, which is declared in {count} files: {}",
                document.path,
                definitions.join(", ")
            ),
        )),
    }
}

fn check_grand_parent(corpus: &Corpus, document: &Document, findings: &mut Vec<Finding>) {
    let (Some(parent), Some(grand_parent)) =
        (document.parent.as_deref(), document.grand_parent.as_deref())
    else {
        return;
    };
    let [parent_path] = corpus.definitions(parent) else {
        return;
    };
    let Some(parent_document) = corpus.get(parent_path) else {
        return;
    };
    if parent_document.parent.as_deref() == Some(grand_parent) {
        return;
    }
    let actual = parent_document
        .parent
        .as_deref()
        .map_or_else(|| "no parent".to_string(), |p| format!("parent `{p}`"));
    findings.push(Finding::new(
        FindingKind::GrandParentMismatch,
        document.path.clone(),
        vec![parent_path.clone()],
        format!(
            "grand parent mismatch: `{}` declares grand_parent `{grand_parent}` but its parent `{parent}` ({parent_path}) declares {actual}",
            document.path
        ),
    ));
}

fn check_nav_order(document: &Document, findings: &mut Vec<Finding>) {
    let Some(NavOrder::Raw(raw)) = &document.nav_order else {
        return;
    };
    findings.push(Finding::new(
        FindingKind::MalformedOrder,
        document.path.clone(),
        Vec::new(),
        format!("invalid nav_order in `{}`: `{raw}`", document.path),
    ));
}

fn others(definitions: &[String], path: &str) -> Vec<String> {
    definitions
        .iter()
        .filter(|candidate| candidate.as_str() != path)
        .cloned()
        .collect()
}

/// One row of the root ordering report.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RootEntry {
    /// Declared order, if any.
    pub order: Option<NavOrder>,
    /// Declared title, if any.
    pub title: Option<String>,
    /// Landing page path.
    pub path: String,
}

impl Display for RootEntry {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match &self.order {
            Some(order) => write!(f, "{order}")?,
            None => f.write_str("unset")?,
        }
        write!(
            f,
            ": {} ({})",
            self.title.as_deref().unwrap_or("(untitled)"),
            self.path
        )
    }
}

/// Top-level sections: landing pages without a parent, other than the home page, sorted by
/// numeric order. Missing or non-numeric orders sort at the sentinel; ties keep path order.
pub fn root_ordering(corpus: &Corpus, policy: &ValidationPolicy) -> Vec<RootEntry> {
    let mut roots: Vec<RootEntry> = corpus
        .documents()
        .iter()
        .filter(|document| {
            document.is_landing_page(&policy.conventions)
                && document.parent.is_none()
                && document.title.as_deref() != Some(policy.home_title.as_str())
        })
        .map(|document| RootEntry {
            order: document.nav_order.clone(),
            title: document.title.clone(),
            path: document.path.clone(),
        })
        .collect();

    let sort_key = |entry: &RootEntry| {
        entry
            .order
            .as_ref()
            .and_then(NavOrder::as_number)
            .unwrap_or(policy.missing_order_sentinel)
    };
    roots.sort_by(|a, b| sort_key(a).total_cmp(&sort_key(b)));
    roots
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    fn doc(path: &str, header: &str) -> Document {
        Document::from_text(path, &format!("---\n{header}\n---\nbody\n"))
    }

    fn kinds(findings: &[Finding]) -> Vec<(FindingKind, &str)> {
        findings.iter().map(|f| (f.kind, f.path.as_str())).collect()
    }

    #[test]
    fn unique_present_parents_produce_no_errors() {
        let corpus = Corpus::from_documents(vec![
            doc("index.md", "title: Home"),
            doc("01 Testing/index.md", "title: Testing\nnav_order: 2"),
            doc("01 Testing/unit.md", "title: Unit\nparent: Testing"),
            doc("01 Testing/ui.md", "title: UI\nparent: Testing\ngrand_parent: Home"),
        ]);

        let findings = validate(&corpus, &ValidationPolicy::default());
        assert!(findings.is_empty(), "unexpected findings: {findings:#?}");
    }

    #[test]
    fn duplicate_title_warns_for_landing_page_only() {
        let corpus = Corpus::from_documents(vec![
            doc("setup/index.md", "title: Setup"),
            doc("guides/setup.md", "title: Setup"),
        ]);

        let findings = validate(&corpus, &ValidationPolicy::default());
        assert_eq!(
            kinds(&findings),
            vec![(FindingKind::AmbiguousLandingTitle, "setup/index.md")]
        );
        assert_eq!(findings[0].severity, Severity::Warning);
        assert_eq!(findings[0].related, vec!["guides/setup.md".to_string()]);
    }

    #[test]
    fn root_landing_page_is_not_a_section_landing_page() {
        let corpus = Corpus::from_documents(vec![
            doc("index.md", "title: Setup"),
            doc("guides/setup.md", "title: Setup"),
        ]);
        assert!(validate(&corpus, &ValidationPolicy::default()).is_empty());
    }

    #[test]
    fn missing_parent_is_an_orphan_error() {
        let corpus = Corpus::from_documents(vec![
            doc("a/index.md", "title: A"),
            doc("a/page.md", "title: Page\nparent: \"Ghost Section\""),
        ]);

        let findings = validate(&corpus, &ValidationPolicy::default());
        assert_eq!(kinds(&findings), vec![(FindingKind::OrphanReference, "a/page.md")]);
        assert_eq!(findings[0].severity, Severity::Error);
        assert!(findings[0].message.contains("Ghost Section"));
        assert_eq!(
            findings[0].to_string(),
            "[ERROR] orphan: `a/page.md` refers to non-existent parent `Ghost Section`"
        );
    }

    #[test]
    fn parent_declared_twice_is_ambiguous_even_for_leaf_titles() {
        let corpus = Corpus::from_documents(vec![
            doc("q/coroutines.md", "title: Coroutines"),
            doc("k/coroutines.md", "title: Coroutines"),
            doc("k/flow.md", "title: Flow\nparent: Coroutines"),
        ]);

        let findings = validate(&corpus, &ValidationPolicy::default());
        assert_eq!(
            kinds(&findings),
            vec![(FindingKind::AmbiguousReference, "k/flow.md")]
        );
        assert_eq!(
            findings[0].related,
            vec!["k/coroutines.md".to_string(), "q/coroutines.md".to_string()]
        );
    }

    #[test]
    fn non_numeric_order_warns_and_decimal_does_not() {
        let corpus = Corpus::from_documents(vec![
            doc("a.md", "title: A\nnav_order: \"abc\""),
            doc("b.md", "title: B\nnav_order: 3.5"),
        ]);

        let findings = validate(&corpus, &ValidationPolicy::default());
        assert_eq!(kinds(&findings), vec![(FindingKind::MalformedOrder, "a.md")]);
        assert_eq!(findings[0].severity, Severity::Warning);
    }

    #[test]
    fn findings_follow_path_order_then_check_order() {
        let corpus = Corpus::from_documents(vec![
            doc("z.md", "parent: Nobody"),
            doc("dup/index.md", "title: Dup\nparent: Nobody\nnav_order: x"),
            doc("other/dup.md", "title: Dup"),
        ]);

        let findings = validate(&corpus, &ValidationPolicy::default());
        assert_eq!(
            kinds(&findings),
            vec![
                (FindingKind::AmbiguousLandingTitle, "dup/index.md"),
                (FindingKind::OrphanReference, "dup/index.md"),
                (FindingKind::MalformedOrder, "dup/index.md"),
                (FindingKind::OrphanReference, "z.md"),
            ]
        );
    }

    #[test]
    fn grand_parent_check_is_opt_in() {
        let corpus = Corpus::from_documents(vec![
            doc("index.md", "title: Home"),
            doc("a/index.md", "title: A\nparent: Home"),
            doc("a/b.md", "title: B\nparent: A\ngrand_parent: Elsewhere"),
        ]);

        assert!(validate(&corpus, &ValidationPolicy::default()).is_empty());

        let policy = ValidationPolicy {
            check_grand_parent: true,
            ..ValidationPolicy::default()
        };
        let findings = validate(&corpus, &policy);
        assert_eq!(
            kinds(&findings),
            vec![(FindingKind::GrandParentMismatch, "a/b.md")]
        );
        assert_eq!(findings[0].related, vec!["a/index.md".to_string()]);
    }

    #[test]
    fn root_ordering_sorts_missing_orders_last() {
        let corpus = Corpus::from_documents(vec![
            doc("index.md", "title: Home\nnav_order: 1"),
            doc("a/index.md", "title: Third\nnav_order: 3"),
            doc("b/index.md", "title: First\nnav_order: 1"),
            doc("c/index.md", "title: Unordered"),
            doc("d/index.md", "title: Nested\nparent: First"),
            doc("e/page.md", "title: Leaf\nnav_order: 0"),
        ]);

        let roots = root_ordering(&corpus, &ValidationPolicy::default());
        let rendered: Vec<String> = roots.iter().map(ToString::to_string).collect();
        assert_eq!(
            rendered,
            vec![
                "1: First (b/index.md)",
                "3: Third (a/index.md)",
                "unset: Unordered (c/index.md)",
            ]
        );
    }

    #[test]
    fn root_ordering_treats_non_numeric_order_as_sentinel() {
        let corpus = Corpus::from_documents(vec![
            doc("a/index.md", "title: Bad\nnav_order: soon"),
            doc("b/index.md", "title: Late\nnav_order: 1000"),
            doc("c/index.md", "title: Early\nnav_order: 998"),
        ]);

        let titles: Vec<_> = root_ordering(&corpus, &ValidationPolicy::default())
            .into_iter()
            .filter_map(|entry| entry.title)
            .collect();
        assert_eq!(titles, vec!["Early", "Bad", "Late"]);
    }
}

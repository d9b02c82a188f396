//! `navaudit audit`: scan, validate, and report.

use crate::cli::AuditArgs;
use crate::runtime::context::CommandContext;
use crate::runtime::error::{NavauditError, NavauditResult};
use crate::runtime::fs::write_text_file;
use crate::NavCommand;
use chrono::{SecondsFormat, Utc};
use nav_hierarchy::{audit, scan_corpus, AuditReport, Severity};
use serde_json::{json, Value};
use std::path::Path;

/// `navaudit audit`
pub struct AuditCommand;

impl NavCommand for AuditCommand {
    type Options = AuditArgs;

    fn run(ctx: &CommandContext, options: Self::Options) -> NavauditResult<()> {
        let config = ctx.config();
        let outcome = scan_corpus(&config.scan_options(ctx.root()))?;
        let report = audit(&outcome, &config.validation_policy());

        for line in render_text_report(&report) {
            println!("{line}");
        }

        if let Some(output) = &options.report {
            let value = json_report(ctx.root(), ctx.config_source(), &report);
            let body = serde_json::to_string_pretty(&value).map_err(|err| {
                NavauditError::io(format!("failed to serialize report: {err}"))
                    .with_operation("write audit report")
            })?;
            write_text_file(output, &format!("{body}\n"))?;
            println!("Wrote audit report: {}", output.display());
        }

        check_outcome(&report, options.warnings_ok)
    }
}

/// Human-readable report lines, in print order.
pub fn render_text_report(report: &AuditReport) -> Vec<String> {
    let mut lines = vec![
        format!("Scanned {} Markdown files.", report.scanned),
        String::new(),
        "Root module order:".to_string(),
    ];
    lines.extend(report.root_order.iter().map(ToString::to_string));
    lines.push(String::new());

    if report.is_clean() {
        lines.push("[OK] No hierarchy issues found.".to_string());
    } else {
        lines.push(format!("[FAIL] {} issue(s) found:", report.findings.len()));
        lines.extend(report.findings.iter().map(ToString::to_string));
    }

    if !report.failures.is_empty() {
        lines.push(String::new());
        lines.push(format!("Unreadable ({}):", report.failures.len()));
        lines.extend(
            report
                .failures
                .iter()
                .map(|failure| format!("  {}: {}", failure.path, failure.message)),
        );
    }
    lines
}

/// JSON audit report body. `config` is the file the settings came from, if any.
pub fn json_report(root: &Path, config: Option<&Path>, report: &AuditReport) -> Value {
    json!({
        "generated_at": Utc::now().to_rfc3339_opts(SecondsFormat::Secs, true),
        "root": root.display().to_string(),
        "config": config.map(|path| path.display().to_string()),
        "document_count": report.scanned,
        "clean": report.is_clean(),
        "finding_counts": report.counts_by_kind(),
        "severity_counts": {
            "error": report.count(Severity::Error),
            "warning": report.count(Severity::Warning),
        },
        "root_order": report.root_order,
        "findings": report.findings,
        "unreadable": report.failures,
    })
}

/// Map an audit report onto the command result.
///
/// Any finding fails the run; with `warnings_ok` only errors do. Unreadable documents always
/// fail because their hierarchy edges were never checked.
fn check_outcome(report: &AuditReport, warnings_ok: bool) -> NavauditResult<()> {
    let failing = if warnings_ok {
        report.count(Severity::Error)
    } else {
        report.findings.len()
    };
    if failing > 0 {
        return Err(NavauditError::findings(format!(
            "hierarchy audit failed: {failing} issue(s)"
        )));
    }
    if !report.failures.is_empty() {
        return Err(NavauditError::findings(format!(
            "{} document(s) could not be read",
            report.failures.len()
        ))
        .with_hint("rerun with --verbose for details"));
    }
    Ok(())
}

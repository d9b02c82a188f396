//! `navaudit correct`: apply a plan of targeted header edits.

pub mod plan;

use crate::cli::CorrectArgs;
use crate::runtime::context::CommandContext;
use crate::runtime::error::{NavauditError, NavauditResult};
use crate::NavCommand;
use nav_hierarchy::{apply_corrections, CorrectionOutcome, CorrectionStatus};

/// `navaudit correct`
pub struct CorrectCommand;

impl NavCommand for CorrectCommand {
    type Options = CorrectArgs;

    fn run(ctx: &CommandContext, options: Self::Options) -> NavauditResult<()> {
        let corrections = plan::load_plan(&options.plan)?;
        tracing::info!(
            plan = %options.plan.display(),
            entries = corrections.len(),
            dry_run = options.dry_run,
            "applying corrections"
        );
        let outcomes = apply_corrections(ctx.root(), &corrections, options.dry_run);
        report_outcomes(&outcomes, options.dry_run)
    }
}

/// Print outcome lines and fail when any correction hit an I/O error.
///
/// Shared with `renumber`, which applies its plan through the same corrector.
pub(crate) fn report_outcomes(outcomes: &[CorrectionOutcome], dry_run: bool) -> NavauditResult<()> {
    for line in render_outcomes(outcomes, dry_run) {
        println!("{line}");
    }
    let failed = outcomes.iter().filter(|o| o.is_failure()).count();
    if failed > 0 {
        return Err(NavauditError::findings(format!(
            "{failed} correction(s) could not be applied"
        )));
    }
    Ok(())
}

/// One line per outcome, notes for undeclared fields, then a summary.
pub fn render_outcomes(outcomes: &[CorrectionOutcome], dry_run: bool) -> Vec<String> {
    let applied_label = if dry_run { "Would fix" } else { "Fixed" };
    let mut lines = Vec::with_capacity(outcomes.len() + 1);
    let (mut applied, mut unchanged, mut skipped, mut failed) = (0, 0, 0, 0);

    for outcome in outcomes {
        match &outcome.status {
            CorrectionStatus::Applied { fields } => {
                applied += 1;
                lines.push(format!(
                    "{applied_label}: {} ({})",
                    outcome.path,
                    fields.join(", ")
                ));
            }
            CorrectionStatus::Unchanged => {
                unchanged += 1;
                lines.push(format!("Unchanged: {}", outcome.path));
            }
            CorrectionStatus::NotFound => {
                skipped += 1;
                lines.push(format!("Skipping {} (not found)", outcome.path));
            }
            CorrectionStatus::Failed { message } => {
                failed += 1;
                lines.push(format!("Error updating {}: {message}", outcome.path));
            }
        }
        if !outcome.missing_fields.is_empty() {
            lines.push(format!(
                "  note: {} does not declare {}; nothing inserted",
                outcome.path,
                outcome.missing_fields.join(", ")
            ));
        }
    }

    let applied_word = if dry_run { "would fix" } else { "fixed" };
    lines.push(format!(
        "{applied} {applied_word}, {unchanged} unchanged, {skipped} skipped, {failed} failed"
    ));
    lines
}

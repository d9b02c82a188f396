//! `navaudit renumber`: order top-level sections by their directory number.

use crate::cli::RenumberArgs;
use crate::commands::correct::report_outcomes;
use crate::runtime::context::CommandContext;
use crate::runtime::error::NavauditResult;
use crate::NavCommand;
use nav_hierarchy::{apply_corrections, plan_renumbering};

/// `navaudit renumber`
pub struct RenumberCommand;

impl NavCommand for RenumberCommand {
    type Options = RenumberArgs;

    fn run(ctx: &CommandContext, options: Self::Options) -> NavauditResult<()> {
        let config = ctx.config();
        let corrections = plan_renumbering(&config.scan_options(ctx.root()), &config.renumber)?;
        tracing::info!(sections = corrections.len(), "planned renumbering");
        let outcomes = apply_corrections(ctx.root(), &corrections, options.dry_run);
        report_outcomes(&outcomes, options.dry_run)
    }
}

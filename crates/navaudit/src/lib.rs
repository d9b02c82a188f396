//! `navaudit`: audit and correct the navigation hierarchy of a Markdown tree.
//!
//! The crate is a small CLI layer over [`nav_hierarchy`]. Command modules own presentation and
//! exit policy while [`runtime`] owns configuration, error shaping, and filesystem helpers.

pub mod cli;
pub mod commands;
pub mod runtime;

use crate::cli::{Cli, Command};
use crate::commands::audit::AuditCommand;
use crate::commands::correct::CorrectCommand;
use crate::commands::renumber::RenumberCommand;
use crate::runtime::context::CommandContext;
use crate::runtime::error::NavauditResult;
use tracing_subscriber::EnvFilter;

/// Shared command contract for `navaudit` subcommands.
///
/// Options arrive already parsed by clap; [`NavCommand::run`] holds every side effect.
pub trait NavCommand {
    /// Typed options for the command.
    type Options;

    /// Execute the command against the shared context.
    fn run(ctx: &CommandContext, options: Self::Options) -> NavauditResult<()>;
}

/// Build the command context and dispatch to the selected command.
pub fn execute(cli: Cli) -> NavauditResult<()> {
    let ctx = CommandContext::new(&cli.root, cli.config.as_deref())?;
    tracing::debug!(root = %ctx.root().display(), "resolved corpus root");

    match cli.command {
        Command::Audit(args) => AuditCommand::run(&ctx, args),
        Command::Correct(args) => CorrectCommand::run(&ctx, args),
        Command::Renumber(args) => RenumberCommand::run(&ctx, args),
    }
}

/// Converts a command result into a stable process exit code.
///
/// All failures map to exit code `1` after printing the formatted error to stderr.
pub fn exit_code(result: NavauditResult<()>) -> std::process::ExitCode {
    match result {
        Ok(()) => std::process::ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("error: {err}");
            std::process::ExitCode::from(1)
        }
    }
}

/// Install the stderr log subscriber.
///
/// `RUST_LOG` wins when set; otherwise `--verbose` selects `debug` and the default is `warn`.
pub fn init_logging(verbose: bool) {
    let fallback = if verbose { "debug" } else { "warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(fallback));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();
}

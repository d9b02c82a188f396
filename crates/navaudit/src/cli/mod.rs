//! Command-line surface for `navaudit`.
//!
//! Parsing only produces typed options; every side effect lives in [`crate::commands`].

use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

/// Root CLI entrypoint.
#[derive(Parser, Debug)]
#[command(
    name = "navaudit",
    version,
    about = "Audit and correct Markdown front matter navigation hierarchies",
    after_help = "Examples:\n  navaudit --root docs audit\n  navaudit audit --report target/nav-audit.json --warnings-ok\n  navaudit correct --plan fixes.toml --dry-run\n  navaudit renumber",
    subcommand_required = true,
    arg_required_else_help = true
)]
pub struct Cli {
    /// Root directory of the Markdown tree
    #[arg(long, global = true, env = "NAVAUDIT_ROOT", default_value = ".", value_name = "DIR")]
    pub root: PathBuf,

    /// Configuration file (defaults to `<root>/navaudit.toml` when present)
    #[arg(long, global = true, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Log debug detail to stderr
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Command,
}

/// Top-level commands.
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Scan the tree and report hierarchy findings
    Audit(AuditArgs),
    /// Apply a plan of targeted front matter edits
    Correct(CorrectArgs),
    /// Derive section `nav_order` values from numbered directory names
    Renumber(RenumberArgs),
}

/// `audit` options.
#[derive(Args, Debug, Clone, Default)]
pub struct AuditArgs {
    /// Also write a JSON report to this path
    #[arg(long, value_name = "FILE")]
    pub report: Option<PathBuf>,

    /// Exit successfully when only warnings are found
    #[arg(long)]
    pub warnings_ok: bool,
}

/// `correct` options.
#[derive(Args, Debug, Clone)]
pub struct CorrectArgs {
    /// Corrections plan (TOML, or YAML for `.yaml`/`.yml`)
    #[arg(long, value_name = "FILE")]
    pub plan: PathBuf,

    /// Report what would change without writing
    #[arg(long)]
    pub dry_run: bool,
}

/// `renumber` options.
#[derive(Args, Debug, Clone, Default)]
pub struct RenumberArgs {
    /// Report what would change without writing
    #[arg(long)]
    pub dry_run: bool,
}

//! CLI argument parsing for agents-setup.
//!
//! Uses clap derive macros for declarative argument definitions.
//! Option resolution (config file, defaults, validation) happens in the
//! `commands` module.

use clap::Parser;
use std::path::PathBuf;

/// Install AGENTS.md instruction templates into a repository.
///
/// Copies AGENTS.md, APP.md, PLANS.md, a language guide (LANGUAGE.md) and a
/// workflow guide (WORKFLOW.md) into the target directory, filling `{{KEY}}`
/// placeholders from inferred and explicit values. Existing files are kept
/// unless `--force` is given.
#[derive(Parser, Debug)]
#[command(name = "agents-setup")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Target repository directory (defaults to the current directory with --infer-only).
    #[arg(long, value_name = "PATH")]
    pub target: Option<PathBuf>,

    /// Language guide to install: go, python.
    #[arg(long, value_name = "LANGUAGE")]
    pub language: Option<String>,

    /// Workflow guide to install: linear, beads, github, markdown, template.
    #[arg(long, value_name = "WORKFLOW")]
    pub workflow: Option<String>,

    /// Replace placeholder {{KEY}} with VALUE (repeatable).
    #[arg(long = "set", value_name = "KEY=VALUE")]
    pub set: Vec<String>,

    /// Leave a destination untouched, e.g. APP.md or plans (repeatable).
    #[arg(long, value_name = "DEST")]
    pub skip: Vec<String>,

    /// Print inferred placeholder values and exit without writing.
    #[arg(long, conflicts_with_all = ["force", "dry_run"])]
    pub infer_only: bool,

    /// Do not infer values from the target; use only config values and --set.
    #[arg(long)]
    pub no_infer: bool,

    /// Overwrite destination files that already exist.
    #[arg(long)]
    pub force: bool,

    /// Print planned actions without writing files.
    #[arg(long)]
    pub dry_run: bool,

    /// Template repository owner (provenance only).
    #[arg(long)]
    pub owner: Option<String>,

    /// Template repository name (provenance only).
    #[arg(long)]
    pub repo: Option<String>,

    /// Template repository ref (provenance only).
    #[arg(long = "ref", value_name = "REF")]
    pub git_ref: Option<String>,

    /// Read templates from a local checkout instead of the built-in set.
    #[arg(long, value_name = "DIR")]
    pub templates_dir: Option<PathBuf>,

    /// Config file (defaults to <target>/.agents-setup.yaml when present).
    #[arg(long, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Print the report as JSON.
    #[arg(long)]
    pub json: bool,

    /// Enable debug logging on stderr.
    #[arg(short, long)]
    pub verbose: bool,

    /// Log level or filter directive (e.g. info, agents_setup=trace).
    #[arg(long, value_name = "LEVEL")]
    pub log_level: Option<String>,

    /// Emit logs as JSON lines.
    #[arg(long)]
    pub log_json: bool,
}

impl Cli {
    /// Parse command-line arguments.
    pub fn parse_args() -> Self {
        Cli::parse()
    }
}

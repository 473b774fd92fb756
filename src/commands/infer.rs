//! Implementation of `--infer-only`.
//!
//! Prints the values a run would use for the core template and where each
//! one came from. Nothing is written.

use super::options::RunOptions;
use super::report;
use crate::cli::Cli;
use crate::error::Result;
use crate::placeholder::{PlaceholderMap, scan_tokens};
use crate::source::MANDATORY_SOURCE;
use serde::Serialize;
use std::path::PathBuf;

/// Result of an inference-only run.
#[derive(Debug, Serialize)]
pub(super) struct InferReport {
    pub target: PathBuf,
    pub core_tokens: Vec<String>,
    pub values: PlaceholderMap,
    pub missing: Vec<String>,
}

pub(super) fn build_report(options: &RunOptions) -> Result<InferReport> {
    let template = options.store.load(MANDATORY_SOURCE)?;
    let core_tokens = scan_tokens(&template);
    let missing = report::missing_keys(&core_tokens, &options.values);

    Ok(InferReport {
        target: options.target.clone(),
        core_tokens,
        values: options.values.clone(),
        missing,
    })
}

pub(super) fn render_text(report: &InferReport) -> String {
    let mut out = String::new();
    report::placeholder_plan(&mut out, &report.core_tokens, &report.values);
    out.push('\n');
    report::proposed_values(&mut out, &report.values);

    if !report.missing.is_empty() {
        out.push_str("\nMissing AGENTS.md placeholders:\n");
        for key in &report.missing {
            out.push_str(&format!("- {}\n", key));
        }
    }
    out
}

/// Execute `--infer-only`.
pub fn cmd_infer(cli: &Cli) -> Result<()> {
    let options = RunOptions::resolve(cli)?;
    let report = build_report(&options)?;

    if cli.json {
        println!("{}", report::to_json(&report)?);
    } else {
        print!("{}", render_text(&report));
    }
    Ok(())
}

//! Implementation of the default install mode (and `--dry-run`).

use super::options::RunOptions;
use super::report;
use crate::cli::Cli;
use crate::error::{Result, SetupError};
use crate::install::{InstallRequest, InstallResult, install};

pub(super) fn build_request(cli: &Cli, options: RunOptions) -> Result<InstallRequest> {
    let language = options.language.ok_or_else(|| {
        SetupError::ConfigError(
            "--language is required (go, python); set it on the command line or in the config file"
                .to_string(),
        )
    })?;
    let workflow = options.workflow.ok_or_else(|| {
        SetupError::ConfigError(
            "--workflow is required (linear, beads, github, markdown, template); set it on the command line or in the config file"
                .to_string(),
        )
    })?;

    Ok(InstallRequest {
        target: options.target,
        language,
        workflow,
        values: options.values,
        skip: options.skip,
        force: cli.force,
        dry_run: cli.dry_run,
        store: options.store,
        source: options.source,
    })
}

pub(super) fn run(cli: &Cli) -> Result<InstallResult> {
    let options = RunOptions::resolve(cli)?;
    let request = build_request(cli, options)?;

    tracing::info!(
        target_dir = %request.target.display(),
        language = %request.language,
        workflow = %request.workflow,
        dry_run = request.dry_run,
        force = request.force,
        "installing templates"
    );
    install(&request)
}

/// Execute an install (or dry run).
pub fn cmd_install(cli: &Cli) -> Result<()> {
    let result = run(cli)?;

    if cli.json {
        println!("{}", report::to_json(&result)?);
    } else {
        print!("{}", report::install_text(&result));
    }
    Ok(())
}

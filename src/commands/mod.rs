//! Command implementations for agents-setup.
//!
//! This module provides the dispatcher that routes a parsed command line to
//! the inference-only report or the install pass.

mod infer;
mod install;
mod options;
mod report;


use crate::cli::Cli;
use crate::error::Result;

/// Dispatch a parsed command line to its implementation.
pub fn dispatch(cli: &Cli) -> Result<()> {
    if cli.infer_only {
        infer::cmd_infer(cli)
    } else {
        install::cmd_install(cli)
    }
}

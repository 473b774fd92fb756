//! Read-only inference of placeholder values from a target repository.
//!
//! Inference is best effort. Missing, unreadable, or malformed files are
//! skipped (logged at debug level) and never fail the run. Every value is
//! tagged with the file it came from.
//!
//! Order of precedence, highest first:
//! 1. Ticket identifiers from `plans/` and the git branch.
//! 2. Values recovered from an existing `AGENTS.md`.
//! 3. Project files (`APP.md`, manifests, build files).
//! 4. Defaults implied by the chosen language/workflow.

mod agents;
mod ids;
mod manifest;


use crate::placeholder::{PlaceholderMap, ValueOrigin};
use crate::source::{Language, Workflow};
use regex::Regex;
use std::fs;
use std::path::Path;
use std::sync::LazyLock;

/// Ticket identifier such as `ABC-123`.
pub(crate) static TICKET_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\b([A-Z][A-Z0-9]+-\d+)\b").expect("valid ticket regex"));

/// Language/workflow choices that seed fallback values.
#[derive(Debug, Clone, Copy, Default)]
pub struct Choices {
    pub language: Option<Language>,
    pub workflow: Option<Workflow>,
}

/// Infer placeholder values for `target`.
pub fn infer(target: &Path, choices: Choices) -> PlaceholderMap {
    let mut values = agents::from_existing_agents(target);

    if let Some((name, from)) = manifest::app_name(target) {
        values.insert_default("APP_NAME", name, inferred(from));
    }
    if let Some((name, from)) = manifest::language_name(target, choices.language) {
        values.insert_default("LANGUAGE_NAME", name, inferred(from));
    }
    if let Some((name, from)) = manifest::tracker_name(target, choices.workflow) {
        values.insert_default("TRACKER_NAME", name, inferred(from));
    }
    if let Some((command, from)) = manifest::test_command(target, choices.language) {
        values.insert_default("TEST_COMMAND", command, inferred(from));
    }

    values.layer(ids::ticket_ids(target));

    for (key, placeholder) in values.iter() {
        tracing::debug!(key, value = %placeholder.value, origin = ?placeholder.origin, "inferred");
    }
    values
}

pub(crate) fn inferred(from: impl Into<String>) -> ValueOrigin {
    ValueOrigin::Inferred(from.into())
}

/// Read a UTF-8 file under `target`, or `None` if it is absent or unreadable.
pub(crate) fn read_text(target: &Path, name: &str) -> Option<String> {
    let path = target.join(name);
    if !path.is_file() {
        return None;
    }
    match fs::read_to_string(&path) {
        Ok(text) => Some(text),
        Err(e) => {
            tracing::debug!(path = %path.display(), error = %e, "skipping unreadable file");
            None
        }
    }
}

/// Trimmed capture usable as a value: non-empty and not itself a placeholder.
pub(crate) fn usable(candidate: &str) -> Option<String> {
    let candidate = candidate.trim();
    if candidate.is_empty() || candidate.contains("{{") {
        None
    } else {
        Some(candidate.to_string())
    }
}

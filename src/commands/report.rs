//! Human-readable and JSON reports.

use crate::error::{Result, SetupError};
use crate::install::{EntryKind, EntryResult, InstallResult, PlannedAction};
use crate::placeholder::PlaceholderMap;
use serde::Serialize;

/// Serialize a report as pretty JSON.
pub(super) fn to_json<T: Serialize>(report: &T) -> Result<String> {
    serde_json::to_string_pretty(report)
        .map_err(|e| SetupError::IoError(format!("failed to serialize report: {}", e)))
}

/// Core keys without a usable value.
pub(super) fn missing_keys(core_tokens: &[String], values: &PlaceholderMap) -> Vec<String> {
    core_tokens
        .iter()
        .filter(|key| values.resolve(key).is_none())
        .cloned()
        .collect()
}

/// The `AGENTS.md placeholder plan:` block.
pub(super) fn placeholder_plan(out: &mut String, core_tokens: &[String], values: &PlaceholderMap) {
    out.push_str("AGENTS.md placeholder plan:\n");
    for key in core_tokens {
        match values.resolve(key) {
            Some(value) => out.push_str(&format!("- {} = {}\n", key, value.trim())),
            None => out.push_str(&format!("- {} = <MISSING>\n", key)),
        }
    }
}

/// Every proposed value with where it came from.
pub(super) fn proposed_values(out: &mut String, values: &PlaceholderMap) {
    out.push_str("Proposed values:\n");
    if values.is_empty() {
        out.push_str("  (none)\n");
    }
    for (key, placeholder) in values.iter() {
        out.push_str(&format!(
            "- {} = {} ({})\n",
            key, placeholder.value, placeholder.origin
        ));
    }
}

pub(super) fn install_text(result: &InstallResult) -> String {
    let mut out = String::new();

    placeholder_plan(&mut out, &result.core_tokens, &result.values);
    out.push('\n');
    out.push_str(&format!(
        "Source: {} (templates: {})\n",
        result.source.label(),
        result.templates
    ));
    if result.dry_run {
        out.push_str(&format!("[DRY RUN] Target: {}\n", result.target.display()));
    }

    for entry in &result.entries {
        out.push_str(&entry_line(entry, result.dry_run));
        out.push('\n');
    }

    out.push('\n');
    if result.unresolved.is_empty() {
        out.push_str("All detected placeholders were filled in all written files.\n");
    } else {
        out.push_str("Unresolved placeholders in non-AGENTS files:\n");
        for (file, keys) in &result.unresolved {
            let tokens: Vec<String> = keys.iter().map(|k| format!("{{{{{}}}}}", k)).collect();
            out.push_str(&format!("- {}: {}\n", file, tokens.join(", ")));
        }
    }

    out
}

fn entry_line(result: &EntryResult, dry_run: bool) -> String {
    let entry = &result.entry;
    let path = entry.path.display();
    match (entry.kind, entry.action, dry_run) {
        (_, PlannedAction::SkipRequested, _) => format!("[SKIP] Skipped by request: {}", path),
        (EntryKind::Directory, PlannedAction::SkipExisting, _) => {
            format!("[OK] Directory exists: {}", path)
        }
        (EntryKind::Directory, _, true) => {
            format!("[DRY RUN] Would ensure directory exists: {}", path)
        }
        (EntryKind::Directory, _, false) => format!("[OK] Ensured directory exists: {}", path),
        (EntryKind::File, PlannedAction::SkipExisting, _) => {
            format!("[SKIP] Exists (use --force to overwrite): {}", path)
        }
        (EntryKind::File, PlannedAction::Create, true) => {
            format!("[DRY RUN] Would create: {}", path)
        }
        (EntryKind::File, PlannedAction::Overwrite, true) => {
            format!("[DRY RUN] Would overwrite: {}", path)
        }
        (EntryKind::File, _, false) => format!("[OK] Wrote: {}", path),
    }
}

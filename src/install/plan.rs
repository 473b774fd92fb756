//! Plan construction and mandatory-file validation.

use super::{EntryKind, InstallPlan, InstallRequest, PlanEntry, PlannedAction};
use crate::error::{Result, SetupError};
use crate::placeholder::scan_tokens;
use crate::source::{
    MANDATORY_FILE, MANDATORY_SOURCE, PLANS_DIR, TemplateStore, catalogue, destination_names,
};
use std::path::Path;

pub(super) fn build(request: &InstallRequest) -> Result<InstallPlan> {
    if !request.target.is_dir() {
        return Err(SetupError::ConfigError(format!(
            "target directory does not exist: {}",
            request.target.display()
        )));
    }
    validate_skip(request)?;

    let mut entries = Vec::new();
    for spec in catalogue(request.language, request.workflow) {
        let template = request.store.load(spec.source_path)?;
        let rendered = request.values.render(&template);
        // Values are not re-expanded, but a token they carry still ends up on disk.
        let unresolved = scan_tokens(&rendered.content);
        let path = request.target.join(spec.destination);
        let action = file_action(&path, spec.destination, request);

        tracing::debug!(
            destination = spec.destination,
            action = ?action,
            unresolved = unresolved.len(),
            "planned file"
        );

        entries.push(PlanEntry {
            destination: spec.destination.to_string(),
            path,
            kind: EntryKind::File,
            action,
            mandatory: spec.mandatory,
            source_url: Some(request.source.url_for(spec.source_path)),
            unresolved,
            content: rendered.content,
        });
    }

    let plans_path = request.target.join(PLANS_DIR);
    entries.push(PlanEntry {
        destination: PLANS_DIR.to_string(),
        action: plans_action(&plans_path, request)?,
        path: plans_path,
        kind: EntryKind::Directory,
        mandatory: false,
        source_url: None,
        unresolved: Vec::new(),
        content: String::new(),
    });

    Ok(InstallPlan {
        language: request.language,
        workflow: request.workflow,
        entries,
    })
}

/// Fail if the mandatory file would be written with placeholders left in it.
pub(super) fn validate_mandatory(plan: &InstallPlan) -> Result<()> {
    let Some(entry) = plan.mandatory() else {
        return Ok(());
    };
    if !entry.action.writes() || entry.unresolved.is_empty() {
        return Ok(());
    }

    let tokens: Vec<String> = entry
        .unresolved
        .iter()
        .map(|key| format!("{{{{{}}}}}", key))
        .collect();
    Err(SetupError::ValidationError(format!(
        "{} still has unresolved placeholders after replacement: {}. Provide them with --set KEY=VALUE.",
        MANDATORY_FILE,
        tokens.join(", ")
    )))
}

/// Keys referenced by the mandatory template.
pub(super) fn core_tokens(store: &TemplateStore) -> Result<Vec<String>> {
    let template = store.load(MANDATORY_SOURCE)?;
    Ok(scan_tokens(&template))
}

fn validate_skip(request: &InstallRequest) -> Result<()> {
    let known = destination_names();
    for name in &request.skip {
        if !known.contains(&name.as_str()) {
            return Err(SetupError::ConfigError(format!(
                "unknown --skip destination '{}' (expected one of: {})",
                name,
                known.join(", ")
            )));
        }
    }
    Ok(())
}

fn file_action(path: &Path, destination: &str, request: &InstallRequest) -> PlannedAction {
    if request.skip.contains(destination) {
        PlannedAction::SkipRequested
    } else if path.symlink_metadata().is_ok() {
        if request.force {
            PlannedAction::Overwrite
        } else {
            PlannedAction::SkipExisting
        }
    } else {
        PlannedAction::Create
    }
}

fn plans_action(path: &Path, request: &InstallRequest) -> Result<PlannedAction> {
    if request.skip.contains(PLANS_DIR) {
        return Ok(PlannedAction::SkipRequested);
    }
    if path.is_dir() {
        return Ok(PlannedAction::SkipExisting);
    }
    if path.symlink_metadata().is_ok() {
        return Err(SetupError::IoError(format!(
            "'{}' exists and is not a directory",
            path.display()
        )));
    }
    Ok(PlannedAction::Create)
}

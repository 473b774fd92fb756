//! Carry out a validated plan.

use super::{EntryKind, EntryResult, InstallPlan, InstallRequest, InstallResult, PlanEntry};
use crate::error::Result;
use crate::fs::{FileWrite, commit_all};
use std::collections::BTreeMap;

pub(super) fn run(
    request: &InstallRequest,
    plan: InstallPlan,
    core_tokens: Vec<String>,
) -> Result<InstallResult> {
    if request.dry_run {
        tracing::info!(target_dir = %request.target.display(), "dry run, nothing written");
    } else {
        commit(&plan)?;
    }

    let mut unresolved = BTreeMap::new();
    let mut mandatory_unresolved = Vec::new();
    for entry in plan.entries.iter().filter(|e| e.action.writes()) {
        if entry.mandatory {
            mandatory_unresolved = entry.unresolved.clone();
        } else if !entry.unresolved.is_empty() {
            unresolved.insert(entry.destination.clone(), entry.unresolved.clone());
        }
    }

    let entries = plan
        .entries
        .into_iter()
        .map(|entry| EntryResult {
            outcome: entry.action.outcome(),
            entry,
        })
        .collect();

    Ok(InstallResult {
        target: request.target.clone(),
        dry_run: request.dry_run,
        language: plan.language,
        workflow: plan.workflow,
        source: request.source.clone(),
        templates: request.store.describe(),
        core_tokens,
        values: request.values.clone(),
        entries,
        unresolved,
        mandatory_unresolved,
    })
}

fn commit(plan: &InstallPlan) -> Result<()> {
    let dirs: Vec<_> = writes(plan, EntryKind::Directory)
        .map(|e| e.path.clone())
        .collect();
    let files: Vec<FileWrite> = writes(plan, EntryKind::File)
        .map(|e| FileWrite {
            path: e.path.clone(),
            content: e.content.clone(),
        })
        .collect();

    if dirs.is_empty() && files.is_empty() {
        tracing::info!("nothing to write");
        return Ok(());
    }

    let summary = commit_all(&dirs, &files)?;
    for path in &summary.written {
        tracing::info!(path = %path.display(), "wrote file");
    }
    for dir in &summary.created_dirs {
        tracing::info!(path = %dir.display(), "created directory");
    }
    Ok(())
}

fn writes(plan: &InstallPlan, kind: EntryKind) -> impl Iterator<Item = &PlanEntry> {
    plan.entries
        .iter()
        .filter(move |e| e.kind == kind && e.action.writes())
}

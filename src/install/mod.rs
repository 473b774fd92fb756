//! The install pass: plan, validate, then commit or report.
//!
//! Planning is pure apart from reading templates and checking which
//! destinations exist. Nothing under the target changes until the plan has
//! passed validation, and a real run then commits every file or none.

mod execute;
mod plan;


use crate::error::Result;
use crate::placeholder::{PlaceholderMap, ValueOrigin};
use crate::source::{Language, TemplateSource, TemplateStore, Workflow};
use serde::Serialize;
use std::collections::{BTreeMap, BTreeSet};
use std::path::PathBuf;

/// Everything an install run needs, already resolved from flags and config.
#[derive(Debug, Clone)]
pub struct InstallRequest {
    pub target: PathBuf,
    pub language: Language,
    pub workflow: Workflow,
    /// Final, layered placeholder values.
    pub values: PlaceholderMap,
    /// Destination names to leave untouched.
    pub skip: BTreeSet<String>,
    pub force: bool,
    pub dry_run: bool,
    pub store: TemplateStore,
    pub source: TemplateSource,
}

/// What an entry puts on disk.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum EntryKind {
    File,
    Directory,
}

/// Decision for one destination.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum PlannedAction {
    Create,
    Overwrite,
    SkipExisting,
    SkipRequested,
}

impl PlannedAction {
    /// Whether the destination is written (or created) by this action.
    pub fn writes(self) -> bool {
        matches!(self, Self::Create | Self::Overwrite)
    }

    pub fn outcome(self) -> Outcome {
        match self {
            Self::Create | Self::Overwrite => Outcome::Written,
            Self::SkipExisting => Outcome::SkippedExisting,
            Self::SkipRequested => Outcome::SkippedByRequest,
        }
    }
}

/// Per-destination result of a run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum Outcome {
    Written,
    SkippedExisting,
    SkippedByRequest,
}

/// One destination in the plan.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PlanEntry {
    /// Canonical destination name (`AGENTS.md`, `plans`, ...).
    pub destination: String,
    pub path: PathBuf,
    pub kind: EntryKind,
    pub action: PlannedAction,
    pub mandatory: bool,
    /// Provenance URL of the template, for files.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub source_url: Option<String>,
    /// Keys left unresolved in the rendered content.
    pub unresolved: Vec<String>,
    #[serde(skip)]
    pub content: String,
}

/// The ordered plan for one run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InstallPlan {
    pub language: Language,
    pub workflow: Workflow,
    pub entries: Vec<PlanEntry>,
}

impl InstallPlan {
    pub fn mandatory(&self) -> Option<&PlanEntry> {
        self.entries.iter().find(|e| e.mandatory)
    }
}

/// A plan entry together with its outcome.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct EntryResult {
    #[serde(flatten)]
    pub entry: PlanEntry,
    pub outcome: Outcome,
}

/// Report of an install run (or what a dry run would have done).
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct InstallResult {
    pub target: PathBuf,
    pub dry_run: bool,
    pub language: Language,
    pub workflow: Workflow,
    pub source: TemplateSource,
    pub templates: String,
    /// Keys referenced by the mandatory template, in order of the plan block.
    pub core_tokens: Vec<String>,
    pub values: PlaceholderMap,
    pub entries: Vec<EntryResult>,
    /// Unresolved keys per written non-mandatory file.
    pub unresolved: BTreeMap<String, Vec<String>>,
    /// Unresolved keys in the mandatory file; empty whenever a run succeeds.
    pub mandatory_unresolved: Vec<String>,
}

/// Layer placeholder values: inferred < config file < explicit `--set`.
pub fn layer_values(
    inferred: PlaceholderMap,
    config: &BTreeMap<String, String>,
    explicit: PlaceholderMap,
) -> PlaceholderMap {
    let mut values = inferred;
    values.layer(PlaceholderMap::from_values(
        config.iter().map(|(k, v)| (k.trim(), v.as_str())),
        ValueOrigin::Config,
    ));
    values.layer(explicit);
    values
}

/// Plan, validate, and then commit (or only report, for a dry run).
pub fn install(request: &InstallRequest) -> Result<InstallResult> {
    let plan = plan::build(request)?;
    plan::validate_mandatory(&plan)?;
    let core_tokens = plan::core_tokens(&request.store)?;
    execute::run(request, plan, core_tokens)
}

//! Resolve command-line flags and the config file into run options.
//!
//! Flags win over the config file; the config file wins over built-in
//! defaults. Every check here happens before anything is read from or
//! written to the target beyond the config file itself.

use crate::cli::Cli;
use crate::config::SetupConfig;
use crate::error::{Result, SetupError};
use crate::infer::{self, Choices};
use crate::install::layer_values;
use crate::placeholder::{PlaceholderMap, parse_assignments};
use crate::source::{Language, TemplateSource, TemplateStore, Workflow};
use std::collections::BTreeSet;
use std::path::{Path, PathBuf};

/// Options shared by every mode.
#[derive(Debug)]
pub(super) struct RunOptions {
    pub target: PathBuf,
    pub language: Option<Language>,
    pub workflow: Option<Workflow>,
    pub values: PlaceholderMap,
    pub skip: BTreeSet<String>,
    pub store: TemplateStore,
    pub source: TemplateSource,
}

impl RunOptions {
    pub fn resolve(cli: &Cli) -> Result<Self> {
        let target = resolve_target(cli.target.as_deref(), cli.infer_only)?;
        let config = SetupConfig::discover(&target, cli.config.as_deref())?;

        let language = match cli.language.as_deref() {
            Some(name) => Some(Language::parse(name)?),
            None => config.language()?,
        };
        let workflow = match cli.workflow.as_deref() {
            Some(name) => Some(Workflow::parse(name)?),
            None => config.workflow()?,
        };
        let explicit = parse_assignments(&cli.set)?;

        let templates_dir = cli.templates_dir.as_deref().or(config.templates_dir.as_deref());
        let store = TemplateStore::from_dir(templates_dir)?;

        let defaults = TemplateSource::default();
        let source = TemplateSource {
            owner: pick(&cli.owner, &config.owner, defaults.owner),
            repo: pick(&cli.repo, &config.repo, defaults.repo),
            git_ref: pick(&cli.git_ref, &config.git_ref, defaults.git_ref),
        };

        let skip = cli.skip.iter().chain(&config.skip).cloned().collect();

        let inferred = if cli.no_infer {
            PlaceholderMap::new()
        } else {
            infer::infer(&target, Choices { language, workflow })
        };
        let values = layer_values(inferred, &config.values, explicit);

        Ok(Self {
            target,
            language,
            workflow,
            values,
            skip,
            store,
            source,
        })
    }
}

/// The target directory, canonicalized.
///
/// Write modes require `--target`; `--infer-only` falls back to the current
/// directory.
fn resolve_target(target: Option<&Path>, infer_only: bool) -> Result<PathBuf> {
    let target = match target {
        Some(path) => path.to_path_buf(),
        None if infer_only => std::env::current_dir().map_err(|e| {
            SetupError::ConfigError(format!("failed to determine current directory: {}", e))
        })?,
        None => {
            return Err(SetupError::ConfigError(
                "--target is required to install templates (use --infer-only to inspect the current directory)"
                    .to_string(),
            ));
        }
    };

    if !target.is_dir() {
        return Err(SetupError::ConfigError(format!(
            "target directory does not exist: {}",
            target.display()
        )));
    }

    target.canonicalize().map_err(|e| {
        SetupError::ConfigError(format!(
            "failed to resolve target directory '{}': {}",
            target.display(),
            e
        ))
    })
}

fn pick(flag: &Option<String>, config: &Option<String>, default: String) -> String {
    flag.clone().or_else(|| config.clone()).unwrap_or(default)
}

//! Config loading, discovery, and validation.

use super::model::{CONFIG_FILE_NAME, SetupConfig};
use crate::error::{Result, SetupError};
use crate::source::{Language, Workflow, destination_names};
use std::path::{Path, PathBuf};

impl SetupConfig {
    /// Load config from a YAML file.
    ///
    /// A relative `templates_dir` is resolved against the file's directory.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();

        let content = std::fs::read_to_string(path).map_err(|e| {
            SetupError::ConfigError(format!(
                "failed to read config file '{}': {}",
                path.display(),
                e
            ))
        })?;

        let mut config = Self::from_yaml(&content).map_err(|e| {
            SetupError::ConfigError(format!("{} (in '{}')", e, path.display()))
        })?;

        if let Some(dir) = &config.templates_dir
            && dir.is_relative()
            && let Some(base) = path.parent()
        {
            config.templates_dir = Some(base.join(dir));
        }

        Ok(config)
    }

    /// Parse config from a YAML string.
    ///
    /// An empty document yields the default (empty) config.
    pub fn from_yaml(yaml: &str) -> Result<Self> {
        if yaml.trim().is_empty() {
            return Ok(Self::default());
        }

        let config: SetupConfig = serde_yaml::from_str(yaml)
            .map_err(|e| SetupError::ConfigError(format!("failed to parse config YAML: {}", e)))?;

        config.validate()?;
        Ok(config)
    }

    /// Find the config for a run.
    ///
    /// An explicit path must exist. Without one, `<target>/.agents-setup.yaml`
    /// is used when present; otherwise the default config applies.
    pub fn discover(target: &Path, explicit: Option<&Path>) -> Result<Self> {
        if let Some(path) = explicit {
            tracing::debug!(path = %path.display(), "loading config");
            return Self::load(path);
        }

        let path: PathBuf = target.join(CONFIG_FILE_NAME);
        if path.is_file() {
            tracing::debug!(path = %path.display(), "loading discovered config");
            Self::load(&path)
        } else {
            Ok(Self::default())
        }
    }

    /// Validate config values.
    ///
    /// Validation rules:
    /// - `language` and `workflow` must name a known variant
    /// - `skip` entries must name a destination the installer manages
    /// - `values` keys must be non-empty
    pub fn validate(&self) -> Result<()> {
        self.language()?;
        self.workflow()?;

        for name in &self.skip {
            if !destination_names().contains(&name.as_str()) {
                return Err(SetupError::ConfigError(format!(
                    "config validation failed: unknown skip entry '{}' (expected one of: {})",
                    name,
                    destination_names().join(", ")
                )));
            }
        }

        if self.values.keys().any(|key| key.trim().is_empty()) {
            return Err(SetupError::ConfigError(
                "config validation failed: values keys must be non-empty".to_string(),
            ));
        }

        Ok(())
    }

    /// The configured language, if any.
    pub fn language(&self) -> Result<Option<Language>> {
        self.language.as_deref().map(Language::parse).transpose()
    }

    /// The configured workflow, if any.
    pub fn workflow(&self) -> Result<Option<Workflow>> {
        self.workflow.as_deref().map(Workflow::parse).transpose()
    }
}

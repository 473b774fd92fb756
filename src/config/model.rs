//! SetupConfig struct definition.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::PathBuf;

/// Name of the config file discovered in the target directory.
pub const CONFIG_FILE_NAME: &str = ".agents-setup.yaml";

/// Defaults for an installer run.
///
/// Language and workflow are kept as strings so that invalid values are
/// reported by `validate` with the installer's own error message.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SetupConfig {
    /// Default language variant (`go`, `python`).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub language: Option<String>,

    /// Default workflow variant (`linear`, `beads`, `github`, `markdown`, `template`).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub workflow: Option<String>,

    // =========================================================================
    // Template source
    // =========================================================================
    #[serde(skip_serializing_if = "Option::is_none")]
    pub owner: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub repo: Option<String>,

    #[serde(rename = "ref", skip_serializing_if = "Option::is_none")]
    pub git_ref: Option<String>,

    /// Local template set. Relative paths resolve against the config file's directory.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub templates_dir: Option<PathBuf>,

    // =========================================================================
    // Install behavior
    // =========================================================================
    /// Destinations to leave untouched.
    pub skip: Vec<String>,

    /// Placeholder values layered above inferred values.
    pub values: BTreeMap<String, String>,
}

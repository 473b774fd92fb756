//! Template set: where templates come from and where they land.
//!
//! The installer never talks to the network. The upstream `owner/repo/ref`
//! triple is carried as provenance for reporting; template text comes either
//! from the set compiled into the binary or from a local checkout laid out
//! like the upstream repository.

mod embedded;
pub mod variant;

use crate::error::{Result, SetupError};
use serde::Serialize;
use std::fs;
use std::path::{Path, PathBuf};

pub use variant::{Language, Workflow};

/// Default upstream owner.
pub const DEFAULT_OWNER: &str = "pmenglund";

/// Default upstream repository.
pub const DEFAULT_REPO: &str = "agents";

/// Default upstream ref.
pub const DEFAULT_REF: &str = "master";

/// Destination of the mandatory core instruction file.
pub const MANDATORY_FILE: &str = "AGENTS.md";

/// Canonical destination for the selected language variant.
pub const LANGUAGE_FILE: &str = "LANGUAGE.md";

/// Canonical destination for the selected workflow variant.
pub const WORKFLOW_FILE: &str = "WORKFLOW.md";

/// Template path of the mandatory file.
pub const MANDATORY_SOURCE: &str = "_AGENTS.md";

/// Directory reserved for plan documents.
pub const PLANS_DIR: &str = "plans";

/// Upstream location of the template set.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TemplateSource {
    pub owner: String,
    pub repo: String,
    #[serde(rename = "ref")]
    pub git_ref: String,
}

impl Default for TemplateSource {
    fn default() -> Self {
        Self {
            owner: DEFAULT_OWNER.to_string(),
            repo: DEFAULT_REPO.to_string(),
            git_ref: DEFAULT_REF.to_string(),
        }
    }
}

impl TemplateSource {
    /// Raw URL of a template file, for provenance messages.
    pub fn url_for(&self, source_path: &str) -> String {
        format!(
            "https://raw.githubusercontent.com/{}/{}/{}/{}",
            self.owner, self.repo, self.git_ref, source_path
        )
    }

    /// Short `owner/repo@ref` label.
    pub fn label(&self) -> String {
        format!("{}/{}@{}", self.owner, self.repo, self.git_ref)
    }
}

/// One template artifact and its canonical destination.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TemplateSpec {
    /// Path inside the template set (e.g. `languages/GO.md`).
    pub source_path: &'static str,
    /// File name written under the target directory.
    pub destination: &'static str,
    /// Whether the rendered output must be free of placeholders.
    pub mandatory: bool,
}

impl TemplateSpec {
    const fn new(source_path: &'static str, destination: &'static str) -> Self {
        Self {
            source_path,
            destination,
            mandatory: false,
        }
    }
}

/// The fixed file set for a language/workflow selection, in install order.
pub fn catalogue(language: Language, workflow: Workflow) -> Vec<TemplateSpec> {
    vec![
        TemplateSpec {
            source_path: MANDATORY_SOURCE,
            destination: MANDATORY_FILE,
            mandatory: true,
        },
        TemplateSpec::new("APP.md", "APP.md"),
        TemplateSpec::new("PLANS.md", "PLANS.md"),
        TemplateSpec::new(language.source_path(), LANGUAGE_FILE),
        TemplateSpec::new(workflow.source_path(), WORKFLOW_FILE),
    ]
}

/// Every destination name the installer may touch, including the plans directory.
pub fn destination_names() -> [&'static str; 6] {
    [
        MANDATORY_FILE,
        "APP.md",
        "PLANS.md",
        LANGUAGE_FILE,
        WORKFLOW_FILE,
        PLANS_DIR,
    ]
}

/// Where template text is read from.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum TemplateStore {
    /// Templates compiled into the binary.
    #[default]
    Embedded,
    /// A local directory laid out like the upstream repository.
    Directory(PathBuf),
}

impl TemplateStore {
    /// Build a store from an optional local directory.
    pub fn from_dir(dir: Option<&Path>) -> Result<Self> {
        match dir {
            None => Ok(Self::Embedded),
            Some(dir) if dir.is_dir() => Ok(Self::Directory(dir.to_path_buf())),
            Some(dir) => Err(SetupError::ConfigError(format!(
                "templates directory '{}' does not exist or is not a directory",
                dir.display()
            ))),
        }
    }

    /// Load one template's text.
    pub fn load(&self, source_path: &str) -> Result<String> {
        match self {
            Self::Embedded => embedded::lookup(source_path)
                .map(str::to_string)
                .ok_or_else(|| {
                    SetupError::IoError(format!("no embedded template named '{}'", source_path))
                }),
            Self::Directory(dir) => {
                let path = dir.join(source_path);
                fs::read_to_string(&path).map_err(|e| {
                    SetupError::IoError(format!(
                        "failed to read template '{}': {}",
                        path.display(),
                        e
                    ))
                })
            }
        }
    }

    /// Short description for reports.
    pub fn describe(&self) -> String {
        match self {
            Self::Embedded => "embedded".to_string(),
            Self::Directory(dir) => dir.display().to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::placeholder::scan_tokens;
    use tempfile::TempDir;

    #[test]
    fn test_catalogue_order_and_destinations() {
        let specs = catalogue(Language::Go, Workflow::Linear);
        let destinations: Vec<_> = specs.iter().map(|s| s.destination).collect();
        assert_eq!(
            destinations,
            vec!["AGENTS.md", "APP.md", "PLANS.md", "LANGUAGE.md", "WORKFLOW.md"]
        );
        assert_eq!(specs[3].source_path, "languages/GO.md");
        assert_eq!(specs[4].source_path, "workflows/LINEAR.md");
    }

    #[test]
    fn test_only_core_file_is_mandatory() {
        let specs = catalogue(Language::Python, Workflow::Beads);
        let mandatory: Vec<_> = specs.iter().filter(|s| s.mandatory).collect();
        assert_eq!(mandatory.len(), 1);
        assert_eq!(mandatory[0].destination, MANDATORY_FILE);
    }

    #[test]
    fn test_embedded_store_has_every_variant() {
        let store = TemplateStore::Embedded;
        for language in Language::ALL {
            for workflow in Workflow::ALL {
                for spec in catalogue(language, workflow) {
                    let text = store.load(spec.source_path).unwrap();
                    assert!(!text.is_empty(), "{} is empty", spec.source_path);
                }
            }
        }
    }

    #[test]
    fn test_core_template_uses_four_keys() {
        let text = TemplateStore::Embedded.load("_AGENTS.md").unwrap();
        assert_eq!(
            scan_tokens(&text),
            vec!["APP_NAME", "LANGUAGE_NAME", "TEST_COMMAND", "TRACKER_NAME"]
        );
    }

    #[test]
    fn test_embedded_store_unknown_path() {
        let err = TemplateStore::Embedded.load("workflows/JIRA.md").unwrap_err();
        assert!(matches!(err, SetupError::IoError(_)));
        assert!(err.to_string().contains("workflows/JIRA.md"));
    }

    #[test]
    fn test_directory_store_reads_local_checkout() {
        let temp_dir = TempDir::new().unwrap();
        fs::create_dir_all(temp_dir.path().join("languages")).unwrap();
        fs::write(temp_dir.path().join("languages/GO.md"), "local {{X}}").unwrap();

        let store = TemplateStore::from_dir(Some(temp_dir.path())).unwrap();
        assert_eq!(store.load("languages/GO.md").unwrap(), "local {{X}}");

        let err = store.load("APP.md").unwrap_err();
        assert!(err.to_string().contains("APP.md"));
    }

    #[test]
    fn test_directory_store_requires_directory() {
        let temp_dir = TempDir::new().unwrap();
        let missing = temp_dir.path().join("nope");
        let err = TemplateStore::from_dir(Some(&missing)).unwrap_err();
        assert!(matches!(err, SetupError::ConfigError(_)));
    }

    #[test]
    fn test_source_url_and_label() {
        let source = TemplateSource {
            owner: "acme".to_string(),
            repo: "playbooks".to_string(),
            git_ref: "v2".to_string(),
        };
        assert_eq!(
            source.url_for("_AGENTS.md"),
            "https://raw.githubusercontent.com/acme/playbooks/v2/_AGENTS.md"
        );
        assert_eq!(source.label(), "acme/playbooks@v2");
        assert_eq!(TemplateSource::default().label(), "pmenglund/agents@master");
    }
}

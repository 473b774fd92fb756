//! Language and workflow variant selection.
//!
//! Each variant maps to exactly one template file in the upstream set; the
//! chosen file is installed under a canonical destination name.

use crate::error::{Result, SetupError};
use serde::Serialize;
use std::fmt;

/// Language variant (selects `LANGUAGE.md`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Language {
    Go,
    Python,
}

impl Language {
    /// Every supported language, in the order shown to users.
    pub const ALL: [Language; 2] = [Language::Go, Language::Python];

    /// Parse a language from its CLI spelling.
    #[allow(clippy::should_implement_trait)]
    pub fn from_str(s: &str) -> Option<Self> {
        match s {
            "go" => Some(Self::Go),
            "python" => Some(Self::Python),
            _ => None,
        }
    }

    /// Parse a language, mapping unknown values to a configuration error.
    pub fn parse(s: &str) -> Result<Self> {
        Self::from_str(s).ok_or_else(|| {
            SetupError::ConfigError(format!(
                "unknown language '{}' (expected one of: {})",
                s,
                join(Self::ALL.iter().map(|l| l.as_str()))
            ))
        })
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Go => "go",
            Self::Python => "python",
        }
    }

    /// Path of the variant template inside the upstream set.
    pub fn source_path(self) -> &'static str {
        match self {
            Self::Go => "languages/GO.md",
            Self::Python => "languages/PYTHON.md",
        }
    }

    /// Human-facing name used for `{{LANGUAGE_NAME}}`.
    pub fn display_name(self) -> &'static str {
        match self {
            Self::Go => "Go",
            Self::Python => "Python",
        }
    }

    /// Conventional test command used when nothing better is found.
    pub fn default_test_command(self) -> &'static str {
        match self {
            Self::Go => "go test ./...",
            Self::Python => "pytest",
        }
    }
}

impl fmt::Display for Language {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Workflow variant (selects `WORKFLOW.md`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Workflow {
    Beads,
    Github,
    Linear,
    Markdown,
    Template,
}

impl Workflow {
    /// Every supported workflow, in the order shown to users.
    pub const ALL: [Workflow; 5] = [
        Workflow::Beads,
        Workflow::Github,
        Workflow::Linear,
        Workflow::Markdown,
        Workflow::Template,
    ];

    /// Parse a workflow from its CLI spelling.
    #[allow(clippy::should_implement_trait)]
    pub fn from_str(s: &str) -> Option<Self> {
        match s {
            "beads" => Some(Self::Beads),
            "github" => Some(Self::Github),
            "linear" => Some(Self::Linear),
            "markdown" => Some(Self::Markdown),
            "template" => Some(Self::Template),
            _ => None,
        }
    }

    /// Parse a workflow, mapping unknown values to a configuration error.
    pub fn parse(s: &str) -> Result<Self> {
        Self::from_str(s).ok_or_else(|| {
            SetupError::ConfigError(format!(
                "unknown workflow '{}' (expected one of: {})",
                s,
                join(Self::ALL.iter().map(|w| w.as_str()))
            ))
        })
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Beads => "beads",
            Self::Github => "github",
            Self::Linear => "linear",
            Self::Markdown => "markdown",
            Self::Template => "template",
        }
    }

    /// Path of the variant template inside the upstream set.
    pub fn source_path(self) -> &'static str {
        match self {
            Self::Beads => "workflows/BEADS.md",
            Self::Github => "workflows/GITHUB.md",
            Self::Linear => "workflows/LINEAR.md",
            Self::Markdown => "workflows/MARKDOWN.md",
            Self::Template => "workflows/TEMPLATE.md",
        }
    }

    /// Default `{{TRACKER_NAME}}` for this workflow.
    ///
    /// The blank `template` workflow is written against Linear upstream, so it
    /// falls back to the same tracker.
    pub fn tracker_name(self) -> &'static str {
        match self {
            Self::Beads => "Beads",
            Self::Github => "GitHub Issues",
            Self::Linear => "Linear",
            Self::Markdown => "Markdown tracker",
            Self::Template => "Linear",
        }
    }
}

impl fmt::Display for Workflow {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

fn join<'a>(names: impl Iterator<Item = &'a str>) -> String {
    names.collect::<Vec<_>>().join(", ")
}

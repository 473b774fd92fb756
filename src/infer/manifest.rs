//! Values derived from conventional project files.

use super::{read_text, usable};
use crate::source::{Language, Workflow};
use regex::Regex;
use std::path::Path;
use std::sync::LazyLock;

static APP_HEADING_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?m)^#\s+(.+?)\s+Architecture Notes\s*$").expect("Invalid APP.md heading regex")
});
static APP_TEST_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"Run tests locally:\s*`([^`]+)`").expect("Invalid APP.md test regex")
});
static GO_MODULE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?m)^module\s+(\S+)\s*$").expect("Invalid go.mod regex"));
static MAKE_TEST_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?m)^test\s*:").expect("Invalid Makefile regex"));
static WORD_GO_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\bGo\b").expect("Invalid language regex"));
static WORD_PYTHON_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\bPython\b").expect("Invalid language regex"));

/// A value and the file (or rule) it came from.
pub(super) type Found = (String, String);

fn found(value: impl Into<String>, from: &str) -> Found {
    (value.into(), from.to_string())
}

/// `{{APP_NAME}}`: APP.md heading, then manifests, then the directory name.
pub(super) fn app_name(target: &Path) -> Option<Found> {
    if let Some(text) = read_text(target, "APP.md")
        && let Some(name) = APP_HEADING_RE
            .captures(&text)
            .and_then(|c| usable(&c[1]))
    {
        return Some(found(name, "APP.md"));
    }

    if let Some(name) = package_json(target)
        .and_then(|json| json.get("name").and_then(|n| n.as_str()).and_then(usable))
    {
        return Some(found(name, "package.json"));
    }

    if let Some(name) = toml_string(target, "pyproject.toml", "project", "name") {
        return Some(found(name, "pyproject.toml"));
    }

    if let Some(name) = toml_string(target, "Cargo.toml", "package", "name") {
        return Some(found(name, "Cargo.toml"));
    }

    if let Some(text) = read_text(target, "go.mod")
        && let Some(caps) = GO_MODULE_RE.captures(&text)
        && let Some(name) = caps[1].trim_end_matches('/').rsplit('/').next().and_then(usable)
    {
        return Some(found(name, "go.mod"));
    }

    target
        .file_name()
        .and_then(|n| n.to_str())
        .and_then(usable)
        .map(|name| found(name, "directory name"))
}

/// `{{LANGUAGE_NAME}}`: LANGUAGE.md, then manifests, then the language choice.
pub(super) fn language_name(target: &Path, choice: Option<Language>) -> Option<Found> {
    if let Some(text) = read_text(target, "LANGUAGE.md") {
        if WORD_GO_RE.is_match(&text) {
            return Some(found(Language::Go.display_name(), "LANGUAGE.md"));
        }
        if WORD_PYTHON_RE.is_match(&text) {
            return Some(found(Language::Python.display_name(), "LANGUAGE.md"));
        }
    }

    if target.join("go.mod").exists() {
        return Some(found(Language::Go.display_name(), "go.mod"));
    }
    for marker in ["pyproject.toml", "requirements.txt"] {
        if target.join(marker).exists() {
            return Some(found(Language::Python.display_name(), marker));
        }
    }

    choice.map(|language| found(language.display_name(), "--language"))
}

/// `{{TRACKER_NAME}}`: WORKFLOW.md, then `.github/`, then the workflow choice.
pub(super) fn tracker_name(target: &Path, choice: Option<Workflow>) -> Option<Found> {
    if let Some(text) = read_text(target, "WORKFLOW.md") {
        let known = [
            ("Linear", Workflow::Linear),
            ("GitHub", Workflow::Github),
            ("Beads", Workflow::Beads),
            ("Markdown", Workflow::Markdown),
        ];
        for (needle, workflow) in known {
            if text.contains(needle) {
                return Some(found(workflow.tracker_name(), "WORKFLOW.md"));
            }
        }
    }

    if target.join(".github").exists() {
        return Some(found(Workflow::Github.tracker_name(), ".github"));
    }

    choice.map(|workflow| found(workflow.tracker_name(), "--workflow"))
}

/// `{{TEST_COMMAND}}`: APP.md, build files, manifests, then the language choice.
pub(super) fn test_command(target: &Path, choice: Option<Language>) -> Option<Found> {
    if let Some(text) = read_text(target, "APP.md")
        && let Some(command) = APP_TEST_RE.captures(&text).and_then(|c| usable(&c[1]))
    {
        return Some(found(command, "APP.md"));
    }

    if let Some(text) = read_text(target, "Makefile")
        && MAKE_TEST_RE.is_match(&text)
    {
        return Some(found("make test", "Makefile"));
    }

    if let Some(json) = package_json(target)
        && json
            .get("scripts")
            .and_then(|s| s.get("test"))
            .is_some_and(|t| t.is_string())
    {
        return Some(found("npm test", "package.json"));
    }

    if target.join("go.mod").exists() {
        return Some(found(Language::Go.default_test_command(), "go.mod"));
    }
    for marker in ["pyproject.toml", "pytest.ini"] {
        if target.join(marker).exists() {
            return Some(found(Language::Python.default_test_command(), marker));
        }
    }

    choice.map(|language| found(language.default_test_command(), "--language"))
}

fn package_json(target: &Path) -> Option<serde_json::Value> {
    let text = read_text(target, "package.json")?;
    match serde_json::from_str(&text) {
        Ok(value) => Some(value),
        Err(e) => {
            tracing::debug!(error = %e, "ignoring malformed package.json");
            None
        }
    }
}

/// Read `[table].key` as a string from a TOML file under `target`.
fn toml_string(target: &Path, file: &str, table: &str, key: &str) -> Option<String> {
    let text = read_text(target, file)?;
    let doc: toml::Table = match text.parse() {
        Ok(doc) => doc,
        Err(e) => {
            tracing::debug!(file, error = %e, "ignoring malformed TOML");
            return None;
        }
    };
    doc.get(table)?.get(key)?.as_str().and_then(usable)
}

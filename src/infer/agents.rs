//! Recover values from a previously installed `AGENTS.md`.
//!
//! The patterns mirror the sentences of the core template, so re-running the
//! installer on an already bootstrapped repository proposes the same values.

use super::{inferred, read_text, usable};
use crate::placeholder::PlaceholderMap;
use crate::source::MANDATORY_FILE;
use regex::Regex;
use std::path::Path;
use std::sync::LazyLock;

struct Pattern {
    key: &'static str,
    regex: LazyLock<Regex>,
}

macro_rules! pattern {
    ($key:expr, $re:expr) => {
        Pattern {
            key: $key,
            regex: LazyLock::new(|| Regex::new($re).expect("valid AGENTS.md pattern")),
        }
    };
}

static PATTERNS: [Pattern; 6] = [
    pattern!("LANGUAGE_NAME", r"LANGUAGE\.md[^\n]*for ([^)]+)\)\."),
    pattern!("APP_NAME", r"APP\.md[^\n]*for ([^.]+)\."),
    pattern!("TRACKER_NAME", r"Track all work in ([^:]+):"),
    pattern!("TEST_COMMAND", r"test suite locally \(`([^`]+)`\)"),
    pattern!("EPIC_ID", r"plans/([A-Z][A-Z0-9]+-\d+)\.md"),
    pattern!("TRACKER_ID", r#""([A-Z][A-Z0-9]+-\d+):"#),
];

pub(super) fn from_existing_agents(target: &Path) -> PlaceholderMap {
    let mut values = PlaceholderMap::new();
    let Some(text) = read_text(target, MANDATORY_FILE) else {
        return values;
    };

    for pattern in &PATTERNS {
        let value = pattern
            .regex
            .captures(&text)
            .and_then(|caps| caps.get(1))
            .and_then(|m| usable(m.as_str()));
        if let Some(value) = value {
            values.insert(pattern.key, value, inferred(MANDATORY_FILE));
        }
    }
    values
}

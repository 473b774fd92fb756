//! Placeholder values and their precedence.
//!
//! Values are layered: inferred (lowest), config file, then explicit `--set`
//! (highest). A later layer replaces a key wholesale, including when the new
//! value is blank; blank values then count as unresolved.

mod render;

use crate::error::{Result, SetupError};
use serde::Serialize;
use std::collections::BTreeMap;
use std::fmt;

pub use render::{Rendered, render, scan_tokens};

/// Where a placeholder value came from.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", content = "from", rename_all = "snake_case")]
pub enum ValueOrigin {
    /// Derived from a file (or git state) in the target repository.
    Inferred(String),
    /// Taken from the config file.
    Config,
    /// Passed with `--set`.
    Explicit,
}

impl fmt::Display for ValueOrigin {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ValueOrigin::Inferred(from) => write!(f, "inferred from {}", from),
            ValueOrigin::Config => write!(f, "config file"),
            ValueOrigin::Explicit => write!(f, "--set"),
        }
    }
}

/// One placeholder value with its origin.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Placeholder {
    pub value: String,
    pub origin: ValueOrigin,
}

/// Case-sensitive mapping from placeholder key to value.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct PlaceholderMap {
    values: BTreeMap<String, Placeholder>,
}

impl PlaceholderMap {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set `key`, replacing any existing value.
    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<String>, origin: ValueOrigin) {
        self.values.insert(
            key.into(),
            Placeholder {
                value: value.into(),
                origin,
            },
        );
    }

    /// Set `key` only if it is not present yet.
    pub fn insert_default(
        &mut self,
        key: impl Into<String>,
        value: impl Into<String>,
        origin: ValueOrigin,
    ) {
        self.values.entry(key.into()).or_insert_with(|| Placeholder {
            value: value.into(),
            origin,
        });
    }

    /// Overlay `other` on top of `self`; keys in `other` win.
    pub fn layer(&mut self, other: PlaceholderMap) {
        self.values.extend(other.values);
    }

    /// Build a map where every value has the same origin.
    pub fn from_values<I, K, V>(pairs: I, origin: ValueOrigin) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        let mut map = Self::new();
        for (key, value) in pairs {
            map.insert(key, value, origin.clone());
        }
        map
    }

    pub fn get(&self, key: &str) -> Option<&Placeholder> {
        self.values.get(key)
    }

    /// The value to substitute for `key`, if it is present and not blank.
    pub fn resolve(&self, key: &str) -> Option<&str> {
        self.values
            .get(key)
            .map(|p| p.value.as_str())
            .filter(|v| !v.trim().is_empty())
    }

    /// Render a template against this map.
    pub fn render(&self, template: &str) -> Rendered {
        render(template, |key| self.resolve(key))
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &Placeholder)> {
        self.values.iter().map(|(k, v)| (k.as_str(), v))
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

/// Parse repeated `KEY=VALUE` arguments into an explicit layer.
///
/// The key is trimmed; the value is kept verbatim and may contain `=`.
pub fn parse_assignments<S: AsRef<str>>(items: &[S]) -> Result<PlaceholderMap> {
    let mut map = PlaceholderMap::new();
    for item in items {
        let item = item.as_ref();
        let (key, value) = item.split_once('=').ok_or_else(|| {
            SetupError::ConfigError(format!(
                "invalid --set value '{}': expected KEY=VALUE",
                item
            ))
        })?;
        let key = key.trim();
        if key.is_empty() {
            return Err(SetupError::ConfigError(format!(
                "invalid --set value '{}': key is empty",
                item
            )));
        }
        map.insert(key, value, ValueOrigin::Explicit);
    }
    Ok(map)
}

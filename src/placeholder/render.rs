//! `{{KEY}}` placeholder substitution.
//!
//! A single left-to-right scan over the template. `KEY` is one or more ASCII
//! letters, digits, or underscores and is matched case-sensitively.
//!
//! - `{{KEY}}` with a resolved value is replaced by that value.
//! - `{{KEY}}` without a value is copied through verbatim and recorded.
//! - Anything else (`{{ }}`, `{{a-b}}`, a lone `{{`) is plain text.
//!
//! Substituted values are never rescanned, so a value that itself contains
//! `{{...}}` does not expand further.

use std::collections::BTreeSet;

/// Output of rendering one template.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Rendered {
    /// Text with every resolvable token substituted.
    pub content: String,
    /// Keys left in place because no value was available (sorted, unique).
    pub unresolved: Vec<String>,
}

/// Render `template`, asking `lookup` for each key it encounters.
pub fn render<'a, F>(template: &str, mut lookup: F) -> Rendered
where
    F: FnMut(&str) -> Option<&'a str>,
{
    let mut content = String::with_capacity(template.len());
    let mut unresolved = BTreeSet::new();
    let mut rest = template;

    while let Some(open) = rest.find("{{") {
        content.push_str(&rest[..open]);
        let after_open = &rest[open + 2..];

        match parse_key(after_open) {
            Some(key) => {
                match lookup(key) {
                    Some(value) => content.push_str(value),
                    None => {
                        content.push_str("{{");
                        content.push_str(key);
                        content.push_str("}}");
                        unresolved.insert(key.to_string());
                    }
                }
                rest = &after_open[key.len() + 2..];
            }
            None => {
                // Not a token; emit one brace so `{{{KEY}}}` still matches.
                content.push('{');
                rest = &rest[open + 1..];
            }
        }
    }
    content.push_str(rest);

    Rendered {
        content,
        unresolved: unresolved.into_iter().collect(),
    }
}

/// Every placeholder key present in `text` (sorted, unique).
pub fn scan_tokens(text: &str) -> Vec<String> {
    render(text, |_| None).unresolved
}

/// Return the key if `s` starts with `KEY}}`.
fn parse_key(s: &str) -> Option<&str> {
    let end = s.find(|c: char| !is_key_char(c)).unwrap_or(s.len());
    if end == 0 || !s[end..].starts_with("}}") {
        return None;
    }
    Some(&s[..end])
}

fn is_key_char(c: char) -> bool {
    c.is_ascii_alphanumeric() || c == '_'
}

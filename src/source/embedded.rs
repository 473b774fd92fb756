//! Template set compiled into the binary.

const AGENTS: &str = include_str!("../../templates/_AGENTS.md");
const APP: &str = include_str!("../../templates/APP.md");
const PLANS: &str = include_str!("../../templates/PLANS.md");
const LANG_GO: &str = include_str!("../../templates/languages/GO.md");
const LANG_PYTHON: &str = include_str!("../../templates/languages/PYTHON.md");
const WF_BEADS: &str = include_str!("../../templates/workflows/BEADS.md");
const WF_GITHUB: &str = include_str!("../../templates/workflows/GITHUB.md");
const WF_LINEAR: &str = include_str!("../../templates/workflows/LINEAR.md");
const WF_MARKDOWN: &str = include_str!("../../templates/workflows/MARKDOWN.md");
const WF_TEMPLATE: &str = include_str!("../../templates/workflows/TEMPLATE.md");

/// Look up an embedded template by its upstream path.
pub(super) fn lookup(source_path: &str) -> Option<&'static str> {
    let text = match source_path {
        "_AGENTS.md" => AGENTS,
        "APP.md" => APP,
        "PLANS.md" => PLANS,
        "languages/GO.md" => LANG_GO,
        "languages/PYTHON.md" => LANG_PYTHON,
        "workflows/BEADS.md" => WF_BEADS,
        "workflows/GITHUB.md" => WF_GITHUB,
        "workflows/LINEAR.md" => WF_LINEAR,
        "workflows/MARKDOWN.md" => WF_MARKDOWN,
        "workflows/TEMPLATE.md" => WF_TEMPLATE,
        _ => return None,
    };
    Some(text)
}
